use std::process::ExitCode;

use clap::Parser;
use pingme::{Config, NotificationKind, PingSender};
use tracing_subscriber::EnvFilter;

/// Send a short text to yourself through the ping relay.
#[derive(Debug, Parser)]
#[command(name = "send_ping")]
struct Cli {
    /// Message to send (trimmed, cut to 160 characters).
    message: String,

    /// Relay base URL; overrides PINGME_API_BASE.
    #[arg(long)]
    api_base: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env(cli.api_base.as_deref())?;
    let sender = PingSender::new(config.client()?, |kind: NotificationKind, msg: &str| {
        println!("{}: {msg}", kind.title());
    });

    sender.update_draft(cli.message);
    println!("{}\n", sender.view());

    let result = sender.send().await;
    println!("\n{}", sender.view());

    let response = result?;
    if let Some(sid) = response.sid {
        println!("sid: {sid}");
    }
    Ok(())
}
