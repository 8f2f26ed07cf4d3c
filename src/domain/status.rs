use std::fmt;

/// Progress of the current send attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SendStatus {
    /// Ready for input; the submit control is available.
    #[default]
    Idle,
    /// A request is in flight.
    Sending,
    /// The last attempt was accepted by the relay.
    Ok,
    /// The last attempt failed.
    Error,
}

impl SendStatus {
    /// `Ok` and `Error` are the outcomes a settled send can leave behind.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Ok | Self::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sending => "sending",
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
