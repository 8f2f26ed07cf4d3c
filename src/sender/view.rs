use std::fmt;

use crate::domain::{DraftMessage, SendStatus};

/// What sits where the submit button normally is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitControl {
    /// The send button; available to the user.
    Button,
    /// A progress indicator shown while a request is in flight.
    Progress,
}

/// Snapshot of everything the ping form displays.
///
/// Rendering is left to the host; [`fmt::Display`] gives a plain-text rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub placeholder: &'static str,
    pub max_input_chars: usize,
    pub draft: String,
    pub status: SendStatus,
    pub submit: SubmitControl,
    pub error_text: Option<String>,
    pub success_text: Option<&'static str>,
    pub footer: String,
}

impl FormView {
    pub const TITLE: &'static str = "Ping Me";
    pub const PLACEHOLDER: &'static str = "Type a message to yourself…";
    pub const SUCCESS_TEXT: &'static str = "Sent!";

    pub(crate) fn new(
        draft: &DraftMessage,
        status: SendStatus,
        error: Option<&str>,
        api_base: &str,
    ) -> Self {
        let submit = if status == SendStatus::Sending {
            SubmitControl::Progress
        } else {
            SubmitControl::Button
        };

        Self {
            title: Self::TITLE,
            placeholder: Self::PLACEHOLDER,
            max_input_chars: DraftMessage::MAX_CHARS,
            draft: draft.as_str().to_owned(),
            status,
            submit,
            error_text: error.map(ToOwned::to_owned),
            success_text: (status == SendStatus::Ok).then_some(Self::SUCCESS_TEXT),
            footer: format!("API: {api_base}"),
        }
    }

    /// Whether the user can start a send right now.
    pub fn can_submit(&self) -> bool {
        self.submit == SubmitControl::Button
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.draft.is_empty() {
            writeln!(f, "> {}", self.placeholder)?;
        } else {
            writeln!(f, "> {}", self.draft)?;
        }
        match self.submit {
            SubmitControl::Button => writeln!(f, "[ Send ]")?,
            SubmitControl::Progress => writeln!(f, "[ sending… ]")?,
        }
        if let Some(error) = &self.error_text {
            writeln!(f, "! {error}")?;
        }
        if let Some(success) = self.success_text {
            writeln!(f, "{success}")?;
        }
        write!(f, "{}", self.footer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_view_shows_button_and_footer() {
        let draft = DraftMessage::new("");
        let view = FormView::new(&draft, SendStatus::Idle, None, "http://192.168.1.200:5001");

        assert!(view.can_submit());
        assert_eq!(view.success_text, None);
        assert_eq!(view.footer, "API: http://192.168.1.200:5001");
        assert_eq!(view.max_input_chars, 200);
        assert_eq!(
            view.to_string(),
            "Ping Me\n> Type a message to yourself…\n[ Send ]\nAPI: http://192.168.1.200:5001"
        );
    }

    #[test]
    fn sending_view_swaps_button_for_progress() {
        let draft = DraftMessage::new("hello");
        let view = FormView::new(&draft, SendStatus::Sending, None, "http://h");
        assert_eq!(view.submit, SubmitControl::Progress);
        assert!(!view.can_submit());
    }

    #[test]
    fn settled_views_show_inline_feedback() {
        let draft = DraftMessage::new("");
        let ok = FormView::new(&draft, SendStatus::Ok, None, "http://h");
        assert_eq!(ok.success_text, Some("Sent!"));

        let draft = DraftMessage::new("hello");
        let failed = FormView::new(&draft, SendStatus::Error, Some("HTTP 500"), "http://h");
        assert_eq!(failed.success_text, None);
        assert_eq!(failed.error_text.as_deref(), Some("HTTP 500"));
        assert!(failed.to_string().contains("! HTTP 500"));
    }
}
