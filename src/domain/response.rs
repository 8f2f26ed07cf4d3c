/// Decoded body of a `POST /send-ping` response.
///
/// Every field is optional: the relay only guarantees `status` and `message`, and a
/// body that is not a JSON object decodes to [`SendPingResponse::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendPingResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub sid: Option<String>,
}

impl SendPingResponse {
    /// Value of `status` that marks an accepted ping.
    pub const SUCCESS: &'static str = "success";

    /// Returns `true` if `status` is exactly `"success"`.
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(Self::SUCCESS)
    }

    /// Server-supplied message, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|msg| !msg.is_empty())
    }
}
