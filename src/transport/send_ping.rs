use serde::{Deserialize, Serialize};

use crate::domain::{MessageBody, SendPingResponse};

#[derive(Debug, Serialize)]
struct SendPingJsonRequest<'a> {
    message_body: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SendPingJsonResponse {
    #[serde(default)]
    status: Option<TransportText>,
    #[serde(default)]
    message: Option<TransportText>,
    #[serde(default)]
    sid: Option<TransportText>,
}

/// Field the relay normally sends as a string. Ad-hoc error bodies may carry a
/// number or boolean instead: truthy scalars are kept as text, `0`, `false`,
/// objects and arrays are dropped instead of failing the whole body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TransportText {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Other(serde::de::IgnoredAny),
}

impl TransportText {
    fn into_string(self) -> Option<String> {
        match self {
            Self::String(value) => Some(value),
            Self::Number(value) if value.as_f64() != Some(0.0) => Some(value.to_string()),
            Self::Bool(true) => Some("true".to_owned()),
            Self::Number(_) | Self::Bool(false) | Self::Other(_) => None,
        }
    }
}

pub fn encode_send_ping_json(body: &MessageBody) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SendPingJsonRequest {
        message_body: body.as_str(),
    })
}

/// Decode a response body. Anything that is not a JSON object counts as `{}`.
pub fn decode_send_ping_json_response(body: &str) -> SendPingResponse {
    let parsed = serde_json::from_str::<SendPingJsonResponse>(body).unwrap_or_default();

    SendPingResponse {
        status: parsed.status.and_then(TransportText::into_string),
        message: parsed.message.and_then(TransportText::into_string),
        sid: parsed.sid.and_then(TransportText::into_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_message_body_field() {
        let body = MessageBody::new("  hi \"there\"  ").unwrap();
        let json = encode_send_ping_json(&body).unwrap();
        assert_eq!(json, r#"{"message_body":"hi \"there\""}"#);
    }

    #[test]
    fn decode_success_body() {
        let json = r#"
        {
          "status": "success",
          "message": "SMS successfully queued by Twilio.",
          "sid": "SM_API_SUCCESS"
        }
        "#;

        let resp = decode_send_ping_json_response(json);
        assert!(resp.is_success());
        assert_eq!(resp.message(), Some("SMS successfully queued by Twilio."));
        assert_eq!(resp.sid.as_deref(), Some("SM_API_SUCCESS"));
    }

    #[test]
    fn decode_error_body_without_sid() {
        let json = r#"{"status": "fail", "message": "Message content cannot be empty."}"#;

        let resp = decode_send_ping_json_response(json);
        assert!(!resp.is_success());
        assert_eq!(resp.status.as_deref(), Some("fail"));
        assert_eq!(resp.message(), Some("Message content cannot be empty."));
        assert_eq!(resp.sid, None);
    }

    #[test]
    fn decode_treats_malformed_bodies_as_empty_object() {
        let bodies = [
            "",
            "   ",
            "<html>502 Bad Gateway</html>",
            "{ not json }",
            "[1, 2]",
            "null",
            "\"success\"",
        ];
        for body in bodies {
            assert_eq!(
                decode_send_ping_json_response(body),
                SendPingResponse::default(),
                "body {body:?}"
            );
        }
    }

    #[test]
    fn decode_ignores_structured_and_falsy_fields() {
        let json = r#"{"status": ["x"], "message": {"detail": "x"}, "ok": true}"#;
        assert_eq!(
            decode_send_ping_json_response(json),
            SendPingResponse::default()
        );

        let json = r#"{"status": "error", "message": null, "sid": false}"#;
        let resp = decode_send_ping_json_response(json);
        assert_eq!(resp.status.as_deref(), Some("error"));
        assert_eq!(resp.message, None);
        assert_eq!(resp.sid, None);

        let json = r#"{"status": "error", "message": 0}"#;
        assert_eq!(decode_send_ping_json_response(json).message, None);
    }

    #[test]
    fn decode_keeps_truthy_scalars_as_text() {
        let json = r#"{"status": 1, "message": 42, "sid": true}"#;
        let resp = decode_send_ping_json_response(json);
        assert_eq!(resp.status.as_deref(), Some("1"));
        assert!(!resp.is_success());
        assert_eq!(resp.message(), Some("42"));
        assert_eq!(resp.sid.as_deref(), Some("true"));

        let json = r#"{"message": -1.5}"#;
        assert_eq!(decode_send_ping_json_response(json).message(), Some("-1.5"));
    }
}
