//! Inbound payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One role-tagged message from the calling application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author role, e.g. "user" or "assistant".
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Body of `POST /v1/guard`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GuardRequest {
    /// Conversation messages; inspection content is selected from these.
    #[validate(length(max = 64, message = "at most 64 messages per request"))]
    pub messages: Vec<ChatMessage>,
    /// Caller-supplied request identifier; generated when absent.
    #[serde(default)]
    pub request_id: Option<String>,
    /// Opaque metadata recorded verbatim on the audit entry.
    #[serde(default)]
    pub metadata: Option<String>,
}

/// Body of `POST /v1/inspect`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InspectRequest {
    #[validate(length(max = 100000, message = "text exceeds the inspection size limit"))]
    pub text: String,
}

/// Query parameters of `GET /v1/logs`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LogsQuery {
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_request_accepts_minimal_body() {
        let req: GuardRequest = serde_json::from_str(r#"{"messages":[]}"#).unwrap();
        assert!(req.messages.is_empty());
        assert!(req.request_id.is_none());
        req.validate().unwrap();
    }

    #[test]
    fn test_guard_request_message_cap() {
        let messages: Vec<ChatMessage> = (0..65).map(|i| ChatMessage::new("user", format!("m{i}"))).collect();
        let req = GuardRequest {
            messages,
            request_id: None,
            metadata: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_inspect_request_size_limit() {
        let req = InspectRequest {
            text: "a".repeat(100001),
        };
        assert!(req.validate().is_err());
    }
}
