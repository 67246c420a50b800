//! Transport failures and their conversion into display text

/// Fallback shown when a failure carries no usable text at all
pub const GENERIC_ERROR: &str = "Unknown error";

/// A failed request against the address service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    /// No response at all (connection refused, timeout, ...).
    #[error("{0}")]
    Network(String),
    /// A success response whose body did not have the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Raw text captured with the failure
    pub fn captured_text(&self) -> &str {
        match self {
            TransportError::Status { body, .. } => body,
            TransportError::Network(message) => message,
            TransportError::Decode(message) => message,
        }
    }
}

/// Pull a server-provided message out of a structured error body.
///
/// Looks for an `error` field first, then `message`. Anything that is not a
/// JSON object with a string in one of those fields yields `None`.
pub fn extract_message(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| object.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// Display text for captured failure text
pub fn normalize_text(text: &str) -> String {
    if let Some(message) = extract_message(text) {
        return message;
    }
    let raw = text.trim();
    if raw.is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        raw.to_string()
    }
}

/// Display text for a transport failure
pub fn normalize_error(err: &TransportError) -> String {
    let text = err.captured_text();
    if text.trim().is_empty() {
        let generic = err.to_string();
        if generic.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            generic
        }
    } else {
        normalize_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_field() {
        assert_eq!(normalize_text(r#"{"error":"bad address"}"#), "bad address");
    }

    #[test]
    fn test_structured_message_field() {
        assert_eq!(
            normalize_text(r#"{"message":"Address not found"}"#),
            "Address not found"
        );
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(normalize_text("plain text"), "plain text");
    }

    #[test]
    fn test_empty_text_falls_back() {
        let msg = normalize_text("");
        assert!(!msg.is_empty());
        assert_eq!(msg, GENERIC_ERROR);
    }

    #[test]
    fn test_json_without_message_is_raw() {
        assert_eq!(normalize_text(r#"{"code":42}"#), r#"{"code":42}"#);
        assert_eq!(normalize_text(r#"["error"]"#), r#"["error"]"#);
        assert_eq!(normalize_text(r#"{"error":17}"#), r#"{"error":17}"#);
    }

    #[test]
    fn test_status_error_prefers_body() {
        let err = TransportError::Status {
            status: 400,
            body: r#"{"error":"Address already exists"}"#.to_string(),
        };
        assert_eq!(normalize_error(&err), "Address already exists");
    }

    #[test]
    fn test_status_error_without_body() {
        let err = TransportError::Status {
            status: 502,
            body: String::new(),
        };
        assert_eq!(normalize_error(&err), "request failed with status 502");
    }

    #[test]
    fn test_network_error_text() {
        let err = TransportError::Network("Connection failed: refused".to_string());
        assert_eq!(normalize_error(&err), "Connection failed: refused");
    }
}
