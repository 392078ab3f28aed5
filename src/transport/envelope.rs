//! Response envelope shared by every platform endpoint
//!
//! The platform wraps each payload as `{success, data, message?, code?}`.
//! `code` is sent as a string by some services and as a number by others,
//! so it is kept as raw JSON and normalized on read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::TransportError;

/// Generic API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub code: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            code: None,
        }
    }

    /// Error code as a string, whether the server sent `"409"` or `409`
    pub fn code_str(&self) -> Option<String> {
        normalize_code(self.code.as_ref())
    }

    /// Unwrap the payload, turning `success: false` into a rejection
    pub fn into_data(self) -> Result<T, TransportError> {
        if !self.success {
            let code = self.code_str();
            return Err(TransportError::Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| "Request rejected by server".to_string()),
                code,
            });
        }

        self.data
            .ok_or_else(|| TransportError::InvalidResponse("Missing response data".to_string()))
    }
}

/// Parse an error body, falling back to the raw text when it is not an envelope
///
/// An envelope without a message yields an empty message.
pub(crate) fn parse_error_body(body: &str) -> (String, Option<String>) {
    match serde_json::from_str::<ApiResponse<serde_json::Value>>(body) {
        Ok(envelope) => {
            let code = envelope.code_str();
            (envelope.message.unwrap_or_default(), code)
        }
        Err(_) => (body.to_string(), None),
    }
}

fn normalize_code(code: Option<&serde_json::Value>) -> Option<String> {
    match code? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Paginated list returned by log and waiting-list queries
///
/// Services disagree on the item field name; both `records` and `content`
/// are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "records", alias = "content")]
    pub items: Vec<T>,

    #[serde(default, alias = "totalElements")]
    pub total: u64,

    #[serde(default, alias = "current")]
    pub page: u32,

    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    /// Number of pages implied by `total` and `size`
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total.div_ceil(u64::from(self.size))
        }
    }

    /// Whether another page follows this one (pages are 1-based)
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

/// Decode a full envelope from a response body
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    body: &str,
) -> Result<ApiResponse<T>, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_data_success() {
        let response: ApiResponse<bool> =
            serde_json::from_str(r#"{"success":true,"data":true}"#).unwrap();
        assert!(response.into_data().unwrap());
    }

    #[test]
    fn test_into_data_rejected_keeps_message_and_code() {
        let response: ApiResponse<bool> = serde_json::from_str(
            r#"{"success":false,"message":"room locked","code":423}"#,
        )
        .unwrap();

        match response.into_data() {
            Err(TransportError::Rejected { message, code }) => {
                assert_eq!(message, "room locked");
                assert_eq!(code.as_deref(), Some("423"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_into_data_missing_data() {
        let response: ApiResponse<bool> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            response.into_data(),
            Err(TransportError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"success":false,"message":"version mismatch","code":"VERSION_CONFLICT"}"#;
        let (message, code) = parse_error_body(body);
        assert_eq!(message, "version mismatch");
        assert_eq!(code.as_deref(), Some("VERSION_CONFLICT"));

        let (message, code) = parse_error_body("Bad Gateway");
        assert_eq!(message, "Bad Gateway");
        assert!(code.is_none());

        let (message, code) = parse_error_body(r#"{"success":false,"code":409}"#);
        assert!(message.is_empty());
        assert_eq!(code.as_deref(), Some("409"));
    }

    #[test]
    fn test_page_aliases() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"records":[1,2],"total":5,"current":1,"size":2}"#).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());

        let page: Page<u32> =
            serde_json::from_str(r#"{"content":[3],"totalElements":5,"page":3,"size":2}"#)
                .unwrap();
        assert_eq!(page.items, vec![3]);
        assert!(!page.has_next());
    }
}
