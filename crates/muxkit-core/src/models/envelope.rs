use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response wrapper returned by every proxy route.
///
/// Success: `{"success": true, "data": ...}` (or `"message"` for routes with no
/// payload). Failure: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Payload of a successful envelope that carries data.
    ///
    /// A failed envelope yields its error text; a successful one without data
    /// yields a description of what is missing.
    pub fn into_data(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("Response did not include data".to_string()),
            (false, _) => Err(self
                .error
                .unwrap_or_else(|| "Unknown error".to_string())),
        }
    }
}
