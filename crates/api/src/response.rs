//! Shared response envelope for API handlers.
//!
//! Every response, success or failure, uses the
//! `{ "success": bool, "data"?, "message"?, "error"? }` shape. Absent parts
//! are omitted rather than serialized as `null`.

use serde::Serialize;

/// Standard response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::with_message(items, "3 products found")))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Successful response carrying `data` and a summary message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Failure that still carries details, e.g. the failed field list.
    pub fn failure_with(data: T, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: None,
            error: Some(error.into()),
        }
    }
}

impl ApiResponse<()> {
    /// Failure with only an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_parts_are_omitted() {
        let json = serde_json::to_value(ApiResponse::failure("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "error": "nope" }));
    }

    #[test]
    fn message_accompanies_data() {
        let json = serde_json::to_value(ApiResponse::with_message(vec![1, 2], "2 found")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["message"], "2 found");
        assert!(json.get("error").is_none());
    }
}
