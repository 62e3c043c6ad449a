//! Success envelope wrapped around every JSON payload.

use serde::Serialize;

/// `{ "data": ..., "message": ..., "success": true }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: Option<String>,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            message: None,
            success: true,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
            success: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::ok(42)).unwrap();
        assert_eq!(json, serde_json::json!({"data": 42, "message": null, "success": true}));

        let json = serde_json::to_value(ApiResponse::with_message("x", "Created")).unwrap();
        assert_eq!(json["message"], "Created");
    }
}
