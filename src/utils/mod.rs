use axum::Json;
use serde::Serialize;

/// Envelope used by every mutating endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn success_to_api_response<T: Serialize>(message: &str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    })
}

pub fn ack(message: &str) -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_omits_data() {
        let Json(body) = ack("Logged out");
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"success": true, "message": "Logged out"})
        );
    }

    #[test]
    fn success_carries_data() {
        let Json(body) = success_to_api_response("ok", vec![1, 2]);
        assert_eq!(serde_json::to_value(body).unwrap()["data"], serde_json::json!([1, 2]));
    }
}
