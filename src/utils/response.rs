use serde::Serialize;

/// Response envelope shared by every resource endpoint. The console reads
/// `response.data.data` for the payload and shows `message` in its toast.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_data_and_message() {
        let body = ApiResponse::new(vec![1, 2, 3], "Fetched successfully");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["message"], "Fetched successfully");
    }
}
