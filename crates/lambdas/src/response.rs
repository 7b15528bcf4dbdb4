//! Response shapes expected by the Lambda triggers.

use serde::Serialize;

/// API Gateway proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// 400 with a `{"error": ...}` body.
    pub fn bad_request(message: impl std::fmt::Display) -> Self {
        Self {
            status_code: 400,
            body: serde_json::json!({ "error": message.to_string() }).to_string(),
        }
    }
}

/// SQS partial batch response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqsBatchResponse {
    /// Messages SQS should deliver again.
    pub batch_item_failures: Vec<BatchItemFailure>,
}

/// A failed SQS message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailure {
    pub item_identifier: String,
}
