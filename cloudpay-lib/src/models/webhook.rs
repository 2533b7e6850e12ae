use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/proxy-webhook`.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyWebhookInfo {
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub payload: Value,
}

/// What the callback answered, relayed back to the caller.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WebhookRelay {
    pub success: bool,
    pub status: u16,
    #[serde(rename = "statusText")]
    pub status_text: String,
    pub body: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WebhookFailure {
    pub success: bool,
    pub error: String,
}

impl WebhookFailure {
    pub fn new(error: impl Into<String>) -> Self {
        WebhookFailure {
            success: false,
            error: error.into(),
        }
    }
}

/// Returned when the request carries no callback URL.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MissingCallbackUrl {
    pub error: String,
}
