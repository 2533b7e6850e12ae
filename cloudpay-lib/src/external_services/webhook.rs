use reqwest::header;
use serde_json::Value;
use url::form_urlencoded;

use crate::core::simulator::PaymentFormData;
use crate::error::WebhookError;
use crate::models::webhook::{ProxyWebhookInfo, WebhookRelay};

pub const WEBHOOK_USER_AGENT: &str = "CryptoCloud-Webhook-Simulator/1.0";

/// Posts simulated payment webhooks to caller-supplied URLs.
///
/// There is no timeout, retry or host allow-list: a slow callback keeps the
/// request open for as long as it takes to answer.
#[derive(Clone, Debug, Default)]
pub struct WebhookForwarder {
    client: reqwest::Client,
}

impl WebhookForwarder {
    pub fn new() -> Self {
        WebhookForwarder {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        WebhookForwarder { client }
    }

    /// Forward `payload` as form data to `callbackUrl` and report what came back.
    pub async fn forward(&self, info: ProxyWebhookInfo) -> Result<WebhookRelay, WebhookError> {
        let callback_url = info
            .callback_url
            .filter(|url| !url.is_empty())
            .ok_or(WebhookError::MissingCallbackUrl)?;

        let response = self
            .client
            .post(&callback_url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::USER_AGENT, WEBHOOK_USER_AGENT)
            .body(encode_form(&info.payload))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::info!("Webhook to {} answered {}", callback_url, status);

        Ok(WebhookRelay {
            success: status.is_success(),
            status: status.as_u16(),
            // Canonical phrase for the status code; a custom reason sent upstream is not kept.
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }

    /**
     * Send a simulator form through the proxy endpoint of a running server
     *
     * # Arguments
     * @param server_url: &str - Base URL of the server, e.g. http://localhost:8080
     * @param form: &PaymentFormData - The simulator form
     *
     * # Returns
     * @return Result<Value, WebhookError> - The JSON the proxy answered with, whatever its status
     */
    pub async fn send_through_proxy(
        &self,
        server_url: &str,
        form: &PaymentFormData,
    ) -> Result<Value, WebhookError> {
        let url = format!("{}/api/proxy-webhook", server_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(&form.to_proxy_request()?)
            .send()
            .await?;
        Ok(response.json::<Value>().await?)
    }
}

/// Flatten a JSON payload into `application/x-www-form-urlencoded` pairs.
///
/// Objects become one pair per member. A string is read as a query string.
/// An array is read as `[key, value]` entries; entries of any other shape are skipped.
/// Anything else yields an empty body.
pub fn encode_form(payload: &Value) -> String {
    let mut form = form_urlencoded::Serializer::new(String::new());
    match payload {
        Value::Object(members) => {
            for (key, value) in members {
                form.append_pair(key, &form_value(value));
            }
        }
        Value::Array(entries) => {
            for entry in entries {
                if let Some([key, value]) = entry.as_array().map(Vec::as_slice) {
                    form.append_pair(&form_value(key), &form_value(value));
                }
            }
        }
        Value::String(query) => {
            let query = query.strip_prefix('?').unwrap_or(query);
            for (key, value) in form_urlencoded::parse(query.as_bytes()) {
                form.append_pair(&key, &value);
            }
        }
        _ => {}
    }
    form.finish()
}

fn form_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => form_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
