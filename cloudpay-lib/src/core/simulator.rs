use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::webhook::ProxyWebhookInfo;

/// Key the simulator form state is saved under (browser localStorage, CLI state file).
pub const STORAGE_KEY: &str = "crypto_cloud_payment_simulator";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UsdtCurrencyCode {
    #[serde(rename = "USDT_TRC20")]
    Trc20,
    #[serde(rename = "USDT_ERC20")]
    Erc20,
    #[default]
    #[serde(rename = "USDT_BSC")]
    Bsc,
    #[serde(rename = "USDT_TON")]
    Ton,
    #[serde(rename = "USDT_SOL")]
    Sol,
    #[serde(rename = "USDT_ARB")]
    Arb,
    #[serde(rename = "USDT_OPT")]
    Opt,
    #[serde(rename = "USDT_BASE")]
    Base,
}

impl UsdtCurrencyCode {
    pub const ALL: [UsdtCurrencyCode; 8] = [
        UsdtCurrencyCode::Trc20,
        UsdtCurrencyCode::Erc20,
        UsdtCurrencyCode::Bsc,
        UsdtCurrencyCode::Ton,
        UsdtCurrencyCode::Sol,
        UsdtCurrencyCode::Arb,
        UsdtCurrencyCode::Opt,
        UsdtCurrencyCode::Base,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            UsdtCurrencyCode::Trc20 => "USDT_TRC20",
            UsdtCurrencyCode::Erc20 => "USDT_ERC20",
            UsdtCurrencyCode::Bsc => "USDT_BSC",
            UsdtCurrencyCode::Ton => "USDT_TON",
            UsdtCurrencyCode::Sol => "USDT_SOL",
            UsdtCurrencyCode::Arb => "USDT_ARB",
            UsdtCurrencyCode::Opt => "USDT_OPT",
            UsdtCurrencyCode::Base => "USDT_BASE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UsdtCurrencyCode::Trc20 => "USDT (TRC20)",
            UsdtCurrencyCode::Erc20 => "USDT (ERC20)",
            UsdtCurrencyCode::Bsc => "USDT (BSC)",
            UsdtCurrencyCode::Ton => "USDT (TON)",
            UsdtCurrencyCode::Sol => "USDT (SOL)",
            UsdtCurrencyCode::Arb => "USDT (ARB)",
            UsdtCurrencyCode::Opt => "USDT (OPT)",
            UsdtCurrencyCode::Base => "USDT (BASE)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UsdtCurrencyCode::Trc20 => "Tron Network",
            UsdtCurrencyCode::Erc20 => "Ethereum Network",
            UsdtCurrencyCode::Bsc => "Binance Smart Chain",
            UsdtCurrencyCode::Ton => "TON Network",
            UsdtCurrencyCode::Sol => "Solana Network",
            UsdtCurrencyCode::Arb => "Arbitrum Network",
            UsdtCurrencyCode::Opt => "Optimism Network",
            UsdtCurrencyCode::Base => "Base Network",
        }
    }
}

impl fmt::Display for UsdtCurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UsdtCurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UsdtCurrencyCode::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = UsdtCurrencyCode::ALL.iter().map(|c| c.code()).collect();
                format!("unknown network {}, expected one of {}", s, known.join(", "))
            })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown status {}, expected success or failed", other)),
        }
    }
}

/// Simulator form state, saved as one JSON blob under `STORAGE_KEY`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentFormData {
    pub callback_url: String,
    pub currency: UsdtCurrencyCode,
    pub amount: String,
    pub order_id: String,
    pub invoice_id: String,
    pub status: PaymentStatus,
}

/// Form fields posted to the callback, in the order the callback receives them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WebhookPayload {
    pub status: PaymentStatus,
    pub invoice_id: String,
    pub amount_crypto: String,
    pub currency: UsdtCurrencyCode,
    pub order_id: String,
    pub token: String,
    pub invoice_info: String,
}

impl From<&PaymentFormData> for WebhookPayload {
    fn from(form: &PaymentFormData) -> Self {
        WebhookPayload {
            status: form.status,
            invoice_id: form.invoice_id.clone(),
            amount_crypto: form.amount.clone(),
            currency: form.currency,
            order_id: form.order_id.clone(),
            token: String::new(),
            invoice_info: "links_invoice".to_string(),
        }
    }
}

impl PaymentFormData {
    pub fn payload(&self) -> WebhookPayload {
        WebhookPayload::from(self)
    }

    /// Body for `POST /api/proxy-webhook`.
    pub fn to_proxy_request(&self) -> Result<ProxyWebhookInfo, serde_json::Error> {
        Ok(ProxyWebhookInfo {
            callback_url: Some(self.callback_url.clone()),
            payload: serde_json::to_value(self.payload())?,
        })
    }
}

/// Message shown to the user once the proxy answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationFeedback {
    pub success: bool,
    pub message: String,
}

impl SimulationFeedback {
    /// Interpret the JSON returned by the proxy endpoint.
    pub fn from_proxy_response(response: &Value) -> Self {
        let text = |key: &str| response.get(key).and_then(Value::as_str).unwrap_or_default();

        if response.get("success").and_then(Value::as_bool) == Some(true) {
            let body = match text("body") {
                "" => "No response body",
                body => body,
            };
            SimulationFeedback {
                success: true,
                message: format!(
                    "Payment webhook sent successfully! Status: {}. Response: {}",
                    response.get("status").cloned().unwrap_or(Value::Null),
                    body
                ),
            }
        } else {
            let detail = match text("error") {
                "" => format!(
                    "Status: {} {}",
                    response.get("status").cloned().unwrap_or(Value::Null),
                    text("statusText")
                ),
                error => error.to_string(),
            };
            SimulationFeedback {
                success: false,
                message: format!("Failed to send webhook. {}", detail),
            }
        }
    }
}
