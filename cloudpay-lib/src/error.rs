use cloudpay_database::sea_orm::DbErr;
use thiserror::Error;

/// Failures of the static wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Missing or malformed caller input.
    #[error("{0}")]
    Validation(String),
    #[error("Wallet not found")]
    NotFound,
    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: DbErr,
    },
}

impl WalletError {
    pub fn validation(message: impl Into<String>) -> Self {
        WalletError::Validation(message.into())
    }

    pub(crate) fn database(context: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| WalletError::Database { context, source }
    }
}

/// Failures of the webhook proxy.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Callback URL is required")]
    MissingCallbackUrl,
    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}
