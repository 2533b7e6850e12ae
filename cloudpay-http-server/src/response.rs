use actix_web::HttpResponse;
use cloudpay_lib::error::WalletError;
use serde::Serialize;

/// `{status, result}` envelope returned by every wallet route.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub result: T,
}

#[derive(Serialize, Debug)]
pub struct ValidationError {
    pub validation_error: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        ApiResponse {
            status: "success",
            result,
        }
    }

    pub fn ok(result: T) -> Self {
        ApiResponse { status: "ok", result }
    }
}

impl ApiResponse<ValidationError> {
    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            status: "error",
            result: ValidationError {
                validation_error: message.into(),
            },
        }
    }
}

/// Every wallet failure is answered with 400 and the error text.
pub fn wallet_error(e: WalletError) -> HttpResponse {
    match &e {
        WalletError::Database { .. } => log::error!("{}", e),
        WalletError::Validation(_) | WalletError::NotFound => log::warn!("{}", e),
    }
    HttpResponse::BadRequest().json(ApiResponse::error(e.to_string()))
}
