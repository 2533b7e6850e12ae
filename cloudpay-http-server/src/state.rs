use cloudpay_database::DbHandle;
use cloudpay_lib::external_services::webhook::WebhookForwarder;

/// Resources shared by every worker, built once in `main` and injected as `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub db: DbHandle,
    pub webhook: WebhookForwarder,
}

impl AppState {
    pub fn new(db: DbHandle, webhook: WebhookForwarder) -> Self {
        AppState { db, webhook }
    }
}
