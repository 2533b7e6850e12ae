use actix_web::{error::InternalError, web, HttpResponse, Responder};
use cloudpay_lib::core::static_wallet::count_static_wallets;

use crate::response::ApiResponse;
use crate::state::AppState;

pub mod simulator;
pub mod static_wallet;
pub mod webhook;

/// Register every route. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/api", "/api/"]).route(web::get().to(health)))
        .service(
            web::scope("/api/v2/invoice/static")
                .service(static_wallet::create)
                .service(static_wallet::list)
                .service(static_wallet::subscribe),
        )
        .service(webhook::proxy_webhook)
        .service(simulator::simulate_payment);
}

/// Bodies that fail to parse get the same 400 envelope as a missing field.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ApiResponse::error(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

/// Count all wallets
///
/// # Example
/// ```plaintext
/// curl http://localhost:8080/api/
/// ```
///
/// # Response
/// ```
/// {"status": "ok", "result": {"wallet_count": 12}}
/// ```
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    match count_static_wallets(&state.db).await {
        Ok(count) => HttpResponse::Ok().json(ApiResponse::ok(count)),
        Err(e) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use cloudpay_database::sea_orm::{DatabaseBackend, MockDatabase, Value};
    use cloudpay_database::DbHandle;
    use cloudpay_lib::external_services::webhook::WebhookForwarder;
    use serde_json::{json, Value as Json};
    use std::collections::BTreeMap;

    #[actix_web::test]
    async fn health_counts_wallets() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(3)),
            )])]])
            .into_connection();
        let state = AppState::new(DbHandle::new(conn), WebhookForwarder::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Json = test::read_body_json(resp).await;
        assert_eq!(body, json!({"status": "ok", "result": {"wallet_count": 3}}));
    }

    #[actix_web::test]
    async fn health_reports_database_error() {
        let state = AppState::new(DbHandle::disconnected(), WebhookForwarder::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);
        let body: Json = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert!(body["result"]["validation_error"]
            .as_str()
            .unwrap()
            .contains("Database connection is not established"));
    }
}
