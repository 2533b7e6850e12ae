use actix_web::{post, web, HttpResponse};
use cloudpay_lib::error::WebhookError;
use cloudpay_lib::models::webhook::{MissingCallbackUrl, ProxyWebhookInfo, WebhookFailure};

use crate::state::AppState;

/// Proxy Webhook.
///
/// Forwards `payload` as URL-encoded form data to `callbackUrl` so the
/// simulator page can reach callbacks without CORS.
///
/// # Example
/// ```plaintext
/// curl -X POST http://localhost:8080/api/proxy-webhook \
///   -H 'content-type: application/json' \
///   -d '{"callbackUrl": "https://shop.example/webhook", "payload": {"status": "success"}}'
/// ```
///
/// # Response
/// ```
/// {"success": true, "status": 200, "statusText": "OK", "body": "ok"}
/// ```
#[post("/api/proxy-webhook")]
pub async fn proxy_webhook(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let forwarded = match serde_json::from_slice::<ProxyWebhookInfo>(&body) {
        Ok(info) => state.webhook.forward(info).await,
        Err(e) => Err(WebhookError::from(e)),
    };

    match forwarded {
        Ok(relay) => HttpResponse::Ok().json(relay),
        Err(WebhookError::MissingCallbackUrl) => HttpResponse::BadRequest().json(MissingCallbackUrl {
            error: WebhookError::MissingCallbackUrl.to_string(),
        }),
        Err(e) => {
            log::error!("Proxy webhook error: {}", e);
            HttpResponse::InternalServerError().json(WebhookFailure::new(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use cloudpay_database::DbHandle;
    use cloudpay_lib::external_services::webhook::{WebhookForwarder, WEBHOOK_USER_AGENT};
    use httpmock::{Method::POST, MockServer};
    use serde_json::{json, Value};

    use crate::router::configure;
    use crate::state::AppState;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(DbHandle::disconnected(), WebhookForwarder::new()))
    }

    #[actix_web::test]
    async fn missing_callback_url() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/proxy-webhook")
            .set_json(json!({"payload": {"status": "success"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Callback URL is required"}));
    }

    #[actix_web::test]
    async fn unreachable_callback() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/proxy-webhook")
            .set_json(json!({
                "callbackUrl": "http://127.0.0.1:1/webhook",
                "payload": {"status": "success"}
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 500);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn body_that_is_not_json() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/proxy-webhook")
            .set_payload("callbackUrl=http://x")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 500);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn relays_callback_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/webhook")
                    .header("user-agent", WEBHOOK_USER_AGENT)
                    .body("status=failed&invoice_id=IZY5FACO&amount_crypto=0.05&currency=USDT_TRC20&order_id=o1&token=&invoice_info=links_invoice");
                then.status(202).body("queued");
            })
            .await;

        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/proxy-webhook")
            .set_json(json!({
                "callbackUrl": server.url("/webhook"),
                "payload": {
                    "status": "failed",
                    "invoice_id": "IZY5FACO",
                    "amount_crypto": "0.05",
                    "currency": "USDT_TRC20",
                    "order_id": "o1",
                    "token": "",
                    "invoice_info": "links_invoice"
                }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        mock.assert_async().await;
        assert_eq!(
            body,
            json!({"success": true, "status": 202, "statusText": "Accepted", "body": "queued"})
        );
    }
}
