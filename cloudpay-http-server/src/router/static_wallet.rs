use actix_web::{post, web, HttpResponse, Responder};
use cloudpay_lib::core::static_wallet::{
    create_static_wallet, list_static_wallets, subscribe_static_wallet,
};
use cloudpay_lib::models::static_wallet::{
    CreateStaticWalletInfo, ListStaticWalletsInfo, SubscribeStaticWalletInfo,
};

use crate::response::{wallet_error, ApiResponse};
use crate::state::AppState;

/**
 * Create a static wallet
 *
 * A `null` body is read as `{}` here and in the other wallet routes.
 *
 * # Arguments
 * @param info: web::Json<Option<CreateStaticWalletInfo>> - shop_id, currency and identify
 *
 * # Returns
 * @return HttpResponse - The new wallet, or a validation error
 */
#[post("/create")]
pub async fn create(
    state: web::Data<AppState>,
    info: web::Json<Option<CreateStaticWalletInfo>>,
) -> impl Responder {
    match create_static_wallet(&state.db, info.into_inner().unwrap_or_default()).await {
        Ok(wallet) => HttpResponse::Ok().json(ApiResponse::success(wallet)),
        Err(e) => wallet_error(e),
    }
}

/**
 * List the static wallets of a shop
 *
 * # Arguments
 * @param info: web::Json<Option<ListStaticWalletsInfo>> - shop_id, offset, limit, start and end
 *
 * # Returns
 * @return HttpResponse - `{staticWallets, all_count}`, or a validation error
 */
#[post("/list")]
pub async fn list(
    state: web::Data<AppState>,
    info: web::Json<Option<ListStaticWalletsInfo>>,
) -> impl Responder {
    match list_static_wallets(&state.db, info.into_inner().unwrap_or_default()).await {
        Ok(wallets) => HttpResponse::Ok().json(ApiResponse::success(wallets)),
        Err(e) => wallet_error(e),
    }
}

/**
 * Activate a static wallet
 *
 * # Arguments
 * @param info: web::Json<Option<SubscribeStaticWalletInfo>> - The wallet uuid
 *
 * # Returns
 * @return HttpResponse - The activated wallet, or a validation error
 */
#[post("/subscribe")]
pub async fn subscribe(
    state: web::Data<AppState>,
    info: web::Json<Option<SubscribeStaticWalletInfo>>,
) -> impl Responder {
    match subscribe_static_wallet(&state.db, info.into_inner().unwrap_or_default()).await {
        Ok(wallet) => HttpResponse::Ok().json(ApiResponse::success(wallet)),
        Err(e) => wallet_error(e),
    }
}


/// End-to-end against a live Postgres, run with `--features online-tests` and `DATABASE_URL` set.
#[cfg(all(test, feature = "online-tests"))]
mod online_tests {
    use actix_web::{test, web, App};
    use cloudpay_database::database::static_wallets::ensure_schema;
    use cloudpay_database::DbHandle;
    use cloudpay_lib::external_services::webhook::WebhookForwarder;
    use serde_json::{json, Value};

    use crate::router::{configure, json_config};
    use crate::state::AppState;

    #[actix_web::test]
    async fn create_then_list_same_shop() {
        cloudpay_database::init();
        let db = DbHandle::from_env().await;
        ensure_schema(db.connection().expect("DATABASE_URL must point at Postgres"))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(db, WebhookForwarder::new())))
                .app_data(json_config())
                .configure(configure),
        )
        .await;
        let shop_id = format!("e2e-{}", cloudpay_lib::helpers::gen_uuid32());

        let create = test::TestRequest::post()
            .uri("/api/v2/invoice/static/create")
            .set_json(json!({"shop_id": shop_id, "currency": "USDT_BSC", "identify": "x"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, create).await;
        assert_eq!(created["status"], "success");

        let list = test::TestRequest::post()
            .uri("/api/v2/invoice/static/list")
            .set_json(json!({"shop_id": shop_id}))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, list).await;
        let wallets = listed["result"]["staticWallets"].as_array().unwrap();
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0]["uuid"], created["result"]["uuid"]);
        assert_eq!(listed["result"]["all_count"], 1);
    }
}
