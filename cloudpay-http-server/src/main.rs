use log::{info, warn};

use actix_web::{middleware::Logger, web, App, HttpServer};
use cloudpay_database::database::static_wallets::ensure_schema;
use cloudpay_database::DbHandle;
use cloudpay_lib::config::{get_host, get_port};
use cloudpay_lib::external_services::webhook::WebhookForwarder;

pub(crate) mod response;
pub(crate) mod router;
pub(crate) mod state;

use crate::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    cloudpay_lib::config::init();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    info!("Logger initialized at log level: {}", log_level);

    let db = DbHandle::from_env().await;
    if cloudpay_database::config::auto_migrate() {
        match db.connection() {
            Ok(conn) => match ensure_schema(conn).await {
                Ok(()) => info!("static_wallets table is ready"),
                Err(e) => warn!("Failed to create static_wallets table: {}", e),
            },
            Err(e) => warn!("Skipping schema creation: {}", e),
        }
    }

    let state = web::Data::new(AppState::new(db, WebhookForwarder::new()));
    let (host, port) = (get_host(), get_port());
    info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .app_data(router::json_config())
            .configure(router::configure)
    })
    .bind((host, port))?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
