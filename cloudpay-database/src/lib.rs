pub mod config;
pub mod database;
pub mod models;

pub use sea_orm;

use std::sync::Arc;

use log::{info, warn};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::mask_database_url;

/**
 * Load the .env file (the binaries call this before anything reads the environment)
 */
pub fn init() {
    dotenv::dotenv().ok();
}

/**
 * Establish a connection pool to the database
 *
 * # Arguments
 * @param database_url: &str - The Postgres connection string
 * @param max_connections: u32 - The upper bound of the pool
 *
 * # Returns
 * @return Result<DatabaseConnection, sea_orm::DbErr> - The connection pool
 */
pub async fn setup(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    if database_url.is_empty() {
        return Err(DbErr::Custom("DATABASE_URL is not set".into()));
    }
    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .max_connections(max_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}

/// Shared database handle. Empty when the pool could not be built at startup,
/// in which case every query fails with a `DbErr` instead of stopping the server.
#[derive(Clone, Default)]
pub struct DbHandle {
    conn: Option<Arc<DatabaseConnection>>,
}

impl DbHandle {
    pub fn new(conn: DatabaseConnection) -> Self {
        DbHandle {
            conn: Some(Arc::new(conn)),
        }
    }

    pub fn disconnected() -> Self {
        DbHandle { conn: None }
    }

    /**
     * Connect using the environment configuration, falling back to a disconnected handle
     *
     * # Returns
     * @return DbHandle - The handle, connected if the database was reachable
     */
    pub async fn from_env() -> Self {
        let database_url = config::get_database_url();
        if database_url.is_empty() {
            warn!(
                "DATABASE_URL is not set. The server will still start but DB operations will fail until it points at a Postgres database."
            );
            return DbHandle::disconnected();
        }
        info!("Using DATABASE_URL: {}", mask_database_url(&database_url));

        match setup(&database_url, config::get_max_connections()).await {
            Ok(conn) => DbHandle::new(conn),
            Err(e) => {
                warn!("Failed to setup database connection: {}", e);
                DbHandle::disconnected()
            }
        }
    }

    /**
     * Get a reference to the established database connection
     *
     * # Returns
     * @return Result<&DatabaseConnection, sea_orm::DbErr> - The connection or an error
     */
    pub fn connection(&self) -> Result<&DatabaseConnection, DbErr> {
        self.conn
            .as_deref()
            .ok_or_else(|| DbErr::Custom("Database connection is not established".into()))
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }
}


/// Tests against a live Postgres, run with `--features online-tests` and `DATABASE_URL` set.
#[cfg(all(test, feature = "online-tests"))]
mod online_tests {
    use super::*;
    use crate::database::static_wallets::{self, NewStaticWallet, WalletListFilter};
    use chrono::{Duration, Utc};
    use serial_test::serial;

    async fn setup_test_environment() -> DatabaseConnection {
        init();
        let conn = setup(&config::get_database_url(), config::get_max_connections())
            .await
            .expect("Failed to setup database connection.");
        static_wallets::ensure_schema(&conn)
            .await
            .expect("Failed to create static_wallets table.");
        conn
    }

    fn new_wallet(shop_id: &str, uuid: &str) -> NewStaticWallet {
        NewStaticWallet {
            uuid: uuid.to_string(),
            shop_id: shop_id.to_string(),
            currency: "USDT_BSC".to_string(),
            identify: "x".to_string(),
            address: format!("static_{}", &uuid[..12]),
        }
    }

    fn unique_suffix() -> String {
        format!("{:032X}", Utc::now().timestamp_nanos_opt().unwrap_or_default())
    }

    #[tokio::test]
    #[serial]
    async fn test_create_then_get_wallet() {
        let conn = setup_test_environment().await;
        let uuid = unique_suffix();
        let shop_id = format!("online-{}", uuid);

        let created = static_wallets::create_wallet(&conn, new_wallet(&shop_id, &uuid))
            .await
            .unwrap();
        assert!(!created.active);

        let found = static_wallets::get_wallet_by_uuid(&conn, &uuid).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_wallets_bounds_and_count() {
        let conn = setup_test_environment().await;
        let base = unique_suffix();
        let shop_id = format!("online-list-{}", base);

        for i in 0..3 {
            let uuid = format!("{}{:X}", &base[..31], i);
            static_wallets::create_wallet(&conn, new_wallet(&shop_id, &uuid))
                .await
                .unwrap();
        }

        let filter = WalletListFilter {
            shop_id: shop_id.clone(),
            offset: 0,
            limit: 2,
            start: Some((Utc::now() - Duration::hours(1)).into()),
            end: Some((Utc::now() + Duration::hours(1)).into()),
        };
        let page = static_wallets::list_wallets(&conn, &filter).await.unwrap();
        assert_eq!(page.all_count, 3);
        assert_eq!(page.rows.len(), 2);
        assert!(page.rows[0].created >= page.rows[1].created);

        let future_only = WalletListFilter {
            start: Some((Utc::now() + Duration::hours(1)).into()),
            end: None,
            ..filter
        };
        let page = static_wallets::list_wallets(&conn, &future_only).await.unwrap();
        assert_eq!(page.all_count, 0);
        assert!(page.rows.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_update_active_is_idempotent() {
        let conn = setup_test_environment().await;
        let uuid = unique_suffix();

        static_wallets::create_wallet(&conn, new_wallet("online-subscribe", &uuid))
            .await
            .unwrap();
        let first = static_wallets::update_active(&conn, &uuid, true).await.unwrap();
        let second = static_wallets::update_active(&conn, &uuid, true).await.unwrap();
        assert!(first.active && second.active);
    }
}
