use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::TableCreateStatement;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Schema, Select,
};

use crate::models::static_wallets::{
    ActiveModel, Column, Entity as StaticWallet, Model as StaticWalletModel,
};

/// Fields supplied when a wallet row is inserted. `active` and `created` are set here.
#[derive(Clone, Debug)]
pub struct NewStaticWallet {
    pub uuid: String,
    pub shop_id: String,
    pub currency: String,
    pub identify: String,
    pub address: String,
}

/// Filter and page for `list_wallets`. Both date bounds are inclusive.
#[derive(Clone, Debug)]
pub struct WalletListFilter {
    pub shop_id: String,
    pub offset: u64,
    pub limit: u64,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WalletPage {
    pub rows: Vec<StaticWalletModel>,
    pub all_count: u64,
}

/**
 * Insert a new static wallet
 *
 * # Arguments
 * @param conn: &DatabaseConnection - The database connection
 * @param wallet: NewStaticWallet - The wallet to insert
 *
 * # Returns
 * @return Result<StaticWalletModel, sea_orm::DbErr> - The inserted row
 */
pub async fn create_wallet(
    conn: &DatabaseConnection,
    wallet: NewStaticWallet,
) -> Result<StaticWalletModel, DbErr> {
    let new_wallet = ActiveModel {
        uuid: Set(wallet.uuid),
        shop_id: Set(wallet.shop_id),
        currency: Set(wallet.currency),
        identify: Set(wallet.identify),
        address: Set(wallet.address),
        active: Set(false),
        created: Set(Utc::now().into()),
    };

    new_wallet.insert(conn).await
}

pub(crate) fn filtered_wallets(filter: &WalletListFilter) -> Select<StaticWallet> {
    let mut query = StaticWallet::find().filter(Column::ShopId.eq(filter.shop_id.as_str()));
    if let Some(start) = filter.start {
        query = query.filter(Column::Created.gte(start));
    }
    if let Some(end) = filter.end {
        query = query.filter(Column::Created.lte(end));
    }
    query
}

/**
 * List the wallets of a shop, newest first
 *
 * # Arguments
 * @param conn: &DatabaseConnection - The database connection
 * @param filter: &WalletListFilter - Shop, optional date bounds and page
 *
 * # Returns
 * @return Result<WalletPage, sea_orm::DbErr> - The page of rows and the count of all matching rows
 */
pub async fn list_wallets(
    conn: &DatabaseConnection,
    filter: &WalletListFilter,
) -> Result<WalletPage, DbErr> {
    let all_count = filtered_wallets(filter).count(conn).await?;

    let rows = filtered_wallets(filter)
        .order_by_desc(Column::Created)
        .limit(filter.limit)
        .offset(filter.offset)
        .all(conn)
        .await?;

    Ok(WalletPage { rows, all_count })
}

/**
 * Get a wallet by its uuid
 *
 * # Arguments
 * @param conn: &DatabaseConnection - The database connection
 * @param uuid: &str - The wallet uuid
 *
 * # Returns
 * @return Result<Option<StaticWalletModel>, sea_orm::DbErr> - The wallet, if it exists
 */
pub async fn get_wallet_by_uuid(
    conn: &DatabaseConnection,
    uuid: &str,
) -> Result<Option<StaticWalletModel>, DbErr> {
    StaticWallet::find()
        .filter(Column::Uuid.eq(uuid))
        .one(conn)
        .await
}

/**
 * Set the active flag of a wallet
 *
 * The row is not looked up first; a missing uuid surfaces as `DbErr::RecordNotUpdated`.
 *
 * # Arguments
 * @param conn: &DatabaseConnection - The database connection
 * @param uuid: &str - The wallet uuid
 * @param active: bool - The new flag value
 *
 * # Returns
 * @return Result<StaticWalletModel, sea_orm::DbErr> - The updated row
 */
pub async fn update_active(
    conn: &DatabaseConnection,
    uuid: &str,
    active: bool,
) -> Result<StaticWalletModel, DbErr> {
    let wallet = ActiveModel {
        uuid: Unchanged(uuid.to_string()),
        active: Set(active),
        ..Default::default()
    };

    wallet.update(conn).await
}

/// Count every row of the table.
pub async fn count_wallets(conn: &DatabaseConnection) -> Result<u64, DbErr> {
    StaticWallet::find().count(conn).await
}

pub(crate) fn create_table_statement(conn: &DatabaseConnection) -> TableCreateStatement {
    let schema = Schema::new(conn.get_database_backend());
    let mut statement = schema.create_table_from_entity(StaticWallet);
    statement.if_not_exists();
    statement
}

/**
 * Create the static_wallets table if it does not exist yet
 *
 * # Arguments
 * @param conn: &DatabaseConnection - The database connection
 *
 * # Returns
 * @return Result<(), sea_orm::DbErr> - The result of the operation
 */
pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    conn.execute(backend.build(&create_table_statement(conn)))
        .await?;
    Ok(())
}
