use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use cloudpay_database::database::static_wallets::{self as wallets_db, NewStaticWallet, WalletListFilter};
use cloudpay_database::DbHandle;
use log::info;

use crate::core::currency::make_currency_object;
use crate::error::WalletError;
use crate::helpers::{gen_uuid32, static_address};
use crate::models::static_wallet::{
    CreateStaticWalletInfo, CreatedStaticWallet, ListStaticWalletsInfo, ListedStaticWallet,
    StaticWalletList, SubscribeStaticWalletInfo, SubscribedStaticWallet, WalletCount,
    DEFAULT_LIST_LIMIT, DEFAULT_LIST_OFFSET,
};

const CREATE_MISSING_FIELDS: &str =
    "Address not created / currency not passed / shop_id not passed";

/// Treats an empty string like an absent field.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/**
 * Create a static wallet for a shop
 *
 * # Arguments
 * @param db: &DbHandle - The database handle
 * @param info: CreateStaticWalletInfo - shop_id, currency and identify, all required
 *
 * # Returns
 * @return Result<CreatedStaticWallet, WalletError> - The new wallet
 */
pub async fn create_static_wallet(
    db: &DbHandle,
    info: CreateStaticWalletInfo,
) -> Result<CreatedStaticWallet, WalletError> {
    let (shop_id, currency, identify) = match (
        required(info.shop_id),
        required(info.currency),
        required(info.identify),
    ) {
        (Some(shop_id), Some(currency), Some(identify)) => (shop_id, currency, identify),
        _ => return Err(WalletError::validation(CREATE_MISSING_FIELDS)),
    };

    let uuid = gen_uuid32();
    let address = static_address(&uuid);
    let context = "Failed to create address";

    let conn = db.connection().map_err(WalletError::database(context))?;
    let row = wallets_db::create_wallet(
        conn,
        NewStaticWallet {
            uuid,
            shop_id,
            currency,
            identify,
            address,
        },
    )
    .await
    .map_err(WalletError::database(context))?;
    info!("Created static wallet {} for shop {}", row.uuid, row.shop_id);

    Ok(CreatedStaticWallet {
        currency: make_currency_object(&row.currency),
        address: row.address,
        uuid: row.uuid,
        active: row.active,
        identify: row.identify,
        created: row.created,
    })
}

/**
 * List the static wallets of a shop, newest first
 *
 * # Arguments
 * @param db: &DbHandle - The database handle
 * @param info: ListStaticWalletsInfo - shop_id (required), offset, limit and optional date bounds
 *
 * # Returns
 * @return Result<StaticWalletList, WalletError> - The page and the count of all matching wallets
 */
pub async fn list_static_wallets(
    db: &DbHandle,
    info: ListStaticWalletsInfo,
) -> Result<StaticWalletList, WalletError> {
    let shop_id = required(info.shop_id)
        .ok_or_else(|| WalletError::validation("shop_id not passed"))?;
    let start = required(info.start)
        .map(|value| parse_date_bound("start", &value))
        .transpose()?;
    let end = required(info.end)
        .map(|value| parse_date_bound("end", &value))
        .transpose()?;

    let filter = WalletListFilter {
        shop_id,
        offset: info.offset.unwrap_or(DEFAULT_LIST_OFFSET),
        limit: info.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        start,
        end,
    };

    let context = "Failed to list";
    let conn = db.connection().map_err(WalletError::database(context))?;
    let page = wallets_db::list_wallets(conn, &filter)
        .await
        .map_err(WalletError::database(context))?;

    let static_wallets = page
        .rows
        .into_iter()
        .map(|row| ListedStaticWallet {
            currency: make_currency_object(&row.currency),
            active: row.active,
            address: row.address,
            uuid: row.uuid,
        })
        .collect();

    Ok(StaticWalletList {
        static_wallets,
        all_count: page.all_count,
    })
}

/**
 * Mark a wallet as actively monitored
 *
 * The lookup and the update are separate statements. Two concurrent calls for the
 * same uuid both end with `active = true`, so no transaction is used.
 *
 * # Arguments
 * @param db: &DbHandle - The database handle
 * @param info: SubscribeStaticWalletInfo - The wallet uuid
 *
 * # Returns
 * @return Result<SubscribedStaticWallet, WalletError> - The activated wallet, or NotFound
 */
pub async fn subscribe_static_wallet(
    db: &DbHandle,
    info: SubscribeStaticWalletInfo,
) -> Result<SubscribedStaticWallet, WalletError> {
    let uuid = required(info.uuid).ok_or_else(|| WalletError::validation("uuid is required"))?;

    let context = "Failed to subscribe";
    let conn = db.connection().map_err(WalletError::database(context))?;
    if wallets_db::get_wallet_by_uuid(conn, &uuid)
        .await
        .map_err(WalletError::database(context))?
        .is_none()
    {
        return Err(WalletError::NotFound);
    }

    let row = wallets_db::update_active(conn, &uuid, true)
        .await
        .map_err(WalletError::database(context))?;
    info!("Static wallet {} subscribed", row.uuid);

    Ok(SubscribedStaticWallet {
        currency: make_currency_object(&row.currency),
        active: row.active,
        address: row.address,
        created: row.created,
        identify: row.identify,
    })
}

/// Number of wallets across all shops.
pub async fn count_static_wallets(db: &DbHandle) -> Result<WalletCount, WalletError> {
    let context = "Failed to count wallets";
    let conn = db.connection().map_err(WalletError::database(context))?;
    let wallet_count = wallets_db::count_wallets(conn)
        .await
        .map_err(WalletError::database(context))?;
    Ok(WalletCount { wallet_count })
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or `YYYY-MM-DD` (midnight UTC).
pub fn parse_date_bound(field: &str, value: &str) -> Result<DateTime<FixedOffset>, WalletError> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive).into());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).into())
        .ok_or_else(|| WalletError::validation(format!("{} is not a valid date: {}", field, value)))
}
