use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::core::currency::CurrencyObject;

pub const DEFAULT_LIST_OFFSET: u64 = 0;
pub const DEFAULT_LIST_LIMIT: u64 = 100;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct CreateStaticWalletInfo {
    pub shop_id: Option<String>,
    pub currency: Option<String>,
    pub identify: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct ListStaticWalletsInfo {
    pub shop_id: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct SubscribeStaticWalletInfo {
    pub uuid: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreatedStaticWallet {
    pub currency: CurrencyObject,
    pub address: String,
    pub uuid: String,
    pub active: bool,
    pub identify: String,
    pub created: DateTime<FixedOffset>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListedStaticWallet {
    pub currency: CurrencyObject,
    pub active: bool,
    pub address: String,
    pub uuid: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaticWalletList {
    #[serde(rename = "staticWallets")]
    pub static_wallets: Vec<ListedStaticWallet>,
    pub all_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubscribedStaticWallet {
    pub currency: CurrencyObject,
    pub active: bool,
    pub address: String,
    pub created: DateTime<FixedOffset>,
    pub identify: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletCount {
    pub wallet_count: u64,
}
