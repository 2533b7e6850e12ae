pub mod static_wallets;
