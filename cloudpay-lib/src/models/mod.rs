pub mod static_wallet;
pub mod webhook;
