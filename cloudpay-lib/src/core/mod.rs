pub mod currency;
pub mod simulator;
pub mod static_wallet;
