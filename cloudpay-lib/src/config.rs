use cloudpay_database::config::get_env_var_or_default;
use log::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

pub fn init() {
    dotenv::dotenv().ok();
}

pub fn get_host() -> String {
    get_env_var_or_default("HOST", DEFAULT_HOST)
}

pub fn get_port() -> u16 {
    match std::env::var("PORT") {
        Ok(port) => port.parse().unwrap_or_else(|_| {
            warn!("PORT={} is not a valid port, using {}", port, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}
