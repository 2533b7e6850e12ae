use log::warn;

/// Environment variables checked, in order, for the Postgres connection string.
pub const DATABASE_URL_KEYS: [&str; 2] = ["DATABASE_URL", "PGCONNSTR"];

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/**
 * Get an environment variable or a default value
 * 
 * # Arguments
 * @param key: &str - The environment variable key
 * @param default: &str - The default value
 * 
 * # Returns
 * @return String - The value of the environment variable or the default value
 */
pub fn get_env_var_or_default(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(val) => val,
        Err(_) => {
            warn!("{} not set, using default value: {}", key, default);
            default.to_string()
        }
    }
}

/**
 * Get the database connection string
 *
 * # Returns
 * @return String - The first non-empty value of DATABASE_URL or PGCONNSTR, or an empty string
 */
pub fn get_database_url() -> String {
    DATABASE_URL_KEYS
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Upper bound of the connection pool, `DB_MAX_CONNECTIONS`.
pub fn get_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
}

/// Whether the `static_wallets` table should be created at startup, `DB_AUTO_MIGRATE`.
pub fn auto_migrate() -> bool {
    matches!(
        std::env::var("DB_AUTO_MIGRATE")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes"
    )
}

/**
 * Hide the password of a connection string so it can be logged
 *
 * # Arguments
 * @param database_url: &str - The connection string
 *
 * # Returns
 * @return String - The connection string with its password replaced by `****`
 */
pub fn mask_database_url(database_url: &str) -> String {
    match url::Url::parse(database_url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("****")).is_err() {
                return "****".to_string();
            }
            parsed.to_string()
        }
        Ok(parsed) => parsed.to_string(),
        Err(_) => "****".to_string(),
    }
}
