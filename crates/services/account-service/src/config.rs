//! Account service configuration.

use std::env;
use std::str::FromStr;

use common::{DatabaseConfig, PasswordHashConfig, ServiceConfig};

/// Account service configuration.
#[derive(Debug, Clone, Default)]
pub struct AccountServiceConfig {
    /// Bind address, name and request deadline
    pub service: ServiceConfig,
    /// Connection URL and pool sizing
    pub database: DatabaseConfig,
    /// Argon2 cost
    pub password_hash: PasswordHashConfig,
}

/// Parse an environment variable, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let service_defaults = ServiceConfig::default();
        let db_defaults = DatabaseConfig::default();
        let hash_defaults = PasswordHashConfig::default();

        Self {
            service: ServiceConfig {
                service_name: env::var("ACCOUNT_SERVICE_NAME")
                    .unwrap_or(service_defaults.service_name),
                host: env::var("ACCOUNT_SERVICE_HOST").unwrap_or(service_defaults.host),
                port: env_or("ACCOUNT_SERVICE_PORT", service_defaults.port),
                request_timeout_secs: env_or(
                    "REQUEST_TIMEOUT_SECS",
                    service_defaults.request_timeout_secs,
                ),
            },
            database: DatabaseConfig {
                url: env::var("ACCOUNT_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(db_defaults.url),
                max_connections: env_or("DB_MAX_CONNECTIONS", db_defaults.max_connections),
                min_connections: env_or("DB_MIN_CONNECTIONS", db_defaults.min_connections),
                connect_timeout_secs: env_or(
                    "DB_CONNECT_TIMEOUT_SECS",
                    db_defaults.connect_timeout_secs,
                ),
            },
            password_hash: PasswordHashConfig {
                memory_kib: env_or("PASSWORD_HASH_MEMORY_KIB", hash_defaults.memory_kib),
                iterations: env_or("PASSWORD_HASH_ITERATIONS", hash_defaults.iterations),
                parallelism: env_or("PASSWORD_HASH_PARALLELISM", hash_defaults.parallelism),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("ACCOUNT_SERVICE_TEST_PORT", "not-a-port");
        assert_eq!(env_or::<u16>("ACCOUNT_SERVICE_TEST_PORT", 8080), 8080);

        env::set_var("ACCOUNT_SERVICE_TEST_PORT", "9090");
        assert_eq!(env_or::<u16>("ACCOUNT_SERVICE_TEST_PORT", 8080), 9090);
        env::remove_var("ACCOUNT_SERVICE_TEST_PORT");
    }

    #[test]
    fn test_defaults() {
        let config = AccountServiceConfig::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.service_name, "account-service");
        assert_eq!(config.password_hash, PasswordHashConfig::default());
    }
}
