//! Server Configuration
//!
//! This module handles loading server configuration from environment
//! variables, with sensible defaults for local development.
//!
//! # Error Handling
//!
//! Configuration errors are logged but do not prevent server startup.
//! A missing or unreachable database sets the pool to `None` and the
//! server continues; persistence-backed routes answer 503 until it comes
//! back.

use std::time::Duration;

use sqlx::PgPool;

/// Default heartbeat: ping every 10s, declare dead 5s after a missed pong
const DEFAULT_PING_INTERVAL_SECS: u64 = 10;
const DEFAULT_PING_TIMEOUT_SECS: u64 = 5;
const DEFAULT_PORT: u16 = 3050;

/// Runtime configuration loaded from the environment
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Interval between server-driven pings on socket connections
    pub ping_interval: Duration,
    /// Grace period after a missed pong before a connection is declared dead
    pub ping_timeout: Duration,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Allowed CORS origins; empty means allow any (development)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ping_interval: Duration::from_secs(DEFAULT_PING_INTERVAL_SECS),
            ping_timeout: Duration::from_secs(DEFAULT_PING_TIMEOUT_SECS),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `SERVER_PORT`, `WS_PING_INTERVAL_SECS`,
    /// `WS_PING_TIMEOUT_SECS`, `CORS_ORIGINS` (comma-separated). Missing
    /// or malformed values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let ping_interval = env_secs("WS_PING_INTERVAL_SECS").unwrap_or(defaults.ping_interval);
        let ping_timeout = env_secs("WS_PING_TIMEOUT_SECS").unwrap_or(defaults.ping_timeout);

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            ping_interval,
            ping_timeout,
            port,
            cors_origins,
        }
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Load and initialize the database connection pool.
///
/// Reads `DATABASE_URL`, connects, and runs migrations. Returns `None` on
/// any failure so the server can start without persistence features.
pub async fn load_database() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Persistence features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Persistence features will be disabled.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed"),
        Err(e) => {
            // Migrations may already have been applied by another process.
            tracing::error!("Failed to run database migrations: {:?}", e);
            tracing::warn!("Continuing - database might not be up to date");
        }
    }

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_heartbeat_timings() {
        let config = ServerConfig::default();
        assert_eq!(config.ping_interval, Duration::from_secs(10));
        assert_eq!(config.ping_timeout, Duration::from_secs(5));
    }
}
