use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of issued tokens. `None` mints tokens without an `exp` claim.
    pub ttl_minutes: Option<i64>,
}

/// Longest accepted `JWT_TTL_MINUTES`: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 366;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let jwt = JwtConfig {
            secret,
            ttl_minutes: parse_ttl(std::env::var("JWT_TTL_MINUTES").ok())?,
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_port(std::env::var("APP_PORT").ok())?;
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            jwt,
        })
    }
}

/// Defaults to 8080; a value that is set but not a port number fails startup.
fn parse_port(raw: Option<String>) -> anyhow::Result<u16> {
    match raw {
        Some(v) => v
            .trim()
            .parse::<u16>()
            .with_context(|| format!("APP_PORT is not a port number: {v}")),
        None => Ok(8080),
    }
}

/// Unset, unparseable or non-positive values disable expiry; values above
/// [`MAX_TTL_MINUTES`] are a startup error.
fn parse_ttl(raw: Option<String>) -> anyhow::Result<Option<i64>> {
    let minutes = raw
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|minutes| *minutes > 0);
    if let Some(m) = minutes {
        anyhow::ensure!(
            m <= MAX_TTL_MINUTES,
            "JWT_TTL_MINUTES={m} exceeds the maximum of {MAX_TTL_MINUTES}"
        );
    }
    Ok(minutes)
}
