use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::{config::AppConfig, error::RepoError};

/// Column widths in [`SCHEMA`], counted in characters as Postgres does.
pub const USER_NAME_MAX: usize = 50;
pub const BURGER_NAME_MAX: usize = 100;
pub const BURGER_DESCRIPTION_MAX: usize = 200;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BIGSERIAL PRIMARY KEY,
    public_id     UUID         NOT NULL UNIQUE,
    name          VARCHAR(50)  NOT NULL UNIQUE,
    password_hash TEXT         NOT NULL,
    admin         BOOLEAN      NOT NULL DEFAULT FALSE
);

CREATE TABLE IF NOT EXISTS burgers (
    id          BIGSERIAL PRIMARY KEY,
    name        VARCHAR(100) NOT NULL UNIQUE,
    description VARCHAR(200) NOT NULL,
    price       DOUBLE PRECISION NOT NULL,
    stars       INTEGER NOT NULL
);
"#;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// Creates the tables when they are missing. Existing tables are left alone.
pub async fn ensure_schema(db: &PgPool) -> anyhow::Result<()> {
    for stmt in schema_statements() {
        sqlx::query(stmt)
            .execute(db)
            .await
            .with_context(|| format!("apply schema statement: {}", stmt))?;
    }
    info!("database schema ready");
    Ok(())
}

fn schema_statements() -> impl Iterator<Item = &'static str> {
    SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty())
}

// SQLSTATE 22001: value too long for the column.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Maps constraint failures raised by the schema onto [`RepoError`] variants
/// callers can act on; anything else stays a backend error.
pub fn classify(e: sqlx::Error, what: &'static str) -> RepoError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return RepoError::Conflict(what);
        }
        if db_err.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) {
            return RepoError::Invalid(what);
        }
    }
    RepoError::Backend(e)
}
