use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, User};
use crate::{db::classify, error::RepoError};

/// Credential store.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;
    async fn get_by_public_id(&self, public_id: Uuid) -> Result<Option<User>, RepoError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<User>, RepoError>;
    async fn list_all(&self) -> Result<Vec<User>, RepoError>;
    async fn update_name(&self, public_id: Uuid, name: &str) -> Result<Option<User>, RepoError>;
    async fn delete(&self, public_id: Uuid) -> Result<Option<User>, RepoError>;
    /// Returns the number of removed rows.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (public_id, name, password_hash, admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, public_id, name, password_hash, admin
            "#,
        )
        .bind(user.public_id)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.admin)
        .fetch_one(&self.db)
        .await
        .map_err(|e| classify(e, "user"))
    }

    async fn get_by_public_id(&self, public_id: Uuid) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, public_id, name, password_hash, admin
            FROM users
            WHERE public_id = $1
            "#,
        )
        .bind(public_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, public_id, name, password_hash, admin
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, public_id, name, password_hash, admin
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update_name(&self, public_id: Uuid, name: &str) -> Result<Option<User>, RepoError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name = $2
             WHERE public_id = $1
            RETURNING id, public_id, name, password_hash, admin
            "#,
        )
        .bind(public_id)
        .bind(name)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| classify(e, "user"))
    }

    async fn delete(&self, public_id: Uuid) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
             WHERE public_id = $1
            RETURNING id, public_id, name, password_hash, admin
            "#,
        )
        .bind(public_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let done = sqlx::query("DELETE FROM users").execute(&self.db).await?;
        Ok(done.rows_affected())
    }
}
