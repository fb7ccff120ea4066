use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Burger, BurgerFields};
use crate::{db::classify, error::RepoError};

#[async_trait]
pub trait BurgerRepo: Send + Sync {
    async fn insert(&self, fields: BurgerFields) -> Result<Burger, RepoError>;
    async fn get(&self, id: i64) -> Result<Option<Burger>, RepoError>;
    async fn list_all(&self) -> Result<Vec<Burger>, RepoError>;
    async fn update(&self, id: i64, fields: BurgerFields) -> Result<Option<Burger>, RepoError>;
    async fn delete(&self, id: i64) -> Result<Option<Burger>, RepoError>;
}

#[derive(Clone)]
pub struct PgBurgerRepo {
    db: PgPool,
}

impl PgBurgerRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BurgerRepo for PgBurgerRepo {
    async fn insert(&self, fields: BurgerFields) -> Result<Burger, RepoError> {
        sqlx::query_as::<_, Burger>(
            r#"
            INSERT INTO burgers (name, description, price, stars)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, stars
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.stars)
        .fetch_one(&self.db)
        .await
        .map_err(|e| classify(e, "burger"))
    }

    async fn get(&self, id: i64) -> Result<Option<Burger>, RepoError> {
        let burger = sqlx::query_as::<_, Burger>(
            r#"
            SELECT id, name, description, price, stars
            FROM burgers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(burger)
    }

    async fn list_all(&self) -> Result<Vec<Burger>, RepoError> {
        let rows = sqlx::query_as::<_, Burger>(
            r#"
            SELECT id, name, description, price, stars
            FROM burgers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, fields: BurgerFields) -> Result<Option<Burger>, RepoError> {
        sqlx::query_as::<_, Burger>(
            r#"
            UPDATE burgers
               SET name = $2, description = $3, price = $4, stars = $5
             WHERE id = $1
            RETURNING id, name, description, price, stars
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.stars)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| classify(e, "burger"))
    }

    async fn delete(&self, id: i64) -> Result<Option<Burger>, RepoError> {
        let burger = sqlx::query_as::<_, Burger>(
            r#"
            DELETE FROM burgers
             WHERE id = $1
            RETURNING id, name, description, price, stars
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(burger)
    }
}
