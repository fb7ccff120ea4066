use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog entry as stored and returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Burger {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stars: i32,
}

/// Every writable column; used by both create and full update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BurgerFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stars: i32,
}
