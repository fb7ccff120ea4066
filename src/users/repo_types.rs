use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,               // surrogate key, never leaves the service
    pub public_id: Uuid,       // identifier carried in tokens and URLs
    pub name: String,          // login handle
    pub password_hash: String, // Argon2 PHC string
    pub admin: bool,
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub public_id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub admin: bool,
}

/// Outward representation of a user; the hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub public_id: Uuid,
    pub name: String,
    pub admin: bool,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            public_id: u.public_id,
            name: u.name,
            admin: u.admin,
        }
    }
}
