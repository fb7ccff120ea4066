//! In-process repositories backing `AppState::fake()`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    burgers::{
        repo::BurgerRepo,
        repo_types::{Burger, BurgerFields},
    },
    db::{BURGER_DESCRIPTION_MAX, BURGER_NAME_MAX, USER_NAME_MAX},
    error::RepoError,
    users::{
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
};

struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

/// Mirrors Postgres rejecting values wider than a VARCHAR column.
fn check_width(value: &str, max: usize, what: &'static str) -> Result<(), RepoError> {
    if value.chars().count() > max {
        return Err(RepoError::Invalid(what));
    }
    Ok(())
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Default)]
pub struct MemoryUserRepo {
    table: RwLock<Table<User>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        check_width(&user.name, USER_NAME_MAX, "user")?;
        let mut t = self.table.write().await;
        if t
            .rows
            .iter()
            .any(|u| u.name == user.name || u.public_id == user.public_id)
        {
            return Err(RepoError::Conflict("user"));
        }
        let row = User {
            id: t.allocate_id(),
            public_id: user.public_id,
            name: user.name,
            password_hash: user.password_hash,
            admin: user.admin,
        };
        t.rows.push(row.clone());
        Ok(row)
    }

    async fn get_by_public_id(&self, public_id: Uuid) -> Result<Option<User>, RepoError> {
        let t = self.table.read().await;
        Ok(t.rows.iter().find(|u| u.public_id == public_id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<User>, RepoError> {
        let t = self.table.read().await;
        Ok(t.rows.iter().find(|u| u.name == name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn update_name(&self, public_id: Uuid, name: &str) -> Result<Option<User>, RepoError> {
        check_width(name, USER_NAME_MAX, "user")?;
        let mut t = self.table.write().await;
        if t
            .rows
            .iter()
            .any(|u| u.name == name && u.public_id != public_id)
        {
            return Err(RepoError::Conflict("user"));
        }
        Ok(t.rows
            .iter_mut()
            .find(|u| u.public_id == public_id)
            .map(|u| {
                u.name = name.to_string();
                u.clone()
            }))
    }

    async fn delete(&self, public_id: Uuid) -> Result<Option<User>, RepoError> {
        let mut t = self.table.write().await;
        let pos = t.rows.iter().position(|u| u.public_id == public_id);
        Ok(pos.map(|i| t.rows.remove(i)))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut t = self.table.write().await;
        let n = t.rows.len() as u64;
        t.rows.clear();
        Ok(n)
    }
}

fn check_burger_widths(fields: &BurgerFields) -> Result<(), RepoError> {
    check_width(&fields.name, BURGER_NAME_MAX, "burger")?;
    check_width(&fields.description, BURGER_DESCRIPTION_MAX, "burger")
}

#[derive(Default)]
pub struct MemoryBurgerRepo {
    table: RwLock<Table<Burger>>,
}

#[async_trait]
impl BurgerRepo for MemoryBurgerRepo {
    async fn insert(&self, fields: BurgerFields) -> Result<Burger, RepoError> {
        check_burger_widths(&fields)?;
        let mut t = self.table.write().await;
        if t.rows.iter().any(|b| b.name == fields.name) {
            return Err(RepoError::Conflict("burger"));
        }
        let row = Burger {
            id: t.allocate_id(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            stars: fields.stars,
        };
        t.rows.push(row.clone());
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<Burger>, RepoError> {
        let t = self.table.read().await;
        Ok(t.rows.iter().find(|b| b.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Burger>, RepoError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn update(&self, id: i64, fields: BurgerFields) -> Result<Option<Burger>, RepoError> {
        check_burger_widths(&fields)?;
        let mut t = self.table.write().await;
        if t.rows.iter().any(|b| b.name == fields.name && b.id != id) {
            return Err(RepoError::Conflict("burger"));
        }
        Ok(t.rows.iter_mut().find(|b| b.id == id).map(|b| {
            b.name = fields.name;
            b.description = fields.description;
            b.price = fields.price;
            b.stars = fields.stars;
            b.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Burger>, RepoError> {
        let mut t = self.table.write().await;
        let pos = t.rows.iter().position(|b| b.id == id);
        Ok(pos.map(|i| t.rows.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            public_id: Uuid::new_v4(),
            name: name.into(),
            password_hash: "hash".into(),
            admin: false,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let repo = MemoryUserRepo::default();
        let a = repo.insert(new_user("a")).await.unwrap();
        let b = repo.insert(new_user("b")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        repo.delete(b.public_id).await.unwrap();
        let c = repo.insert(new_user("c")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let repo = MemoryUserRepo::default();
        repo.insert(new_user("alice")).await.unwrap();
        let err = repo.insert(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict("user")));
    }

    #[tokio::test]
    async fn renaming_onto_taken_name_is_a_conflict() {
        let repo = MemoryUserRepo::default();
        repo.insert(new_user("alice")).await.unwrap();
        let bob = repo.insert(new_user("bob")).await.unwrap();
        assert!(repo.update_name(bob.public_id, "alice").await.is_err());
        // renaming to its own name is fine
        let same = repo.update_name(bob.public_id, "bob").await.unwrap();
        assert_eq!(same.unwrap().name, "bob");
    }

    fn burger(name: &str, description: &str) -> BurgerFields {
        BurgerFields {
            name: name.into(),
            description: description.into(),
            price: 5.99,
            stars: 4,
        }
    }

    #[tokio::test]
    async fn user_name_wider_than_column_is_invalid() {
        let repo = MemoryUserRepo::default();
        let wide = "n".repeat(USER_NAME_MAX + 1);
        let err = repo.insert(new_user(&wide)).await.unwrap_err();
        assert!(matches!(err, RepoError::Invalid("user")));

        // width is counted in characters, not bytes
        let alice = repo.insert(new_user(&"é".repeat(USER_NAME_MAX))).await.unwrap();
        let err = repo.update_name(alice.public_id, &wide).await.unwrap_err();
        assert!(matches!(err, RepoError::Invalid("user")));
        assert!(repo.get_by_name(&wide).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn burger_fields_wider_than_columns_are_invalid() {
        let repo = MemoryBurgerRepo::default();
        let long_name = "b".repeat(BURGER_NAME_MAX + 1);
        let long_description = "d".repeat(BURGER_DESCRIPTION_MAX + 1);

        let err = repo.insert(burger(&long_name, "d")).await.unwrap_err();
        assert!(matches!(err, RepoError::Invalid("burger")));
        let err = repo.insert(burger("Classic", &long_description)).await.unwrap_err();
        assert!(matches!(err, RepoError::Invalid("burger")));

        let classic = repo.insert(burger("Classic", "beef")).await.unwrap();
        let err = repo.update(classic.id, burger(&long_name, "beef")).await.unwrap_err();
        assert!(matches!(err, RepoError::Invalid("burger")));
        let err = repo
            .update(classic.id, burger("Classic", &long_description))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Invalid("burger")));
        assert_eq!(repo.get(classic.id).await.unwrap().unwrap().description, "beef");
    }

    #[tokio::test]
    async fn burger_update_of_missing_row_is_none() {
        let repo = MemoryBurgerRepo::default();
        let fields = BurgerFields {
            name: "Classic".into(),
            description: "beef".into(),
            price: 5.99,
            stars: 4,
        };
        assert!(repo.update(42, fields).await.unwrap().is_none());
        assert!(repo.delete(42).await.unwrap().is_none());
    }
}
