//! # In-Memory Repositories
//!
//! Process-local stores used when no database is configured, and by tests.
//! Rows live in `BTreeMap`s keyed by id so listings come back in id order.

use crate::error::RepositoryError;
use crate::supplement::{NewSupplement, Supplement, SupplementRepository};
use crate::user::{NewUser, User, UserRepository};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Default)]
pub struct InMemorySupplementRepository {
    table: RwLock<Table<Supplement>>,
}

impl InMemorySupplementRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SupplementRepository for InMemorySupplementRepository {
    async fn find_available(&self) -> Result<Vec<Supplement>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|s| s.is_available).cloned().collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Supplement>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|s| s.category == category)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Supplement>, RepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, supplement: NewSupplement) -> Result<Supplement, RepositoryError> {
        let mut table = self.table.write().await;
        let id = table.allocate_id();
        let stored = supplement.into_supplement(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, supplement: &Supplement) -> Result<Supplement, RepositoryError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&supplement.id) {
            Some(row) => {
                *row = supplement.clone();
                Ok(row.clone())
            }
            None => Err(RepositoryError::NotFound(format!("supplement {}", supplement.id))),
        }
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(format!("email {}", user.email)));
        }
        let id = table.allocate_id();
        let stored = user.into_user(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(row.clone())
            }
            None => Err(RepositoryError::NotFound(format!("user {}", user.id))),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("user {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "h".into(),
            first_name: None,
            last_name: None,
            weight: None,
            height: None,
            fitness_goal: None,
            roles: BTreeSet::new(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = InMemorySupplementRepository::new();
        let a = repo
            .insert(NewSupplement::new("A", "x", Decimal::ONE))
            .await
            .unwrap();
        let b = repo
            .insert(NewSupplement::new("B", "x", Decimal::ONE))
            .await
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn test_update_missing_supplement() {
        let repo = InMemorySupplementRepository::new();
        let ghost = NewSupplement::new("A", "x", Decimal::ONE).into_supplement(9);
        assert!(matches!(
            repo.update(&ghost).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("a@b.c")).await.unwrap();
        assert!(matches!(
            repo.insert(new_user("a@b.c")).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(new_user("a@b.c")).await.unwrap();
        repo.delete(user.id).await.unwrap();
        assert!(!repo.exists_by_email("a@b.c").await.unwrap());
        assert!(repo.delete(user.id).await.is_err());
    }
}
