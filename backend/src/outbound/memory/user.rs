use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::search::SearchQuery;
use crate::domain::{User, UserSort};

use super::{MemoryStore, SortKey, Tables, ensure_unique, sorted_page};

/// [`UserRepository`] over a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn check_identity(tables: &Tables, user: &User) -> Result<(), RepositoryError> {
    let others = || tables.users.values().filter(|stored| stored.id != user.id);
    ensure_unique(
        others().any(|stored| stored.username == user.username),
        "users_username_key",
    )?;
    ensure_unique(
        others().any(|stored| stored.email == user.email),
        "users_email_key",
    )
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn search(&self, query: &SearchQuery<UserSort>) -> Result<Page<User>, RepositoryError> {
        let matches: Vec<User> = self.store.with(|tables| {
            tables
                .users
                .values()
                .filter(|user| {
                    query.matches_any(&[
                        user.first_name.as_str(),
                        user.last_name.as_str(),
                        user.username.as_str(),
                        user.email.as_str(),
                    ])
                })
                .cloned()
                .collect()
        });
        Ok(sorted_page(
            matches,
            query.direction(),
            query.page(),
            |user| match query.sort() {
                UserSort::Id => SortKey::Id(user.id),
                UserSort::FirstName => SortKey::Text(&user.first_name),
                UserSort::LastName => SortKey::Text(&user.last_name),
                UserSort::Username => SortKey::Text(&user.username),
                UserSort::Email => SortKey::Text(&user.email),
            },
            |user| user.id,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.with(|tables| tables.users.get(&id).cloned()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.with(|tables| {
            tables
                .users
                .values()
                .find(|user| user.username == username)
                .cloned()
        }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .store
            .with(|tables| tables.users.values().find(|user| user.email == email).cloned()))
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        self.store.with(|tables| {
            ensure_unique(tables.users.contains_key(&user.id), "users_pkey")?;
            check_identity(tables, user)?;
            tables.users.insert(user.id, user.clone());
            Ok(())
        })
    }

    async fn update(&self, user: &User) -> Result<bool, RepositoryError> {
        self.store.with(|tables| {
            if !tables.users.contains_key(&user.id) {
                return Ok(false);
            }
            check_identity(tables, user)?;
            tables.users.insert(user.id, user.clone());
            Ok(true)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.store.with(|tables| tables.users.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user(id: u128, username: &str, email: &str) -> User {
        User {
            id: Uuid::from_u128(id),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: "$2b$04$hash".to_owned(),
        }
    }

    #[rstest]
    #[case(user(2, "ada", "other@example.com"), "users_username_key")]
    #[case(user(2, "other", "ada@example.com"), "users_email_key")]
    #[tokio::test]
    async fn identity_fields_are_unique(#[case] candidate: User, #[case] constraint: &str) {
        let repo = MemoryStore::new().users();
        repo.insert(&user(1, "ada", "ada@example.com")).await.expect("insert");

        let err = repo.insert(&candidate).await.expect_err("duplicate identity");

        assert_eq!(err, RepositoryError::duplicate(constraint));
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_are_exact() {
        let repo = MemoryStore::new().users();
        repo.insert(&user(1, "ada", "ada@example.com")).await.expect("insert");

        assert!(repo.find_by_username("ada").await.expect("lookup").is_some());
        assert!(repo.find_by_username("ADA").await.expect("lookup").is_none());
        assert!(repo.find_by_email("ada@example.com").await.expect("lookup").is_some());
    }
}
