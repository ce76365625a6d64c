//! Port abstraction for user persistence adapters.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::search::SearchQuery;
use crate::domain::{User, UserSort};

use super::RepositoryError;

/// Persistence operations for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn search(&self, query: &SearchQuery<UserSort>) -> Result<Page<User>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    /// Replace every column, including the password hash.
    async fn update(&self, user: &User) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
