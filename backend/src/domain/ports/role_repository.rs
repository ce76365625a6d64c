//! Port abstraction for role persistence.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::search::SearchQuery;
use crate::domain::{Role, RoleSort};

use super::RepositoryError;

/// Persistence operations for roles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn search(&self, query: &SearchQuery<RoleSort>) -> Result<Page<Role>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError>;

    async fn insert(&self, role: &Role) -> Result<(), RepositoryError>;

    /// Returns `false` when no row has `role.id`.
    async fn update(&self, role: &Role) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
