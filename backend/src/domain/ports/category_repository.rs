//! Port abstraction for category persistence.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::search::SearchQuery;
use crate::domain::{Category, CategorySort};

use super::RepositoryError;

/// Persistence operations for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Return one page of categories matching `query`.
    async fn search(
        &self,
        query: &SearchQuery<CategorySort>,
    ) -> Result<Page<Category>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepositoryError>;

    /// Exact, case-sensitive name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError>;

    async fn insert(&self, category: &Category) -> Result<(), RepositoryError>;

    /// Replace the stored row. Returns `false` when no row has `category.id`.
    async fn update(&self, category: &Category) -> Result<bool, RepositoryError>;

    /// Remove the row. Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
