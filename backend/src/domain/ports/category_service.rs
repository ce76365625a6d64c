//! Driving port for category use cases.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::search::SearchQuery;
use crate::domain::{Category, CategoryDraft, CategorySort, DeletionReceipt, Error};

/// Category use cases consumed by inbound adapters.
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn search(&self, query: SearchQuery<CategorySort>) -> Result<Page<Category>, Error>;

    /// Fails with not found when no category has `id`.
    async fn find_by_id(&self, id: Uuid) -> Result<Category, Error>;

    /// Fails with invalid request when the name is taken.
    async fn create(&self, draft: CategoryDraft) -> Result<Category, Error>;

    async fn update(&self, id: Uuid, draft: CategoryDraft) -> Result<Category, Error>;

    async fn delete(&self, id: Uuid) -> Result<DeletionReceipt, Error>;
}
