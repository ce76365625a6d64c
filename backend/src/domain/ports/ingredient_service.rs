//! Driving port for ingredient use cases.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::search::SearchQuery;
use crate::domain::{DeletionReceipt, Error, Ingredient, IngredientDraft, IngredientSort};

/// Ingredient use cases consumed by inbound adapters.
#[async_trait]
pub trait IngredientService: Send + Sync {
    async fn search(&self, query: SearchQuery<IngredientSort>) -> Result<Page<Ingredient>, Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<Ingredient, Error>;

    async fn create(&self, draft: IngredientDraft) -> Result<Ingredient, Error>;

    /// Create several ingredients at once.
    ///
    /// The batch must be non-empty and its names unique, both within the
    /// batch and against stored ingredients. Nothing is written on failure.
    async fn create_batch(&self, drafts: Vec<IngredientDraft>) -> Result<Vec<Ingredient>, Error>;

    async fn update(&self, id: Uuid, draft: IngredientDraft) -> Result<Ingredient, Error>;

    async fn delete(&self, id: Uuid) -> Result<DeletionReceipt, Error>;
}
