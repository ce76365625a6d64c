//! Port abstraction for ingredient persistence.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::search::SearchQuery;
use crate::domain::{Ingredient, IngredientSort};

use super::RepositoryError;

/// Persistence operations for ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    async fn search(
        &self,
        query: &SearchQuery<IngredientSort>,
    ) -> Result<Page<Ingredient>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, RepositoryError>;

    async fn insert(&self, ingredient: &Ingredient) -> Result<(), RepositoryError>;

    /// Insert every ingredient or none of them.
    async fn insert_many(&self, ingredients: &[Ingredient]) -> Result<(), RepositoryError>;

    /// Returns `false` when no row has `ingredient.id`.
    async fn update(&self, ingredient: &Ingredient) -> Result<bool, RepositoryError>;

    /// Remove the ingredient and every recipe association that uses it.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
