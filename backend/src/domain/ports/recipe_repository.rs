//! Port abstraction for recipes and their ingredient associations.
//!
//! Writes that touch the association table run atomically: adapters must
//! either apply the recipe row and its full association set, or nothing.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::{IngredientAmount, Recipe, RecipeIngredient, RecipeRecord, RecipeSearch};

use super::RepositoryError;

/// Persistence operations for recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Return one page of recipes, each with its category and ingredients.
    async fn search(&self, search: &RecipeSearch) -> Result<Page<Recipe>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, RepositoryError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<Recipe>, RepositoryError>;

    /// Insert the recipe row and its associations in one transaction.
    async fn insert(&self, record: &RecipeRecord) -> Result<Recipe, RepositoryError>;

    /// Overwrite the recipe row, delete its associations, and insert
    /// `record.ingredients` in their place, in one transaction.
    ///
    /// Returns `None` when no recipe has `record.id`.
    async fn replace(&self, record: &RecipeRecord) -> Result<Option<Recipe>, RepositoryError>;

    /// Remove the recipe and its associations.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Associations of one recipe ordered by ingredient name.
    async fn ingredients(&self, recipe_id: Uuid) -> Result<Vec<RecipeIngredient>, RepositoryError>;

    /// Append associations without touching existing ones.
    ///
    /// All rows are inserted or none; an already attached pair fails with
    /// [`RepositoryError::Duplicate`]. Returns the inserted associations in
    /// input order.
    async fn attach_ingredients(
        &self,
        recipe_id: Uuid,
        items: &[IngredientAmount],
    ) -> Result<Vec<RecipeIngredient>, RepositoryError>;
}
