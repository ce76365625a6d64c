//! Driving port for recipe use cases, including ingredient associations.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::{
    DeletionReceipt, Error, IngredientAmount, Recipe, RecipeDraft, RecipeIngredient, RecipeSearch,
};

/// Recipe use cases consumed by inbound adapters.
#[async_trait]
pub trait RecipeService: Send + Sync {
    async fn search(&self, search: RecipeSearch) -> Result<Page<Recipe>, Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<Recipe, Error>;

    /// Store a recipe with its ingredient associations.
    ///
    /// Each ingredient must exist (else not found) and carry a non-blank
    /// amount (else invalid request). Nothing is stored on failure.
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Replace every field and the whole association set.
    async fn update(&self, id: Uuid, draft: RecipeDraft) -> Result<Recipe, Error>;

    async fn delete(&self, id: Uuid) -> Result<DeletionReceipt, Error>;

    /// Associations of the recipe ordered by ingredient name.
    async fn ingredients(&self, recipe_id: Uuid) -> Result<Vec<RecipeIngredient>, Error>;

    /// Attach one ingredient. Fails when it is already attached.
    async fn add_ingredient(
        &self,
        recipe_id: Uuid,
        item: IngredientAmount,
    ) -> Result<RecipeIngredient, Error>;

    /// Attach several ingredients, all or none.
    async fn add_ingredients(
        &self,
        recipe_id: Uuid,
        items: Vec<IngredientAmount>,
    ) -> Result<Vec<RecipeIngredient>, Error>;
}
