//! Recipe domain service and the recipe/ingredient association rules.
//!
//! Ingredient references are resolved one by one in request order. For each
//! item the ingredient must exist (not found otherwise), then its amount
//! must be non-blank (invalid request otherwise); the first failing item
//! aborts the call before anything is written. Writes that include
//! associations are handed to the repository as one unit so a failure
//! leaves the previous state intact.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    CategoryRepository, IngredientRepository, RecipeRepository, RecipeService, RepositoryError,
};
use crate::domain::service_support::{conflicts_with, duplicate_field, not_found, repository_error};
use crate::domain::{
    DeletionReceipt, Error, IngredientAmount, Recipe, RecipeDraft, RecipeIngredient, RecipeSearch,
};

const ENTITY: &str = "recipe";

/// Recipe service implementing [`RecipeService`].
#[derive(Clone)]
pub struct RecipeServiceImpl<R, C, I> {
    recipes: Arc<R>,
    categories: Arc<C>,
    ingredients: Arc<I>,
}

impl<R, C, I> RecipeServiceImpl<R, C, I> {
    pub fn new(recipes: Arc<R>, categories: Arc<C>, ingredients: Arc<I>) -> Self {
        Self {
            recipes,
            categories,
            ingredients,
        }
    }
}

impl<R, C, I> RecipeServiceImpl<R, C, I>
where
    R: RecipeRepository,
    C: CategoryRepository,
    I: IngredientRepository,
{
    fn map_repository_error(error: RepositoryError) -> Error {
        repository_error(ENTITY, error)
    }

    fn map_attach_error(error: RepositoryError) -> Error {
        match error {
            RepositoryError::Duplicate { .. } => {
                Error::invalid_request("ingredient is already attached to this recipe")
                    .with_details(json!({ "field": "ingredientId" }))
            }
            other => repository_error(ENTITY, other),
        }
    }

    async fn require(&self, id: Uuid) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn ensure_title_available(&self, title: &str, own_id: Option<Uuid>) -> Result<(), Error> {
        let existing = self
            .recipes
            .find_by_title(title)
            .await
            .map_err(Self::map_repository_error)?;
        if conflicts_with(existing.map(|recipe| recipe.id), own_id) {
            return Err(duplicate_field(ENTITY, "title", title));
        }
        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: Option<Uuid>) -> Result<(), Error> {
        let Some(id) = category_id else {
            return Ok(());
        };
        let found = self
            .categories
            .find_by_id(id)
            .await
            .map_err(|error| repository_error("category", error))?;
        if found.is_none() {
            return Err(Error::invalid_request("category does not exist")
                .with_details(json!({ "field": "categoryId", "id": id })));
        }
        Ok(())
    }

    /// Validate association items in order and return them with trimmed
    /// amounts.
    async fn resolve_items(
        &self,
        items: &[IngredientAmount],
    ) -> Result<Vec<IngredientAmount>, Error> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let found = self
                .ingredients
                .find_by_id(item.ingredient_id)
                .await
                .map_err(|error| repository_error("ingredient", error))?;
            if found.is_none() {
                return Err(not_found("ingredient", item.ingredient_id));
            }

            let amount = item.amount.trim();
            if amount.is_empty() {
                return Err(Error::invalid_request("ingredient amount must not be blank")
                    .with_details(json!({
                        "field": "amount",
                        "ingredientId": item.ingredient_id,
                    })));
            }

            if !seen.insert(item.ingredient_id) {
                return Err(Error::invalid_request(format!(
                    "ingredient {} is listed more than once",
                    item.ingredient_id
                ))
                .with_details(json!({ "field": "ingredientId" })));
            }

            resolved.push(IngredientAmount {
                ingredient_id: item.ingredient_id,
                amount: amount.to_owned(),
            });
        }
        Ok(resolved)
    }
}

#[async_trait]
impl<R, C, I> RecipeService for RecipeServiceImpl<R, C, I>
where
    R: RecipeRepository,
    C: CategoryRepository,
    I: IngredientRepository,
{
    async fn search(&self, search: RecipeSearch) -> Result<Page<Recipe>, Error> {
        self.recipes
            .search(&search)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Recipe, Error> {
        self.require(id).await
    }

    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error> {
        self.ensure_title_available(draft.title(), None).await?;
        self.ensure_category_exists(draft.category_id()).await?;
        let items = self.resolve_items(draft.ingredients()).await?;
        let record = draft.into_record(Uuid::new_v4(), items);
        self.recipes
            .insert(&record)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn update(&self, id: Uuid, draft: RecipeDraft) -> Result<Recipe, Error> {
        self.require(id).await?;
        self.ensure_title_available(draft.title(), Some(id)).await?;
        self.ensure_category_exists(draft.category_id()).await?;
        let items = self.resolve_items(draft.ingredients()).await?;
        let record = draft.into_record(id, items);
        self.recipes
            .replace(&record)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn delete(&self, id: Uuid) -> Result<DeletionReceipt, Error> {
        self.require(id).await?;
        if !self
            .recipes
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Err(not_found(ENTITY, id));
        }
        Ok(DeletionReceipt::deleted(id))
    }

    async fn ingredients(&self, recipe_id: Uuid) -> Result<Vec<RecipeIngredient>, Error> {
        self.require(recipe_id).await?;
        self.recipes
            .ingredients(recipe_id)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn add_ingredient(
        &self,
        recipe_id: Uuid,
        item: IngredientAmount,
    ) -> Result<RecipeIngredient, Error> {
        self.add_ingredients(recipe_id, vec![item])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::internal("attaching an ingredient returned no association"))
    }

    async fn add_ingredients(
        &self,
        recipe_id: Uuid,
        items: Vec<IngredientAmount>,
    ) -> Result<Vec<RecipeIngredient>, Error> {
        self.require(recipe_id).await?;
        if items.is_empty() {
            return Err(Error::invalid_request("ingredients must not be empty")
                .with_details(json!({ "field": "ingredients" })));
        }
        let resolved = self.resolve_items(&items).await?;
        self.recipes
            .attach_ingredients(recipe_id, &resolved)
            .await
            .map_err(Self::map_attach_error)
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
