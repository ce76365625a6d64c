//! Ingredient domain service.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{IngredientRepository, IngredientService, RepositoryError};
use crate::domain::search::SearchQuery;
use crate::domain::service_support::{conflicts_with, duplicate_field, not_found, repository_error};
use crate::domain::{DeletionReceipt, Error, Ingredient, IngredientDraft, IngredientSort};

const ENTITY: &str = "ingredient";

/// Ingredient service implementing [`IngredientService`].
#[derive(Clone)]
pub struct IngredientServiceImpl<R> {
    repo: Arc<R>,
}

impl<R> IngredientServiceImpl<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R: IngredientRepository> IngredientServiceImpl<R> {
    fn map_repository_error(error: RepositoryError) -> Error {
        repository_error(ENTITY, error)
    }

    async fn require(&self, id: Uuid) -> Result<Ingredient, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn ensure_name_available(&self, name: &str, own_id: Option<Uuid>) -> Result<(), Error> {
        let existing = self
            .repo
            .find_by_name(name)
            .await
            .map_err(Self::map_repository_error)?;
        if conflicts_with(existing.map(|ingredient| ingredient.id), own_id) {
            return Err(duplicate_field(ENTITY, "name", name));
        }
        Ok(())
    }
}

fn ensure_unique_within_batch(drafts: &[IngredientDraft]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        if !seen.insert(draft.name()) {
            return Err(Error::invalid_request(format!(
                "ingredient name '{}' appears more than once in the batch",
                draft.name()
            ))
            .with_details(json!({ "field": "name", "index": index })));
        }
    }
    Ok(())
}

#[async_trait]
impl<R: IngredientRepository> IngredientService for IngredientServiceImpl<R> {
    async fn search(&self, query: SearchQuery<IngredientSort>) -> Result<Page<Ingredient>, Error> {
        self.repo
            .search(&query)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Ingredient, Error> {
        self.require(id).await
    }

    async fn create(&self, draft: IngredientDraft) -> Result<Ingredient, Error> {
        self.ensure_name_available(draft.name(), None).await?;
        let ingredient = draft.into_ingredient(Uuid::new_v4());
        self.repo
            .insert(&ingredient)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(ingredient)
    }

    async fn create_batch(&self, drafts: Vec<IngredientDraft>) -> Result<Vec<Ingredient>, Error> {
        if drafts.is_empty() {
            return Err(Error::invalid_request("ingredient batch must not be empty"));
        }
        ensure_unique_within_batch(&drafts)?;
        for draft in &drafts {
            self.ensure_name_available(draft.name(), None).await?;
        }

        let ingredients: Vec<Ingredient> = drafts
            .into_iter()
            .map(|draft| draft.into_ingredient(Uuid::new_v4()))
            .collect();
        self.repo
            .insert_many(&ingredients)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(ingredients)
    }

    async fn update(&self, id: Uuid, draft: IngredientDraft) -> Result<Ingredient, Error> {
        self.require(id).await?;
        self.ensure_name_available(draft.name(), Some(id)).await?;
        let ingredient = draft.into_ingredient(id);
        if !self
            .repo
            .update(&ingredient)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Err(not_found(ENTITY, id));
        }
        Ok(ingredient)
    }

    async fn delete(&self, id: Uuid) -> Result<DeletionReceipt, Error> {
        self.require(id).await?;
        if !self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Err(not_found(ENTITY, id));
        }
        Ok(DeletionReceipt::deleted(id))
    }
}
