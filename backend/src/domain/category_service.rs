//! Category domain service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{CategoryRepository, CategoryService, RepositoryError};
use crate::domain::search::SearchQuery;
use crate::domain::service_support::{conflicts_with, duplicate_field, not_found, repository_error};
use crate::domain::{Category, CategoryDraft, CategorySort, DeletionReceipt, Error};

const ENTITY: &str = "category";

/// Category service implementing [`CategoryService`].
#[derive(Clone)]
pub struct CategoryServiceImpl<R> {
    repo: Arc<R>,
}

impl<R> CategoryServiceImpl<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R: CategoryRepository> CategoryServiceImpl<R> {
    fn map_repository_error(error: RepositoryError) -> Error {
        repository_error(ENTITY, error)
    }

    async fn require(&self, id: Uuid) -> Result<Category, Error> {
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
        if conflicts_with(existing.map(|category| category.id), own_id) {
            return Err(duplicate_field(ENTITY, "name", name));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: CategoryRepository> CategoryService for CategoryServiceImpl<R> {
    async fn search(&self, query: SearchQuery<CategorySort>) -> Result<Page<Category>, Error> {
        self.repo
            .search(&query)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Category, Error> {
        self.require(id).await
    }

    async fn create(&self, draft: CategoryDraft) -> Result<Category, Error> {
        self.ensure_name_available(draft.name(), None).await?;
        let category = draft.into_category(Uuid::new_v4());
        self.repo
            .insert(&category)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(category)
    }

    async fn update(&self, id: Uuid, draft: CategoryDraft) -> Result<Category, Error> {
        self.require(id).await?;
        self.ensure_name_available(draft.name(), Some(id)).await?;
        let category = draft.into_category(id);
        let updated = self
            .repo
            .update(&category)
            .await
            .map_err(Self::map_repository_error)?;
        if !updated {
            return Err(not_found(ENTITY, id));
        }
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<DeletionReceipt, Error> {
        self.require(id).await?;
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(not_found(ENTITY, id));
        }
        Ok(DeletionReceipt::deleted(id))
    }
}
