//! Role domain service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, RoleRepository, RoleService};
use crate::domain::search::SearchQuery;
use crate::domain::service_support::{conflicts_with, duplicate_field, not_found, repository_error};
use crate::domain::{DeletionReceipt, Error, Role, RoleDraft, RoleSort};

const ENTITY: &str = "role";

#[derive(Clone)]
pub struct RoleServiceImpl<R> {
    repo: Arc<R>,
}

impl<R> RoleServiceImpl<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R: RoleRepository> RoleServiceImpl<R> {
    fn map_repository_error(error: RepositoryError) -> Error {
        repository_error(ENTITY, error)
    }

    async fn require(&self, id: Uuid) -> Result<Role, Error> {
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
        if conflicts_with(existing.map(|role| role.id), own_id) {
            return Err(duplicate_field(ENTITY, "name", name));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: RoleRepository> RoleService for RoleServiceImpl<R> {
    async fn search(&self, query: SearchQuery<RoleSort>) -> Result<Page<Role>, Error> {
        self.repo
            .search(&query)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Role, Error> {
        self.require(id).await
    }

    async fn create(&self, draft: RoleDraft) -> Result<Role, Error> {
        self.ensure_name_available(draft.name(), None).await?;
        let role = draft.into_role(Uuid::new_v4());
        self.repo
            .insert(&role)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(role)
    }

    async fn update(&self, id: Uuid, draft: RoleDraft) -> Result<Role, Error> {
        self.require(id).await?;
        self.ensure_name_available(draft.name(), Some(id)).await?;
        let role = draft.into_role(id);
        if !self
            .repo
            .update(&role)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Err(not_found(ENTITY, id));
        }
        Ok(role)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockRoleRepository;

    fn role(name: &str) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn update_rejects_name_held_by_another_role() {
        let target = role("editor");
        let target_id = target.id;
        let other = role("admin");
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_id()
            .return_once(move |_| Ok(Some(target)));
        repo.expect_find_by_name()
            .return_once(move |_| Ok(Some(other)));
        repo.expect_update().never();

        let service = RoleServiceImpl::new(Arc::new(repo));
        let error = service
            .update(target_id, RoleDraft::new("admin", None).expect("valid"))
            .await
            .expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn storage_level_duplicates_are_invalid_requests() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_name().return_once(|_| Ok(None));
        repo.expect_insert()
            .return_once(|_| Err(RepositoryError::duplicate("roles_name_key")));

        let service = RoleServiceImpl::new(Arc::new(repo));
        let error = service
            .create(RoleDraft::new("admin", None).expect("valid"))
            .await
            .expect_err("race lost");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
