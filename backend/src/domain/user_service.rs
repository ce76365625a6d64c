//! User account domain service.
//!
//! Passwords are hashed through the [`PasswordHasher`] port before anything
//! reaches the repository; plain-text values are dropped with the draft.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, RepositoryError, UserRepository, UserService,
};
use crate::domain::search::SearchQuery;
use crate::domain::service_support::{conflicts_with, duplicate_field, not_found, repository_error};
use crate::domain::{DeletionReceipt, Error, User, UserDraft, UserSort};

const ENTITY: &str = "user";

/// User service implementing [`UserService`].
#[derive(Clone)]
pub struct UserServiceImpl<R, H> {
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserServiceImpl<R, H> {
    pub fn new(repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repo, hasher }
    }
}

impl<R, H> UserServiceImpl<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    fn map_repository_error(error: RepositoryError) -> Error {
        repository_error(ENTITY, error)
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(error.to_string())
    }

    async fn require(&self, id: Uuid) -> Result<User, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Reject a username or email already used by another account.
    async fn ensure_identity_available(
        &self,
        draft: &UserDraft,
        own_id: Option<Uuid>,
    ) -> Result<(), Error> {
        let by_username = self
            .repo
            .find_by_username(draft.username())
            .await
            .map_err(Self::map_repository_error)?;
        if conflicts_with(by_username.map(|user| user.id), own_id) {
            return Err(duplicate_field(ENTITY, "username", draft.username()));
        }

        let by_email = self
            .repo
            .find_by_email(draft.email())
            .await
            .map_err(Self::map_repository_error)?;
        if conflicts_with(by_email.map(|user| user.id), own_id) {
            return Err(duplicate_field(ENTITY, "email", draft.email()));
        }
        Ok(())
    }

    async fn hash(&self, password: &str) -> Result<String, Error> {
        self.hasher
            .hash(password)
            .await
            .map_err(Self::map_hash_error)
    }
}

#[async_trait]
impl<R, H> UserService for UserServiceImpl<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn search(&self, query: SearchQuery<UserSort>) -> Result<Page<User>, Error> {
        self.repo
            .search(&query)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<User, Error> {
        self.require(id).await
    }

    async fn create(&self, draft: UserDraft) -> Result<User, Error> {
        self.ensure_identity_available(&draft, None).await?;
        let Some(password) = draft.password() else {
            return Err(Error::invalid_request("password is required"));
        };
        let password_hash = self.hash(password).await?;
        let user = draft.into_user(Uuid::new_v4(), password_hash);
        self.repo
            .insert(&user)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(user)
    }

    async fn update(&self, id: Uuid, draft: UserDraft) -> Result<User, Error> {
        let existing = self.require(id).await?;
        self.ensure_identity_available(&draft, Some(id)).await?;
        let password_hash = match draft.password() {
            Some(password) => self.hash(password).await?,
            None => existing.password_hash,
        };
        let user = draft.into_user(id, password_hash);
        if !self
            .repo
            .update(&user)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Err(not_found(ENTITY, id));
        }
        Ok(user)
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
#[path = "user_service_tests.rs"]
mod tests;
