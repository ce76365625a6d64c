//! Driving port for user account use cases.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::search::SearchQuery;
use crate::domain::{DeletionReceipt, Error, User, UserDraft, UserSort};

/// User account use cases consumed by inbound adapters.
///
/// Returned [`User`] values carry the password hash; adapters must drop it
/// when building responses.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn search(&self, query: SearchQuery<UserSort>) -> Result<Page<User>, Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<User, Error>;

    /// Hash the password and store a new account.
    ///
    /// Fails with invalid request naming `username` or `email` when either
    /// is already in use.
    async fn create(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace the account. The stored hash is kept unless the draft
    /// carries a new password.
    async fn update(&self, id: Uuid, draft: UserDraft) -> Result<User, Error>;

    async fn delete(&self, id: Uuid) -> Result<DeletionReceipt, Error>;
}
