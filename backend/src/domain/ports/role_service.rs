//! Driving port for role use cases.

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::search::SearchQuery;
use crate::domain::{DeletionReceipt, Error, Role, RoleDraft, RoleSort};

#[async_trait]
pub trait RoleService: Send + Sync {
    async fn search(&self, query: SearchQuery<RoleSort>) -> Result<Page<Role>, Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<Role, Error>;

    async fn create(&self, draft: RoleDraft) -> Result<Role, Error>;

    async fn update(&self, id: Uuid, draft: RoleDraft) -> Result<Role, Error>;

    async fn delete(&self, id: Uuid) -> Result<DeletionReceipt, Error>;
}
