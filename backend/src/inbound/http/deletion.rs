//! Response body shared by every delete endpoint.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::DeletionReceipt;

/// Confirms a delete: `{"id": "...", "deleted": true}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub id: Uuid,
    #[schema(example = true)]
    pub deleted: bool,
}

impl From<DeletionReceipt> for DeletedResponse {
    fn from(value: DeletionReceipt) -> Self {
        Self {
            id: value.id,
            deleted: value.deleted,
        }
    }
}
