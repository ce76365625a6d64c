//! Outcome of a successful delete.

use uuid::Uuid;

/// Confirms that the entity identified by `id` was removed.
///
/// Every delete operation returns this receipt after verifying that the
/// entity existed; a missing entity is reported as not found instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionReceipt {
    pub id: Uuid,
    pub deleted: bool,
}

impl DeletionReceipt {
    pub fn deleted(id: Uuid) -> Self {
        Self { id, deleted: true }
    }
}
