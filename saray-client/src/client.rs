//! Resource client contract

use async_trait::async_trait;
use shared::{Record, RecordInput, ResourceKind};

use crate::{ClientError, ClientResult};

/// Table-oriented access to the hosted database
///
/// Every collection is returned whole, ordered by
/// [`ResourceKind::sort_order`]. Rows are addressed by equality on `id`.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Fetch the full collection of `kind`
    async fn select(&self, kind: ResourceKind) -> ClientResult<Vec<Record>>;

    /// Insert one row and return it as stored
    async fn insert(&self, kind: ResourceKind, fields: &RecordInput) -> ClientResult<Record>;

    /// Overwrite the row with `id` and return it as stored
    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        fields: &RecordInput,
    ) -> ClientResult<Record>;

    /// Delete the row with `id`
    async fn delete(&self, kind: ResourceKind, id: &str) -> ClientResult<()>;
}

/// Reject a payload addressed to a table of another kind
pub(crate) fn ensure_kind(kind: ResourceKind, fields: &RecordInput) -> ClientResult<()> {
    if fields.kind() != kind {
        return Err(ClientError::KindMismatch {
            expected: kind,
            actual: fields.kind(),
        });
    }
    Ok(())
}
