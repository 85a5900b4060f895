use async_trait::async_trait;

use crate::{domain::Cursor, Result};

/// Port for the remote homework status API.
///
/// One call is one outbound request; implementations must not retry.
/// Retrying is the poll loop's job via its next tick.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch statuses changed since `cursor` as the raw JSON payload.
    async fn fetch(&self, cursor: Cursor) -> Result<serde_json::Value>;
}
