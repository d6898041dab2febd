pub mod client;
pub mod merge;
pub mod types;

use crate::error::AppError;
use crate::zone::types::{Record, ZoneSnapshot};

/// Narrow capability surface of the managed zone store. Kept to the two calls
/// the reconciler needs so tests can substitute a fake backend.
#[async_trait::async_trait]
pub trait ZoneStore: Send + Sync {
    /// Read the zone's full record list plus its concurrency token. Called
    /// fresh before every merge; implementations must not cache.
    async fn read_zone(&self) -> Result<ZoneSnapshot, AppError>;

    /// Replace the zone's record list wholesale. `fingerprint` is the token
    /// from the snapshot the new list was computed against, passed through
    /// unmodified.
    async fn write_zone(
        &self,
        records: &[Record],
        fingerprint: Option<&str>,
    ) -> Result<(), AppError>;
}
