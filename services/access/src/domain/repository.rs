#![allow(async_fn_in_trait)]

use chrono::NaiveDateTime;

use crate::domain::types::{AccessCode, CodeFilter};
use crate::error::AccessServiceError;

/// Persistence port for access codes.
///
/// Any failure talking to the store surfaces as
/// [`AccessServiceError::StoreUnavailable`].
pub trait AccessCodeRepository: Send + Sync {
    /// Insert a new record. Fails with `DuplicateKey` if the code is taken.
    async fn insert(&self, record: &AccessCode) -> Result<(), AccessServiceError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<AccessCode>, AccessServiceError>;

    /// Records matching every set field of `filter`, newest first.
    async fn list(&self, filter: &CodeFilter) -> Result<Vec<AccessCode>, AccessServiceError>;

    /// Set `used = true`. Setting it again is a no-op.
    async fn mark_used(&self, code: &str) -> Result<(), AccessServiceError>;

    /// Delete records issued strictly before `cutoff`. Returns the number removed.
    async fn delete_issued_before(&self, cutoff: NaiveDateTime) -> Result<u64, AccessServiceError>;
}
