use chrono::{Duration, NaiveDateTime};

use crate::domain::repository::AccessCodeRepository;
use crate::domain::types::RETENTION_DAYS;
use crate::error::AccessServiceError;

/// Purge access codes past the retention horizon, used or not.
pub struct SweepExpiredCodesUseCase<A>
where
    A: AccessCodeRepository,
{
    pub access_codes: A,
}

impl<A> SweepExpiredCodesUseCase<A>
where
    A: AccessCodeRepository,
{
    /// Delete every code issued before `now - RETENTION_DAYS`. Returns how many went.
    pub async fn execute(&self, now: NaiveDateTime) -> Result<u64, AccessServiceError> {
        let cutoff = retention_cutoff(now);
        let removed = self.access_codes.delete_issued_before(cutoff).await?;
        tracing::info!(removed, %cutoff, "retention sweep finished");
        Ok(removed)
    }
}

pub fn retention_cutoff(now: NaiveDateTime) -> NaiveDateTime {
    now - Duration::days(RETENTION_DAYS)
}
