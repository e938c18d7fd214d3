use chrono::{Duration, NaiveDateTime, NaiveTime};

use securevisit_core::clock::Clock;

use crate::domain::repository::AccessCodeRepository;
use crate::domain::types::{
    AccessCode, CodeFilter, ListOptions, ListedAccessCode, MAX_INSERT_ATTEMPTS, VerificationResult,
    VisitWindow,
};
use crate::domain::validity::{is_active_for_display, is_currently_valid};
use crate::error::AccessServiceError;
use crate::usecase::generator::{CodeGenerator, CodeSource};

// ── Issue ─────────────────────────────────────────────────────────────────────

pub struct IssueAccessCodeInput {
    pub visitor_name: String,
    pub visit_host: String,
    pub location: String,
    /// Display name of the operator issuing the code.
    pub issued_by: String,
    pub valid_from: NaiveTime,
    pub valid_until: NaiveTime,
}

pub struct IssueAccessCodeUseCase<A, C, S>
where
    A: AccessCodeRepository,
    C: Clock,
    S: CodeSource,
{
    pub access_codes: A,
    pub clock: C,
    pub source: S,
}

impl<A, C, S> IssueAccessCodeUseCase<A, C, S>
where
    A: AccessCodeRepository,
    C: Clock,
    S: CodeSource,
{
    pub async fn execute(&self, input: IssueAccessCodeInput) -> Result<AccessCode, AccessServiceError> {
        // 1. Validate before touching the store
        let visitor_name = required("visitor_name", &input.visitor_name)?;
        let visit_host = required("visit_host", &input.visit_host)?;
        let location = required("location", &input.location)?;
        let issued_by = required("issued_by", &input.issued_by)?;
        let window = VisitWindow::new(input.valid_from, input.valid_until)?;

        let generator = CodeGenerator {
            access_codes: &self.access_codes,
            source: &self.source,
        };

        // 2. Generate + insert; a unique violation means another issue won the race
        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let record = AccessCode {
                code: generator.generate().await?,
                visitor_name: visitor_name.clone(),
                visit_host: visit_host.clone(),
                location: location.clone(),
                issued_by: issued_by.clone(),
                window,
                issued_at: self.clock.now(),
                used: false,
            };

            match self.access_codes.insert(&record).await {
                Ok(()) => {
                    tracing::info!(
                        code = %record.code,
                        issued_by = %record.issued_by,
                        valid_from = %window.valid_from(),
                        valid_until = %window.valid_until(),
                        "access code issued"
                    );
                    return Ok(record);
                }
                Err(AccessServiceError::DuplicateKey) => {
                    tracing::debug!(attempt, code = %record.code, "access code taken on insert, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(attempts = MAX_INSERT_ATTEMPTS, "access code insert retries exhausted");
        Err(AccessServiceError::GenerationExhausted {
            attempts: MAX_INSERT_ATTEMPTS,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, AccessServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccessServiceError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}

// ── Verify ────────────────────────────────────────────────────────────────────

pub struct VerifyAccessCodeUseCase<A, C>
where
    A: AccessCodeRepository,
    C: Clock,
{
    pub access_codes: A,
    pub clock: C,
}

impl<A, C> VerifyAccessCodeUseCase<A, C>
where
    A: AccessCodeRepository,
    C: Clock,
{
    /// Check a presented code and consume it.
    ///
    /// Every approved check marks the code used, including repeat checks,
    /// which come back with `was_already_used = true`.
    pub async fn execute(&self, code: &str) -> Result<VerificationResult, AccessServiceError> {
        let code = code.trim();

        let Some(mut record) = self.access_codes.find_by_code(code).await? else {
            tracing::info!(code, outcome = "not_found", "access code verified");
            return Ok(VerificationResult::NotFound);
        };

        let now = self.clock.now();
        if !is_currently_valid(&record, now) {
            tracing::info!(code, outcome = "expired", "access code verified");
            return Ok(VerificationResult::Expired);
        }

        let was_already_used = record.used;
        self.access_codes.mark_used(code).await?;
        record.used = true;

        tracing::info!(code, outcome = "approved", was_already_used, "access code verified");
        Ok(VerificationResult::Approved {
            record,
            was_already_used,
        })
    }
}

// ── List ──────────────────────────────────────────────────────────────────────

pub struct ListAccessCodesUseCase<A, C>
where
    A: AccessCodeRepository,
    C: Clock,
{
    pub access_codes: A,
    pub clock: C,
}

impl<A, C> ListAccessCodesUseCase<A, C>
where
    A: AccessCodeRepository,
    C: Clock,
{
    /// Audit listing: active codes first, then newest first.
    pub async fn execute(&self, options: ListOptions) -> Result<Vec<ListedAccessCode>, AccessServiceError> {
        let now = self.clock.now();

        let min_issued_at = if options.include_expired {
            None
        } else {
            look_back_start(now, options.days_to_keep)
        };

        let filter = CodeFilter {
            min_issued_at,
            issued_on: options.filter_date,
        };

        let mut rows: Vec<ListedAccessCode> = self
            .access_codes
            .list(&filter)
            .await?
            .into_iter()
            .map(|record| ListedAccessCode {
                is_active: is_active_for_display(&record, now),
                record,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.is_active
                .cmp(&a.is_active)
                .then_with(|| b.record.issued_at.cmp(&a.record.issued_at))
        });
        Ok(rows)
    }
}

/// Midnight `days_to_keep` days before `now`. `None` when that falls before the
/// earliest representable date, which leaves the listing unbounded.
fn look_back_start(now: NaiveDateTime, days_to_keep: u32) -> Option<NaiveDateTime> {
    now.checked_sub_signed(Duration::days(i64::from(days_to_keep)))
        .map(|t| t.date().and_time(NaiveTime::MIN))
}
