use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::AccessServiceError;

/// Time-of-day interval `[valid_from, valid_until]`, both ends inclusive.
///
/// Construction enforces `valid_from < valid_until`; a window can never be
/// empty or wrap past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitWindow {
    valid_from: NaiveTime,
    valid_until: NaiveTime,
}

impl VisitWindow {
    pub fn new(valid_from: NaiveTime, valid_until: NaiveTime) -> Result<Self, AccessServiceError> {
        if valid_from >= valid_until {
            return Err(AccessServiceError::InvalidWindow);
        }
        Ok(Self {
            valid_from,
            valid_until,
        })
    }

    /// Rebuild a window read back from storage without re-validating it.
    pub(crate) fn from_stored(valid_from: NaiveTime, valid_until: NaiveTime) -> Self {
        Self {
            valid_from,
            valid_until,
        }
    }

    pub fn valid_from(&self) -> NaiveTime {
        self.valid_from
    }

    pub fn valid_until(&self) -> NaiveTime {
        self.valid_until
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.valid_from <= time && time <= self.valid_until
    }
}

/// A stored visitor access code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCode {
    pub code: String,
    pub visitor_name: String,
    pub visit_host: String,
    pub location: String,
    pub issued_by: String,
    pub window: VisitWindow,
    /// Local wall-clock time of issue; its date is the only day the code works.
    pub issued_at: NaiveDateTime,
    pub used: bool,
}

impl AccessCode {
    pub fn issued_on(&self) -> NaiveDate {
        self.issued_at.date()
    }
}

/// Outcome of presenting a code at the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// Code is inside its window today. `record.used` is now `true`;
    /// `was_already_used` tells first entry apart from a repeat scan.
    Approved {
        record: AccessCode,
        was_already_used: bool,
    },
    /// Code exists but its window has passed or it belongs to another day.
    Expired,
    NotFound,
}

/// Store-level filter for listing codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeFilter {
    /// Only codes issued at or after this instant.
    pub min_issued_at: Option<NaiveDateTime>,
    /// Only codes issued on this calendar day.
    pub issued_on: Option<NaiveDate>,
}

/// Caller-facing options for the audit listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// When `false`, codes issued before `days_to_keep` days ago are left out.
    pub include_expired: bool,
    pub days_to_keep: u32,
    pub filter_date: Option<NaiveDate>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            include_expired: true,
            days_to_keep: DEFAULT_LIST_DAYS_TO_KEEP,
            filter_date: None,
        }
    }
}

/// One row of the audit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedAccessCode {
    pub record: AccessCode,
    pub is_active: bool,
}

/// Access code length in digits.
pub const CODE_LEN: usize = 7;

/// Candidate codes drawn before giving up on finding an unused one.
pub const MAX_GENERATION_ATTEMPTS: u32 = 16;

/// Inserts retried after losing a uniqueness race with a concurrent issue.
pub const MAX_INSERT_ATTEMPTS: u32 = 16;

/// Records older than this are purged by the retention sweep.
pub const RETENTION_DAYS: i64 = 30;

/// Default look-back of the audit listing when expired codes are hidden.
pub const DEFAULT_LIST_DAYS_TO_KEEP: u32 = 7;
