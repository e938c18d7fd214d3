//! The single validity rule for access codes.

use chrono::NaiveDateTime;

use crate::domain::types::AccessCode;

/// A code authorizes entry only on the calendar day it was issued, and only
/// while the time of day sits inside its window (bounds inclusive).
///
/// The `used` flag plays no part here.
pub fn is_currently_valid(record: &AccessCode, now: NaiveDateTime) -> bool {
    record.issued_on() == now.date() && record.window.contains(now.time())
}

/// Status shown in the audit listing. Same rule as [`is_currently_valid`].
pub fn is_active_for_display(record: &AccessCode, now: NaiveDateTime) -> bool {
    is_currently_valid(record, now)
}
