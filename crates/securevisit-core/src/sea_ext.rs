use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

/// Restrict a query to rows whose timestamp column falls on one calendar day.
///
/// Expressed as a half-open range `[day 00:00, day+1 00:00)`.
pub trait FilterByDay {
    fn filter_on_day<C>(self, column: C, day: NaiveDate) -> Self
    where
        C: ColumnTrait;
}

impl<E> FilterByDay for Select<E>
where
    E: EntityTrait,
{
    fn filter_on_day<C>(self, column: C, day: NaiveDate) -> Self
    where
        C: ColumnTrait,
    {
        let (start, end) = day_bounds(day);
        let query = self.filter(column.gte(start));
        match end {
            Some(end) => query.filter(column.lt(end)),
            None => query,
        }
    }
}

/// Start of `day` and start of the following day, if the calendar has one.
pub fn day_bounds(day: NaiveDate) -> (NaiveDateTime, Option<NaiveDateTime>) {
    let start = day.and_time(NaiveTime::MIN);
    (start, start.checked_add_signed(Duration::days(1)))
}
