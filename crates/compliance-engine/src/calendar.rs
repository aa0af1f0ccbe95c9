use chrono::{DateTime, Duration, Months, NaiveDate, Utc};

/// Review and reporting dates for succession compliance
pub struct ReviewCalendar;

impl ReviewCalendar {
    /// Days between routine compliance checks
    pub const DEFAULT_REVIEW_INTERVAL_DAYS: u32 = 90;

    /// When the family should next be checked
    pub fn next_check_due(evaluated_at: DateTime<Utc>, interval_days: u32) -> DateTime<Utc> {
        evaluated_at
            .checked_add_signed(Duration::days(i64::from(interval_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// A guardian's account falls due a year after the last one filed, or a
    /// year after appointment when none has been filed yet (s. 73).
    pub fn next_report_due(appointed_on: NaiveDate, last_filed: Option<NaiveDate>) -> NaiveDate {
        Self::one_year_after(last_filed.unwrap_or(appointed_on))
    }

    /// Check if the annual account is overdue as of the given date
    pub fn is_report_overdue(
        appointed_on: NaiveDate,
        last_filed: Option<NaiveDate>,
        as_of: NaiveDate,
    ) -> bool {
        Self::next_report_due(appointed_on, last_filed) < as_of
    }

    /// Same calendar date a year later; Feb 29 lands on Feb 28
    fn one_year_after(date: NaiveDate) -> NaiveDate {
        date.checked_add_months(Months::new(12))
            .unwrap_or(NaiveDate::MAX)
    }
}
