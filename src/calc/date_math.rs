use anyhow::{Context, Result};
use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A timezone-naive point in time. Every derived date is a fresh value.
pub type CalendarDate = NaiveDateTime;

/// Precision used when comparing two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Day,
    Month,
    Year,
}

/// Unit for `prev`/`next` navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Months,
    Years,
}

fn key(date: &CalendarDate, granularity: Granularity) -> (i32, u32, u32) {
    match granularity {
        Granularity::Day => (date.year(), date.month(), date.day()),
        Granularity::Month => (date.year(), date.month(), 0),
        Granularity::Year => (date.year(), 0, 0),
    }
}

/// Compares two dates ignoring every field finer than `granularity`.
pub fn cmp_at(a: &CalendarDate, b: &CalendarDate, granularity: Granularity) -> Ordering {
    key(a, granularity).cmp(&key(b, granularity))
}

pub fn is_before(a: &CalendarDate, b: &CalendarDate, granularity: Granularity) -> bool {
    cmp_at(a, b, granularity) == Ordering::Less
}

pub fn is_after(a: &CalendarDate, b: &CalendarDate, granularity: Granularity) -> bool {
    cmp_at(a, b, granularity) == Ordering::Greater
}

pub fn is_same_or_before(a: &CalendarDate, b: &CalendarDate, granularity: Granularity) -> bool {
    cmp_at(a, b, granularity) != Ordering::Greater
}

pub fn is_same_or_after(a: &CalendarDate, b: &CalendarDate, granularity: Granularity) -> bool {
    cmp_at(a, b, granularity) != Ordering::Less
}

/// Day-level equality. Absent dates never compare equal.
pub fn is_same(a: Option<CalendarDate>, b: Option<CalendarDate>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => cmp_at(&a, &b, Granularity::Day) == Ordering::Equal,
        _ => false,
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
        NaiveDate::from_ymd_opt(year, month, 1),
    ) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Year and month (1-based) of the month preceding `year`/`month`.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Hour, minute and second of `date` with sub-second precision dropped.
pub fn time_of(date: &CalendarDate) -> NaiveTime {
    NaiveTime::from_hms_opt(date.hour(), date.minute(), date.second()).unwrap_or_default()
}

pub fn at_midnight(date: NaiveDate) -> CalendarDate {
    date.and_time(NaiveTime::MIN)
}

/// Shifts `date` by `amount` units. Month and year shifts clamp the day to the
/// end of the target month. Returns `None` when the result is out of range.
pub fn shift(date: CalendarDate, unit: TimeUnit, amount: i64) -> Option<CalendarDate> {
    match unit {
        TimeUnit::Days => date.checked_add_signed(Duration::try_days(amount)?),
        TimeUnit::Months => shift_months(date, amount),
        TimeUnit::Years => shift_months(date, amount.checked_mul(12)?),
    }
}

fn shift_months(date: CalendarDate, amount: i64) -> Option<CalendarDate> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

/// Week number of `date`. ISO-8601 weeks when `iso` is set; otherwise weeks
/// start on `first_day` (0 = Sunday) and week 1 is the week containing January 1st.
pub fn week_of_year(date: NaiveDate, first_day: u32, iso: bool) -> u32 {
    if iso {
        return date.iso_week().week();
    }
    let week_start = start_of_week(date, first_day);
    let week_end = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    let Some(jan_first) = NaiveDate::from_ymd_opt(week_end.year(), 1, 1) else {
        return 1;
    };
    let first_week_start = start_of_week(jan_first, first_day);
    (week_start - first_week_start).num_days().max(0) as u32 / 7 + 1
}

/// Start of the week holding `date`, clamped to the first representable day.
fn start_of_week(date: NaiveDate, first_day: u32) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 7 - first_day % 7) % 7;
    date.checked_sub_days(Days::new(offset as u64))
        .unwrap_or(NaiveDate::MIN)
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_date(raw: &str) -> Result<CalendarDate> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("failed to parse date '{raw}'"))?;
    Ok(at_midnight(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(y, m, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_is_same_false_when_either_absent() {
        assert!(!is_same(None, Some(d(2025, 1, 1))));
        assert!(!is_same(Some(d(2025, 1, 1)), None));
        assert!(!is_same(None, None));
    }

    #[test]
    fn test_is_same_ignores_time_of_day() {
        let morning = d(2025, 3, 4).with_hour(8).unwrap();
        let evening = d(2025, 3, 4).with_hour(21).unwrap();
        assert!(is_same(Some(morning), Some(evening)));
        assert!(is_same(Some(evening), Some(morning)));
        assert!(!is_same(Some(morning), Some(d(2025, 3, 5))));
    }

    #[test]
    fn test_granularity_comparisons() {
        let a = d(2025, 3, 1);
        let b = d(2025, 3, 31);
        assert!(is_before(&a, &b, Granularity::Day));
        assert!(!is_before(&a, &b, Granularity::Month));
        assert!(is_same_or_before(&b, &a, Granularity::Month));
        assert!(is_same_or_after(&a, &d(2025, 12, 31), Granularity::Year));
        assert!(is_after(&d(2026, 1, 1), &b, Granularity::Year));
    }

    #[test]
    fn test_days_in_month_february_leap_and_non_leap() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_days_in_month_december() {
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn test_previous_month_wraps_year() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(previous_month(2025, 7), (2025, 6));
    }

    #[test]
    fn test_shift_months_clamps_month_end() {
        let shifted = shift(d(2025, 1, 31), TimeUnit::Months, 1).unwrap();
        assert_eq!(shifted, d(2025, 2, 28));
        let back = shift(d(2025, 3, 31), TimeUnit::Months, -1).unwrap();
        assert_eq!(back, d(2025, 2, 28));
    }

    #[test]
    fn test_shift_years_from_leap_day() {
        let shifted = shift(d(2024, 2, 29), TimeUnit::Years, 1).unwrap();
        assert_eq!(shifted, d(2025, 2, 28));
        let four = shift(d(2024, 2, 29), TimeUnit::Years, 4).unwrap();
        assert_eq!(four, d(2028, 2, 29));
    }

    #[test]
    fn test_shift_days_across_year() {
        assert_eq!(shift(d(2024, 12, 31), TimeUnit::Days, 1).unwrap(), d(2025, 1, 1));
        assert_eq!(shift(d(2025, 3, 1), TimeUnit::Days, -1).unwrap(), d(2025, 2, 28));
    }

    #[test]
    fn test_shift_overflow_returns_none() {
        assert!(shift(NaiveDateTime::MAX, TimeUnit::Days, 1).is_none());
        assert!(shift(d(2025, 1, 1), TimeUnit::Years, i64::MAX).is_none());
    }

    #[test]
    fn test_time_of_drops_nanoseconds() {
        let dt = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_nano_opt(7, 8, 9, 500)
            .unwrap();
        assert_eq!(time_of(&dt), NaiveTime::from_hms_opt(7, 8, 9).unwrap());
    }

    #[test]
    fn test_iso_week_number() {
        // 2025-01-01 is a Wednesday, ISO week 1
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 0, true), 1);
        // 2024-12-30 (Monday) belongs to ISO week 1 of 2025
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2024, 12, 30).unwrap(), 0, true), 1);
        // 2021-01-03 (Sunday) is ISO week 53 of 2020
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2021, 1, 3).unwrap(), 0, true), 53);
    }

    #[test]
    fn test_locale_week_number_sunday_start() {
        // Week of 2024-12-29 (Sun) .. 2025-01-04 (Sat) contains Jan 1st
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2024, 12, 29).unwrap(), 0, false), 1);
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(), 0, false), 1);
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(), 0, false), 2);
        // 2024-12-28 (Sat) is the last week of 2024
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2024, 12, 28).unwrap(), 0, false), 52);
    }

    #[test]
    fn test_week_number_at_calendar_bounds() {
        assert_eq!(week_of_year(NaiveDate::MIN, 0, false), 1);
        assert_eq!(week_of_year(NaiveDate::MIN, 1, false), 1);
        assert!(week_of_year(NaiveDate::MAX, 0, false) >= 52);
        assert!(week_of_year(NaiveDate::MIN, 0, true) >= 1);
    }

    #[test]
    fn test_locale_week_number_monday_start() {
        // 2023-01-01 is a Sunday; with Monday-start weeks it closes week 1
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), 1, false), 1);
        assert_eq!(week_of_year(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(), 1, false), 2);
    }

    #[test]
    fn test_parse_date_accepts_date_and_datetime() {
        assert_eq!(parse_date("2025-03-15").unwrap(), d(2025, 3, 15));
        assert_eq!(
            parse_date("2025-03-15T10:30:00").unwrap(),
            d(2025, 3, 15).with_hour(10).unwrap().with_minute(30).unwrap()
        );
        assert_eq!(
            parse_date(" 2025-03-15 10:30:00 ").unwrap().hour(),
            10
        );
    }

    #[test]
    fn test_parse_date_invalid_returns_error() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }
}
