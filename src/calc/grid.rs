use crate::calc::date_math::{
    at_midnight, days_in_month, previous_month, time_of, week_of_year, CalendarDate, Granularity,
};
use crate::calc::selection::{
    is_active, is_highlighted, is_other_month, is_selected, is_selection_end, is_selection_start,
};
use crate::calc::validator::is_disabled;
use crate::data::serde_date;
use crate::data::{Options, SelectionState};
use chrono::{Datelike, Days, Duration, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt::Write;

/// Row-major grid of cells.
pub type Matrix<T> = Vec<Vec<T>>;

pub const MONTH_ROWS: usize = 4;
pub const MONTH_COLUMNS: usize = 3;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DayCell {
    #[serde(with = "serde_date")]
    pub date: CalendarDate,
    pub label: String,
    pub is_active: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
    pub is_selection_start: bool,
    pub is_selection_end: bool,
    pub is_other_month: bool,
    pub is_highlighted: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthCell {
    #[serde(with = "serde_date")]
    pub date: CalendarDate,
    pub label: String,
    pub is_active: bool,
    pub is_disabled: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct YearCell {
    #[serde(with = "serde_date")]
    pub date: CalendarDate,
    pub label: i32,
    pub is_active: bool,
    pub is_disabled: bool,
}

/// The date in the top-left cell of the day grid for `view_date`'s month:
/// the last days of the previous month that fill the first row up to the 1st.
/// When the 1st falls on `first_day` a whole previous week is shown.
pub fn starting_day(view_date: CalendarDate, first_day: u32) -> CalendarDate {
    let first = first_of_month(view_date);
    let (prev_year, prev_month) = previous_month(first.year(), first.month());
    let days_in_prev = days_in_month(prev_year, prev_month) as i64;
    let day_of_week = first.weekday().num_days_from_sunday() as i64;
    let first_day = first_day as i64;

    let mut start = days_in_prev - day_of_week + first_day + 1;
    if start > days_in_prev {
        start -= 7;
    }
    if day_of_week == first_day {
        start = days_in_prev - 6;
    }

    let leading = (days_in_prev - start + 1) as u64;
    at_midnight(first.checked_sub_days(Days::new(leading)).unwrap_or(first))
}

/// First year of the year-grid page containing `year`.
pub fn starting_year(year: i32, options: &Options) -> i32 {
    let step = (options.ui.year_rows * options.ui.year_columns).max(1) as i32;
    year - year.rem_euclid(step)
}

/// `day_rows x day_columns` cells walking forward one day at a time from
/// `starting_day`. The walking cursor sits at noon so a day step can never
/// land on the wrong date; emitted cells carry the view date's time of day.
pub fn days_matrix(options: &Options, state: &SelectionState) -> Matrix<DayCell> {
    let view_date = state.view_date;
    let view_time = time_of(&view_date);
    let noon = NaiveTime::from_hms_opt(12, view_date.minute(), view_date.second())
        .unwrap_or(NaiveTime::MIN);
    let one_day = Duration::hours(24);

    let start = grid_start(options, view_date).and_time(noon);
    let rows = options.ui.day_rows;
    let columns = options.ui.day_columns.max(1);

    let cells: Vec<DayCell> = std::iter::successors(Some(start), |cursor| {
        cursor
            .checked_add_signed(one_day)
            .map(|next| next.date().and_time(noon))
    })
    .take(rows * columns)
    .map(|cursor| DayCell {
        date: cursor.date().and_time(view_time),
        label: format_label(&cursor, &options.format.day, options, || cursor.day().to_string()),
        is_active: is_active(options, state, cursor),
        is_selected: is_selected(options, state, cursor),
        is_disabled: is_disabled(options, Some(cursor), Granularity::Day),
        is_selection_start: is_selection_start(options, state, cursor),
        is_selection_end: is_selection_end(options, state, cursor),
        is_other_month: is_other_month(cursor, view_date),
        is_highlighted: is_highlighted(options, state, cursor),
    })
    .collect();

    cells.chunks(columns).map(<[DayCell]>::to_vec).collect()
}

/// Twelve months of the view year in a 4x3 grid.
pub fn months_matrix(options: &Options, state: &SelectionState) -> Matrix<MonthCell> {
    let view_date = state.view_date;
    (0..MONTH_ROWS)
        .map(|row| {
            (0..MONTH_COLUMNS)
                .map(|col| {
                    let month = (row * MONTH_COLUMNS + col) as u32 + 1;
                    let date = NaiveDate::from_ymd_opt(view_date.year(), month, 1)
                        .map(at_midnight)
                        .unwrap_or(view_date);
                    MonthCell {
                        date,
                        label: month_label(&date, options),
                        is_active: month == view_date.month(),
                        is_disabled: is_disabled(options, Some(date), Granularity::Month),
                    }
                })
                .collect()
        })
        .collect()
}

/// `year_rows x year_columns` consecutive years, starting at `starting_year`.
pub fn years_matrix(options: &Options, state: &SelectionState) -> Matrix<YearCell> {
    let view_date = state.view_date;
    let first = starting_year(view_date.year(), options);
    let columns = options.ui.year_columns;
    (0..options.ui.year_rows)
        .map(|row| {
            (0..columns)
                .map(|col| {
                    let year = first + (row * columns + col) as i32;
                    let date = NaiveDate::from_ymd_opt(year, view_date.month(), 1)
                        .map(at_midnight)
                        .unwrap_or(view_date);
                    YearCell {
                        date,
                        label: year,
                        is_active: year == view_date.year(),
                        is_disabled: is_disabled(options, Some(date), Granularity::Year),
                    }
                })
                .collect()
        })
        .collect()
}

/// One week number per day-grid row: the week of `starting_day`, then +1 per row.
pub fn week_numbers(options: &Options, state: &SelectionState) -> Vec<u32> {
    let start = grid_start(options, state.view_date);
    let first_week = week_of_year(
        start,
        options.locale.first_day,
        options.ui.show_iso_week_numbers,
    );
    (0..options.ui.day_rows as u32).map(|i| first_week + i).collect()
}

/// `format.month` for `date` with month and weekday names taken from the locale.
pub fn month_label(date: &CalendarDate, options: &Options) -> String {
    format_label(date, &options.format.month, options, || date.month().to_string())
}

/// First day the day grid shows. Normally `starting_day`; at the top of the
/// calendar range it moves back by whole rows so every cell still exists.
fn grid_start(options: &Options, view_date: CalendarDate) -> NaiveDate {
    let start = starting_day(view_date, options.locale.first_day).date();
    let span = (options.ui.day_rows * options.ui.day_columns).saturating_sub(1) as u64;
    if start.checked_add_days(Days::new(span)).is_some() {
        return start;
    }
    let room = (NaiveDate::MAX - start).num_days().max(0) as u64;
    let columns = options.ui.day_columns.max(1) as u64;
    let back = (span - room).div_ceil(columns) * columns;
    start.checked_sub_days(Days::new(back)).unwrap_or(start)
}

fn first_of_month(date: CalendarDate) -> NaiveDate {
    date.date().with_day(1).unwrap_or(date.date())
}

fn format_label(
    date: &CalendarDate,
    pattern: &str,
    options: &Options,
    fallback: impl FnOnce() -> String,
) -> String {
    let pattern = options.locale.localize_pattern(pattern, date);
    let mut label = String::new();
    match write!(label, "{}", date.format(&pattern)) {
        Ok(()) => label,
        Err(_) => {
            log::warn!("invalid label pattern '{pattern}'");
            fallback()
        }
    }
}
