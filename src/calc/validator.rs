use crate::calc::date_math::{
    is_same, is_same_or_after, is_same_or_before, CalendarDate, Granularity,
};
use crate::data::{Options, SelectionState};

/// True when `date` may not be picked: absent, on or before `date.min`, on or
/// after `date.max` (compared at `granularity`), or marked by a disabled
/// custom rule for that day.
pub fn is_disabled(options: &Options, date: Option<CalendarDate>, granularity: Granularity) -> bool {
    let Some(date) = date else {
        return true;
    };

    if let Some(min) = &options.date.min {
        if is_same_or_before(&date, min, granularity) {
            return true;
        }
    }
    if let Some(max) = &options.date.max {
        if is_same_or_after(&date, max, granularity) {
            return true;
        }
    }

    options
        .custom_dates
        .iter()
        .any(|rule| rule.is_disabled && is_same(Some(rule.date), Some(date)))
}

/// Range pickers only: true when a disabled custom date lies between the
/// selected start and `date`, both ends inclusive.
pub fn is_disabled_date_in_range(
    options: &Options,
    state: &SelectionState,
    date: Option<CalendarDate>,
) -> bool {
    if !options.is_date_range_picker() {
        return false;
    }
    let (Some(start), Some(date)) = (state.selected_date, date) else {
        return false;
    };

    options.custom_dates.iter().any(|rule| {
        rule.is_disabled
            && is_same_or_after(&rule.date, &start, Granularity::Day)
            && is_same_or_before(&rule.date, &date, Granularity::Day)
    })
}
