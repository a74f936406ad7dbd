use crate::calc::date_math::{cmp_at, is_after, is_before, is_same, CalendarDate, Granularity};
use crate::calc::picker::Changes;
use crate::calc::validator::{is_disabled, is_disabled_date_in_range};
use crate::data::{Options, SelectionState};
use std::cmp::Ordering;

/// Applies a click on `date` to the committed selection.
///
/// Range pickers resolve the click in a fixed order, first match wins:
/// start a range, restart before the start, close a one-day range, restart
/// after a finished range, refuse to span a disabled date, close the range.
pub fn select_date(options: &Options, state: &mut SelectionState, date: CalendarDate) -> Changes {
    if is_disabled(options, Some(date), Granularity::Day) {
        log::debug!("ignoring selection of disabled date {date}");
        return Changes::NONE;
    }
    let before = (state.selected_date, state.selected_end_date);

    if options.is_date_picker() {
        state.selected_date = Some(date);
        state.selected_end_date = None;
        return Changes::selection_if(before != (state.selected_date, state.selected_end_date));
    }

    match state.selected_date {
        None => {
            state.selected_date = Some(date);
        }
        Some(start) if is_before(&date, &start, Granularity::Day) => {
            state.selected_date = Some(date);
            state.selected_end_date = None;
        }
        Some(start) if is_same(Some(date), Some(start)) => {
            state.selected_end_date = Some(date);
        }
        Some(_) if state.selected_end_date.is_some() => {
            state.selected_date = Some(date);
            state.selected_end_date = None;
        }
        Some(_) if is_disabled_date_in_range(options, state, Some(date)) => {
            log::debug!("range up to {date} would span a disabled date");
        }
        Some(_) => {
            state.selected_end_date = Some(date);
        }
    }

    Changes::selection_if(before != (state.selected_date, state.selected_end_date))
}

/// Moves the hover pointer; disabled dates are ignored.
pub fn activate_date(options: &Options, state: &mut SelectionState, date: CalendarDate) -> Changes {
    if is_disabled(options, Some(date), Granularity::Day) {
        log::trace!("ignoring activation of disabled date {date}");
        return Changes::NONE;
    }
    let changed = state.active_date != Some(date);
    state.active_date = Some(date);
    Changes::selection_if(changed)
}

pub fn is_selected(options: &Options, state: &SelectionState, date: CalendarDate) -> bool {
    if options.is_date_picker() {
        return is_same(state.selected_date, Some(date));
    }
    is_same(state.selected_date, Some(date)) || is_same(state.selected_end_date, Some(date))
}

/// Range preview: true for days strictly inside the committed range, or
/// strictly between the start and the hovered date while no end is set.
pub fn is_active(options: &Options, state: &SelectionState, date: CalendarDate) -> bool {
    if options.is_date_picker() {
        return false;
    }
    let Some(start) = state.selected_date else {
        return false;
    };
    let Some(end) = state.selected_end_date.or(state.active_date) else {
        return false;
    };
    if is_disabled_date_in_range(options, state, Some(end)) {
        return false;
    }
    is_after(&date, &start, Granularity::Day) && is_before(&date, &end, Granularity::Day)
}

pub fn is_selection_start(options: &Options, state: &SelectionState, date: CalendarDate) -> bool {
    options.is_date_range_picker() && is_same(Some(date), state.selected_date)
}

pub fn is_selection_end(options: &Options, state: &SelectionState, date: CalendarDate) -> bool {
    options.is_date_range_picker() && is_same(Some(date), state.selected_end_date)
}

pub fn is_other_month(date: CalendarDate, view_date: CalendarDate) -> bool {
    cmp_at(&date, &view_date, Granularity::Month) != Ordering::Equal
}

/// The hovered day, unless reaching it from the start would cross a disabled date.
pub fn is_highlighted(options: &Options, state: &SelectionState, date: CalendarDate) -> bool {
    if is_disabled_date_in_range(options, state, Some(date)) {
        return false;
    }
    is_same(Some(date), state.active_date)
}
