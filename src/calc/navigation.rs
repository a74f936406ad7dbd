use crate::calc::date_math::{shift, CalendarDate, TimeUnit};
use crate::calc::picker::Changes;
use crate::calc::selection::select_date;
use crate::data::{Options, SelectionState, ViewMode};

pub fn prev(state: &mut SelectionState, unit: TimeUnit, step: u32) -> Changes {
    shift_view_date(state, unit, -i64::from(step))
}

pub fn next(state: &mut SelectionState, unit: TimeUnit, step: u32) -> Changes {
    shift_view_date(state, unit, i64::from(step))
}

fn shift_view_date(state: &mut SelectionState, unit: TimeUnit, amount: i64) -> Changes {
    match shift(state.view_date, unit, amount) {
        Some(date) => {
            state.view_date = date;
            Changes::VIEW_DATE
        }
        None => {
            log::debug!("view date {} cannot move {amount} {unit:?}", state.view_date);
            Changes::NONE
        }
    }
}

/// Switches the grid to `mode` when it lies within `[min_mode, max_mode]`.
pub fn set_view_mode(options: &mut Options, mode: ViewMode) -> Changes {
    if mode < options.ui.min_mode || mode > options.ui.max_mode {
        log::debug!("view mode {} is outside the configured bounds", mode.as_str());
        return Changes::NONE;
    }
    let changed = options.view_mode != mode;
    options.view_mode = mode;
    Changes {
        options: changed,
        ..Changes::NONE
    }
}

/// Moves the view to `date`. With `degrade`, a pick in the years or months
/// grid drills down one level, or becomes the selection when that level is
/// below `min_mode`.
pub fn set_view_date(
    options: &mut Options,
    state: &mut SelectionState,
    date: CalendarDate,
    degrade: bool,
) -> Changes {
    state.view_date = date;
    let mut changes = Changes::VIEW_DATE;
    if !degrade {
        return changes;
    }

    let narrower = match options.view_mode {
        ViewMode::Years => ViewMode::Months,
        ViewMode::Months => ViewMode::Days,
        ViewMode::Days => return changes,
    };
    if narrower >= options.ui.min_mode {
        changes |= set_view_mode(options, narrower);
    } else {
        changes |= select_date(options, state, date);
    }
    changes
}

/// Applies `date.initial` and `date.selected` from the options, once, after
/// the state has been created.
pub fn init(options: &Options, state: &mut SelectionState) -> Changes {
    let mut changes = Changes::NONE;
    if let Some(initial) = options.date.initial {
        state.view_date = initial;
        changes |= Changes::VIEW_DATE;
    }
    if let Some(selected) = options.date.selected {
        state.selected_date = Some(selected);
        changes |= Changes::SELECTION;
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(y, m, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn bounded(min: ViewMode, max: ViewMode, current: ViewMode) -> Options {
        let mut options = Options::default();
        options.ui.min_mode = min;
        options.ui.max_mode = max;
        options.view_mode = current;
        options
    }

    #[test]
    fn test_next_month_from_month_end_does_not_skip() {
        let mut state = SelectionState::new(Some(d(2025, 1, 31)));
        let changes = next(&mut state, TimeUnit::Months, 1);
        assert_eq!(changes, Changes::VIEW_DATE);
        assert_eq!(state.view_date, d(2025, 2, 28));
    }

    #[test]
    fn test_prev_and_next_by_days_and_years() {
        let mut state = SelectionState::new(Some(d(2025, 3, 1)));
        prev(&mut state, TimeUnit::Days, 1);
        assert_eq!(state.view_date, d(2025, 2, 28));
        next(&mut state, TimeUnit::Years, 3);
        assert_eq!(state.view_date, d(2028, 2, 28));
        prev(&mut state, TimeUnit::Months, 14);
        assert_eq!(state.view_date, d(2026, 12, 28));
    }

    #[test]
    fn test_next_keeps_time_of_day() {
        let mut state = SelectionState::new(Some(d(2025, 3, 1)));
        next(&mut state, TimeUnit::Days, 10);
        assert_eq!(state.view_date, d(2025, 3, 11));
    }

    #[test]
    fn test_next_overflow_is_noop() {
        let mut state = SelectionState::new(Some(CalendarDate::MAX));
        assert!(next(&mut state, TimeUnit::Years, 1).is_empty());
        assert_eq!(state.view_date, CalendarDate::MAX);
    }

    #[test]
    fn test_set_view_mode_within_bounds() {
        let mut options = bounded(ViewMode::Days, ViewMode::Months, ViewMode::Days);
        assert!(set_view_mode(&mut options, ViewMode::Months).options);
        assert_eq!(options.view_mode, ViewMode::Months);
    }

    #[test]
    fn test_set_view_mode_outside_bounds_ignored() {
        let mut options = bounded(ViewMode::Days, ViewMode::Months, ViewMode::Days);
        assert!(set_view_mode(&mut options, ViewMode::Years).is_empty());
        assert_eq!(options.view_mode, ViewMode::Days);

        let mut options = bounded(ViewMode::Months, ViewMode::Years, ViewMode::Years);
        assert!(set_view_mode(&mut options, ViewMode::Days).is_empty());
        assert_eq!(options.view_mode, ViewMode::Years);
    }

    #[test]
    fn test_set_view_date_without_degrade_only_moves_view() {
        let mut options = bounded(ViewMode::Days, ViewMode::Years, ViewMode::Years);
        let mut state = SelectionState::new(Some(d(2025, 1, 1)));
        let changes = set_view_date(&mut options, &mut state, d(2031, 1, 1), false);
        assert_eq!(changes, Changes::VIEW_DATE);
        assert_eq!(state.view_date, d(2031, 1, 1));
        assert_eq!(options.view_mode, ViewMode::Years);
    }

    #[test]
    fn test_degrade_years_to_months() {
        let mut options = bounded(ViewMode::Months, ViewMode::Years, ViewMode::Years);
        let mut state = SelectionState::new(Some(d(2025, 1, 1)));
        let changes = set_view_date(&mut options, &mut state, d(2031, 1, 1), true);
        assert!(changes.view_date && changes.options && !changes.selection);
        assert_eq!(options.view_mode, ViewMode::Months);
        assert!(state.selected_date.is_none());
    }

    #[test]
    fn test_degrade_months_to_days() {
        let mut options = bounded(ViewMode::Days, ViewMode::Years, ViewMode::Months);
        let mut state = SelectionState::new(Some(d(2025, 1, 1)));
        set_view_date(&mut options, &mut state, d(2025, 6, 1), true);
        assert_eq!(options.view_mode, ViewMode::Days);
        assert_eq!(state.view_date, d(2025, 6, 1));
        assert!(state.selected_date.is_none());
    }

    #[test]
    fn test_degrade_at_floor_commits_selection() {
        let mut options = bounded(ViewMode::Months, ViewMode::Years, ViewMode::Months);
        let mut state = SelectionState::new(Some(d(2025, 1, 1)));
        let changes = set_view_date(&mut options, &mut state, d(2025, 6, 1), true);
        assert!(changes.selection && !changes.options);
        assert_eq!(options.view_mode, ViewMode::Months);
        assert_eq!(state.selected_date, Some(d(2025, 6, 1)));
    }

    #[test]
    fn test_degrade_years_at_floor_commits_selection() {
        let mut options = bounded(ViewMode::Years, ViewMode::Years, ViewMode::Years);
        let mut state = SelectionState::new(Some(d(2025, 1, 1)));
        set_view_date(&mut options, &mut state, d(2030, 1, 1), true);
        assert_eq!(options.view_mode, ViewMode::Years);
        assert_eq!(state.selected_date, Some(d(2030, 1, 1)));
    }

    #[test]
    fn test_degrade_in_days_mode_does_nothing_more() {
        let mut options = Options::default();
        let mut state = SelectionState::new(Some(d(2025, 1, 1)));
        let changes = set_view_date(&mut options, &mut state, d(2025, 1, 9), true);
        assert_eq!(changes, Changes::VIEW_DATE);
        assert!(state.selected_date.is_none());
    }

    #[test]
    fn test_init_applies_initial_and_selected() {
        let mut options = Options::default();
        options.date.initial = Some(d(2030, 5, 5));
        options.date.selected = Some(d(2030, 5, 7));
        let mut state = SelectionState::new(Some(d(2025, 1, 1)));
        let changes = init(&options, &mut state);
        assert!(changes.view_date && changes.selection);
        assert_eq!(state.view_date, d(2030, 5, 5));
        assert_eq!(state.selected_date, Some(d(2030, 5, 7)));
    }

    #[test]
    fn test_init_without_dates_is_noop() {
        let mut state = SelectionState::new(Some(d(2025, 1, 1)));
        assert!(init(&Options::default(), &mut state).is_empty());
        assert_eq!(state.view_date, d(2025, 1, 1));
    }
}
