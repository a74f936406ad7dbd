use crate::calc::date_math::{CalendarDate, Granularity, TimeUnit};
use crate::calc::grid::{self, DayCell, Matrix, MonthCell, YearCell};
use crate::calc::{navigation, selection, validator};
use crate::data::{LocaleDescriptor, Options, SelectionState, ViewMode};
use chrono::Datelike;
use std::ops::{BitOr, BitOrAssign};

/// What a picker operation touched. The embedding layer hands this to its
/// [`CalendarObserver`] and re-reads grids as needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub view_date: bool,
    pub options: bool,
    /// Selected, end or active date.
    pub selection: bool,
}

impl Changes {
    pub const NONE: Changes = Changes {
        view_date: false,
        options: false,
        selection: false,
    };
    pub const VIEW_DATE: Changes = Changes {
        view_date: true,
        ..Changes::NONE
    };
    pub const SELECTION: Changes = Changes {
        selection: true,
        ..Changes::NONE
    };

    pub fn selection_if(changed: bool) -> Changes {
        Changes {
            selection: changed,
            ..Changes::NONE
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Changes::NONE
    }

    pub fn notify(
        self,
        observer: &mut dyn CalendarObserver,
        options: &Options,
        state: &SelectionState,
    ) {
        if self.view_date {
            observer.on_view_date_changed(state);
        }
        if self.options {
            observer.on_options_changed(options);
        }
        if self.selection {
            observer.on_selection_changed(state);
        }
    }
}

impl BitOr for Changes {
    type Output = Changes;

    fn bitor(self, rhs: Changes) -> Changes {
        Changes {
            view_date: self.view_date || rhs.view_date,
            options: self.options || rhs.options,
            selection: self.selection || rhs.selection,
        }
    }
}

impl BitOrAssign for Changes {
    fn bitor_assign(&mut self, rhs: Changes) {
        *self = *self | rhs;
    }
}

/// Hooks for whoever renders the picker. All default to no-ops.
pub trait CalendarObserver {
    fn on_view_date_changed(&mut self, _state: &SelectionState) {}
    fn on_options_changed(&mut self, _options: &Options) {}
    fn on_selection_changed(&mut self, _state: &SelectionState) {}
}

/// Borrowed view over the caller's options and selection state. Every grid is
/// rebuilt from the current values on each call.
pub struct DatePicker<'a> {
    options: &'a mut Options,
    state: &'a mut SelectionState,
}

impl<'a> DatePicker<'a> {
    pub fn new(options: &'a mut Options, state: &'a mut SelectionState) -> Self {
        DatePicker { options, state }
    }

    pub fn options(&self) -> &Options {
        self.options
    }

    pub fn state(&self) -> &SelectionState {
        self.state
    }

    pub fn init(&mut self) -> Changes {
        navigation::init(self.options, self.state)
    }

    // ── selection ─────────────────────────────────────────────────────────────

    pub fn select_date(&mut self, date: CalendarDate) -> Changes {
        selection::select_date(self.options, self.state, date)
    }

    pub fn activate_date(&mut self, date: CalendarDate) -> Changes {
        selection::activate_date(self.options, self.state, date)
    }

    pub fn is_disabled(&self, date: Option<CalendarDate>, granularity: Granularity) -> bool {
        validator::is_disabled(self.options, date, granularity)
    }

    pub fn is_disabled_date_in_range(&self, date: Option<CalendarDate>) -> bool {
        validator::is_disabled_date_in_range(self.options, self.state, date)
    }

    pub fn is_selected(&self, date: CalendarDate) -> bool {
        selection::is_selected(self.options, self.state, date)
    }

    pub fn is_active(&self, date: CalendarDate) -> bool {
        selection::is_active(self.options, self.state, date)
    }

    pub fn is_selection_start(&self, date: CalendarDate) -> bool {
        selection::is_selection_start(self.options, self.state, date)
    }

    pub fn is_selection_end(&self, date: CalendarDate) -> bool {
        selection::is_selection_end(self.options, self.state, date)
    }

    pub fn is_other_month(&self, date: CalendarDate) -> bool {
        selection::is_other_month(date, self.state.view_date)
    }

    pub fn is_highlighted(&self, date: CalendarDate) -> bool {
        selection::is_highlighted(self.options, self.state, date)
    }

    // ── navigation ────────────────────────────────────────────────────────────

    pub fn prev(&mut self, unit: TimeUnit, step: u32) -> Changes {
        navigation::prev(self.state, unit, step)
    }

    pub fn next(&mut self, unit: TimeUnit, step: u32) -> Changes {
        navigation::next(self.state, unit, step)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Changes {
        navigation::set_view_mode(self.options, mode)
    }

    pub fn set_view_date(&mut self, date: CalendarDate, degrade: bool) -> Changes {
        navigation::set_view_date(self.options, self.state, date, degrade)
    }

    // ── grids ─────────────────────────────────────────────────────────────────

    pub fn days_matrix(&self) -> Matrix<DayCell> {
        grid::days_matrix(self.options, self.state)
    }

    pub fn months_matrix(&self) -> Matrix<MonthCell> {
        grid::months_matrix(self.options, self.state)
    }

    pub fn years_matrix(&self) -> Matrix<YearCell> {
        grid::years_matrix(self.options, self.state)
    }

    pub fn week_numbers(&self) -> Vec<u32> {
        grid::week_numbers(self.options, self.state)
    }

    pub fn starting_day(&self) -> CalendarDate {
        grid::starting_day(self.state.view_date, self.options.locale.first_day)
    }

    pub fn starting_year(&self) -> i32 {
        grid::starting_year(self.state.view_date.year(), self.options)
    }

    pub fn locale(&self) -> LocaleDescriptor {
        self.options.locale.descriptor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CustomDateRule, PickerMode};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        NaiveDate::from_ymd_opt(y, m, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<&'static str>,
    }

    impl CalendarObserver for Recorder {
        fn on_view_date_changed(&mut self, _state: &SelectionState) {
            self.events.push("view_date");
        }
        fn on_options_changed(&mut self, _options: &Options) {
            self.events.push("options");
        }
        fn on_selection_changed(&mut self, _state: &SelectionState) {
            self.events.push("selection");
        }
    }

    #[test]
    fn test_changes_bitor_merges_flags() {
        let merged = Changes::VIEW_DATE | Changes::SELECTION;
        assert!(merged.view_date && merged.selection && !merged.options);
        assert!(Changes::NONE.is_empty());
        assert!(!merged.is_empty());
    }

    #[test]
    fn test_notify_calls_matching_hooks_in_order() {
        let mut recorder = Recorder::default();
        let options = Options::default();
        let state = SelectionState::new(Some(d(2025, 1, 1)));
        let changes = Changes {
            view_date: true,
            options: true,
            selection: true,
        };
        changes.notify(&mut recorder, &options, &state);
        assert_eq!(recorder.events, ["view_date", "options", "selection"]);

        let mut recorder = Recorder::default();
        Changes::NONE.notify(&mut recorder, &options, &state);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_range_pick_through_facade() {
        let mut options = Options {
            picker: PickerMode::DateRange,
            custom_dates: vec![CustomDateRule::disabled(d(2025, 10, 20))],
            ..Options::default()
        };
        let mut state = SelectionState::new(Some(d(2025, 10, 1)));
        let mut picker = DatePicker::new(&mut options, &mut state);

        assert!(picker.select_date(d(2025, 10, 6)).selection);
        picker.activate_date(d(2025, 10, 9));
        assert!(picker.is_active(d(2025, 10, 8)));
        assert!(picker.is_highlighted(d(2025, 10, 9)));
        assert!(picker.select_date(d(2025, 10, 9)).selection);
        assert!(picker.is_selection_start(d(2025, 10, 6)));
        assert!(picker.is_selection_end(d(2025, 10, 9)));
        assert!(picker.is_disabled(Some(d(2025, 10, 20)), Granularity::Day));
        assert!(picker.is_other_month(d(2025, 9, 30)));

        let cells = picker.days_matrix();
        assert_eq!(cells.iter().flatten().filter(|c| c.is_selected).count(), 2);
        assert_eq!(picker.state().selected_end_date, Some(d(2025, 10, 9)));
    }

    #[test]
    fn test_drill_down_from_years_to_days() {
        let mut options = Options {
            view_mode: ViewMode::Years,
            ..Options::default()
        };
        let mut state = SelectionState::new(Some(d(2025, 10, 1)));
        let mut picker = DatePicker::new(&mut options, &mut state);

        let year = picker.years_matrix()[1][2].date;
        let changes = picker.set_view_date(year, true);
        assert!(changes.options);
        assert_eq!(picker.options().view_mode, ViewMode::Months);

        let month = picker.months_matrix()[0][1].date;
        picker.set_view_date(month, true);
        assert_eq!(picker.options().view_mode, ViewMode::Days);
        assert_eq!(picker.state().view_date, d(2027, 2, 1));
        assert!(picker.state().selected_date.is_none());
    }

    #[test]
    fn test_paging_and_grid_helpers() {
        let mut options = Options::default();
        let mut state = SelectionState::new(Some(d(2025, 10, 1)));
        let mut picker = DatePicker::new(&mut options, &mut state);
        assert_eq!(picker.starting_day(), d(2025, 9, 28));
        assert_eq!(picker.starting_year(), 2020);
        picker.next(TimeUnit::Months, 1);
        assert_eq!(picker.state().view_date, d(2025, 11, 1));
        picker.prev(TimeUnit::Years, 1);
        assert_eq!(picker.week_numbers().len(), 6);
        assert_eq!(picker.state().view_date, d(2024, 11, 1));
        assert_eq!(picker.locale().weekdays_short[0], "Su");
    }

    #[test]
    fn test_init_through_facade() {
        let mut options = Options::default();
        options.date.initial = Some(d(2026, 3, 3));
        let mut state = SelectionState::new(None);
        let mut picker = DatePicker::new(&mut options, &mut state);
        assert!(picker.init().view_date);
        assert_eq!(picker.state().view_date, d(2026, 3, 3));
        assert!(!picker.is_disabled_date_in_range(Some(d(2026, 3, 9))));
        assert!(picker.set_view_mode(ViewMode::Months).options);
    }
}
