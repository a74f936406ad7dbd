use crate::calc::date_math::CalendarDate;
use crate::data::serde_date;
use chrono::Local;
use serde::Serialize;

/// The four pieces of mutable picker state. Owned by the embedding layer;
/// the engine borrows it for each call and never keeps a copy.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Anchors which month/year/decade the grid displays.
    #[serde(with = "serde_date")]
    pub view_date: CalendarDate,
    #[serde(with = "serde_date::opt")]
    pub selected_date: Option<CalendarDate>,
    #[serde(with = "serde_date::opt")]
    pub selected_end_date: Option<CalendarDate>,
    /// Hover/focus pointer used to preview a range end before commit.
    #[serde(with = "serde_date::opt")]
    pub active_date: Option<CalendarDate>,
}

impl SelectionState {
    /// Starts with no selection. `view_date` falls back to the local "now".
    pub fn new(view_date: Option<CalendarDate>) -> Self {
        SelectionState {
            view_date: view_date.unwrap_or_else(|| Local::now().naive_local()),
            selected_date: None,
            selected_end_date: None,
            active_date: None,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_date = None;
        self.selected_end_date = None;
        self.active_date = None;
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(None)
    }
}
