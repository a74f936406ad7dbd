//! Date-picker engine: day/month/year grids, single and range selection,
//! disabled-date rules and drill-down navigation over caller-owned state.

pub mod calc;
pub mod data;

pub use calc::{CalendarDate, CalendarObserver, Changes, DatePicker, Granularity, TimeUnit};
pub use data::{Options, SelectionState, ViewMode};
