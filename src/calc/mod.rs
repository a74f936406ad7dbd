pub mod date_math;
pub mod grid;
pub mod navigation;
pub mod picker;
pub mod selection;
pub mod validator;

pub use date_math::{CalendarDate, Granularity, TimeUnit};
pub use grid::{DayCell, Matrix, MonthCell, YearCell};
pub use picker::{CalendarObserver, Changes, DatePicker};
