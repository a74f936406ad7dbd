pub mod locale;
pub mod options;
pub mod persistence;
pub mod serde_date;
pub mod state;

pub use locale::{Locale, LocaleDescriptor};
pub use options::{CustomDateRule, DateOptions, FormatOptions, Options, PickerMode, UiOptions, ViewMode};
pub use persistence::Persistable;
pub use state::SelectionState;
