use crate::calc::date_math::{is_same_or_after, parse_date, CalendarDate, Granularity};
use crate::data::locale::Locale;
use crate::data::persistence::Persistable;
use crate::data::serde_date;
use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use clap::ValueEnum;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// Which grid the picker shows. Ordered `Days < Months < Years`.
#[derive(
    Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Days,
    Months,
    Years,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Days => "days",
            ViewMode::Months => "months",
            ViewMode::Years => "years",
        }
    }
}

/// Single-date picking or start/end range picking.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PickerMode {
    #[default]
    Date,
    DateRange,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UiOptions {
    pub min_mode: ViewMode,
    pub max_mode: ViewMode,
    pub day_rows: usize,
    pub day_columns: usize,
    pub year_rows: usize,
    pub year_columns: usize,
    pub show_iso_week_numbers: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        UiOptions {
            min_mode: ViewMode::Days,
            max_mode: ViewMode::Years,
            day_rows: 6,
            day_columns: 7,
            year_rows: 4,
            year_columns: 5,
            show_iso_week_numbers: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DateOptions {
    /// Dates on or before this bound are disabled.
    #[serde(with = "serde_date::opt", skip_serializing_if = "Option::is_none")]
    pub min: Option<CalendarDate>,
    /// Dates on or after this bound are disabled.
    #[serde(with = "serde_date::opt", skip_serializing_if = "Option::is_none")]
    pub max: Option<CalendarDate>,
    #[serde(with = "serde_date::opt", skip_serializing_if = "Option::is_none")]
    pub initial: Option<CalendarDate>,
    #[serde(with = "serde_date::opt", skip_serializing_if = "Option::is_none")]
    pub selected: Option<CalendarDate>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CustomDateRule {
    #[serde(with = "serde_date")]
    pub date: CalendarDate,
    pub is_disabled: bool,
}

impl CustomDateRule {
    pub fn disabled(date: CalendarDate) -> Self {
        CustomDateRule {
            date,
            is_disabled: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FormatOptions {
    /// strftime pattern for day-cell labels.
    pub day: String,
    /// strftime pattern for month-cell labels.
    pub month: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            day: "%d".to_string(),
            month: "%B".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Options {
    pub view_mode: ViewMode,
    pub ui: UiOptions,
    pub date: DateOptions,
    #[serde(deserialize_with = "deserialize_custom_dates")]
    pub custom_dates: Vec<CustomDateRule>,
    pub format: FormatOptions,
    pub picker: PickerMode,
    pub locale: Locale,
}

impl Persistable for Options {
    fn filename() -> &'static str {
        "picker.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl Options {
    pub fn is_date_picker(&self) -> bool {
        self.picker == PickerMode::Date
    }

    pub fn is_date_range_picker(&self) -> bool {
        self.picker == PickerMode::DateRange
    }

    /// Loads `picker.yaml` from the config dir (defaults when absent) and validates it.
    pub fn load_validated() -> Result<Self> {
        let options = Self::load()?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let ui = &self.ui;
        if ui.day_rows == 0 || ui.day_columns == 0 {
            bail!(
                "day grid must be at least 1x1, got {}x{}",
                ui.day_rows,
                ui.day_columns
            );
        }
        if ui.year_rows == 0 || ui.year_columns == 0 {
            bail!(
                "year grid must be at least 1x1, got {}x{}",
                ui.year_rows,
                ui.year_columns
            );
        }
        if ui.min_mode > ui.max_mode {
            bail!(
                "min_mode '{}' is above max_mode '{}'",
                ui.min_mode.as_str(),
                ui.max_mode.as_str()
            );
        }
        if self.view_mode < ui.min_mode || self.view_mode > ui.max_mode {
            bail!(
                "view_mode '{}' is outside [{}, {}]",
                self.view_mode.as_str(),
                ui.min_mode.as_str(),
                ui.max_mode.as_str()
            );
        }
        if let (Some(min), Some(max)) = (self.date.min, self.date.max) {
            if is_same_or_after(&min, &max, Granularity::Day) {
                bail!("date.min must be before date.max");
            }
        }
        if self.locale.first_day > 6 {
            bail!("locale.first_day must be 0-6, got {}", self.locale.first_day);
        }
        if self.locale.weekdays.len() != 7 || self.locale.weekdays_short.len() != 7 {
            bail!("locale weekday lists must have 7 entries");
        }
        if self.locale.month_names.len() != 12 || self.locale.month_names_long.len() != 12 {
            bail!("locale.month_names and locale.month_names_long must have 12 entries");
        }
        for (name, pattern) in [
            ("format.day", &self.format.day),
            ("format.month", &self.format.month),
            ("locale.format", &self.locale.format),
        ] {
            check_pattern(name, pattern)?;
        }
        Ok(())
    }
}

fn check_pattern(name: &str, pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| item == Item::Error) {
        bail!("{name} is not a valid strftime pattern: '{pattern}'");
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawRule {
    date: String,
    #[serde(default)]
    is_disabled: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeRule {
    Rule(RawRule),
    Other(IgnoredAny),
}

/// Reads `custom_dates`, skipping entries that are not `{date, is_disabled}`
/// maps or whose date does not parse. A null list is an empty rule set.
fn deserialize_custom_dates<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Vec<CustomDateRule>, D::Error> {
    let raw = Option::<Vec<MaybeRule>>::deserialize(d)?.unwrap_or_default();
    let mut rules = Vec::with_capacity(raw.len());
    for (idx, entry) in raw.into_iter().enumerate() {
        let MaybeRule::Rule(rule) = entry else {
            log::warn!("custom_dates[{idx}] is not a date rule, skipping");
            continue;
        };
        match parse_date(&rule.date) {
            Ok(date) => rules.push(CustomDateRule {
                date,
                is_disabled: rule.is_disabled,
            }),
            Err(e) => log::warn!("custom_dates[{idx}]: {e:#}, skipping"),
        }
    }
    Ok(rules)
}
