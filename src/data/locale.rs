use crate::calc::date_math::CalendarDate;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const WEEKDAYS_SHORT: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Locale data as configured. Weekday lists are Sunday-first here; the
/// descriptor handed to renderers is rotated to start on `first_day`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Locale {
    pub direction: String,
    /// strftime pattern for a full date.
    pub format: String,
    pub separator: String,
    pub apply_label: String,
    pub cancel_label: String,
    pub week_label: String,
    pub custom_range_label: String,
    pub weekdays: Vec<String>,
    pub weekdays_short: Vec<String>,
    pub month_names: Vec<String>,
    pub month_names_long: Vec<String>,
    /// First day of the week, 0 = Sunday.
    pub first_day: u32,
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            direction: "ltr".to_string(),
            format: "%m/%d/%Y".to_string(),
            separator: " - ".to_string(),
            apply_label: "Apply".to_string(),
            cancel_label: "Cancel".to_string(),
            week_label: "W".to_string(),
            custom_range_label: "Custom Range".to_string(),
            weekdays: WEEKDAYS.iter().map(|s| s.to_string()).collect(),
            weekdays_short: WEEKDAYS_SHORT.iter().map(|s| s.to_string()).collect(),
            month_names: MONTHS_SHORT.iter().map(|s| s.to_string()).collect(),
            month_names_long: MONTHS_LONG.iter().map(|s| s.to_string()).collect(),
            first_day: 0,
        }
    }
}

/// What the rendering layer receives: the configured locale with weekday
/// names ordered from `first_day`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LocaleDescriptor {
    pub direction: String,
    pub format: String,
    pub separator: String,
    pub apply_label: String,
    pub cancel_label: String,
    pub week_label: String,
    pub custom_range_label: String,
    pub weekdays: Vec<String>,
    pub weekdays_short: Vec<String>,
    pub month_names: Vec<String>,
    pub month_names_long: Vec<String>,
    pub first_day: u32,
}

impl Locale {
    pub fn descriptor(&self) -> LocaleDescriptor {
        LocaleDescriptor {
            direction: self.direction.clone(),
            format: self.format.clone(),
            separator: self.separator.clone(),
            apply_label: self.apply_label.clone(),
            cancel_label: self.cancel_label.clone(),
            week_label: self.week_label.clone(),
            custom_range_label: self.custom_range_label.clone(),
            weekdays: rotate(&self.weekdays, self.first_day),
            weekdays_short: rotate(&self.weekdays_short, self.first_day),
            month_names: self.month_names.clone(),
            month_names_long: self.month_names_long.clone(),
            first_day: self.first_day,
        }
    }

    /// Replaces `%B`, `%b`, `%A` and `%a` in a strftime pattern with this
    /// locale's names for `date`. Other specifiers are left for chrono.
    pub fn localize_pattern(&self, pattern: &str, date: &CalendarDate) -> String {
        let month = date.month0() as usize;
        let weekday = date.weekday().num_days_from_sunday() as usize;
        let mut out = String::with_capacity(pattern.len());
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            let Some(spec) = chars.next() else {
                out.push('%');
                break;
            };
            let name = match spec {
                'B' => self.month_names_long.get(month),
                'b' => self.month_names.get(month),
                'A' => self.weekdays.get(weekday),
                'a' => self.weekdays_short.get(weekday),
                _ => None,
            };
            match name {
                Some(name) => out.push_str(&name.replace('%', "%%")),
                None => {
                    out.push('%');
                    out.push(spec);
                }
            }
        }
        out
    }
}

fn rotate(names: &[String], first_day: u32) -> Vec<String> {
    if names.is_empty() {
        return Vec::new();
    }
    let shift = first_day as usize % names.len();
    names[shift..].iter().chain(&names[..shift]).cloned().collect()
}
