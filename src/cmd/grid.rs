use anyhow::{bail, Result};
use chrono::Datelike;
use datepick::calc::date_math::parse_date;
use datepick::calc::grid::month_label;
use datepick::calc::{CalendarDate, DatePicker, DayCell, Matrix, MonthCell, YearCell};
use datepick::data::{serde_date, Options, SelectionState, ViewMode};
use serde::Serialize;
use std::io::Write;

pub fn run(view: Option<ViewMode>, date: Option<&str>, json: bool) -> Result<()> {
    let mut options = Options::load_validated()?;
    let mut state = SelectionState::new(None);
    let mut picker = DatePicker::new(&mut options, &mut state);
    picker.init();
    if let Some(raw) = date {
        picker.set_view_date(parse_date(raw)?, false);
    }
    if let Some(mode) = view {
        if mode != picker.options().view_mode && picker.set_view_mode(mode).is_empty() {
            bail!(
                "view '{}' is outside the configured min_mode/max_mode",
                mode.as_str()
            );
        }
    }

    let mut out = std::io::stdout();
    if json {
        write_grid_json(&picker, &mut out)
    } else {
        write_grid(&picker, &mut out)
    }
}

/// Plain-text grid for the picker's current view mode.
pub(crate) fn write_grid<W: Write>(picker: &DatePicker, out: &mut W) -> Result<()> {
    match picker.options().view_mode {
        ViewMode::Days => write_days(picker, out),
        ViewMode::Months => write_months(picker, out),
        ViewMode::Years => write_years(picker, out),
    }
}

fn write_days<W: Write>(picker: &DatePicker, out: &mut W) -> Result<()> {
    let options = picker.options();
    let view_date = picker.state().view_date;
    writeln!(
        out,
        "{} {}",
        month_label(&view_date, options),
        view_date.year()
    )?;

    let locale = picker.locale();
    let columns = options.ui.day_columns;
    write!(out, "{:>3} ", locale.week_label)?;
    for name in locale.weekdays_short.iter().cycle().take(columns) {
        write!(out, "{name:^4}")?;
    }
    writeln!(out)?;

    let weeks = picker.week_numbers();
    for (week, row) in weeks.iter().zip(picker.days_matrix()) {
        write!(out, "{week:>3} ")?;
        for cell in &row {
            let (open, close) = day_marks(cell);
            write!(out, "{open}{:>2}{close}", cell.label)?;
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "[..] selected  >..< range end  =..= in range  (..) other month  ..x disabled"
    )?;
    Ok(())
}

/// Bracket characters for a day cell. Earlier flags win.
pub(crate) fn day_marks(cell: &DayCell) -> (char, char) {
    if cell.is_selected {
        ('[', ']')
    } else if cell.is_highlighted {
        ('>', '<')
    } else if cell.is_active {
        ('=', '=')
    } else if cell.is_disabled {
        (' ', 'x')
    } else if cell.is_other_month {
        ('(', ')')
    } else {
        (' ', ' ')
    }
}

fn write_months<W: Write>(picker: &DatePicker, out: &mut W) -> Result<()> {
    writeln!(out, "{}", picker.state().view_date.year())?;
    for row in picker.months_matrix() {
        for cell in &row {
            let (open, close) = cell_marks(cell.is_active, cell.is_disabled);
            write!(out, "{open}{:^10}{close}", cell.label)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_years<W: Write>(picker: &DatePicker, out: &mut W) -> Result<()> {
    let first = picker.starting_year();
    let span = (picker.options().ui.year_rows * picker.options().ui.year_columns) as i32;
    writeln!(out, "{} - {}", first, first + span - 1)?;
    for row in picker.years_matrix() {
        for cell in &row {
            let (open, close) = cell_marks(cell.is_active, cell.is_disabled);
            write!(out, "{open}{:>4}{close}", cell.label)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn cell_marks(is_active: bool, is_disabled: bool) -> (char, char) {
    match (is_active, is_disabled) {
        (true, _) => ('[', ']'),
        (false, true) => (' ', 'x'),
        (false, false) => (' ', ' '),
    }
}

#[derive(Serialize)]
struct GridOutput<T: Serialize> {
    view_mode: ViewMode,
    #[serde(with = "serde_date")]
    view_date: CalendarDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    week_numbers: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    starting_year: Option<i32>,
    rows: Matrix<T>,
}

pub(crate) fn write_grid_json<W: Write>(picker: &DatePicker, out: &mut W) -> Result<()> {
    let view_mode = picker.options().view_mode;
    let view_date = picker.state().view_date;
    let json = match view_mode {
        ViewMode::Days => serde_json::to_string_pretty(&GridOutput::<DayCell> {
            view_mode,
            view_date,
            week_numbers: Some(picker.week_numbers()),
            starting_year: None,
            rows: picker.days_matrix(),
        })?,
        ViewMode::Months => serde_json::to_string_pretty(&GridOutput::<MonthCell> {
            view_mode,
            view_date,
            week_numbers: None,
            starting_year: None,
            rows: picker.months_matrix(),
        })?,
        ViewMode::Years => serde_json::to_string_pretty(&GridOutput::<YearCell> {
            view_mode,
            view_date,
            week_numbers: None,
            starting_year: Some(picker.starting_year()),
            rows: picker.years_matrix(),
        })?,
    };
    writeln!(out, "{json}")?;
    Ok(())
}
