use anyhow::Result;
use datepick::calc::date_math::parse_date;
use datepick::calc::{CalendarDate, DatePicker};
use datepick::data::{Options, PickerMode, SelectionState};
use std::io::Write;

pub fn run(dates: &[String], range: bool, json: bool) -> Result<()> {
    let mut options = Options::load_validated()?;
    if range {
        options.picker = PickerMode::DateRange;
    }
    let clicks = dates
        .iter()
        .map(|raw| parse_date(raw))
        .collect::<Result<Vec<_>>>()?;

    let mut state = SelectionState::new(clicks.first().copied());
    let accepted = replay(&mut options, &mut state, &clicks);

    let mut out = std::io::stdout();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
        Ok(())
    } else {
        write_selection(&options, &state, &clicks, &accepted, &mut out)
    }
}

/// Feeds each click through the selection rules. Returns, per click, whether
/// it changed the selection.
pub(crate) fn replay(
    options: &mut Options,
    state: &mut SelectionState,
    clicks: &[CalendarDate],
) -> Vec<bool> {
    let mut picker = DatePicker::new(options, state);
    picker.init();
    clicks
        .iter()
        .map(|&date| {
            picker.activate_date(date);
            !picker.select_date(date).is_empty()
        })
        .collect()
}

pub(crate) fn write_selection<W: Write>(
    options: &Options,
    state: &SelectionState,
    clicks: &[CalendarDate],
    accepted: &[bool],
    out: &mut W,
) -> Result<()> {
    let fmt = options.locale.format.as_str();
    for (date, ok) in clicks.iter().zip(accepted) {
        let outcome = if *ok { "applied" } else { "no change" };
        writeln!(out, "  {:<12} {}", date.format(fmt).to_string(), outcome)?;
    }
    writeln!(out, "---")?;
    match (state.selected_date, state.selected_end_date) {
        (None, _) => writeln!(out, "Nothing selected")?,
        (Some(start), None) if options.is_date_range_picker() => {
            writeln!(out, "Start: {} (no end yet)", start.format(fmt))?
        }
        (Some(start), None) => writeln!(out, "Selected: {}", start.format(fmt))?,
        (Some(start), Some(end)) => writeln!(
            out,
            "Range: {}{}{}",
            start.format(fmt),
            options.locale.separator,
            end.format(fmt)
        )?,
    }
    Ok(())
}
