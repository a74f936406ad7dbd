use anyhow::Result;
use datepick::data::{LocaleDescriptor, Options};
use std::io::Write;

pub fn run(json: bool) -> Result<()> {
    let descriptor = Options::load_validated()?.locale.descriptor();
    let mut out = std::io::stdout();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&descriptor)?)?;
        Ok(())
    } else {
        write_locale(&descriptor, &mut out)
    }
}

pub(crate) fn write_locale<W: Write>(locale: &LocaleDescriptor, out: &mut W) -> Result<()> {
    writeln!(out, "Locale")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {}", "Direction", locale.direction)?;
    writeln!(out, "  {:<14} {}", "Format", locale.format)?;
    writeln!(out, "  {:<14} '{}'", "Separator", locale.separator)?;
    writeln!(out, "  {:<14} {}", "First day", locale.first_day)?;
    writeln!(out, "  {:<14} {}", "Week label", locale.week_label)?;
    writeln!(out, "  {:<14} {}", "Weekdays", locale.weekdays.join(" "))?;
    writeln!(out, "  {:<14} {}", "Short", locale.weekdays_short.join(" "))?;
    writeln!(out, "  {:<14} {}", "Months", locale.month_names.join(" "))?;
    writeln!(out, "  {:<14} {}", "Months (long)", locale.month_names_long.join(" "))?;
    writeln!(
        out,
        "  {:<14} {} / {} / {}",
        "Labels", locale.apply_label, locale.cancel_label, locale.custom_range_label
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepick::data::Locale;

    fn render(locale: &Locale) -> String {
        let mut buf = Vec::new();
        write_locale(&locale.descriptor(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_locale_defaults() {
        let out = render(&Locale::default());
        assert!(out.contains("Su Mo Tu We Th Fr Sa"));
        assert!(out.contains("Jan Feb Mar"));
        assert!(out.contains("January February March"));
        assert!(out.contains("' - '"));
        assert!(out.contains("Apply / Cancel / Custom Range"));
    }

    #[test]
    fn test_write_locale_rotates_weekdays_from_first_day() {
        let locale = Locale {
            first_day: 1,
            ..Locale::default()
        };
        let out = render(&locale);
        assert!(out.contains("Mo Tu We Th Fr Sa Su"));
        assert!(out.contains("Monday Tuesday"));
    }
}
