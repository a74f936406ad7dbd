use datepick::data::{persistence::get_config_dir, Options, Persistable};
use anyhow::Result;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = get_config_dir()?;
    if run_in_dir(&dir)? {
        println!("Wrote {}", dir.join(Options::filename()).display());
    } else {
        println!(
            "{} already exists, leaving it untouched.",
            dir.join(Options::filename()).display()
        );
    }
    Ok(())
}

/// Writes a default `picker.yaml` into `dir`. Returns false when one is already there.
pub(crate) fn run_in_dir(dir: &Path) -> Result<bool> {
    if dir.join(Options::filename()).exists() {
        return Ok(false);
    }
    Options::default().save_to(dir)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepick::data::{PickerMode, ViewMode};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_in_dir_creates_picker_yaml() {
        let tmp = TempDir::new().unwrap();
        assert!(run_in_dir(tmp.path()).unwrap());
        assert!(tmp.path().join("picker.yaml").exists(), "picker.yaml missing");
    }

    #[test]
    fn test_written_file_loads_back_as_defaults() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        let options = Options::load_from(tmp.path()).unwrap();
        options.validate().unwrap();
        assert_eq!(options.view_mode, ViewMode::Days);
        assert_eq!(options.picker, PickerMode::Date);
        assert_eq!(options.ui.day_columns, 7);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("picker.yaml");
        fs::write(&path, "picker: date_range\n").unwrap();
        assert!(!run_in_dir(tmp.path()).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "picker: date_range\n");
    }
}
