use crate::ui::picker_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use datepick::calc::DatePicker;
use datepick::data::{Options, SelectionState};

pub fn run() -> Result<()> {
    let mut options = Options::load_validated()?;
    let mut state = SelectionState::new(None);
    DatePicker::new(&mut options, &mut state).init();

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut app = App::new(&mut options, &mut state, today);
    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result?;

    // Print the final pick so the picker can be used from scripts.
    if let Some(summary) = app.selection_summary() {
        println!("{summary}");
    }
    Ok(())
}
