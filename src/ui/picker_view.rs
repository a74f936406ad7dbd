use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use datepick::calc::date_math::at_midnight;
use datepick::calc::grid::{month_label, starting_year, MONTH_COLUMNS};
use datepick::calc::{CalendarDate, CalendarObserver, Changes, DatePicker, DayCell, TimeUnit};
use datepick::data::{Options, PickerMode, SelectionState, ViewMode};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

// Background for days strictly inside the (previewed) range
const RANGE_BG: Color = Color::Rgb(40, 44, 52);

const HELP: &str =
    "←→↑↓ move  Enter/Space pick  n/p page  d/m/y view  t today  r range  Esc clear  q quit";

/// Status line driven by picker change notifications. Cleared on every keypress.
pub(crate) struct StatusLine {
    message: Option<(String, Color)>,
    date_format: String,
    separator: String,
    /// Last committed (start, end) seen, so hover-only changes stay quiet.
    last_selection: (Option<CalendarDate>, Option<CalendarDate>),
}

impl StatusLine {
    fn new(options: &Options, state: &SelectionState) -> Self {
        StatusLine {
            message: None,
            date_format: options.locale.format.clone(),
            separator: options.locale.separator.clone(),
            last_selection: (state.selected_date, state.selected_end_date),
        }
    }

    fn set(&mut self, message: impl Into<String>, color: Color) {
        self.message = Some((message.into(), color));
    }
}

impl CalendarObserver for StatusLine {
    fn on_options_changed(&mut self, options: &Options) {
        self.date_format = options.locale.format.clone();
        self.separator = options.locale.separator.clone();
        let picker = match options.picker {
            PickerMode::Date => "single date",
            PickerMode::DateRange => "date range",
        };
        self.set(
            format!("View: {}  Picker: {}", options.view_mode.as_str(), picker),
            Color::Cyan,
        );
    }

    fn on_selection_changed(&mut self, state: &SelectionState) {
        let current = (state.selected_date, state.selected_end_date);
        if current == self.last_selection {
            return;
        }
        self.last_selection = current;
        match current {
            (Some(start), Some(end)) => self.set(
                format!(
                    "Range: {}{}{}",
                    start.format(&self.date_format),
                    self.separator,
                    end.format(&self.date_format)
                ),
                Color::Green,
            ),
            (Some(start), None) => self.set(
                format!("Selected: {}", start.format(&self.date_format)),
                Color::Green,
            ),
            (None, _) => self.set("Selection cleared", Color::DarkGray),
        }
    }
}

pub struct App<'a> {
    options: &'a mut Options,
    state: &'a mut SelectionState,
    today: NaiveDate,
    status: StatusLine,
}

impl<'a> App<'a> {
    pub fn new(options: &'a mut Options, state: &'a mut SelectionState, today: NaiveDate) -> Self {
        let status = StatusLine::new(options, state);
        App {
            options,
            state,
            today,
            status,
        }
    }

    fn picker(&mut self) -> DatePicker<'_> {
        DatePicker::new(&mut *self.options, &mut *self.state)
    }

    fn notify(&mut self, changes: Changes) {
        changes.notify(&mut self.status, &*self.options, &*self.state);
    }

    /// The committed selection in the locale's display format, if any.
    pub fn selection_summary(&self) -> Option<String> {
        let fmt = self.options.locale.format.as_str();
        match (self.state.selected_date, self.state.selected_end_date) {
            (Some(start), Some(end)) => Some(format!(
                "{}{}{}",
                start.format(fmt),
                self.options.locale.separator,
                end.format(fmt)
            )),
            (Some(start), None) => Some(start.format(fmt).to_string()),
            (None, _) => None,
        }
    }

    /// Moves the view date, which doubles as the cursor. In the day grid the
    /// cursor also drives the hover preview of a range end.
    fn move_cursor(&mut self, forward: bool, vertical: bool) {
        let ui = &self.options.ui;
        let (unit, step) = match (self.options.view_mode, vertical) {
            (ViewMode::Days, false) => (TimeUnit::Days, 1),
            (ViewMode::Days, true) => (TimeUnit::Days, ui.day_columns as u32),
            (ViewMode::Months, false) => (TimeUnit::Months, 1),
            (ViewMode::Months, true) => (TimeUnit::Months, MONTH_COLUMNS as u32),
            (ViewMode::Years, false) => (TimeUnit::Years, 1),
            (ViewMode::Years, true) => (TimeUnit::Years, ui.year_columns as u32),
        };
        self.step(unit, step, forward);
    }

    fn page(&mut self, forward: bool) {
        let ui = &self.options.ui;
        let (unit, step) = match self.options.view_mode {
            ViewMode::Days => (TimeUnit::Months, 1),
            ViewMode::Months => (TimeUnit::Years, 1),
            ViewMode::Years => (TimeUnit::Years, (ui.year_rows * ui.year_columns) as u32),
        };
        self.step(unit, step, forward);
    }

    fn step(&mut self, unit: TimeUnit, step: u32, forward: bool) {
        let mut picker = self.picker();
        let mut changes = if forward {
            picker.next(unit, step)
        } else {
            picker.prev(unit, step)
        };
        changes |= self.hover_cursor();
        self.notify(changes);
    }

    fn hover_cursor(&mut self) -> Changes {
        if self.options.view_mode != ViewMode::Days {
            return Changes::NONE;
        }
        let cursor = self.state.view_date;
        self.picker().activate_date(cursor)
    }

    fn pick(&mut self) {
        let cursor = self.state.view_date;
        let changes = match self.options.view_mode {
            ViewMode::Days => self.picker().select_date(cursor),
            ViewMode::Months | ViewMode::Years => self.picker().set_view_date(cursor, true),
        };
        self.notify(changes);
    }

    fn switch_view(&mut self, mode: ViewMode) {
        if mode == self.options.view_mode {
            return;
        }
        let changes = self.picker().set_view_mode(mode);
        if changes.is_empty() {
            self.status.set(
                format!("'{}' view is disabled in picker.yaml", mode.as_str()),
                Color::Red,
            );
            return;
        }
        let changes = changes | self.hover_cursor();
        self.notify(changes);
    }

    fn go_to_today(&mut self) {
        let today = at_midnight(self.today);
        let changes = self.picker().set_view_date(today, false) | self.hover_cursor();
        self.notify(changes);
    }

    fn toggle_picker_mode(&mut self) {
        self.options.picker = match self.options.picker {
            PickerMode::Date => PickerMode::DateRange,
            PickerMode::DateRange => PickerMode::Date,
        };
        self.state.clear_selection();
        let changes = Changes {
            options: true,
            selection: true,
            ..Changes::NONE
        } | self.hover_cursor();
        self.notify(changes);
    }

    fn clear_selection(&mut self) {
        self.state.clear_selection();
        self.notify(Changes::SELECTION);
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status.message = None;

        match code {
            KeyCode::Left => self.move_cursor(false, false),
            KeyCode::Right => self.move_cursor(true, false),
            KeyCode::Up => self.move_cursor(false, true),
            KeyCode::Down => self.move_cursor(true, true),
            KeyCode::Enter | KeyCode::Char(' ') => self.pick(),
            KeyCode::Char('n') | KeyCode::PageDown => self.page(true),
            KeyCode::Char('p') | KeyCode::PageUp => self.page(false),
            KeyCode::Char('d') => self.switch_view(ViewMode::Days),
            KeyCode::Char('m') => self.switch_view(ViewMode::Months),
            KeyCode::Char('y') => self.switch_view(ViewMode::Years),
            KeyCode::Char('t') => self.go_to_today(),
            KeyCode::Char('r') => self.toggle_picker_mode(),
            KeyCode::Esc => self.clear_selection(),
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            _ => {}
        }
        false
    }

    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Min(8),    // grid
                Constraint::Length(1), // status
                Constraint::Length(1), // help
            ])
            .split(f.area());

        self.render_title(f, chunks[0]);
        match self.options.view_mode {
            ViewMode::Days => self.render_days(f, chunks[1]),
            ViewMode::Months => self.render_months(f, chunks[1]),
            ViewMode::Years => self.render_years(f, chunks[1]),
        }
        self.render_status(f, chunks[2]);
        f.render_widget(
            Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
            chunks[3],
        );
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let view_date = self.state.view_date;
        let period = match self.options.view_mode {
            ViewMode::Days => format!(
                "{} {}",
                month_label(&view_date, &*self.options),
                view_date.year()
            ),
            ViewMode::Months => view_date.year().to_string(),
            ViewMode::Years => {
                let ui = &self.options.ui;
                let first = starting_year(view_date.year(), &*self.options);
                format!("{} - {}", first, first + (ui.year_rows * ui.year_columns) as i32 - 1)
            }
        };
        let mode = match self.options.picker {
            PickerMode::Date => "",
            PickerMode::DateRange => "  [range]",
        };
        let line = Line::from(vec![
            Span::styled(
                period,
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
            Span::styled(mode, Style::default().fg(Color::Cyan)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_days(&mut self, f: &mut Frame, area: Rect) {
        let view_day = self.state.view_date.date();
        let today = self.today;
        let picker = self.picker();
        let locale = picker.locale();
        let columns = picker.options().ui.day_columns;

        let header = Row::new(
            std::iter::once(Cell::from(locale.week_label.clone()))
                .chain(
                    locale
                        .weekdays_short
                        .iter()
                        .cycle()
                        .take(columns)
                        .map(|name| Cell::from(name.clone())),
                )
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = picker
            .week_numbers()
            .into_iter()
            .zip(picker.days_matrix())
            .map(|(week, cells)| {
                let mut row = vec![Cell::from(format!("{week:>2}"))
                    .style(Style::default().fg(Color::DarkGray))];
                row.extend(cells.iter().map(|cell| {
                    let day = cell.date.date();
                    Cell::from(format!("{:>2}", cell.label))
                        .style(day_cell_style(cell, day == view_day, day == today))
                }));
                Row::new(row)
            })
            .collect();

        let widths = vec![Constraint::Length(3); columns + 1];
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(table, area);
    }

    fn render_months(&mut self, f: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .picker()
            .months_matrix()
            .into_iter()
            .map(|cells| {
                Row::new(
                    cells
                        .into_iter()
                        .map(|cell| {
                            Cell::from(cell.label)
                                .style(grid_cell_style(cell.is_active, cell.is_disabled))
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        let widths = vec![Constraint::Length(10); MONTH_COLUMNS];
        let table = Table::new(rows, widths)
            .column_spacing(2)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(table, area);
    }

    fn render_years(&mut self, f: &mut Frame, area: Rect) {
        let columns = self.options.ui.year_columns;
        let rows: Vec<Row> = self
            .picker()
            .years_matrix()
            .into_iter()
            .map(|cells| {
                Row::new(
                    cells
                        .into_iter()
                        .map(|cell| {
                            Cell::from(cell.label.to_string())
                                .style(grid_cell_style(cell.is_active, cell.is_disabled))
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        let widths = vec![Constraint::Length(5); columns];
        let table = Table::new(rows, widths)
            .column_spacing(2)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(table, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let line = match &self.status.message {
            Some((msg, color)) => Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
            None => match self.selection_summary() {
                Some(summary) => Line::from(format!("Selection: {summary}")),
                None => Line::from(Span::styled(
                    "Nothing selected",
                    Style::default().fg(Color::DarkGray),
                )),
            },
        };
        f.render_widget(Paragraph::new(line), area);
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Cell styling ──────────────────────────────────────────────────────────────

/// Determines the ratatui `Style` for a day cell. The cursor reverses
/// whatever style the cell would otherwise have.
pub(crate) fn day_cell_style(cell: &DayCell, is_cursor: bool, is_today: bool) -> Style {
    let style = if cell.is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if cell.is_highlighted {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::UNDERLINED)
    } else if cell.is_active {
        Style::default().fg(Color::Yellow).bg(RANGE_BG)
    } else if cell.is_disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_today {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if cell.is_other_month {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    if is_cursor {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// Month and year cells: the active cell is the cursor.
pub(crate) fn grid_cell_style(is_active: bool, is_disabled: bool) -> Style {
    let style = if is_disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    if is_active {
        style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        style
    }
}
