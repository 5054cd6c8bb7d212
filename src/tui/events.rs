use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::KeyBindings;
use crate::tui::app::{Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::App;
use crate::utils::{has_primary_modifier, parse_key_binding};

/// Restores the terminal when dropped, including during a panic unwind.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore explicitly on normal exit; drop then does nothing
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Reject unparseable bindings before the terminal is taken over
pub fn validate_key_bindings(bindings: &KeyBindings) -> Result<(), TuiError> {
    let all = [
        ("quit", &bindings.quit),
        ("new", &bindings.new),
        ("edit", &bindings.edit),
        ("save", &bindings.save),
        ("delete", &bindings.delete),
        ("search", &bindings.search),
        ("list_up", &bindings.list_up),
        ("list_down", &bindings.list_down),
        ("tab_left", &bindings.tab_left),
        ("tab_right", &bindings.tab_right),
        ("help", &bindings.help),
        ("cycle_task_status", &bindings.cycle_task_status),
        ("filter", &bindings.filter),
        ("toggle_pin", &bindings.toggle_pin),
        ("prev_month", &bindings.prev_month),
        ("next_month", &bindings.next_month),
    ];
    for (name, binding) in all {
        parse_key_binding(binding)
            .map_err(|e| TuiError::KeyBindingError(format!("{}: {}", name, e)))?;
    }
    Ok(())
}

fn key_matches(binding: &str, key_event: &KeyEvent) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            parsed.key_code == key_event.code
                && parsed.requires_ctrl == has_primary_modifier(key_event.modifiers)
        }
        Err(_) => false,
    }
}

/// Draw, wait for input up to the next tick, refresh the clock once per tick.
/// The tick stops with the loop.
pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    validate_key_bindings(&app.config.key_bindings)?;

    let (width, height) = terminal_size()?;
    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;
    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(app.config.tick_interval_ms.max(50));
    let mut last_tick = Instant::now();
    info!(tick_ms = tick_rate.as_millis() as u64, "dashboard started");

    loop {
        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area(), app.config.sidebar_width_percent);
            crate::tui::render::render(f, &app, &layout);
        })?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            // Only Press events; Windows also reports Release
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    guard.restore()?;
    info!("dashboard stopped");
    Ok(())
}

/// Returns true when the user asked to quit
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> bool {
    match app.ui.mode {
        Mode::Help => {
            if key_event.code == KeyCode::Esc || key_matches(&app.config.key_bindings.help, &key_event) {
                app.ui.mode = Mode::View;
            }
            false
        }
        Mode::Search => {
            handle_search_key(app, key_event);
            false
        }
        Mode::Create => {
            handle_form_key(app, key_event);
            false
        }
        Mode::View => handle_view_key(app, key_event),
    }
}

fn handle_search_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => app.exit_search(false),
        KeyCode::Enter => app.exit_search(true),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) if !has_primary_modifier(key_event.modifiers) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key_event: KeyEvent) {
    if key_event.code == KeyCode::Esc {
        app.cancel_form();
        return;
    }
    if key_matches(&app.config.key_bindings.save, &key_event) {
        app.submit_form();
        return;
    }

    let Some(form) = app.form.create_form.as_mut() else {
        app.ui.mode = Mode::View;
        return;
    };

    match key_event.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            if form.is_multi_line_field() {
                if let Some(input) = form.current_input() {
                    input.insert_char('\n');
                }
            } else if form.is_last_field() {
                app.submit_form();
            } else {
                form.next_field();
            }
        }
        KeyCode::Left => match form.current_input() {
            Some(input) => input.move_left(),
            None => form.cycle_choice(false),
        },
        KeyCode::Right => match form.current_input() {
            Some(input) => input.move_right(),
            None => form.cycle_choice(true),
        },
        KeyCode::Home => {
            if let Some(input) = form.current_input() {
                input.move_home();
            }
        }
        KeyCode::End => {
            if let Some(input) = form.current_input() {
                input.move_end();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = form.current_input() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = form.current_input() {
                input.delete();
            }
        }
        KeyCode::Char(c) if !has_primary_modifier(key_event.modifiers) => match form.current_input() {
            Some(input) => input.insert_char(c),
            None if c == ' ' => form.cycle_choice(true),
            None => {}
        },
        _ => {}
    }
}

fn handle_view_key(app: &mut App, key_event: KeyEvent) -> bool {
    let bindings = app.config.key_bindings.clone();
    let tab = app.ui.current_tab;

    if key_matches(&bindings.quit, &key_event) {
        return true;
    }
    if key_matches(&bindings.help, &key_event) {
        app.ui.mode = Mode::Help;
        return false;
    }
    if key_matches(&bindings.tab_right, &key_event) {
        app.next_tab();
        return false;
    }
    if key_matches(&bindings.tab_left, &key_event) {
        app.prev_tab();
        return false;
    }
    if let KeyCode::Char(c @ '1'..='9') = key_event.code {
        let index = c as usize - '1' as usize;
        if let Some(tab) = Tab::from_index(index) {
            app.select_tab(tab);
        }
        return false;
    }

    if tab == Tab::Calendar {
        if key_matches(&bindings.prev_month, &key_event) {
            app.calendar_shift_month(-1);
        } else if key_matches(&bindings.next_month, &key_event) {
            app.calendar_shift_month(1);
        } else if key_matches(&bindings.list_down, &key_event) {
            app.calendar_move_days(1);
        } else if key_matches(&bindings.list_up, &key_event) {
            app.calendar_move_days(-1);
        } else if key_event.code == KeyCode::Down {
            app.calendar_move_days(7);
        } else if key_event.code == KeyCode::Up {
            app.calendar_move_days(-7);
        } else if key_event.code == KeyCode::Char('t') {
            app.calendar_today();
        }
        return false;
    }

    if key_matches(&bindings.list_down, &key_event) || key_event.code == KeyCode::Down {
        app.select_next();
    } else if key_matches(&bindings.list_up, &key_event) || key_event.code == KeyCode::Up {
        app.select_prev();
    } else if key_matches(&bindings.new, &key_event) {
        app.start_create();
    } else if key_matches(&bindings.edit, &key_event) {
        app.start_edit();
    } else if key_matches(&bindings.delete, &key_event) {
        app.delete_selected();
    } else if key_matches(&bindings.search, &key_event) {
        app.enter_search();
    } else if tab == Tab::Tasks && key_matches(&bindings.filter, &key_event) {
        app.cycle_status_filter();
    } else if tab == Tab::Tasks && key_matches(&bindings.cycle_task_status, &key_event) {
        app.cycle_selected_task_status();
    } else if tab == Tab::Notes && key_matches(&bindings.toggle_pin, &key_event) {
        app.toggle_selected_pin();
    } else if key_event.code == KeyCode::Esc && !app.search.query.is_empty() {
        app.exit_search(false);
    } else {
        debug!(code = ?key_event.code, "unbound key");
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::Store;
    use crate::Config;
    use chrono::{Local, TimeZone};
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 8, 20, 12, 0, 0).unwrap());
        App::new(Config::default(), Store::with_clock(Box::new(clock)))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn create_task_through_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.ui.current_tab, Tab::Tasks);

        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Write tests");
        press(&mut app, KeyCode::Tab); // description
        press(&mut app, KeyCode::Tab); // priority
        press(&mut app, KeyCode::Left); // medium -> high
        press(&mut app, KeyCode::Tab); // due date
        press(&mut app, KeyCode::Tab); // tags
        type_str(&mut app, "dev, qa");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ui.mode, Mode::View);
        let task = &app.store.tasks()[0];
        assert_eq!(task.title, "Write tests");
        assert_eq!(task.priority, crate::models::Priority::High);
        assert_eq!(task.tags, vec!["dev", "qa"]);
    }

    #[test]
    fn ctrl_s_saves_and_esc_cancels() {
        let mut app = app();
        app.select_tab(Tab::Tasks);
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Draft");
        press(&mut app, KeyCode::Esc);
        assert!(app.store.tasks().is_empty());
        assert_eq!(app.ui.mode, Mode::View);

        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Saved");
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.store.tasks().len(), 1);
    }

    #[test]
    fn quit_only_from_view_mode() {
        let mut app = app();
        app.select_tab(Tab::Notes);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.ui.mode, Mode::Search);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.search.query, "q");
        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn calendar_keys_move_selection() {
        let mut app = app();
        app.select_tab(Tab::Calendar);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.calendar.selected.format("%Y-%m-%d").to_string(), "2024-09-01");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.calendar.selected.format("%Y-%m-%d").to_string(), "2024-09-08");
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.calendar.selected.format("%Y-%m-%d").to_string(), "2024-08-20");
    }

    #[test]
    fn invalid_binding_is_reported() {
        let mut bindings = KeyBindings::default();
        assert!(validate_key_bindings(&bindings).is_ok());

        bindings.toggle_pin = "Ctrl+".to_string();
        let err = validate_key_bindings(&bindings).unwrap_err();
        assert!(err.to_string().contains("toggle_pin"));
    }
}
