use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::app::{Mode, Tab};
use crate::tui::widgets::{
    analytics::render_analytics,
    calendar::render_calendar,
    color::Palette,
    filters_box::render_filters_box,
    form::render_form,
    help::render_help,
    item_view::{render_item_view, render_placeholder, SelectedItem},
    note_list::render_note_list,
    overview::render_overview,
    reminder_list::render_reminder_list,
    status_bar::render_status_bar,
    tabs::render_header,
    task_list::render_task_list,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display as key;

pub fn render(f: &mut Frame, app: &App, layout: &Layout) {
    let palette = Palette::from_theme(&app.config.get_active_theme());

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Veer")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(outer_block, f.area());

    render_header(f, layout.tabs_area, app.ui.current_tab, app.now, &palette);

    match app.ui.current_tab {
        tab if tab.has_list() => {
            render_sidebar(f, app, layout, &palette);
            render_main_pane(f, app, layout, &palette);
        }
        Tab::Calendar => render_calendar(f, layout.content_area, app, &palette),
        Tab::Analytics => render_analytics(f, layout.content_area, app, &palette),
        _ => render_overview(f, layout.content_area, app, &palette),
    }

    let filters_title = match app.ui.current_tab {
        Tab::Tasks => format!(
            "{}: Status filter | {}: Search",
            key(&app.config.key_bindings.filter),
            key(&app.config.key_bindings.search)
        ),
        Tab::Notes => format!("{}: Search", key(&app.config.key_bindings.search)),
        _ => "Summary".to_string(),
    };
    render_filters_box(f, layout.filters_area, &filters_title, &app.get_filter_summary(), &palette);

    if app.ui.mode == Mode::Help {
        render_help(f, f.area(), &app.config.key_bindings, &palette);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_deref(), &key_hints, &palette);
}

fn render_sidebar(f: &mut Frame, app: &App, layout: &Layout, palette: &Palette) {
    let area = layout.sidebar_area;
    let selected = |len: usize| (len > 0).then_some(app.ui.selected_index);

    match app.ui.current_tab {
        Tab::Tasks => {
            let tasks = app.visible_tasks();
            let total = app.store.tasks().len();
            render_task_list(f, area, &tasks, total, selected(tasks.len()), palette);
        }
        Tab::Notes => {
            let notes = app.visible_notes();
            let total = app.store.notes().len();
            render_note_list(f, area, &notes, total, selected(notes.len()), palette);
        }
        Tab::Reminders => {
            let reminders = app.visible_reminders();
            render_reminder_list(f, area, &reminders, app.now, selected(reminders.len()), palette);
        }
        Tab::Overview | Tab::Calendar | Tab::Analytics => {}
    }
}

fn render_main_pane(f: &mut Frame, app: &App, layout: &Layout, palette: &Palette) {
    let area = layout.main_area;

    if app.ui.mode == Mode::Search {
        let paragraph = Paragraph::new(format!("Search: {}▏", app.search.query))
            .block(Block::default().borders(Borders::ALL).title("Search"))
            .style(Style::default().fg(palette.fg).bg(palette.bg));
        f.render_widget(paragraph, area);
        return;
    }

    if app.ui.mode == Mode::Create {
        if let Some(form) = app.form.create_form.as_ref() {
            render_form(f, area, form, palette);
            return;
        }
    }

    let item = match app.ui.current_tab {
        Tab::Tasks => app.selected_task().map(SelectedItem::Task),
        Tab::Notes => app.selected_note().map(SelectedItem::Note),
        Tab::Reminders => app.selected_reminder().map(SelectedItem::Reminder),
        _ => None,
    };

    match item {
        Some(item) => render_item_view(f, area, item, app.now, palette),
        None => {
            let message = format!(
                "Nothing here yet. Press {} to add one.",
                key(&app.config.key_bindings.new)
            );
            render_placeholder(f, area, &message, palette);
        }
    }
}

pub fn get_key_hints(app: &App) -> Vec<String> {
    let b = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", key(&b.help))],
        Mode::Search => vec![
            "Enter: Apply".to_string(),
            "Esc: Clear search".to_string(),
        ],
        Mode::Create => vec![
            "Tab/Enter: Next field".to_string(),
            "Shift+Tab: Previous field".to_string(),
            "←/→: Change choice".to_string(),
            format!("{}: Save", key(&b.save)),
            "Esc: Cancel".to_string(),
        ],
        Mode::View => {
            let mut hints = vec![format!("{}: Quit", key(&b.quit))];
            match app.ui.current_tab {
                Tab::Tasks => {
                    hints.push(format!("{}: New", key(&b.new)));
                    hints.push(format!("{}: Status", key(&b.cycle_task_status)));
                    hints.push(format!("{}: Delete", key(&b.delete)));
                    hints.push(format!("{}: Filter", key(&b.filter)));
                    hints.push(format!("{}: Search", key(&b.search)));
                }
                Tab::Notes => {
                    hints.push(format!("{}: New", key(&b.new)));
                    hints.push(format!("{}: Edit", key(&b.edit)));
                    hints.push(format!("{}: Pin", key(&b.toggle_pin)));
                    hints.push(format!("{}: Delete", key(&b.delete)));
                    hints.push(format!("{}: Search", key(&b.search)));
                }
                Tab::Reminders => {
                    hints.push(format!("{}: New", key(&b.new)));
                    hints.push(format!("{}: Complete", key(&b.delete)));
                }
                Tab::Calendar => {
                    hints.push(format!("{}/{}: Month", key(&b.prev_month), key(&b.next_month)));
                    hints.push("t: Today".to_string());
                }
                Tab::Overview | Tab::Analytics => {}
            }
            hints.push(format!("{}/{}: Tabs", key(&b.tab_left), key(&b.tab_right)));
            hints.push(format!("{}: Help", key(&b.help)));
            hints
        }
    }
}
