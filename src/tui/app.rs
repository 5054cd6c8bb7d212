use chrono::{DateTime, Local, NaiveDate, TimeDelta};
use std::time::{Duration, Instant};

use crate::Config;
use crate::models::{
    ItemId, Note, NoteInput, Priority, Reminder, ReminderCategory, ReminderInput, StatusFilter,
    Task, TaskInput,
};
use crate::store::Store;
use crate::tui::widgets::input::LineInput;
use crate::utils::{parse_local_datetime, shift_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Tasks,
    Notes,
    Reminders,
    Calendar,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Tasks,
        Tab::Notes,
        Tab::Reminders,
        Tab::Calendar,
        Tab::Analytics,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Tasks => "Tasks",
            Tab::Notes => "Notes",
            Tab::Reminders => "Reminders",
            Tab::Calendar => "Calendar",
            Tab::Analytics => "Analytics",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tabs laid out as list sidebar + detail pane
    pub fn has_list(&self) -> bool {
        matches!(self, Tab::Tasks | Tab::Notes | Tab::Reminders)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Search,
    Create,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Priority,
    DueDate,
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Tags,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderField {
    Title,
    Description,
    Time,
    Priority,
    Category,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub current_field: TaskField,
    pub title: LineInput,
    pub description: LineInput,
    pub priority: Priority,
    pub due_date: LineInput,
    pub tags: LineInput,
}

#[derive(Debug, Clone)]
pub struct NoteForm {
    pub current_field: NoteField,
    pub title: LineInput,
    pub tags: LineInput,
    pub content: LineInput,
    pub editing_note_id: Option<ItemId>, // None for new notes
}

#[derive(Debug, Clone)]
pub struct ReminderForm {
    pub current_field: ReminderField,
    pub title: LineInput,
    pub description: LineInput,
    pub time: LineInput, // YYYY-MM-DD HH:MM, local
    pub priority: Priority,
    pub category: ReminderCategory,
}

#[derive(Debug, Clone)]
pub enum ItemForm {
    Task(TaskForm),
    Note(NoteForm),
    Reminder(ReminderForm),
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            current_field: TaskField::Title,
            title: LineInput::new(),
            description: LineInput::new(),
            priority: Priority::Medium,
            due_date: LineInput::new(),
            tags: LineInput::new(),
        }
    }

    fn to_input(&self) -> TaskInput {
        TaskInput {
            title: self.title.text().to_string(),
            description: self.description.text().to_string(),
            priority: self.priority,
            due_date: self.due_date.text().to_string(),
            tags: self.tags.text().to_string(),
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteForm {
    pub fn new() -> Self {
        Self {
            current_field: NoteField::Title,
            title: LineInput::new(),
            tags: LineInput::new(),
            content: LineInput::new(),
            editing_note_id: None,
        }
    }

    pub fn for_note(note: &Note) -> Self {
        Self {
            current_field: NoteField::Title,
            title: LineInput::with_text(note.title.clone()),
            tags: LineInput::with_text(note.tags.join(", ")),
            content: LineInput::with_text(note.content.clone()),
            editing_note_id: Some(note.id.clone()),
        }
    }

    fn to_input(&self) -> NoteInput {
        NoteInput {
            title: self.title.text().to_string(),
            content: self.content.text().to_string(),
            tags: self.tags.text().to_string(),
        }
    }
}

impl Default for NoteForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderForm {
    /// Time field starts one hour ahead of `now`
    pub fn new(now: DateTime<Local>) -> Self {
        let suggested = now + TimeDelta::hours(1);
        Self {
            current_field: ReminderField::Title,
            title: LineInput::new(),
            description: LineInput::new(),
            time: LineInput::with_text(suggested.format("%Y-%m-%d %H:%M").to_string()),
            priority: Priority::Medium,
            category: ReminderCategory::Task,
        }
    }

    fn to_input(&self) -> ReminderInput {
        ReminderInput {
            title: self.title.text().to_string(),
            description: self.description.text().to_string(),
            time: parse_local_datetime(self.time.text()),
            priority: self.priority,
            category: self.category,
        }
    }
}

impl ItemForm {
    pub fn next_field(&mut self) {
        match self {
            ItemForm::Task(form) => {
                form.current_field = match form.current_field {
                    TaskField::Title => TaskField::Description,
                    TaskField::Description => TaskField::Priority,
                    TaskField::Priority => TaskField::DueDate,
                    TaskField::DueDate => TaskField::Tags,
                    TaskField::Tags => TaskField::Title,
                }
            }
            ItemForm::Note(form) => {
                form.current_field = match form.current_field {
                    NoteField::Title => NoteField::Tags,
                    NoteField::Tags => NoteField::Content,
                    NoteField::Content => NoteField::Title,
                }
            }
            ItemForm::Reminder(form) => {
                form.current_field = match form.current_field {
                    ReminderField::Title => ReminderField::Description,
                    ReminderField::Description => ReminderField::Time,
                    ReminderField::Time => ReminderField::Priority,
                    ReminderField::Priority => ReminderField::Category,
                    ReminderField::Category => ReminderField::Title,
                }
            }
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            ItemForm::Task(form) => {
                form.current_field = match form.current_field {
                    TaskField::Title => TaskField::Tags,
                    TaskField::Description => TaskField::Title,
                    TaskField::Priority => TaskField::Description,
                    TaskField::DueDate => TaskField::Priority,
                    TaskField::Tags => TaskField::DueDate,
                }
            }
            ItemForm::Note(form) => {
                form.current_field = match form.current_field {
                    NoteField::Title => NoteField::Content,
                    NoteField::Tags => NoteField::Title,
                    NoteField::Content => NoteField::Tags,
                }
            }
            ItemForm::Reminder(form) => {
                form.current_field = match form.current_field {
                    ReminderField::Title => ReminderField::Category,
                    ReminderField::Description => ReminderField::Title,
                    ReminderField::Time => ReminderField::Description,
                    ReminderField::Priority => ReminderField::Time,
                    ReminderField::Category => ReminderField::Priority,
                }
            }
        }
    }

    pub fn is_last_field(&self) -> bool {
        match self {
            ItemForm::Task(form) => form.current_field == TaskField::Tags,
            ItemForm::Note(form) => form.current_field == NoteField::Content,
            ItemForm::Reminder(form) => form.current_field == ReminderField::Category,
        }
    }

    /// Multi-line fields take Enter as a newline
    pub fn is_multi_line_field(&self) -> bool {
        matches!(self, ItemForm::Note(form) if form.current_field == NoteField::Content)
    }

    /// Text buffer of the focused field; `None` on choice fields
    pub fn current_input(&mut self) -> Option<&mut LineInput> {
        match self {
            ItemForm::Task(form) => match form.current_field {
                TaskField::Title => Some(&mut form.title),
                TaskField::Description => Some(&mut form.description),
                TaskField::DueDate => Some(&mut form.due_date),
                TaskField::Tags => Some(&mut form.tags),
                TaskField::Priority => None,
            },
            ItemForm::Note(form) => match form.current_field {
                NoteField::Title => Some(&mut form.title),
                NoteField::Tags => Some(&mut form.tags),
                NoteField::Content => Some(&mut form.content),
            },
            ItemForm::Reminder(form) => match form.current_field {
                ReminderField::Title => Some(&mut form.title),
                ReminderField::Description => Some(&mut form.description),
                ReminderField::Time => Some(&mut form.time),
                ReminderField::Priority | ReminderField::Category => None,
            },
        }
    }

    /// Step the focused priority/category choice
    pub fn cycle_choice(&mut self, forward: bool) {
        match self {
            ItemForm::Task(form) if form.current_field == TaskField::Priority => {
                form.priority = if forward { form.priority.next() } else { form.priority.prev() };
            }
            ItemForm::Reminder(form) => match form.current_field {
                ReminderField::Priority => {
                    form.priority = if forward { form.priority.next() } else { form.priority.prev() };
                }
                ReminderField::Category => {
                    form.category = if forward { form.category.next() } else { form.category.prev() };
                }
                _ => {}
            },
            _ => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub current_tab: Tab,
    pub mode: Mode,
    pub selected_index: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_tab: Tab::Overview,
            mode: Mode::View,
            selected_index: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub task_status: StatusFilter,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub create_form: Option<ItemForm>,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub selected: NaiveDate,
}

pub struct App {
    pub config: Config,
    pub store: Store,
    /// Refreshed from the store's clock on every tick
    pub now: DateTime<Local>,

    pub ui: UiState,
    pub filter: FilterState,
    pub search: SearchState,
    pub form: FormState,
    pub status: StatusState,
    pub calendar: CalendarState,
}

impl App {
    pub fn new(config: Config, store: Store) -> Self {
        let now = store.now();
        Self {
            config,
            store,
            now,
            ui: UiState::default(),
            filter: FilterState::default(),
            search: SearchState::default(),
            form: FormState::default(),
            status: StatusState::default(),
            calendar: CalendarState {
                selected: now.date_naive(),
            },
        }
    }

    pub fn tick(&mut self) {
        self.now = self.store.now();
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status.message = Some(message.into());
        self.status.message_time = Some(Instant::now());
    }

    pub fn check_status_message_timeout(&mut self) {
        let timeout = Duration::from_secs(self.config.status_message_timeout_secs);
        if let Some(shown_at) = self.status.message_time {
            if shown_at.elapsed() >= timeout {
                self.status.message = None;
                self.status.message_time = None;
            }
        }
    }

    // Navigation

    pub fn select_tab(&mut self, tab: Tab) {
        if self.ui.current_tab != tab {
            self.ui.current_tab = tab;
            self.ui.selected_index = 0;
            self.search.query.clear();
        }
        self.ui.mode = Mode::View;
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.ui.current_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.select_tab(self.ui.current_tab.prev());
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.store.filtered_tasks(&self.search.query, self.filter.task_status)
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        self.store.sorted_notes(&self.search.query)
    }

    pub fn visible_reminders(&self) -> Vec<&Reminder> {
        self.store.reminders().iter().collect()
    }

    pub fn current_len(&self) -> usize {
        match self.ui.current_tab {
            Tab::Tasks => self.visible_tasks().len(),
            Tab::Notes => self.visible_notes().len(),
            Tab::Reminders => self.store.reminders().len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.current_len();
        if len > 0 && self.ui.selected_index + 1 < len {
            self.ui.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.ui.selected_index = self.ui.selected_index.saturating_sub(1);
    }

    /// Keep the selection inside the visible list after it shrinks
    pub fn adjust_selected_index(&mut self) {
        let len = self.current_len();
        if len == 0 {
            self.ui.selected_index = 0;
        } else if self.ui.selected_index >= len {
            self.ui.selected_index = len - 1;
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.ui.selected_index).copied()
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.visible_notes().get(self.ui.selected_index).copied()
    }

    pub fn selected_reminder(&self) -> Option<&Reminder> {
        self.store.reminders().get(self.ui.selected_index)
    }

    fn select_id(&mut self, id: &ItemId) {
        let position = match self.ui.current_tab {
            Tab::Tasks => self.visible_tasks().iter().position(|t| &t.id == id),
            Tab::Notes => self.visible_notes().iter().position(|n| &n.id == id),
            Tab::Reminders => self.store.reminders().iter().position(|r| &r.id == id),
            _ => None,
        };
        if let Some(index) = position {
            self.ui.selected_index = index;
        }
    }

    // Search

    pub fn enter_search(&mut self) {
        if matches!(self.ui.current_tab, Tab::Tasks | Tab::Notes) {
            self.ui.mode = Mode::Search;
        }
    }

    /// Leave search mode; `keep` retains the query as an active filter
    pub fn exit_search(&mut self, keep: bool) {
        if !keep {
            self.search.query.clear();
        }
        self.ui.mode = Mode::View;
        self.adjust_selected_index();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.query.push(c);
        self.ui.selected_index = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.query.pop();
        self.adjust_selected_index();
    }

    pub fn cycle_status_filter(&mut self) {
        self.filter.task_status = self.filter.task_status.next();
        self.adjust_selected_index();
        self.set_status_message(format!("Status filter: {}", self.filter.task_status.label()));
    }

    // Forms

    pub fn start_create(&mut self) {
        let form = match self.ui.current_tab {
            Tab::Tasks => ItemForm::Task(TaskForm::new()),
            Tab::Notes => ItemForm::Note(NoteForm::new()),
            Tab::Reminders => ItemForm::Reminder(ReminderForm::new(self.now)),
            _ => {
                self.set_status_message("Switch to Tasks, Notes or Reminders to add items");
                return;
            }
        };
        self.form.create_form = Some(form);
        self.ui.mode = Mode::Create;
    }

    pub fn start_edit(&mut self) {
        if self.ui.current_tab != Tab::Notes {
            self.set_status_message("Only notes can be edited");
            return;
        }
        if let Some(form) = self.selected_note().map(NoteForm::for_note) {
            self.form.create_form = Some(ItemForm::Note(form));
            self.ui.mode = Mode::Create;
        }
    }

    pub fn cancel_form(&mut self) {
        self.form.create_form = None;
        self.ui.mode = Mode::View;
    }

    /// Hand the form to the store. A declined submission keeps the form open.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.create_form.as_ref() else {
            return;
        };

        let (saved, message) = match form {
            ItemForm::Task(form) => (self.store.create_task(form.to_input()), "Task created"),
            ItemForm::Note(form) => match form.editing_note_id.clone() {
                Some(id) => {
                    let updated = self.store.update_note(&id, form.to_input());
                    (updated.then_some(id), "Note updated")
                }
                None => (self.store.create_note(form.to_input()), "Note created"),
            },
            ItemForm::Reminder(form) => (self.store.create_reminder(form.to_input()), "Reminder added"),
        };

        if let Some(id) = saved {
            self.form.create_form = None;
            self.ui.mode = Mode::View;
            self.select_id(&id);
            self.set_status_message(message);
        }
    }

    // Item actions

    pub fn cycle_selected_task_status(&mut self) {
        if let Some((id, status)) = self.selected_task().map(|t| (t.id.clone(), t.status.next())) {
            self.store.update_task_status(&id, status);
            self.adjust_selected_index();
            self.set_status_message(format!("Status: {}", status.label()));
        }
    }

    pub fn toggle_selected_pin(&mut self) {
        if let Some(id) = self.selected_note().map(|n| n.id.clone()) {
            self.store.toggle_pin(&id);
            // Pinning re-sorts the list; follow the note
            self.select_id(&id);
        }
    }

    /// Delete the selected task or note; completes the selected reminder
    pub fn delete_selected(&mut self) {
        let message = match self.ui.current_tab {
            Tab::Tasks => self
                .selected_task()
                .map(|t| t.id.clone())
                .filter(|id| self.store.delete_task(id))
                .map(|_| "Task deleted"),
            Tab::Notes => self
                .selected_note()
                .map(|n| n.id.clone())
                .filter(|id| self.store.delete_note(id))
                .map(|_| "Note deleted"),
            Tab::Reminders => self
                .selected_reminder()
                .map(|r| r.id.clone())
                .filter(|id| self.store.complete_reminder(id))
                .map(|_| "Reminder completed"),
            _ => None,
        };
        if let Some(message) = message {
            self.adjust_selected_index();
            self.set_status_message(message);
        }
    }

    // Calendar

    pub fn calendar_shift_month(&mut self, months: i32) {
        self.calendar.selected = shift_month(self.calendar.selected, months);
    }

    pub fn calendar_move_days(&mut self, days: i64) {
        if let Some(date) = self.calendar.selected.checked_add_signed(TimeDelta::days(days)) {
            self.calendar.selected = date;
        }
    }

    pub fn calendar_today(&mut self) {
        self.calendar.selected = self.now.date_naive();
    }

    pub fn get_filter_summary(&self) -> String {
        let search = if self.search.query.is_empty() {
            "none".to_string()
        } else {
            format!("\"{}\"", self.search.query)
        };
        match self.ui.current_tab {
            Tab::Tasks => format!(
                "Status: {} | Search: {} | Showing {} of {}",
                self.filter.task_status.label(),
                search,
                self.visible_tasks().len(),
                self.store.tasks().len()
            ),
            Tab::Notes => format!(
                "Search: {} | Showing {} of {}",
                search,
                self.visible_notes().len(),
                self.store.notes().len()
            ),
            Tab::Reminders => format!(
                "{} reminders | {} overdue",
                self.store.reminders().len(),
                self.store.overdue_count(self.now)
            ),
            Tab::Calendar => format!(
                "{} | {} reminder(s) on this day",
                self.calendar.selected.format("%A, %B %-d, %Y"),
                self.store.reminders_on(self.calendar.selected).len()
            ),
            Tab::Overview | Tab::Analytics => format!(
                "Completion: {} | Overdue reminders: {}",
                self.store.completion_rate(),
                self.store.overdue_count(self.now)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::models::TaskStatus;
    use chrono::TimeZone;

    fn app() -> (App, ManualClock) {
        let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap());
        let store = Store::with_clock(Box::new(clock.clone()));
        (App::new(Config::default(), store), clock)
    }

    fn type_text(app: &mut App, text: &str) {
        let form = app.form.create_form.as_mut().unwrap();
        let input = form.current_input().unwrap();
        for c in text.chars() {
            input.insert_char(c);
        }
    }

    #[test]
    fn task_form_submits_and_selects_new_task() {
        let (mut app, _) = app();
        app.select_tab(Tab::Tasks);
        app.start_create();
        assert_eq!(app.ui.mode, Mode::Create);

        type_text(&mut app, "Buy milk");
        app.submit_form();

        assert_eq!(app.ui.mode, Mode::View);
        assert!(app.form.create_form.is_none());
        let task = app.selected_task().unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.tags.is_empty());
    }

    #[test]
    fn blank_form_stays_open() {
        let (mut app, _) = app();
        app.select_tab(Tab::Notes);
        app.start_create();
        type_text(&mut app, "Title only");
        app.submit_form();

        assert_eq!(app.ui.mode, Mode::Create);
        assert!(app.store.notes().is_empty());
    }

    #[test]
    fn reminder_form_uses_suggested_time() {
        let (mut app, clock) = app();
        app.select_tab(Tab::Reminders);
        app.start_create();
        type_text(&mut app, "Call dentist");
        app.submit_form();

        let reminder = app.selected_reminder().unwrap();
        assert_eq!(reminder.time, clock.now() + TimeDelta::hours(1));
        assert!(reminder.is_active);
    }

    #[test]
    fn editing_a_note_refreshes_its_position() {
        let (mut app, clock) = app();
        app.select_tab(Tab::Notes);
        for title in ["older", "newer"] {
            app.store.create_note(NoteInput {
                title: title.to_string(),
                content: "body".to_string(),
                tags: String::new(),
            });
            clock.advance(TimeDelta::minutes(1));
        }
        app.ui.selected_index = 1;
        assert_eq!(app.selected_note().unwrap().title, "older");

        app.start_edit();
        type_text(&mut app, " (edited)");
        app.submit_form();

        assert_eq!(app.ui.selected_index, 0);
        assert_eq!(app.selected_note().unwrap().title, "older (edited)");
    }

    #[test]
    fn status_cycle_respects_active_filter() {
        let (mut app, _) = app();
        app.select_tab(Tab::Tasks);
        app.store.create_task(TaskInput {
            title: "only".to_string(),
            ..Default::default()
        });
        app.cycle_status_filter(); // pending
        assert_eq!(app.visible_tasks().len(), 1);

        app.cycle_selected_task_status(); // -> in-progress, hidden by filter
        assert!(app.visible_tasks().is_empty());
        assert_eq!(app.ui.selected_index, 0);
        assert_eq!(app.store.tasks()[0].status, TaskStatus::InProgress);
    }

    #[test]
    fn delete_on_reminders_tab_completes_reminder() {
        let (mut app, clock) = app();
        app.select_tab(Tab::Reminders);
        app.store.create_reminder(ReminderInput {
            title: "Stretch".to_string(),
            time: Some(clock.now()),
            ..Default::default()
        });
        app.delete_selected();
        assert!(app.store.reminders().is_empty());
        assert_eq!(app.status.message.as_deref(), Some("Reminder completed"));
    }

    #[test]
    fn search_query_resets_on_tab_switch() {
        let (mut app, _) = app();
        app.select_tab(Tab::Tasks);
        app.enter_search();
        app.push_search_char('x');
        app.exit_search(true);
        assert_eq!(app.search.query, "x");

        app.next_tab();
        assert_eq!(app.ui.current_tab, Tab::Notes);
        assert!(app.search.query.is_empty());
    }

    #[test]
    fn tick_follows_store_clock() {
        let (mut app, clock) = app();
        clock.advance(TimeDelta::seconds(1));
        app.tick();
        assert_eq!(app.now, clock.now());
    }

    #[test]
    fn tabs_wrap_both_ways() {
        assert_eq!(Tab::Analytics.next(), Tab::Overview);
        assert_eq!(Tab::Overview.prev(), Tab::Analytics);
        assert_eq!(Tab::from_index(3), Some(Tab::Reminders));
        assert_eq!(Tab::from_index(6), None);
    }
}
