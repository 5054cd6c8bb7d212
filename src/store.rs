use chrono::{DateTime, Local, NaiveDate, TimeDelta};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::models::{
    CompletionRate, Countdown, ItemId, Note, NoteInput, Priority, PriorityCounts, Reminder,
    ReminderCategory, ReminderInput, StatusFilter, Task, TaskDistribution, TaskInput, TaskStats,
    TaskStatus, WorkspaceSummary,
};
use crate::utils::parse_tags;

/// In-memory holder of the task, note and reminder collections.
///
/// Tasks keep insertion order, notes are kept newest-first and reminders
/// ascending by time. Rejected input and unknown ids never error: the
/// operation is simply not performed.
pub struct Store {
    clock: Box<dyn Clock>,
    tasks: Vec<Task>,
    notes: Vec<Note>,
    reminders: Vec<Reminder>,
    last_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            tasks: Vec::new(),
            notes: Vec::new(),
            reminders: Vec::new(),
            last_id: 0,
        }
    }

    /// A workspace pre-filled with the demo records the dashboard starts with
    pub fn with_sample_data(clock: Box<dyn Clock>) -> Self {
        let mut store = Self::with_clock(clock);
        let now = store.now();

        store.create_task(TaskInput {
            title: "Plan sprint goals".to_string(),
            description: "Outline deliverables for the next two weeks".to_string(),
            priority: Priority::High,
            due_date: now.format("%Y-%m-%d").to_string(),
            tags: "planning, team".to_string(),
        });
        store.create_task(TaskInput {
            title: "Update onboarding docs".to_string(),
            description: "Refresh the setup guide for new contributors".to_string(),
            priority: Priority::Medium,
            due_date: (now + TimeDelta::days(3)).format("%Y-%m-%d").to_string(),
            tags: "docs".to_string(),
        });
        if let Some(id) = store.create_task(TaskInput {
            title: "Fix login redirect".to_string(),
            description: "Users land on a blank page after signing in".to_string(),
            priority: Priority::High,
            due_date: String::new(),
            tags: "bug, auth".to_string(),
        }) {
            store.update_task_status(&id, TaskStatus::InProgress);
        }
        if let Some(id) = store.create_task(TaskInput {
            title: "Book venue for offsite".to_string(),
            description: String::new(),
            priority: Priority::Low,
            due_date: String::new(),
            tags: String::new(),
        }) {
            store.update_task_status(&id, TaskStatus::Completed);
        }

        store.create_note(NoteInput {
            title: "Meeting notes".to_string(),
            content: "Agreed to ship the dashboard beta next Friday.".to_string(),
            tags: "meetings".to_string(),
        });
        if let Some(id) = store.create_note(NoteInput {
            title: "Ideas".to_string(),
            content: "Weekly review template\nKeyboard-only navigation".to_string(),
            tags: "ideas, personal".to_string(),
        }) {
            store.toggle_pin(&id);
        }

        store.create_reminder(ReminderInput {
            title: "Team Standup".to_string(),
            description: "Daily standup meeting with development team".to_string(),
            time: Some(now + TimeDelta::minutes(30)),
            priority: Priority::High,
            category: ReminderCategory::Meeting,
        });
        store.create_reminder(ReminderInput {
            title: "Submit Report".to_string(),
            description: "Monthly progress report due today".to_string(),
            time: Some(now + TimeDelta::hours(2)),
            priority: Priority::Medium,
            category: ReminderCategory::Work,
        });
        store.create_reminder(ReminderInput {
            title: "Code Review".to_string(),
            description: "Review pull requests from team members".to_string(),
            time: Some(now + TimeDelta::hours(4)),
            priority: Priority::Low,
            category: ReminderCategory::Task,
        });

        info!(
            tasks = store.tasks.len(),
            notes = store.notes.len(),
            reminders = store.reminders.len(),
            "seeded sample workspace"
        );
        store
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    /// Timestamp-derived id; strictly increasing even within one millisecond
    fn next_id(&mut self) -> ItemId {
        let millis = self.clock.now().timestamp_millis();
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        ItemId::new(id.to_string())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn task(&self, id: &ItemId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn note(&self, id: &ItemId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn reminder(&self, id: &ItemId) -> Option<&Reminder> {
        self.reminders.iter().find(|reminder| &reminder.id == id)
    }

    // Tasks

    /// Append a new pending task. Declined when the title is blank.
    pub fn create_task(&mut self, input: TaskInput) -> Option<ItemId> {
        let title = input.title.trim();
        if title.is_empty() {
            debug!("declined task without title");
            return None;
        }

        let due_date = input.due_date.trim();
        let task = Task {
            id: self.next_id(),
            title: title.to_string(),
            description: input.description.trim().to_string(),
            priority: input.priority,
            status: TaskStatus::Pending,
            due_date: (!due_date.is_empty()).then(|| due_date.to_string()),
            tags: parse_tags(&input.tags),
        };
        let id = task.id.clone();
        debug!(id = %id, "created task");
        self.tasks.push(task);
        Some(id)
    }

    /// Returns false when no task has this id
    pub fn update_task_status(&mut self, id: &ItemId, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|task| &task.id == id) {
            Some(task) => {
                task.status = status;
                debug!(id = %id, status = status.as_str(), "updated task status");
                true
            }
            None => {
                debug!(id = %id, "status update for unknown task ignored");
                false
            }
        }
    }

    pub fn delete_task(&mut self, id: &ItemId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        let removed = self.tasks.len() != before;
        debug!(id = %id, removed, "delete task");
        removed
    }

    /// Tasks whose title or description contains `search` (case-insensitive)
    /// and whose status passes `filter`, in stored order
    pub fn filtered_tasks(&self, search: &str, filter: StatusFilter) -> Vec<&Task> {
        let needle = search.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.matches_search(&needle))
            .filter(|task| filter.matches(task.status))
            .collect()
    }

    pub fn task_stats(&self) -> TaskStats {
        self.tasks.iter().fold(TaskStats::default(), |mut stats, task| {
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            stats
        })
    }

    /// Rounded share of each status; an empty collection yields all zeros
    pub fn task_distribution(&self) -> TaskDistribution {
        let stats = self.task_stats();
        let total = stats.total().max(1);
        TaskDistribution {
            pending: rounded_percent(stats.pending, total),
            in_progress: rounded_percent(stats.in_progress, total),
            completed: rounded_percent(stats.completed, total),
        }
    }

    pub fn completion_rate(&self) -> CompletionRate {
        let stats = self.task_stats();
        match stats.total() {
            0 => CompletionRate::NoTasks,
            total => CompletionRate::Percent(rounded_percent(stats.completed, total)),
        }
    }

    pub fn tasks_by_priority(&self) -> PriorityCounts {
        self.tasks.iter().fold(PriorityCounts::default(), |mut counts, task| {
            match task.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
            counts
        })
    }

    // Notes

    /// Prepend a new unpinned note. Declined unless both title and content are non-blank.
    pub fn create_note(&mut self, input: NoteInput) -> Option<ItemId> {
        let title = input.title.trim();
        if title.is_empty() || input.content.trim().is_empty() {
            debug!("declined note without title or content");
            return None;
        }

        let now = self.now();
        let note = Note {
            id: self.next_id(),
            title: title.to_string(),
            content: input.content,
            tags: parse_tags(&input.tags),
            created_at: now,
            updated_at: now,
            is_pinned: false,
        };
        let id = note.id.clone();
        debug!(id = %id, "created note");
        self.notes.insert(0, note);
        Some(id)
    }

    /// Replace title, content and tags, refreshing `updated_at`.
    /// Declined for blank title/content; false for unknown ids.
    pub fn update_note(&mut self, id: &ItemId, input: NoteInput) -> bool {
        let title = input.title.trim();
        if title.is_empty() || input.content.trim().is_empty() {
            debug!(id = %id, "declined note edit without title or content");
            return false;
        }

        let now = self.now();
        match self.notes.iter_mut().find(|note| &note.id == id) {
            Some(note) => {
                note.title = title.to_string();
                note.content = input.content;
                note.tags = parse_tags(&input.tags);
                note.updated_at = now;
                debug!(id = %id, "updated note");
                true
            }
            None => {
                debug!(id = %id, "edit for unknown note ignored");
                false
            }
        }
    }

    /// Flip `is_pinned`; `updated_at` is left alone
    pub fn toggle_pin(&mut self, id: &ItemId) -> bool {
        match self.notes.iter_mut().find(|note| &note.id == id) {
            Some(note) => {
                note.is_pinned = !note.is_pinned;
                debug!(id = %id, pinned = note.is_pinned, "toggled note pin");
                true
            }
            None => false,
        }
    }

    pub fn delete_note(&mut self, id: &ItemId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| &note.id != id);
        let removed = self.notes.len() != before;
        debug!(id = %id, removed, "delete note");
        removed
    }

    /// Notes matching `search` in title, content or any tag; pinned first,
    /// then most recently updated
    pub fn sorted_notes(&self, search: &str) -> Vec<&Note> {
        let needle = search.to_lowercase();
        let mut notes: Vec<&Note> = self
            .notes
            .iter()
            .filter(|note| note.matches_search(&needle))
            .collect();
        notes.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        notes
    }

    // Reminders

    /// Insert an active reminder and keep the collection ordered by time.
    /// Declined without a title or a time.
    pub fn create_reminder(&mut self, input: ReminderInput) -> Option<ItemId> {
        let title = input.title.trim();
        let Some(time) = input.time else {
            debug!("declined reminder without time");
            return None;
        };
        if title.is_empty() {
            debug!("declined reminder without title");
            return None;
        }

        let reminder = Reminder {
            id: self.next_id(),
            title: title.to_string(),
            description: input.description.trim().to_string(),
            time,
            priority: input.priority,
            is_active: true,
            category: input.category,
        };
        let id = reminder.id.clone();
        debug!(id = %id, time = %time, "created reminder");
        self.reminders.push(reminder);
        self.reminders.sort_by_key(|reminder| reminder.time);
        Some(id)
    }

    /// Completing a reminder removes it
    pub fn complete_reminder(&mut self, id: &ItemId) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|reminder| &reminder.id != id);
        let removed = self.reminders.len() != before;
        debug!(id = %id, removed, "complete reminder");
        removed
    }

    pub fn active_reminders(&self, limit: usize) -> Vec<&Reminder> {
        self.reminders
            .iter()
            .filter(|reminder| reminder.is_active)
            .take(limit)
            .collect()
    }

    pub fn overdue_count(&self, now: DateTime<Local>) -> usize {
        self.reminders
            .iter()
            .filter(|reminder| reminder.is_overdue(now))
            .count()
    }

    pub fn reminders_on(&self, date: NaiveDate) -> Vec<&Reminder> {
        self.reminders
            .iter()
            .filter(|reminder| reminder.time.date_naive() == date)
            .collect()
    }

    pub fn summary(&self, now: DateTime<Local>) -> WorkspaceSummary {
        WorkspaceSummary {
            generated_at: now,
            tasks: self.task_stats(),
            distribution: self.task_distribution(),
            completion_rate: self.completion_rate(),
            priorities: self.tasks_by_priority(),
            notes_total: self.notes.len(),
            notes_pinned: self.notes.iter().filter(|note| note.is_pinned).count(),
            reminders_total: self.reminders.len(),
            reminders_active: self.reminders.iter().filter(|r| r.is_active).count(),
            reminders_overdue: self.overdue_count(now),
        }
    }
}

fn rounded_percent(part: usize, total: usize) -> u32 {
    (part as f64 * 100.0 / total as f64).round() as u32
}

/// Time left until `reminder` fires, evaluated at `now`
pub fn time_until(reminder: &Reminder, now: DateTime<Local>) -> Countdown {
    reminder.time_until(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;

    fn clock() -> ManualClock {
        ManualClock::new(Local.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap())
    }

    fn task(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn ids_are_unique_within_the_same_millisecond() {
        let mut store = Store::with_clock(Box::new(clock()));
        let a = store.create_task(task("a")).unwrap();
        let b = store.create_task(task("b")).unwrap();
        let c = store.create_task(task("c")).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(a.as_str().parse::<i64>().unwrap() < b.as_str().parse::<i64>().unwrap());
    }

    #[test]
    fn create_task_trims_and_defaults() {
        let mut store = Store::with_clock(Box::new(clock()));
        let id = store
            .create_task(TaskInput {
                title: "  Write report ".to_string(),
                description: " quarterly ".to_string(),
                priority: Priority::High,
                due_date: "  ".to_string(),
                tags: "work, ,urgent ,".to_string(),
            })
            .unwrap();

        let task = store.task(&id).unwrap();
        assert_eq!(task.title, "Write report");
        assert_eq!(task.description, "quarterly");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.due_date, None);
        assert_eq!(task.due_date_label(), "No date");
        assert_eq!(task.tags, vec!["work", "urgent"]);
    }

    #[test]
    fn tasks_keep_insertion_order() {
        let mut store = Store::with_clock(Box::new(clock()));
        for title in ["first", "second", "third"] {
            store.create_task(task(title));
        }
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn reminder_requires_time_and_title() {
        let clock = clock();
        let mut store = Store::with_clock(Box::new(clock.clone()));
        assert!(store
            .create_reminder(ReminderInput {
                title: "No time".to_string(),
                ..Default::default()
            })
            .is_none());
        assert!(store
            .create_reminder(ReminderInput {
                title: "   ".to_string(),
                time: Some(clock.now()),
                ..Default::default()
            })
            .is_none());
        assert!(store.reminders().is_empty());
    }

    #[test]
    fn sample_data_is_consistent() {
        let clock = clock();
        let store = Store::with_sample_data(Box::new(clock.clone()));
        let summary = store.summary(clock.now());
        assert_eq!(summary.tasks.total(), 4);
        assert_eq!(summary.reminders_total, 3);
        assert_eq!(summary.reminders_overdue, 0);
        assert_eq!(summary.notes_pinned, 1);
        assert_eq!(store.sorted_notes("")[0].title, "Ideas");
    }
}
