use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque record identifier, unique within its collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Next status in the display cycle; any status may follow any other
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// Status restriction applied by `Store::filtered_tasks`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// all -> pending -> in-progress -> completed -> all
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(TaskStatus::Pending),
            StatusFilter::Only(TaskStatus::Pending) => StatusFilter::Only(TaskStatus::InProgress),
            StatusFilter::Only(TaskStatus::InProgress) => StatusFilter::Only(TaskStatus::Completed),
            StatusFilter::Only(TaskStatus::Completed) => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderCategory {
    Meeting,
    #[default]
    Task,
    Personal,
    Work,
}

impl ReminderCategory {
    pub const ALL: [ReminderCategory; 4] = [
        ReminderCategory::Meeting,
        ReminderCategory::Task,
        ReminderCategory::Personal,
        ReminderCategory::Work,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderCategory::Meeting => "meeting",
            ReminderCategory::Task => "task",
            ReminderCategory::Personal => "personal",
            ReminderCategory::Work => "work",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReminderCategory::Meeting => "Meeting",
            ReminderCategory::Task => "Task",
            ReminderCategory::Personal => "Personal",
            ReminderCategory::Work => "Work",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ReminderCategory::Meeting => ReminderCategory::Task,
            ReminderCategory::Task => ReminderCategory::Personal,
            ReminderCategory::Personal => ReminderCategory::Work,
            ReminderCategory::Work => ReminderCategory::Meeting,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ReminderCategory::Meeting => ReminderCategory::Work,
            ReminderCategory::Task => ReminderCategory::Meeting,
            ReminderCategory::Personal => ReminderCategory::Task,
            ReminderCategory::Work => ReminderCategory::Personal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: Option<String>, // free text, usually YYYY-MM-DD
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: ItemId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
    pub is_pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub time: DateTime<Local>,
    pub priority: Priority,
    pub is_active: bool,
    pub category: ReminderCategory,
}

impl Task {
    /// `needle` must already be lowercase
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    pub fn due_date_label(&self) -> &str {
        self.due_date.as_deref().unwrap_or("No date")
    }
}

impl Note {
    /// `needle` must already be lowercase
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

impl Reminder {
    pub fn time_until(&self, now: DateTime<Local>) -> Countdown {
        Countdown::between(now, self.time)
    }

    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        self.time_until(now).is_overdue()
    }
}

/// Form payload for `Store::create_task`
#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
    pub tags: String, // comma-separated
}

/// Form payload for `Store::create_note` and `Store::update_note`
#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub tags: String, // comma-separated
}

/// Form payload for `Store::create_reminder`
#[derive(Debug, Clone, Default)]
pub struct ReminderInput {
    pub title: String,
    pub description: String,
    pub time: Option<DateTime<Local>>,
    pub priority: Priority,
    pub category: ReminderCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}

/// Rounded percentage of tasks per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskDistribution {
    pub pending: u32,
    pub in_progress: u32,
    pub completed: u32,
}

impl TaskDistribution {
    pub fn percent(&self, status: TaskStatus) -> u32 {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    pub fn sum(&self) -> u32 {
        self.pending + self.in_progress + self.completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRate {
    NoTasks,
    Percent(u32),
}

impl fmt::Display for CompletionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionRate::NoTasks => f.write_str("No tasks yet"),
            CompletionRate::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Time remaining until a reminder fires, as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Overdue,
    Remaining { days: i64, hours: i64, minutes: i64 },
}

impl Countdown {
    pub fn between(now: DateTime<Local>, target: DateTime<Local>) -> Self {
        let diff = target.signed_duration_since(now);
        if diff <= TimeDelta::zero() {
            return Countdown::Overdue;
        }

        let total_minutes = diff.num_minutes();
        Countdown::Remaining {
            days: total_minutes / (60 * 24),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Countdown::Overdue)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Countdown::Overdue => f.write_str("Overdue"),
            Countdown::Remaining { days, hours, minutes } => {
                let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
                    .into_iter()
                    .filter(|(value, _)| *value > 0)
                    .take(2)
                    .map(|(value, unit)| format!("{}{}", value, unit))
                    .collect();
                if parts.is_empty() {
                    f.write_str("0m")
                } else {
                    f.write_str(&parts.join(" "))
                }
            }
        }
    }
}

/// Read-only snapshot of every derived value, for the analytics view and `veer stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub generated_at: DateTime<Local>,
    pub tasks: TaskStats,
    pub distribution: TaskDistribution,
    pub completion_rate: CompletionRate,
    pub priorities: PriorityCounts,
    pub notes_total: usize,
    pub notes_pinned: usize,
    pub reminders_total: usize,
    pub reminders_active: usize,
    pub reminders_overdue: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn countdown_formats_largest_units() {
        let now = at(9, 0);
        assert_eq!(Countdown::between(now, now + TimeDelta::minutes(90)).to_string(), "1h 30m");
        assert_eq!(Countdown::between(now, now + TimeDelta::minutes(135)).to_string(), "2h 15m");
        assert_eq!(Countdown::between(now, now + TimeDelta::hours(2)).to_string(), "2h");
        assert_eq!(Countdown::between(now, now + TimeDelta::hours(27)).to_string(), "1d 3h");
        assert_eq!(Countdown::between(now, now + TimeDelta::days(2)).to_string(), "2d");
        assert_eq!(
            Countdown::between(now, now + TimeDelta::days(1) + TimeDelta::minutes(45)).to_string(),
            "1d 45m"
        );
        assert_eq!(Countdown::between(now, now + TimeDelta::minutes(45)).to_string(), "45m");
        assert_eq!(Countdown::between(now, now + TimeDelta::seconds(20)).to_string(), "0m");
    }

    #[test]
    fn countdown_is_overdue_at_or_before_now() {
        let now = at(9, 0);
        assert_eq!(Countdown::between(now, now), Countdown::Overdue);
        assert!(Countdown::between(now, at(8, 59)).is_overdue());
        assert_eq!(Countdown::Overdue.to_string(), "Overdue");
    }

    #[test]
    fn status_filter_cycles_back_to_all() {
        let mut filter = StatusFilter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.next();
            seen.push(filter.label());
        }
        assert_eq!(seen, vec!["Pending", "In Progress", "Completed", "All"]);
        assert!(StatusFilter::All.matches(TaskStatus::Completed));
        assert!(!StatusFilter::Only(TaskStatus::Pending).matches(TaskStatus::Completed));
    }

    #[test]
    fn enums_serialize_with_wire_names() {
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&ReminderCategory::Meeting).unwrap(), "\"meeting\"");
        assert_eq!(CompletionRate::NoTasks.to_string(), "No tasks yet");
        assert_eq!(CompletionRate::Percent(40).to_string(), "40%");
    }
}
