use chrono::{DateTime, Local, TimeDelta, TimeZone};
use veer::models::{
    CompletionRate, ItemId, NoteInput, Priority, ReminderCategory, ReminderInput, StatusFilter,
    TaskInput, TaskStatus,
};
use veer::{Clock, ManualClock, Store};

fn start() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap()
}

fn workspace() -> (Store, ManualClock) {
    let clock = ManualClock::new(start());
    (Store::with_clock(Box::new(clock.clone())), clock)
}

fn task(title: &str) -> TaskInput {
    TaskInput {
        title: title.to_string(),
        ..Default::default()
    }
}

fn note(title: &str, content: &str) -> NoteInput {
    NoteInput {
        title: title.to_string(),
        content: content.to_string(),
        tags: String::new(),
    }
}

fn reminder(title: &str, time: DateTime<Local>) -> ReminderInput {
    ReminderInput {
        title: title.to_string(),
        time: Some(time),
        ..Default::default()
    }
}

#[test]
fn blank_task_title_is_ignored() {
    let (mut store, _) = workspace();
    assert!(store.create_task(task("   ")).is_none());
    assert!(store.tasks().is_empty());
}

#[test]
fn new_task_gets_defaults() {
    let (mut store, _) = workspace();
    let id = store.create_task(task("Buy milk")).unwrap();

    let created = store.task(&id).unwrap();
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.priority, Priority::Medium);
    assert!(created.tags.is_empty());
    assert_eq!(created.due_date_label(), "No date");
}

#[test]
fn unknown_ids_leave_collections_unchanged() {
    let (mut store, _) = workspace();
    store.create_note(note("Keep", "me"));
    let missing = ItemId::new("does-not-exist");

    assert!(!store.delete_note(&missing));
    assert!(!store.delete_task(&missing));
    assert!(!store.update_task_status(&missing, TaskStatus::Completed));
    assert!(!store.complete_reminder(&missing));
    assert_eq!(store.notes().len(), 1);
}

#[test]
fn distribution_sums_to_about_one_hundred() {
    let (mut store, _) = workspace();
    let empty = store.task_distribution();
    assert_eq!(empty.sum(), 0);
    assert_eq!(store.completion_rate(), CompletionRate::NoTasks);

    let ids: Vec<ItemId> = ["a", "b", "c"]
        .into_iter()
        .filter_map(|title| store.create_task(task(title)))
        .collect();
    store.update_task_status(&ids[1], TaskStatus::InProgress);
    store.update_task_status(&ids[2], TaskStatus::Completed);

    let distribution = store.task_distribution();
    assert_eq!(distribution.percent(TaskStatus::Pending), 33);
    assert_eq!(distribution.percent(TaskStatus::InProgress), 33);
    assert_eq!(distribution.percent(TaskStatus::Completed), 33);
    assert!((99..=101).contains(&distribution.sum()));
    assert_eq!(store.completion_rate(), CompletionRate::Percent(33));
}

#[test]
fn distribution_stays_near_one_hundred_for_any_mix() {
    let mixes: [fn(usize) -> TaskStatus; 4] = [
        |_| TaskStatus::Pending,
        |i| if i % 2 == 0 { TaskStatus::Completed } else { TaskStatus::InProgress },
        |i| TaskStatus::ALL[i % 3],
        |i| if i == 0 { TaskStatus::Completed } else { TaskStatus::ALL[i % 2] },
    ];

    for size in [1, 2, 3, 6, 7] {
        for mix in mixes {
            let (mut store, _) = workspace();
            for i in 0..size {
                let id = store.create_task(task(&format!("task {}", i))).unwrap();
                store.update_task_status(&id, mix(i));
            }
            let sum = store.task_distribution().sum();
            assert!((99..=101).contains(&sum), "{} tasks summed to {}", size, sum);
        }
    }
}

#[test]
fn pinned_notes_sort_first_then_by_update_time() {
    let (mut store, clock) = workspace();
    let old = store.create_note(note("old", "x")).unwrap();
    clock.advance(TimeDelta::minutes(1));
    let mid = store.create_note(note("mid", "x")).unwrap();
    clock.advance(TimeDelta::minutes(1));
    let new = store.create_note(note("new", "x")).unwrap();

    store.toggle_pin(&old);
    let order: Vec<&ItemId> = store.sorted_notes("").iter().map(|n| &n.id).collect();
    assert_eq!(order, vec![&old, &new, &mid]);
}

#[test]
fn editing_refreshes_update_time_but_pinning_does_not() {
    let (mut store, clock) = workspace();
    let id = store.create_note(note("draft", "body")).unwrap();

    clock.advance(TimeDelta::minutes(5));
    store.toggle_pin(&id);
    assert_eq!(store.note(&id).unwrap().updated_at, start());

    clock.advance(TimeDelta::minutes(5));
    assert!(store.update_note(&id, note("final", "body v2")));
    let edited = store.note(&id).unwrap();
    assert_eq!(edited.updated_at, start() + TimeDelta::minutes(10));
    assert_eq!(edited.created_at, start());
    assert!(edited.is_pinned);

    assert!(!store.update_note(&id, note("final", "  ")));
    assert_eq!(store.note(&id).unwrap().content, "body v2");
}

#[test]
fn reminder_countdowns_follow_the_clock() {
    let (mut store, clock) = workspace();
    let past = store.create_reminder(reminder("missed", start() - TimeDelta::minutes(1))).unwrap();
    let soon = store.create_reminder(reminder("soon", start() + TimeDelta::minutes(90))).unwrap();

    let now = clock.now();
    assert!(store.reminder(&past).unwrap().is_overdue(now));
    assert_eq!(store.reminder(&soon).unwrap().time_until(now).to_string(), "1h 30m");
    assert_eq!(store.overdue_count(now), 1);

    clock.advance(TimeDelta::minutes(90));
    assert_eq!(store.overdue_count(clock.now()), 2);
}

#[test]
fn reminders_stay_ordered_by_time() {
    let (mut store, _) = workspace();
    for (title, hours) in [("third", 3), ("first", 1), ("second", 2)] {
        store.create_reminder(ReminderInput {
            category: ReminderCategory::Work,
            ..reminder(title, start() + TimeDelta::hours(hours))
        });
    }
    let titles: Vec<&str> = store.reminders().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert!(store.reminders().iter().all(|r| r.is_active));
}

#[test]
fn create_update_filter_round_trip() {
    let (mut store, _) = workspace();
    let report = store.create_task(task("Write report")).unwrap();
    store.create_task(task("Read book"));
    store.update_task_status(&report, TaskStatus::Completed);

    let completed = store.filtered_tasks("", StatusFilter::Only(TaskStatus::Completed));
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, report);

    let searched = store.filtered_tasks("READ", StatusFilter::All);
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].title, "Read book");

    assert!(store.filtered_tasks("report", StatusFilter::Only(TaskStatus::Pending)).is_empty());
}

#[test]
fn ids_are_unique_within_one_instant() {
    let (mut store, _) = workspace();
    let a = store.create_task(task("a")).unwrap();
    let b = store.create_task(task("b")).unwrap();
    let c = store.create_note(note("c", "x")).unwrap();
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}
