use chrono::{Duration, TimeZone, Utc};
use focus_core::{
    AssignmentBoardService, AssignmentPriority, AssignmentStatus, ClassRef, DueUrgency,
    ExternalAssignment, InMemoryClassTodoSource, NewTask, Priority, SourceError, Task, TaskId,
    UserId, UserSession,
};

fn record(id: &str, status: AssignmentStatus, due_in_days: Option<i64>) -> ExternalAssignment {
    let base = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    ExternalAssignment {
        id: id.to_string(),
        title: format!("assignment {id}"),
        description: None,
        status,
        priority: AssignmentPriority::Medium,
        due_date: due_in_days.map(|days| base + Duration::days(days)),
        class: Some(ClassRef {
            name: "Linear Algebra".to_string(),
            code: Some("MATH 221".to_string()),
            color: Some("#3366ff".to_string()),
        }),
    }
}

fn local(id: &str, text: &str, completed: bool) -> Task {
    let mut task = Task::from_new(
        TaskId::from(id),
        NewTask::new(text)
            .with_priority(Priority::P3)
            .with_source("class-5"),
    );
    task.completed = completed;
    task
}

fn seeded_source() -> InMemoryClassTodoSource {
    let source = InMemoryClassTodoSource::new();
    let alice = UserId::new("alice");
    source.insert(alice.clone(), record("late", AssignmentStatus::Todo, Some(9)));
    source.insert(alice.clone(), record("soon", AssignmentStatus::Todo, Some(1)));
    source.insert(alice.clone(), record("wip", AssignmentStatus::InProgress, None));
    source.insert(alice, record("done", AssignmentStatus::Completed, Some(-2)));
    source.insert(UserId::new("bob"), record("bobs", AssignmentStatus::Todo, Some(0)));
    source
}

#[test]
fn board_merges_class_todos_before_local_tasks() {
    let service = AssignmentBoardService::new(seeded_source());
    let session = UserSession::new(UserId::new("alice"));
    let tasks = vec![local("t1", "flashcards", false), local("t2", "done local", true)];

    let board = service.load(Some(&session), &tasks);

    let todo_ids: Vec<&str> = board
        .column(AssignmentStatus::Todo)
        .iter()
        .map(|card| card.id.as_str())
        .collect();
    assert_eq!(todo_ids, vec!["soon", "late", "t1"]);

    let progress: Vec<&str> = board
        .column(AssignmentStatus::InProgress)
        .iter()
        .map(|card| card.id.as_str())
        .collect();
    assert_eq!(progress, vec!["wip"]);

    let completed: Vec<&str> = board
        .column(AssignmentStatus::Completed)
        .iter()
        .map(|card| card.id.as_str())
        .collect();
    assert_eq!(completed, vec!["done", "t2"]);

    assert_eq!(board.total(), 6);
    assert!(board.card("bobs").is_none());
    let titles: Vec<&str> = board.columns().iter().map(|c| c.title()).collect();
    assert_eq!(titles, vec!["To Do", "In Progress", "Completed"]);
}

#[test]
fn cards_share_one_display_shape() {
    let service = AssignmentBoardService::new(seeded_source());
    let session = UserSession::new(UserId::new("alice"));
    let tasks = vec![local("t1", "flashcards", false)];
    let board = service.load(Some(&session), &tasks);

    let external = board.card("soon").unwrap();
    assert!(external.is_external());
    assert_eq!(external.class_label.as_deref(), Some("MATH 221"));
    assert_eq!(external.class_color.as_deref(), Some("#3366ff"));
    assert_eq!(external.priority_label.as_deref(), Some("medium"));

    let mine = board.card("t1").unwrap();
    assert!(!mine.is_external());
    assert_eq!(mine.title, "flashcards");
    assert_eq!(mine.class_label.as_deref(), Some("class-5"));
    assert_eq!(mine.priority_label.as_deref(), Some("p3"));
}

#[test]
fn due_info_reflects_urgency() {
    let service = AssignmentBoardService::new(seeded_source());
    let session = UserSession::new(UserId::new("alice"));
    let board = service.load(Some(&session), &[]);
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();

    let soon = board.card("soon").unwrap().due_info(now).unwrap();
    assert_eq!(soon.urgency, DueUrgency::DueSoon);
    assert_eq!(soon.label, "Due tomorrow");

    let overdue = board.card("done").unwrap().due_info(now).unwrap();
    assert_eq!(overdue.urgency, DueUrgency::Overdue);
    assert_eq!(overdue.label, "2 days overdue");

    assert!(board.card("wip").unwrap().due_info(now).is_none());
}

#[test]
fn signed_out_or_failed_fetch_still_shows_local_tasks() {
    let source = seeded_source();
    source.set_offline(true);
    let service = AssignmentBoardService::new(source);
    let tasks = vec![local("t1", "flashcards", false)];

    let offline = service.load(Some(&UserSession::new(UserId::new("alice"))), &tasks);
    assert_eq!(offline.total(), 1);
    assert_eq!(offline.column(AssignmentStatus::Todo)[0].id, "t1");

    service.source().set_offline(false);
    let signed_out = service.load(None, &tasks);
    assert_eq!(signed_out.total(), 1);
}

#[test]
fn toggling_a_class_todo_writes_back_by_id() {
    let service = AssignmentBoardService::new(seeded_source());
    let session = UserSession::new(UserId::new("alice"));
    let board = service.load(Some(&session), &[]);

    let wip = board.card("wip").unwrap();
    assert_eq!(
        service.toggle_external(wip).unwrap(),
        AssignmentStatus::Completed
    );
    assert_eq!(
        service.source().status_of("wip"),
        Some(AssignmentStatus::Completed)
    );

    let done = board.card("done").unwrap();
    assert_eq!(service.toggle_external(done).unwrap(), AssignmentStatus::Todo);

    let reloaded = service.load(Some(&session), &[]);
    assert_eq!(reloaded.column(AssignmentStatus::InProgress).len(), 0);
}

#[test]
fn local_cards_and_unknown_ids_are_rejected() {
    let service = AssignmentBoardService::new(seeded_source());
    let tasks = vec![local("t1", "flashcards", false)];
    let board = service.load(None, &tasks);

    let err = service.toggle_external(board.card("t1").unwrap()).unwrap_err();
    assert_eq!(err, SourceError::NotExternal("t1".to_string()));

    let err = service
        .set_status("missing", AssignmentStatus::Todo)
        .unwrap_err();
    assert_eq!(err, SourceError::NotFound("missing".to_string()));
}

#[test]
fn undated_class_todos_follow_dated_ones_in_a_column() {
    let source = InMemoryClassTodoSource::new();
    let alice = UserId::new("alice");
    source.insert(alice.clone(), record("someday", AssignmentStatus::Todo, None));
    source.insert(alice.clone(), record("next-week", AssignmentStatus::Todo, Some(7)));
    source.insert(alice, record("friday", AssignmentStatus::Todo, Some(3)));
    let service = AssignmentBoardService::new(source);

    let board = service.load(Some(&UserSession::new(UserId::new("alice"))), &[]);

    let ids: Vec<&str> = board
        .column(AssignmentStatus::Todo)
        .iter()
        .map(|card| card.id.as_str())
        .collect();
    assert_eq!(ids, vec!["friday", "next-week", "someday"]);
}
