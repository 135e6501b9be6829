use chrono::{FixedOffset, TimeZone, Utc};
use focus_core::{compose_task, parse_date_intent, FixedClock, Priority};

fn noon_utc() -> FixedClock {
    FixedClock::utc(Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap())
}

#[test]
fn today_resolves_to_start_of_current_day() {
    let intent = parse_date_intent("Finish essay today", &noon_utc());
    assert_eq!(intent.clean_text, "Finish essay");
    assert_eq!(
        intent.due_date,
        Some(Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap())
    );
}

#[test]
fn tomorrow_resolves_to_start_of_next_day() {
    let intent = parse_date_intent("Finish essay tomorrow", &noon_utc());
    assert_eq!(intent.clean_text, "Finish essay");
    assert_eq!(
        intent.due_date,
        Some(Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap())
    );
}

#[test]
fn plain_text_has_no_date() {
    let intent = parse_date_intent("Finish essay", &noon_utc());
    assert_eq!(intent.clean_text, "Finish essay");
    assert_eq!(intent.due_date, None);
}

#[test]
fn keyword_in_the_middle_leaves_inner_spacing() {
    let intent = parse_date_intent("Call TOMORROW the lab", &noon_utc());
    assert_eq!(intent.clean_text, "Call  the lab");
    assert!(intent.due_date.is_some());
}

#[test]
fn start_of_day_uses_viewer_offset() {
    let late_evening_la = FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 18, 5, 0, 0).unwrap(),
        FixedOffset::west_opt(7 * 3600).unwrap(),
    );

    let intent = parse_date_intent("pay rent today", &late_evening_la);
    assert_eq!(
        intent.due_date,
        Some(Utc.with_ymd_and_hms(2026, 10, 17, 7, 0, 0).unwrap())
    );
}

#[test]
fn tomorrow_crosses_month_and_year_boundaries() {
    let new_years_eve = FixedClock::utc(Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 0).unwrap());
    let intent = parse_date_intent("party tomorrow", &new_years_eve);
    assert_eq!(
        intent.due_date,
        Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn compose_task_applies_defaults_and_fallback_label() {
    let new = compose_task("  today  ", &noon_utc()).unwrap();
    assert_eq!(new.text, "today");
    assert!(!new.completed);
    assert_eq!(new.priority, Some(Priority::P4));
    assert!(new.due_date.is_some());

    let plain = compose_task("read", &noon_utc()).unwrap();
    assert_eq!(plain.text, "read");
    assert_eq!(plain.due_date, None);
}
