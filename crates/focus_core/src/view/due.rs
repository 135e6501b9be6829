//! Days-until-due wording for assignment cards.

use chrono::{DateTime, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// How pressing a due date is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueUrgency {
    Overdue,
    /// Due within the next two days.
    DueSoon,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueInfo {
    pub days: i64,
    pub urgency: DueUrgency,
    pub label: String,
}

impl DueInfo {
    pub fn new(due: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = days_until_due(due, now);
        Self {
            days,
            urgency: urgency(days),
            label: due_label(days),
        }
    }
}

/// Whole days from `now` until `due`, rounded up; negative once overdue.
pub fn days_until_due(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (due - now).num_milliseconds();
    let whole = diff_ms.div_euclid(DAY_MS);
    if diff_ms.rem_euclid(DAY_MS) > 0 {
        whole + 1
    } else {
        whole
    }
}

pub fn urgency(days: i64) -> DueUrgency {
    match days {
        d if d < 0 => DueUrgency::Overdue,
        0..=2 => DueUrgency::DueSoon,
        _ => DueUrgency::Upcoming,
    }
}

pub fn due_label(days: i64) -> String {
    match days {
        d if d < 0 => format!("{} days overdue", -d),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d => format!("Due in {d} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::{days_until_due, due_label, urgency, DueInfo, DueUrgency};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn rounds_partial_days_up() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        assert_eq!(days_until_due(now + Duration::hours(1), now), 1);
        assert_eq!(days_until_due(now + Duration::hours(48), now), 2);
        assert_eq!(days_until_due(now - Duration::minutes(5), now), 0);
        assert_eq!(days_until_due(now - Duration::hours(25), now), -1);
    }

    #[test]
    fn labels_and_urgency() {
        assert_eq!(due_label(-3), "3 days overdue");
        assert_eq!(due_label(0), "Due today");
        assert_eq!(due_label(1), "Due tomorrow");
        assert_eq!(due_label(6), "Due in 6 days");
        assert_eq!(urgency(-1), DueUrgency::Overdue);
        assert_eq!(urgency(2), DueUrgency::DueSoon);
        assert_eq!(urgency(3), DueUrgency::Upcoming);
    }

    #[test]
    fn due_info_bundles_all_three() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let info = DueInfo::new(now + Duration::days(5), now);
        assert_eq!(info.days, 5);
        assert_eq!(info.urgency, DueUrgency::Upcoming);
        assert_eq!(info.label, "Due in 5 days");
    }
}
