//! Injectable time source.
//!
//! All "today"/"tomorrow" decisions in core go through [`Clock`] so that the
//! viewer's timezone and the current instant are explicit inputs.
//!
//! # Invariants
//! - An instant's calendar day is resolved with the zone rules in force at
//!   that instant, not the offset of `now()`. A due date stored before a
//!   daylight-saving change stays on its day after the change.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Current instant plus the timezone of the person looking at the data.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day `instant` falls on for the viewer.
    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate;

    /// First instant of `day` for the viewer.
    fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc>;

    /// Calendar day of `now()` for the viewer.
    fn today(&self) -> NaiveDate {
        self.local_day(self.now())
    }
}

/// Wall clock and local timezone of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        local_day_in(instant, &Local)
    }

    fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        start_of_day_in(day, &Local)
    }
}

/// Clock bound to a named IANA zone, e.g. `America/New_York`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedClock {
    zone: Tz,
    frozen: Option<DateTime<Utc>>,
}

impl ZonedClock {
    /// Wall clock viewed from `zone`.
    pub fn system(zone: Tz) -> Self {
        Self { zone, frozen: None }
    }

    /// Frozen at `now`, viewed from `zone`.
    pub fn frozen(now: DateTime<Utc>, zone: Tz) -> Self {
        Self {
            zone,
            frozen: Some(now),
        }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl Clock for ZonedClock {
    fn now(&self) -> DateTime<Utc> {
        self.frozen.unwrap_or_else(Utc::now)
    }

    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        local_day_in(instant, &self.zone)
    }

    fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        start_of_day_in(day, &self.zone)
    }
}

/// Frozen clock at a single fixed offset, for deterministic callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Frozen at `now` in UTC.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        local_day_in(instant, &self.offset)
    }

    fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        start_of_day_in(day, &self.offset)
    }
}

/// Calendar day that `instant` falls on in `zone`.
pub fn local_day_in<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}

/// Earliest instant of `day` in `zone`.
///
/// Where a transition skips midnight, the day starts at the first hour that
/// exists.
pub fn start_of_day_in<Z: TimeZone>(day: NaiveDate, zone: &Z) -> DateTime<Utc> {
    (0..24)
        .filter_map(|hour| day.and_hms_opt(hour, 0, 0))
        .find_map(|local| zone.from_local_datetime(&local).earliest())
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| day.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::{local_day_in, start_of_day_in, Clock, FixedClock, ZonedClock};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
    use chrono_tz::America::{New_York, Santiago};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_follows_viewer_offset() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 23, 30, 0).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(FixedClock::utc(now).today(), day(2026, 10, 17));
        assert_eq!(FixedClock::new(now, tokyo).today(), day(2026, 10, 18));
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();

        let instant = start_of_day_in(day(2026, 10, 18), &new_york);
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 10, 18, 4, 0, 0).unwrap());
        assert_eq!(local_day_in(instant, &new_york), day(2026, 10, 18));
    }

    #[test]
    fn day_survives_a_daylight_saving_change() {
        let before = ZonedClock::frozen(
            Utc.with_ymd_and_hms(2026, 10, 30, 16, 0, 0).unwrap(),
            New_York,
        );
        let stored = before.start_of_day(day(2026, 10, 31));
        assert_eq!(stored, Utc.with_ymd_and_hms(2026, 10, 31, 4, 0, 0).unwrap());

        let after = ZonedClock::frozen(
            Utc.with_ymd_and_hms(2026, 11, 2, 15, 0, 0).unwrap(),
            New_York,
        );
        assert_eq!(after.local_day(stored), day(2026, 10, 31));
        assert_eq!(
            after.start_of_day(day(2026, 11, 2)),
            Utc.with_ymd_and_hms(2026, 11, 2, 5, 0, 0).unwrap()
        );
    }

    #[test]
    fn skipped_midnight_starts_at_first_existing_hour() {
        // Chile moves clocks from 00:00 to 01:00 on 2026-09-06.
        let start = start_of_day_in(day(2026, 9, 6), &Santiago);
        assert_eq!(local_day_in(start, &Santiago), day(2026, 9, 6));
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 9, 6, 4, 0, 0).unwrap());
    }
}
