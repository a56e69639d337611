//! Time remaining until Maghrib, and the message shown for it.
//!
//! Every tick is recomputed from scratch against the current instant, so
//! nothing accumulates between ticks.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;
use std::fmt;

const SECS_HOUR: u64 = 3600;
const SECS_MINUTE: u64 = 60;

/// Time left until the target, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemainingDuration {
    pub hours: u64,
    pub minutes: u32,
    pub seconds: u32,
}

impl RemainingDuration {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / SECS_HOUR,
            minutes: ((total % SECS_HOUR) / SECS_MINUTE) as u32,
            seconds: (total % SECS_MINUTE) as u32,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * SECS_HOUR + u64::from(self.minutes) * SECS_MINUTE + u64::from(self.seconds)
    }

    /// Hours plus fractional minutes. Seconds do not count.
    pub fn total_hours(&self) -> f64 {
        self.hours as f64 + f64::from(self.minutes) / 60.0
    }

    pub fn message(&self) -> CountdownMessage {
        CountdownMessage::for_total_hours(self.total_hours())
    }
}

impl fmt::Display for RemainingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// The next occurrence of `maghrib` on the local calendar of `now`.
///
/// Today's occurrence is used unless `now` is strictly after it, in which
/// case the same wall time tomorrow is used.
pub fn target_instant<Tz: TimeZone>(maghrib: NaiveTime, now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();
    let candidate = localize(&tz, today.and_time(maghrib));

    if *now <= candidate {
        return candidate;
    }

    match today.succ_opt() {
        Some(tomorrow) => localize(&tz, tomorrow.and_time(maghrib)),
        None => candidate + Duration::days(1),
    }
}

pub fn remaining_until<Tz: TimeZone>(maghrib: NaiveTime, now: &DateTime<Tz>) -> RemainingDuration {
    let target = target_instant(maghrib, now);
    let diff = target.signed_duration_since(now.clone()).num_seconds().max(0);
    RemainingDuration::from_seconds(diff as u64)
}

// Ambiguous wall times take the earlier instant; times skipped by a DST gap
// move forward by an hour.
fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownMessage {
    NextFastingDay,
    Halfway,
    AlmostOver,
    GettingCloser,
    LittleMore,
    AroundTheCorner,
    MaghribTime,
}

impl CountdownMessage {
    /// Largest matching threshold wins. Zero, negatives and NaN all mean
    /// Maghrib has arrived.
    pub fn for_total_hours(total_hours: f64) -> Self {
        if total_hours >= 24.0 {
            Self::NextFastingDay
        } else if total_hours >= 12.0 {
            Self::Halfway
        } else if total_hours >= 6.0 {
            Self::AlmostOver
        } else if total_hours >= 3.0 {
            Self::GettingCloser
        } else if total_hours >= 1.0 {
            Self::LittleMore
        } else if total_hours > 0.0 {
            Self::AroundTheCorner
        } else {
            Self::MaghribTime
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::NextFastingDay => "Ramadan Mubarak! Prepare for the next fasting day.",
            Self::Halfway => "Stay strong! You're halfway through your fast.",
            Self::AlmostOver => "The wait is almost over! Keep going.",
            Self::GettingCloser => "Iftar is getting closer! Get ready.",
            Self::LittleMore => "Just a little more patience! Almost time to break your fast.",
            Self::AroundTheCorner => "Iftar is around the corner! Set the table.",
            Self::MaghribTime => "Maghrib time! Bismillah, enjoy your Iftar!",
        }
    }
}

impl fmt::Display for CountdownMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

pub fn select_message(total_hours: f64) -> &'static str {
    CountdownMessage::for_total_hours(total_hours).text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn dubai() -> FixedOffset {
        FixedOffset::east_opt(4 * 3600).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        dubai()
            .with_ymd_and_hms(2026, 3, 1, h, m, s)
            .single()
            .unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_morning_counts_to_same_day() {
        let remaining = remaining_until(hm(18, 30), &at(10, 0, 0));
        assert_eq!(
            remaining,
            RemainingDuration {
                hours: 8,
                minutes: 30,
                seconds: 0
            }
        );
        assert_eq!(remaining.total_hours(), 8.5);
        assert_eq!(
            remaining.message().text(),
            "The wait is almost over! Keep going."
        );
    }

    #[test]
    fn test_just_after_maghrib_rolls_to_tomorrow() {
        let now = at(18, 30, 5);
        let target = target_instant(hm(18, 30), &now);
        assert_eq!(target.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(target.time(), hm(18, 30));

        let remaining = remaining_until(hm(18, 30), &now);
        assert_eq!(
            remaining,
            RemainingDuration {
                hours: 23,
                minutes: 59,
                seconds: 55
            }
        );
        assert_eq!(
            remaining.message().text(),
            "Stay strong! You're halfway through your fast."
        );
    }

    #[test]
    fn test_exactly_at_maghrib_stays_today() {
        let now = at(18, 30, 0);
        assert_eq!(target_instant(hm(18, 30), &now), now);

        let remaining = remaining_until(hm(18, 30), &now);
        assert_eq!(remaining.total_seconds(), 0);
        assert_eq!(
            remaining.message().text(),
            "Maghrib time! Bismillah, enjoy your Iftar!"
        );
    }

    #[test]
    fn test_sub_second_remainder_is_truncated() {
        let now = at(18, 29, 59) + Duration::milliseconds(400);
        let remaining = remaining_until(hm(18, 30), &now);
        assert_eq!(remaining.total_seconds(), 0);
    }

    #[test]
    fn test_target_is_today_or_tomorrow_within_a_day() {
        let maghribs = [hm(0, 0), hm(5, 45), hm(18, 30), hm(23, 59)];
        for maghrib in maghribs {
            for minute_of_day in (0..24 * 60).step_by(7) {
                let now = at(minute_of_day / 60, minute_of_day % 60, 13);
                let today_target = now.date_naive().and_time(maghrib);
                let target = target_instant(maghrib, &now);

                if now.naive_local() <= today_target {
                    assert_eq!(target.naive_local(), today_target);
                } else {
                    assert_eq!(
                        target.naive_local(),
                        today_target + Duration::days(1),
                        "maghrib {} now {}",
                        maghrib,
                        now
                    );
                }

                let diff = target.signed_duration_since(now).num_seconds();
                assert!((0..24 * 3600).contains(&diff), "diff {} out of range", diff);
            }
        }
    }

    #[test]
    fn test_decomposition_identity() {
        for total in [0, 1, 59, 60, 61, 3599, 3600, 3661, 86_399, 86_400, 200_000] {
            let remaining = RemainingDuration::from_seconds(total);
            assert_eq!(remaining.total_seconds(), total);
            assert!(remaining.minutes < 60);
            assert!(remaining.seconds < 60);
        }
    }

    #[test]
    fn test_works_in_utc() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).single().unwrap();
        let remaining = remaining_until(hm(0, 30), &now);
        assert_eq!(remaining.hours, 1);
        assert_eq!(remaining.minutes, 30);
    }

    #[test]
    fn test_message_thresholds() {
        let cases = [
            (30.0, CountdownMessage::NextFastingDay),
            (24.0, CountdownMessage::NextFastingDay),
            (23.99, CountdownMessage::Halfway),
            (12.0, CountdownMessage::Halfway),
            (11.5, CountdownMessage::AlmostOver),
            (6.0, CountdownMessage::AlmostOver),
            (5.99, CountdownMessage::GettingCloser),
            (3.0, CountdownMessage::GettingCloser),
            (2.5, CountdownMessage::LittleMore),
            (1.0, CountdownMessage::LittleMore),
            (0.99, CountdownMessage::AroundTheCorner),
            (1.0 / 60.0, CountdownMessage::AroundTheCorner),
            (0.0, CountdownMessage::MaghribTime),
            (-1.0, CountdownMessage::MaghribTime),
        ];
        for (hours, expected) in cases {
            assert_eq!(CountdownMessage::for_total_hours(hours), expected, "{}", hours);
        }
    }

    #[test]
    fn test_last_minute_seconds_do_not_count() {
        // 45 seconds left: totalHours ignores seconds, so Maghrib is announced
        let remaining = RemainingDuration::from_seconds(45);
        assert_eq!(remaining.total_hours(), 0.0);
        assert_eq!(remaining.message(), CountdownMessage::MaghribTime);
    }

    #[test]
    fn test_select_message_text() {
        assert_eq!(select_message(4.0), "Iftar is getting closer! Get ready.");
    }

    #[test]
    fn test_display_pads_units() {
        let remaining = RemainingDuration::from_seconds(3 * 3600 + 7 * 60 + 9);
        assert_eq!(remaining.to_string(), "03:07:09");
    }
}
