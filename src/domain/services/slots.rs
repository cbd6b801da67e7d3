use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc, TimeZone};
use chrono_tz::Tz;
use crate::domain::models::availability::{OneOffAvailability, RecurringAvailability, TimeSlot};
use crate::domain::models::lesson::{Lesson, STATUS_CANCELLED};
use crate::domain::models::tutor::Tutor;
use std::collections::HashSet;

pub const SLOT_DURATIONS_MIN: [i64; 2] = [30, 60];

/// Resolves the bookable slots of one tutor for a 7-day window.
///
/// A slot is emitted iff its tutor-local start lies inside a recurring window
/// for that weekday or a one-off window for that exact date, its UTC instant
/// is strictly in the future, and no increment of its range is taken by a
/// non-cancelled lesson. Days without availability emit nothing.
pub fn resolve_week_slots(
    tutor: &Tutor,
    week_start: NaiveDate,
    duration_min: i64,
    subject: Option<&str>,
    recurring: &[RecurringAvailability],
    one_off: &[OneOffAvailability],
    lessons: &[Lesson],
    now: DateTime<Utc>,
) -> Vec<TimeSlot> {
    let tz: Tz = tutor.timezone.parse().unwrap_or(chrono_tz::UTC);
    let week_end = week_start + Duration::days(7);

    // Union of recurring and one-off windows, keyed by tutor-local start.
    // The set collapses overlapping windows so nothing is double-marked.
    let mut open: HashSet<(NaiveDate, NaiveTime)> = HashSet::new();

    for offset in 0..7 {
        let date = week_start + Duration::days(offset);
        let weekday = date.weekday().num_days_from_monday() as i32;

        for rule in recurring {
            if rule.day_of_week == weekday && rule.covers_subject(subject) {
                mark_window(&mut open, date, &rule.start_time, &rule.end_time, duration_min);
            }
        }
    }

    // One-off windows extend the recurring schedule for their date.
    for window in one_off {
        if window.date >= week_start && window.date < week_end {
            mark_window(&mut open, window.date, &window.start_time, &window.end_time, duration_min);
        }
    }

    // A lesson blocks every increment it touches, not just its start.
    let mut booked: HashSet<DateTime<Utc>> = HashSet::new();
    for lesson in lessons {
        if lesson.status == STATUS_CANCELLED {
            continue;
        }
        let end = lesson.end_time;
        let mut cursor = lesson.start_time;
        while cursor < end {
            booked.insert(cursor);
            cursor += Duration::minutes(duration_min);
        }
    }

    let mut candidates: Vec<(NaiveDate, NaiveTime)> = open.into_iter().collect();
    candidates.sort();

    let mut slots = Vec::new();
    for (date, time) in candidates {
        // Local times skipped by a DST transition do not exist; drop them.
        let Some(local) = tz.from_local_datetime(&date.and_time(time)).single() else {
            continue;
        };
        let start_utc = local.with_timezone(&Utc);

        if start_utc <= now {
            continue;
        }

        let slot_end = start_utc + Duration::minutes(duration_min);
        let mut cursor = start_utc;
        let mut blocked = false;
        while cursor < slot_end {
            if booked.contains(&cursor) {
                blocked = true;
                break;
            }
            cursor += Duration::minutes(duration_min);
        }
        if blocked {
            continue;
        }

        slots.push(TimeSlot {
            start_time: start_utc,
            duration_min,
            available: true,
        });
    }

    slots.sort_by_key(|s| s.start_time);
    slots.dedup_by_key(|s| s.start_time);
    slots
}

fn mark_window(
    open: &mut HashSet<(NaiveDate, NaiveTime)>,
    date: NaiveDate,
    start: &str,
    end: &str,
    duration_min: i64,
) {
    if let (Ok(start), Ok(end)) = (
        NaiveTime::parse_from_str(start, "%H:%M"),
        NaiveTime::parse_from_str(end, "%H:%M"),
    ) {
        let win_start_idx = (start.hour() * 60 + start.minute()) as i64;
        let mut win_end_idx = (end.hour() * 60 + end.minute()) as i64;
        if win_end_idx == 1439 {
            win_end_idx = 1440;
        }

        let mut cursor = win_start_idx;
        while cursor + duration_min <= win_end_idx {
            let hour = (cursor / 60) as u32;
            let minute = (cursor % 60) as u32;
            if let Some(t) = NaiveTime::from_hms_opt(hour, minute, 0) {
                open.insert((date, t));
            }
            cursor += duration_min;
        }
    }
}
