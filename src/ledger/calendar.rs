/* Calendar side: dated events and daily habit completions. */

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    constants::messages::{INVALID_EVENT_TIME_MESSAGE, UNKNOWN_EVENT_MESSAGE},
    records::{Record, RecordStore},
    utils::{LedgerError, LedgerResult},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    // All-day when both are None
    #[serde(default)]
    pub start: Option<NaiveTime>,
    #[serde(default)]
    pub end: Option<NaiveTime>,
}

impl CalendarEvent {
    pub fn all_day(title: &str, date: NaiveDate) -> CalendarEvent {
        CalendarEvent {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            date,
            start: None,
            end: None,
        }
    }

    pub fn timed(
        title: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> LedgerResult<CalendarEvent> {
        if end < start {
            return Err(LedgerError::UserError(
                INVALID_EVENT_TIME_MESSAGE.to_string(),
            ));
        }
        Ok(CalendarEvent {
            start: Some(start),
            end: Some(end),
            ..CalendarEvent::all_day(title, date)
        })
    }
}

impl Record for CalendarEvent {
    const UNKNOWN_MESSAGE: &'static str = UNKNOWN_EVENT_MESSAGE;

    fn id(&self) -> Uuid {
        self.id
    }
}

pub type EventStore = RecordStore<CalendarEvent>;

impl RecordStore<CalendarEvent> {
    // Events on `date`, all-day ones first, then by start time.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut events: Vec<&CalendarEvent> =
            self.list().iter().filter(|e| e.date == date).collect();
        events.sort_by_key(|e| e.start);
        events
    }

    // Events dated within [from, to], both ends included, in date order.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&CalendarEvent> {
        let mut events: Vec<&CalendarEvent> = self
            .list()
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .collect();
        events.sort_by_key(|e| (e.date, e.start));
        events
    }
}

// Days each habit was marked done.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitTracker {
    completions: BTreeMap<String, BTreeSet<NaiveDate>>,
}

impl HabitTracker {
    pub fn new() -> HabitTracker {
        HabitTracker::default()
    }

    // Flips the completion of `habit` on `date`. Returns whether it is now done.
    pub fn toggle(&mut self, habit: &str, date: NaiveDate) -> bool {
        let days = self
            .completions
            .entry(habit.trim().to_string())
            .or_default();
        let done = if days.remove(&date) {
            false
        } else {
            days.insert(date)
        };
        log::debug!("Habit {} on {}: done = {}", habit, date, done);
        done
    }

    pub fn is_done(&self, habit: &str, date: NaiveDate) -> bool {
        self.completions
            .get(habit.trim())
            .is_some_and(|days| days.contains(&date))
    }

    pub fn habits(&self) -> Vec<&str> {
        self.completions.keys().map(|k| k.as_str()).collect()
    }

    // Consecutive completed days ending on `today`.
    pub fn streak(&self, habit: &str, today: NaiveDate) -> u32 {
        let Some(days) = self.completions.get(habit.trim()) else {
            return 0;
        };
        let mut streak = 0;
        let mut day = today;
        while days.contains(&day) {
            streak += 1;
            day = day - Duration::days(1);
        }
        streak
    }

    // Completions of `habit` within [from, to], both ends included.
    pub fn count_between(&self, habit: &str, from: NaiveDate, to: NaiveDate) -> usize {
        self.completions
            .get(habit.trim())
            .map_or(0, |days| days.range(from..=to).count())
    }
}
