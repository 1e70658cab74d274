//! Pickup and delivery time slots.

use chrono::{Days, NaiveDateTime, Timelike};
use serde::Serialize;

/// First bookable hour of the day.
pub const OPENING_HOUR: u32 = 7;
/// The store closes at this hour; the last slot starts half an hour before.
pub const CLOSING_HOUR: u32 = 19;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub value: String,
    pub label: String,
}

fn clock(hour: u32, minute: u32) -> String {
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    format!("{display_hour}:{minute:02} {meridiem}")
}

/// Half-hour slots for the rest of today, then all of tomorrow.
///
/// Today's first slot is the next half-hour boundary strictly after `now`, and never
/// earlier than opening time.
pub fn time_slots(now: NaiveDateTime) -> Vec<TimeSlot> {
    let mut slots = Vec::new();

    let (mut hour, mut minute) = if now.minute() < 30 {
        (now.hour(), 30)
    } else {
        (now.hour() + 1, 0)
    };
    if hour < OPENING_HOUR {
        (hour, minute) = (OPENING_HOUR, 0);
    }
    while hour < CLOSING_HOUR {
        slots.push(TimeSlot {
            value: format!("today-{hour}-{minute}"),
            label: format!("Today at {}", clock(hour, minute)),
        });
        if minute == 0 {
            minute = 30;
        } else {
            (hour, minute) = (hour + 1, 0);
        }
    }

    let weekday = now
        .date()
        .checked_add_days(Days::new(1))
        .map(|d| d.format("%A").to_string())
        .unwrap_or_else(|| "Tomorrow".to_string());
    for hour in OPENING_HOUR..CLOSING_HOUR {
        for minute in [0, 30] {
            slots.push(TimeSlot {
                value: format!("tomorrow-{hour}-{minute}"),
                label: format!("{weekday} at {}", clock(hour, minute)),
            });
        }
    }

    slots
}

/// Resolves a slot value to its label, if `value` is one of `slots`.
pub fn slot_label<'a>(slots: &'a [TimeSlot], value: &str) -> Option<&'a str> {
    slots
        .iter()
        .find(|slot| slot.value == value)
        .map(|slot| slot.label.as_str())
}
