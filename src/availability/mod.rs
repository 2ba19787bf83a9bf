//! Hour-aligned slot generation from a studio's opening hours.
//!
//! Slots start at the opening time and step by one hour. A slot is offered when
//! it starts strictly before closing. Hours that close at or before they open
//! are rejected, so the sequence never rolls past midnight.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime};
use serde::{Serialize, Serializer};

use crate::errors::AppError;

const LABEL_FORMAT: &str = "%H:%M";

/// Start time of a one-hour booking slot, rendered as "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    pub fn label(&self) -> String {
        self.0.format(LABEL_FORMAT).to_string()
    }
}

impl FromStr for TimeSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), LABEL_FORMAT)
            .map(TimeSlot)
            .map_err(|_| AppError::Validation(format!("Invalid time \"{}\", expected HH:MM", s)))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LABEL_FORMAT))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Every slot between `open` (inclusive) and `close` (exclusive).
pub fn generate_slots(open: &str, close: &str) -> Result<Vec<TimeSlot>, AppError> {
    let open: TimeSlot = open.parse()?;
    let close: TimeSlot = close.parse()?;

    if close <= open {
        return Err(AppError::Validation(
            "Studio hours must close after they open".to_string(),
        ));
    }

    let mut slots = Vec::new();
    let mut current = open.0;
    while current < close.0 {
        slots.push(TimeSlot(current));
        let (next, overflow) = current.overflowing_add_signed(Duration::hours(1));
        if overflow != 0 {
            break;
        }
        current = next;
    }

    Ok(slots)
}

/// Generated slots minus the ones already booked, in ascending order.
///
/// Booked labels that do not parse are ignored.
pub fn available_slots<S: AsRef<str>>(
    open: &str,
    close: &str,
    booked: &[S],
) -> Result<Vec<TimeSlot>, AppError> {
    let taken: HashSet<TimeSlot> = booked
        .iter()
        .filter_map(|label| label.as_ref().parse().ok())
        .collect();

    Ok(generate_slots(open, close)?
        .into_iter()
        .filter(|slot| !taken.contains(slot))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(slots: &[TimeSlot]) -> Vec<String> {
        slots.iter().map(TimeSlot::label).collect()
    }

    #[test]
    fn test_morning_hours() {
        let slots = generate_slots("09:00", "12:00").unwrap();
        assert_eq!(labels(&slots), vec!["09:00", "10:00", "11:00"]);
    }

    #[test]
    fn test_slots_cover_half_open_interval() {
        for (open, close) in [(0u32, 24u32), (8, 20), (13, 14), (0, 1), (22, 23)] {
            let close_label = if close == 24 {
                "23:59".to_string()
            } else {
                format!("{:02}:00", close)
            };
            let slots = generate_slots(&format!("{:02}:00", open), &close_label).unwrap();
            let close_time: TimeSlot = close_label.parse().unwrap();

            assert_eq!(slots.len() as u32, close - open);
            assert!(slots.iter().all(|s| *s < close_time));
            assert!(slots.windows(2).all(|w| w[1].0 - w[0].0 == Duration::hours(1)));
        }
    }

    #[test]
    fn test_open_minute_is_kept() {
        let slots = generate_slots("09:30", "12:00").unwrap();
        assert_eq!(labels(&slots), vec!["09:30", "10:30", "11:30"]);

        let slots = generate_slots("09:00", "11:30").unwrap();
        assert_eq!(labels(&slots), vec!["09:00", "10:00", "11:00"]);
    }

    #[test]
    fn test_late_slot_does_not_wrap() {
        let slots = generate_slots("21:00", "23:30").unwrap();
        assert_eq!(labels(&slots), vec!["21:00", "22:00", "23:00"]);
    }

    #[test]
    fn test_overnight_and_empty_hours_rejected() {
        assert!(matches!(
            generate_slots("22:00", "02:00"),
            Err(AppError::Validation(_))
        ));
        assert!(generate_slots("10:00", "10:00").is_err());
    }

    #[test]
    fn test_malformed_labels_rejected() {
        assert!(generate_slots("nine", "12:00").is_err());
        assert!(generate_slots("09:00", "25:00").is_err());
    }

    #[test]
    fn test_booked_slots_are_removed() {
        let free = available_slots("09:00", "13:00", &["10:00", "12:00"]).unwrap();
        assert_eq!(labels(&free), vec!["09:00", "11:00"]);

        let free = available_slots("09:00", "11:00", &["09:00", "10:00"]).unwrap();
        assert!(free.is_empty());

        let free = available_slots::<&str>("09:00", "10:00", &[]).unwrap();
        assert_eq!(labels(&free), vec!["09:00"]);
    }

    #[test]
    fn test_serializes_as_label() {
        let slot: TimeSlot = "07:00".parse().unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"07:00\"");
    }
}
