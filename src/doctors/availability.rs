//! Slot availability calculator.
//!
//! Partitions a working interval into a fixed 1-hour grid anchored at the
//! interval start. A slot is bookable when it fits entirely before the
//! closing time and no PENDING/CONFIRMED appointment already holds its
//! start time. Output is ascending and duplicate-free by construction.

use time::{Duration, Time};

/// Length of one bookable slot.
pub const SLOT: Duration = Duration::HOUR;

pub fn available_slots(start: Time, end: Time, booked: &[Time]) -> Vec<Time> {
    let mut slots = Vec::new();
    let mut cursor = start;
    loop {
        let next = cursor + SLOT;
        // `Time` addition wraps at midnight; a wrapped cursor means the
        // grid ran off the end of the day.
        if next <= cursor || next > end {
            break;
        }
        if !booked.contains(&cursor) {
            slots.push(cursor);
        }
        cursor = next;
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    #[test]
    fn full_day_with_no_bookings() {
        let slots = available_slots(time!(09:00), time!(17:00), &[]);
        let expected: Vec<Time> = (9..17).map(|h| Time::from_hms(h, 0, 0).unwrap()).collect();
        assert_eq!(slots, expected);
    }

    #[test]
    fn booked_times_are_skipped() {
        let booked = vec![time!(10:00), time!(13:00)];
        let slots = available_slots(time!(09:00), time!(12:00), &booked);
        assert_eq!(slots, vec![time!(09:00), time!(11:00)]);
    }

    #[test]
    fn slot_overrunning_close_is_excluded() {
        // Closing at 16:30: the 16:00 slot would end at 17:00, past close.
        let slots = available_slots(time!(09:00), time!(16:30), &[]);
        assert_eq!(*slots.last().unwrap(), time!(15:00));
        assert_eq!(slots.len(), 7);
    }

    #[test]
    fn interval_shorter_than_a_slot_yields_nothing() {
        assert!(available_slots(time!(09:00), time!(09:30), &[]).is_empty());
        assert!(available_slots(time!(09:00), time!(09:00), &[]).is_empty());
    }

    #[test]
    fn grid_anchored_at_interval_start() {
        let slots = available_slots(time!(08:30), time!(11:30), &[]);
        assert_eq!(slots, vec![time!(08:30), time!(09:30), time!(10:30)]);
    }

    #[test]
    fn walk_terminates_at_midnight_wrap() {
        let slots = available_slots(time!(22:00), time!(23:59:59), &[]);
        assert_eq!(slots, vec![time!(22:00)]);
    }

    #[test]
    fn output_is_ascending_and_unique() {
        let slots = available_slots(time!(09:00), time!(17:00), &[time!(12:00)]);
        let mut sorted = slots.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(slots, sorted);
    }
}
