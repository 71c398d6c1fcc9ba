use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::models::room::RoomResource;
use crate::domain::models::slot::TimeSlot;

/// Customer-supplied constraints narrowing a day's raw slot list.
#[derive(Debug, Clone)]
pub struct SlotConstraints {
    pub duration_hours: i64,
    /// Party-size band as the form submits it: "5-8", "17+", or a bare number.
    pub party_size: String,
}

/// Upper bound of a party-size band. "17+" counts as effectively unbounded.
pub fn max_party_from_band(band: &str) -> i32 {
    if band == "17+" {
        return 999;
    }
    if let Some((_, upper)) = band.split_once('-')
        && let Ok(n) = upper.parse::<i32>()
    {
        return n;
    }
    band.parse().unwrap_or(0)
}

fn time_to_minutes(time: &str) -> i64 {
    let mut parts = time.splitn(3, ':');
    let hours: i64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minutes: i64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    hours * 60 + minutes
}

fn slot_start_datetime(date: NaiveDate, start_time: &str) -> Option<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(start_time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(start_time, "%H:%M"))
        .ok()?;
    Some(date.and_time(time))
}

/// Keeps only the slots a request with these constraints could book.
///
/// The duration rule is a deliberate heuristic carried over from the original
/// flow: a slot fits if its start plus the requested duration stays within
/// the latest end time observed across ALL of the day's slots. That single
/// day-wide bound stands in for a per-resource closing time and can admit a
/// slot whose own resource closes earlier.
///
/// Input order is preserved; a slot failing any rule is dropped.
pub fn filter_slots(
    slots: Vec<TimeSlot>,
    constraints: &SlotConstraints,
    rooms: &[RoomResource],
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    if slots.is_empty() {
        return slots;
    }

    let max_party = max_party_from_band(&constraints.party_size);

    let latest_end_minutes = slots
        .iter()
        .map(|s| time_to_minutes(&s.end_time))
        .max()
        .unwrap_or(0);

    slots
        .into_iter()
        .filter(|slot| {
            let start_minutes = time_to_minutes(&slot.start_time);
            let needed_minutes = constraints.duration_hours.saturating_mul(60);
            if start_minutes.saturating_add(needed_minutes) > latest_end_minutes {
                return false;
            }

            let room = rooms.iter().find(|r| r.resource_id == slot.resource_id);

            if let Some(room) = room
                && let Some(capacity) = room.max_participants
                && max_party > capacity
            {
                return false;
            }

            if let Some(room) = room
                && room.min_notice > 0
            {
                let Some(slot_start) = slot_start_datetime(date, &slot.start_time) else {
                    return false;
                };
                if slot_start < now + Duration::minutes(room.min_notice) {
                    return false;
                }
            }

            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(resource_id: i64, start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            resource_id,
            resource_name: format!("Room {resource_id}"),
            start_time: start.to_string(),
            end_time: end.to_string(),
            is_reservable: true,
        }
    }

    fn room(resource_id: i64, max_participants: Option<i32>, min_notice: i64) -> RoomResource {
        RoomResource {
            id: format!("room-{resource_id}"),
            resource_id,
            name: format!("Room {resource_id}"),
            description: None,
            capacity: None,
            max_participants,
            min_notice,
            requires_approval: false,
            schedule_id: 1,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn far_past_now() -> NaiveDateTime {
        date(2020, 1, 1).and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn duration_must_fit_before_latest_end() {
        let slots = vec![
            slot(1, "14:00:00", "15:00:00"),
            slot(1, "20:00:00", "21:00:00"),
            slot(1, "21:00:00", "22:00:00"),
        ];
        let constraints = SlotConstraints { duration_hours: 2, party_size: "1-4".into() };

        let kept = filter_slots(slots, &constraints, &[room(1, None, 0)], date(2025, 6, 1), far_past_now());

        // Latest end is 22:00; a 2h session starting 21:00 would overrun it.
        let starts: Vec<&str> = kept.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(starts, vec!["14:00:00", "20:00:00"]);
    }

    #[test]
    fn longer_duration_never_admits_more_slots() {
        let slots = vec![
            slot(1, "12:00:00", "13:00:00"),
            slot(1, "18:00:00", "19:00:00"),
            slot(1, "21:00:00", "22:00:00"),
        ];
        let rooms = [room(1, None, 0)];

        let mut previous = usize::MAX;
        for hours in 1..=6 {
            let constraints = SlotConstraints { duration_hours: hours, party_size: "1-4".into() };
            let kept = filter_slots(slots.clone(), &constraints, &rooms, date(2025, 6, 1), far_past_now());
            assert!(kept.len() <= previous, "duration {hours}h grew the slot list");
            previous = kept.len();
        }
    }

    #[test]
    fn party_band_upper_bound_respects_room_capacity() {
        let slots = vec![slot(1, "14:00:00", "18:00:00"), slot(2, "14:00:00", "18:00:00")];
        let rooms = [room(1, Some(8), 0), room(2, Some(20), 0)];
        let constraints = SlotConstraints { duration_hours: 1, party_size: "9-12".into() };

        let kept = filter_slots(slots, &constraints, &rooms, date(2025, 6, 1), far_past_now());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].resource_id, 2);
    }

    #[test]
    fn room_without_capacity_accepts_any_party() {
        let slots = vec![slot(1, "14:00:00", "18:00:00")];
        let rooms = [room(1, None, 0)];
        let constraints = SlotConstraints { duration_hours: 1, party_size: "17+".into() };

        let kept = filter_slots(slots, &constraints, &rooms, date(2025, 6, 1), far_past_now());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn minimum_notice_drops_slots_too_soon() {
        let slots = vec![slot(1, "10:00:00", "11:00:00"), slot(1, "16:00:00", "17:00:00")];
        // One day of notice required.
        let rooms = [room(1, None, 1440)];
        let constraints = SlotConstraints { duration_hours: 1, party_size: "1-4".into() };

        // Booking at noon the day before: only the 16:00 slot is far enough out.
        let now = date(2025, 5, 31).and_hms_opt(12, 0, 0).unwrap();
        let kept = filter_slots(slots, &constraints, &rooms, date(2025, 6, 1), now);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].start_time, "16:00:00");
    }

    #[test]
    fn zero_notice_imposes_no_constraint() {
        let slots = vec![slot(1, "10:00:00", "11:00:00")];
        let rooms = [room(1, None, 0)];
        let constraints = SlotConstraints { duration_hours: 1, party_size: "1-4".into() };

        // "now" is minutes before the slot; without a notice rule it stays.
        let now = date(2025, 6, 1).and_hms_opt(9, 55, 0).unwrap();
        let kept = filter_slots(slots, &constraints, &rooms, date(2025, 6, 1), now);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn absurd_duration_filters_everything_without_overflow() {
        let slots = vec![slot(1, "14:00:00", "18:00:00")];
        let constraints = SlotConstraints { duration_hours: i64::MAX, party_size: "1-4".into() };

        let kept = filter_slots(slots, &constraints, &[room(1, None, 0)], date(2025, 6, 1), far_past_now());
        assert!(kept.is_empty());
    }

    #[test]
    fn band_parsing() {
        assert_eq!(max_party_from_band("5-8"), 8);
        assert_eq!(max_party_from_band("17+"), 999);
        assert_eq!(max_party_from_band("6"), 6);
        assert_eq!(max_party_from_band("garbage"), 0);
    }

    #[test]
    fn input_order_is_preserved() {
        let slots = vec![
            slot(2, "18:00:00", "19:00:00"),
            slot(1, "14:00:00", "15:00:00"),
            slot(3, "16:00:00", "17:00:00"),
        ];
        let rooms = [room(1, None, 0), room(2, None, 0), room(3, None, 0)];
        let constraints = SlotConstraints { duration_hours: 1, party_size: "1-4".into() };

        let kept = filter_slots(slots, &constraints, &rooms, date(2025, 6, 1), far_past_now());
        let ids: Vec<i64> = kept.iter().map(|s| s.resource_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
