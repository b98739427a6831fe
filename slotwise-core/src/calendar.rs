use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use slotwise_shared::models::{Occupancy, Slot, SlotBookRequest};
use slotwise_shared::Property;

/// Length of every bookable slot.
pub const SLOT_DURATION_MINS: u32 = 30;
/// Maximum concurrent bookings per slot per property.
pub const MAX_CONCURRENT_BOOKING: usize = 2;
/// Rolling window, in days from now, within which slots may be booked.
pub const PRE_REGISTER_DAYS: i64 = 3;

/// First slot of the business day starts at 09:00.
pub fn slot_start_time() -> NaiveTime {
    time_of_day(9, 0)
}

/// Last slot of the business day starts at 17:30.
pub fn last_slot_start_time() -> NaiveTime {
    time_of_day(17, 30)
}

/// The business day ends at 18:00; no slot may run past it.
pub fn slot_end_time() -> NaiveTime {
    time_of_day(18, 0)
}

fn time_of_day(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time of day")
}

/// Why a booking request was turned away. Surfaced to the caller as a
/// client error; none of these indicate a system fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingRejection {
    #[error("start time must fall on a 30-minute boundary")]
    MisalignedStart,

    #[error("start time is outside business hours (09:00-17:30)")]
    OutsideBusinessHours,

    #[error("start time is in the past")]
    StartInPast,

    #[error("start time is beyond the {PRE_REGISTER_DAYS}-day booking horizon")]
    BeyondHorizon,

    #[error("slot is fully booked")]
    SlotFull,
}

/// Next valid slot start at or after `ts`.
///
/// Moments before opening land on the same day's 09:00; moments too
/// late for a full slot before close land on the next day's 09:00;
/// everything else rounds forward to the nearest 30-minute boundary
/// with sub-minute precision dropped. Idempotent and non-decreasing.
pub fn round_up_to_slot_start(ts: NaiveDateTime) -> NaiveDateTime {
    let tod = ts.time();
    if tod < slot_start_time() {
        return ts.date().and_time(slot_start_time());
    }
    // Past the last start: a slot from here would run beyond close.
    if tod > last_slot_start_time() {
        return (ts.date() + Duration::days(1)).and_time(slot_start_time());
    }
    let floored = ts.date().and_time(time_of_day(tod.hour(), tod.minute()));
    let rem = tod.minute() % SLOT_DURATION_MINS;
    if rem == 0 {
        floored
    } else {
        floored + Duration::minutes(i64::from(SLOT_DURATION_MINS - rem))
    }
}

/// A slot is open while fewer than `MAX_CONCURRENT_BOOKING` holders
/// occupy it.
pub fn is_slot_available(occupancy: &Occupancy, start: NaiveDateTime) -> bool {
    occupancy
        .get(&start)
        .map_or(true, |holders| holders.len() < MAX_CONCURRENT_BOOKING)
}

/// Places left at `start`; in [0, MAX_CONCURRENT_BOOKING].
pub fn available_count(occupancy: &Occupancy, start: NaiveDateTime) -> u32 {
    let held = occupancy.get(&start).map_or(0, Vec::len);
    MAX_CONCURRENT_BOOKING.saturating_sub(held) as u32
}

/// Drops occupancy entries strictly before `now`. Past slots are never
/// queried again, so this only bounds memory.
pub fn truncate_past_slots(occupancy: &mut Occupancy, now: NaiveDateTime) {
    occupancy.retain(|start, _| *start >= now);
}

/// All open slots for `property` from `now` (rounded up) to the end of
/// the pre-register horizon, in ascending order. Truncates past
/// occupancy entries as a side effect.
pub fn enumerate_available_slots(property: &mut Property, now: NaiveDateTime) -> Vec<Slot> {
    truncate_past_slots(&mut property.occupancy, now);

    let mut cursor = round_up_to_slot_start(now);
    let horizon_end = (cursor.date() + Duration::days(PRE_REGISTER_DAYS)).and_time(slot_end_time());

    let mut slots = Vec::new();
    while cursor < horizon_end {
        if is_slot_available(&property.occupancy, cursor) {
            slots.push(Slot {
                property_id: property.property_id,
                timestamp: cursor,
                available_count: Some(available_count(&property.occupancy, cursor)),
            });
        }
        cursor = round_up_to_slot_start(cursor + Duration::minutes(i64::from(SLOT_DURATION_MINS)));
    }
    slots
}

/// Admission rule for a booking request against one property's
/// occupancy at moment `now`. Checks run cheapest-first; the first
/// failure wins.
pub fn validate_booking(
    occupancy: &Occupancy,
    request: &SlotBookRequest,
    now: NaiveDateTime,
) -> Result<(), BookingRejection> {
    let start = request.start_time;
    let aligned = start.minute() % SLOT_DURATION_MINS == 0
        && start.second() == 0
        && start.nanosecond() == 0;
    if !aligned {
        return Err(BookingRejection::MisalignedStart);
    }
    let tod = start.time();
    if tod < slot_start_time() || tod > last_slot_start_time() {
        return Err(BookingRejection::OutsideBusinessHours);
    }
    if start < now {
        return Err(BookingRejection::StartInPast);
    }
    let horizon_end =
        (now.date() + Duration::days(PRE_REGISTER_DAYS)).and_time(last_slot_start_time());
    if start > horizon_end {
        return Err(BookingRejection::BeyondHorizon);
    }
    if !is_slot_available(occupancy, start) {
        return Err(BookingRejection::SlotFull);
    }
    Ok(())
}

/// Records the booking. Callers must have validated the request under
/// the same property lock; this never checks capacity itself.
pub fn commit_booking(occupancy: &mut Occupancy, request: &SlotBookRequest) {
    occupancy
        .entry(request.start_time)
        .or_default()
        .push(request.user_id.clone());
}
