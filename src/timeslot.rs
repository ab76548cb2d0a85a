//! Timeslot encoding: `t = day * slots_per_day + slot` (spec §3).

/// Encode a (day, slot) pair into a flat timeslot index.
pub fn encode(day: i64, slot: i64, slots_per_day: i64) -> i64 {
    day * slots_per_day + slot
}

/// Decode a flat timeslot index back into (day, slot).
pub fn decode(t: i64, slots_per_day: i64) -> (i64, i64) {
    (t / slots_per_day, t % slots_per_day)
}
