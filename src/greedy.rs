//! Greedy pre-filler (spec §4.7, hybrid mode only). Ported from
//! `greedy_prefill` in the original FastAPI/OR-Tools service: it reserves
//! fixed slots (last writer wins per timeslot) and, for every faculty that
//! can teach exactly one subject, pins the first still-unplaced session of
//! that subject into the first free timeslot with a randomly chosen room.
//! This does not check faculty unavailability, room capacity, or preferred
//! room type (spec §9 hybrid-mode hazard, preserved for parity).

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::session::Session;
use crate::timeslot::encode;
use crate::types::ScheduleRequest;

#[derive(Debug, Clone)]
pub struct PreFilled {
    pub session_id: String,
    pub subject_id: String,
    pub batch_id: String,
    pub faculty_id: Option<String>,
    pub room_id: Option<String>,
    pub source: &'static str,
}

/// Returns the timeslot -> pre-filled assignment map; its key set is the
/// timeslot mask forbidden to the reduced model.
pub fn greedy_prefill(req: &ScheduleRequest, sessions: &[Session]) -> HashMap<i64, PreFilled> {
    let mut pre_assignments: HashMap<i64, PreFilled> = HashMap::new();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);

    // 1. Fixed slots: last writer wins per timeslot (spec §4.7.1).
    for fs in &req.fixed_slots {
        let t = encode(fs.day, fs.slot, req.slots_per_day);
        pre_assignments.insert(
            t,
            PreFilled {
                session_id: format!("{}__fixed_{}", fs.subject_id, t),
                subject_id: fs.subject_id.clone(),
                batch_id: fs.batch_id.clone(),
                faculty_id: fs.faculty_id.clone(),
                room_id: fs.room_id.clone(),
                source: "fixed",
            },
        );
        tracing::debug!(timeslot = t, subject = %fs.subject_id, "reserved fixed slot");
    }

    // 2. Single-subject faculties: place only the first session (spec §4.7.2).
    let horizon = req.days.len() as i64 * req.slots_per_day;
    for f in &req.faculties {
        if f.can_teach.len() != 1 {
            continue;
        }
        let subject_id = &f.can_teach[0];
        let subject_sessions: Vec<&Session> =
            sessions.iter().filter(|s| &s.subject_id == subject_id).collect();

        'sessions: for s in subject_sessions {
            for t in 0..horizon {
                if pre_assignments.contains_key(&t) {
                    continue;
                }
                let room_id = if req.classrooms.is_empty() {
                    None
                } else {
                    Some(req.classrooms[rng.gen_range(0..req.classrooms.len())].id.clone())
                };
                tracing::trace!(timeslot = t, session = %s.session_id, "greedy placement");
                pre_assignments.insert(
                    t,
                    PreFilled {
                        session_id: s.session_id.clone(),
                        subject_id: subject_id.clone(),
                        batch_id: s.batch_id.clone(),
                        faculty_id: Some(f.id.clone()),
                        room_id,
                        source: "greedy",
                    },
                );
                break 'sessions;
            }
        }
    }

    pre_assignments
}
