//! Feasibility filter (spec §4.3): the static filters every surviving
//! candidate triple must satisfy simultaneously.

use crate::normalize::NormalizedRequest;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub timeslot: i64,
    pub room_idx: usize,
    pub faculty_idx: usize,
}

/// `C(s)` from spec §4.3: every (timeslot, room, faculty) triple surviving
/// capacity, room-type, qualification and availability filters.
pub fn candidates_for_session(session: &Session, req: &NormalizedRequest) -> Vec<Candidate> {
    let eligible_rooms: Vec<usize> = req
        .classrooms
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.capacity >= session.size
                && session
                    .preferred_room_type
                    .as_deref()
                    .map_or(true, |want| want == r.room_type)
        })
        .map(|(i, _)| i)
        .collect();

    let eligible_faculties: Vec<usize> = req
        .faculties
        .iter()
        .enumerate()
        .filter(|(_, f)| f.can_teach.iter().any(|s| *s == session.subject_id))
        .map(|(i, _)| i)
        .collect();

    if eligible_rooms.is_empty() || eligible_faculties.is_empty() {
        return Vec::new();
    }

    let horizon = req.horizon();
    let mut candidates = Vec::new();
    for t in 0..horizon {
        for &faculty_idx in &eligible_faculties {
            if req.faculties[faculty_idx].unavailable_slots.contains(&t) {
                continue;
            }
            for &room_idx in &eligible_rooms {
                candidates.push(Candidate { timeslot: t, room_idx, faculty_idx });
            }
        }
    }
    candidates
}
