//! Result assembler (spec §4.6): extracts assignments and unscheduled
//! sessions from the solved model, reads faculty loads, and produces the
//! readable `D × S` matrix with names resolved where possible.

use std::collections::{BTreeMap, HashMap, HashSet};

use cp_sat::proto::CpSolverResponse;

use crate::greedy::PreFilled;
use crate::model::context::ModelBuilderContext;
use crate::normalize::NormalizedRequest;
use crate::session::Session;
use crate::types::{Cell, DayRow, HybridResponse, StrictResponse, UnscheduledSession};

/// Strict-mode assembly (spec §4.6).
pub fn assemble_strict(ctx: &ModelBuilderContext, response: &CpSolverResponse) -> StrictResponse {
    let normalized = ctx.normalized;
    let horizon = normalized.horizon() as usize;
    let mut matrix_cells: Vec<Option<Cell>> = vec![None; horizon];
    let mut faculty_loads: BTreeMap<String, i64> =
        normalized.faculties.iter().map(|f| (f.id.clone(), 0)).collect();
    let mut scheduled_ids: HashSet<&str> = HashSet::new();

    for (session, vars) in ctx.sessions.iter().zip(ctx.session_vars.iter()) {
        for (candidate, var) in vars {
            if !var.solution_value(response) {
                continue;
            }
            scheduled_ids.insert(session.session_id.as_str());
            let faculty = &normalized.faculties[candidate.faculty_idx];
            *faculty_loads.entry(faculty.id.clone()).or_insert(0) += 1;

            let room = &normalized.classrooms[candidate.room_idx];
            let cell = Cell {
                subject: normalized.subject_name_or_id(&session.subject_id),
                batch: normalized.batch_name_or_id(&session.batch_id),
                faculty: Some(normalized.faculty_name_or_id(&faculty.id)),
                room: Some(normalized.room_name_or_id(&room.id)),
                source: None,
            };
            let slot = matrix_cells
                .get_mut(candidate.timeslot as usize)
                .expect("candidate timeslot within horizon");
            if slot.is_none() {
                *slot = Some(cell);
            }
        }
    }

    let unscheduled: Vec<UnscheduledSession> = ctx
        .sessions
        .iter()
        .filter(|s| !scheduled_ids.contains(s.session_id.as_str()))
        .map(|s| UnscheduledSession {
            session_id: s.session_id.clone(),
            subject_id: s.subject_id.clone(),
            batch_id: s.batch_id.clone(),
        })
        .collect();

    let timetable_matrix = build_matrix(normalized, matrix_cells);

    StrictResponse {
        scheduled_count: scheduled_ids.len() as i64,
        timetable_matrix,
        unscheduled,
        faculty_loads,
    }
}

/// Hybrid-mode assembly (spec §4.6, §6): merges greedy/fixed pre-fills with
/// the reduced model's solved assignments.
pub fn assemble_hybrid(
    normalized: &NormalizedRequest,
    pre_assignments: &HashMap<i64, PreFilled>,
    remaining: &[Session],
    reduced_vars: &[Vec<(i64, usize, cp_sat::builder::BoolVar)>],
    response: &CpSolverResponse,
) -> HybridResponse {
    let horizon = normalized.horizon() as usize;
    let mut matrix_cells: Vec<Option<Cell>> = vec![None; horizon];

    for (&t, pre) in pre_assignments {
        let cell = Cell {
            subject: normalized.subject_name_or_id(&pre.subject_id),
            batch: normalized.batch_name_or_id(&pre.batch_id),
            faculty: pre.faculty_id.as_deref().map(|id| normalized.faculty_name_or_id(id)),
            room: pre.room_id.as_deref().map(|id| normalized.room_name_or_id(id)),
            source: Some(pre.source.to_string()),
        };
        if let Some(slot) = matrix_cells.get_mut(t as usize) {
            *slot = Some(cell);
        }
    }

    for (session, vars) in remaining.iter().zip(reduced_vars.iter()) {
        for (t, room_idx, var) in vars {
            if !var.solution_value(response) {
                continue;
            }
            let room = &normalized.classrooms[*room_idx];
            let cell = Cell {
                subject: normalized.subject_name_or_id(&session.subject_id),
                batch: normalized.batch_name_or_id(&session.batch_id),
                faculty: None,
                room: Some(normalized.room_name_or_id(&room.id)),
                source: Some("ortools".to_string()),
            };
            if let Some(slot) = matrix_cells.get_mut(*t as usize) {
                if slot.is_none() {
                    *slot = Some(cell);
                }
            }
        }
    }

    let timetable_matrix = build_matrix(normalized, matrix_cells);

    HybridResponse {
        method: "hybrid (greedy + ortools)".to_string(),
        timetable_matrix,
        pre_filled: pre_assignments.len() as i64,
        remaining_scheduled: remaining.len() as i64,
    }
}

fn build_matrix(normalized: &NormalizedRequest, cells: Vec<Option<Cell>>) -> Vec<DayRow> {
    let slots_per_day = normalized.slots_per_day as usize;
    normalized
        .days
        .iter()
        .enumerate()
        .map(|(day_idx, day_name)| {
            let start = day_idx * slots_per_day;
            let row_slots = cells[start..start + slots_per_day].to_vec();
            DayRow { day: day_name.clone(), slots: row_slots }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_shape_matches_days_and_slots() {
        let req = crate::types::ScheduleRequest {
            days: vec!["Mon".into(), "Tue".into()],
            slots_per_day: 3,
            ..Default::default()
        };
        let normalized = crate::normalize::normalize(&req);
        let cells: Vec<Option<Cell>> = vec![None; normalized.horizon() as usize];
        let matrix = build_matrix(&normalized, cells);
        assert_eq!(matrix.len(), 2);
        assert!(matrix.iter().all(|row| row.slots.len() == 3));
    }
}
