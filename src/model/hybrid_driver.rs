//! Hybrid orchestration (spec §2 alternative orchestration, §4.7–§4.8):
//! greedy pre-filler reserves timeslots, then a reduced model (faculty
//! dimension elided) is solved over what's left.

use std::collections::HashSet;

use crate::assemble::assemble_hybrid;
use crate::constants::HYBRID_TIME_BUDGET_SECS;
use crate::error::ScheduleError;
use crate::greedy::greedy_prefill;
use crate::normalize::normalize;
use crate::session::expand_sessions;
use crate::solver::{is_success, solve};
use crate::types::{HybridResponse, ScheduleRequest};

use super::reduced::build_reduced_model;

pub fn schedule_hybrid(req: &ScheduleRequest) -> Result<HybridResponse, ScheduleError> {
    let normalized = normalize(req);
    let sessions = expand_sessions(req);

    let pre_assignments = greedy_prefill(req, &sessions);
    let used_session_ids: HashSet<&str> =
        pre_assignments.values().map(|p| p.session_id.as_str()).collect();
    let remaining: Vec<_> = sessions
        .iter()
        .filter(|s| !used_session_ids.contains(s.session_id.as_str()))
        .cloned()
        .collect();
    let reserved: HashSet<i64> = pre_assignments.keys().copied().collect();

    tracing::info!(
        pre_filled = pre_assignments.len(),
        remaining = remaining.len(),
        "hybrid pre-fill complete"
    );

    let reduced = build_reduced_model(&remaining, &reserved, &normalized.classrooms, normalized.horizon());
    let response = solve(reduced.model, HYBRID_TIME_BUDGET_SECS);

    if !remaining.is_empty() && !is_success(response.status()) {
        return Err(ScheduleError::Infeasible(format!(
            "reduced model solver returned {:?}",
            response.status()
        )));
    }

    Ok(assemble_hybrid(&normalized, &pre_assignments, &remaining, &reduced.vars, &response))
}
