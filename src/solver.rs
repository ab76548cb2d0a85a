//! Solver driver (spec §4.5): invokes CP-SAT with a wall-clock budget and
//! parallel workers, and interprets its terminal status. Shared by both the
//! strict and hybrid drivers.

use cp_sat::builder::CpModelBuilder;
use cp_sat::proto::{CpSolverResponse, CpSolverStatus, SatParameters};

use crate::constants::NUM_SEARCH_WORKERS;

pub fn solve(model: CpModelBuilder, max_time_in_seconds: f64) -> CpSolverResponse {
    let mut params = SatParameters::default();
    params.max_time_in_seconds = Some(max_time_in_seconds);
    params.num_search_workers = Some(NUM_SEARCH_WORKERS);

    tracing::info!(max_time_in_seconds, workers = NUM_SEARCH_WORKERS, "invoking CP-SAT solver");
    let mut model = model;
    let response = model.solve_with_parameters(&params);
    tracing::info!(status = ?response.status(), "solver returned");
    response
}

/// OPTIMAL and FEASIBLE are the only terminal statuses treated as success
/// (spec §4.5); everything else is infeasible.
pub fn is_success(status: CpSolverStatus) -> bool {
    matches!(status, CpSolverStatus::Optimal | CpSolverStatus::Feasible)
}
