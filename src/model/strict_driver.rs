//! Strict-mode orchestration (spec §2 main pipeline): normalizer → session
//! expander → feasibility filter (folded into `ModelBuilderContext`) →
//! model builder → solver driver → result assembler.

use crate::assemble::assemble_strict;
use crate::constants::STRICT_TIME_BUDGET_SECS;
use crate::error::ScheduleError;
use crate::normalize::normalize;
use crate::session::expand_sessions;
use crate::solver::{is_success, solve};
use crate::types::{ScheduleRequest, StrictResponse};

use super::builder::build_strict_model;
use super::context::ModelBuilderContext;

pub fn schedule_strict(req: &ScheduleRequest) -> Result<StrictResponse, ScheduleError> {
    let normalized = normalize(req);
    let sessions = expand_sessions(req);

    let mut ctx = ModelBuilderContext::new(&normalized, &sessions);
    build_strict_model(&mut ctx, &req.fixed_slots);

    let model = std::mem::replace(&mut ctx.model, cp_sat::builder::CpModelBuilder::new());
    let response = solve(model, STRICT_TIME_BUDGET_SECS);

    if !is_success(response.status()) {
        return Err(ScheduleError::Infeasible(format!(
            "solver returned {:?}",
            response.status()
        )));
    }

    Ok(assemble_strict(&ctx, &response))
}
