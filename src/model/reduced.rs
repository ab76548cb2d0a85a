//! Hybrid reduced model (spec §4.8). The faculty dimension is elided and no
//! capacity/type/availability filter is applied — this mirrors both the
//! spec's description of the reduced model and the original Python
//! service's unfiltered `x[(session, t, room)]` variable set.

use std::collections::{HashMap, HashSet};

use cp_sat::builder::{BoolVar, CpModelBuilder, LinearExpr};

use crate::session::Session;
use crate::types::Classroom;

pub struct ReducedModel {
    pub model: CpModelBuilder,
    /// Per remaining session (same order as the slice passed in): the
    /// (timeslot, room index, decision variable) triples.
    pub vars: Vec<Vec<(i64, usize, BoolVar)>>,
}

pub fn build_reduced_model(
    remaining: &[Session],
    reserved: &HashSet<i64>,
    classrooms: &[Classroom],
    horizon: i64,
) -> ReducedModel {
    let mut model = CpModelBuilder::new();
    let mut vars = Vec::with_capacity(remaining.len());

    for _session in remaining {
        let mut session_vars = Vec::new();
        for t in 0..horizon {
            if reserved.contains(&t) {
                continue;
            }
            for (room_idx, _room) in classrooms.iter().enumerate() {
                session_vars.push((t, room_idx, model.new_bool_var()));
            }
        }
        vars.push(session_vars);
    }

    // Each remaining session scheduled exactly once.
    for session_vars in &vars {
        let sum = sum_triples(session_vars);
        model.add_eq(sum, LinearExpr::from(1));
    }

    // Each (timeslot, room) pair holds at most one session.
    let mut by_t_r: HashMap<(i64, usize), Vec<BoolVar>> = HashMap::new();
    for session_vars in &vars {
        for (t, r, v) in session_vars {
            by_t_r.entry((*t, *r)).or_default().push(v.clone());
        }
    }
    for group in by_t_r.values() {
        let mut sum = LinearExpr::from(0);
        for v in group {
            sum = sum + LinearExpr::from(v.clone());
        }
        model.add_le(sum, LinearExpr::from(1));
    }

    tracing::debug!(
        remaining_sessions = remaining.len(),
        reserved_timeslots = reserved.len(),
        "reduced model constraints posted"
    );

    ReducedModel { model, vars }
}

fn sum_triples(vars: &[(i64, usize, BoolVar)]) -> LinearExpr {
    let mut sum = LinearExpr::from(0);
    for (_, _, v) in vars {
        sum = sum + LinearExpr::from(v.clone());
    }
    sum
}
