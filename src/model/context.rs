//! Shared per-invocation model state threading the normalized request,
//! sessions, and decision variables through the builder functions
//! (analogous to the teacher's `ModelBuilderContext`).

use cp_sat::builder::{BoolVar, CpModelBuilder};

use crate::feasibility::{candidates_for_session, Candidate};
use crate::normalize::NormalizedRequest;
use crate::session::Session;

pub struct ModelBuilderContext<'a> {
    pub model: CpModelBuilder,
    pub normalized: &'a NormalizedRequest,
    pub sessions: &'a [Session],
    /// `session_vars[i]` is the candidate/decision-variable pairs for
    /// `sessions[i]`; empty when the session is unplaceable (spec §4.3).
    pub session_vars: Vec<Vec<(Candidate, BoolVar)>>,
}

impl<'a> ModelBuilderContext<'a> {
    pub fn new(normalized: &'a NormalizedRequest, sessions: &'a [Session]) -> Self {
        let mut model = CpModelBuilder::new();
        let mut session_vars = Vec::with_capacity(sessions.len());
        let mut total_vars = 0usize;
        for session in sessions {
            let candidates = candidates_for_session(session, normalized);
            if candidates.is_empty() {
                tracing::warn!(
                    session = %session.session_id,
                    subject = %session.subject_id,
                    batch = %session.batch_id,
                    "session is unplaceable: empty candidate set"
                );
            }
            let mut vars = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                let var = model.new_bool_var();
                vars.push((candidate, var));
            }
            total_vars += vars.len();
            session_vars.push(vars);
        }
        tracing::debug!(sessions = sessions.len(), decision_vars = total_vars, "model variables created");
        ModelBuilderContext { model, normalized, sessions, session_vars }
    }
}
