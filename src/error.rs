//! Error types for the scheduling core (spec §7).
//!
//! Only outcome class 2 ("Infeasible") surfaces as an `Err`; outcome class 1
//! ("Success", possibly with unscheduled sessions) is always `Ok`, and
//! outcome class 3 ("Input rejection") is the transport collaborator's job,
//! not this crate's.

#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("no feasible schedule found: {0}")]
    Infeasible(String),
}
