//! Weekly class timetable scheduler: constraint model and CP-SAT solver
//! invocation for assigning teaching sessions to (day, slot, room, faculty)
//! tuples under hard conflict-free constraints, maximizing coverage, slot
//! utilization, and faculty-load balance (in that priority order).
//!
//! Two modes are exposed, both consuming a [`ScheduleRequest`] value object:
//! [`schedule_strict`] builds the full constraint model in one pass;
//! [`schedule_hybrid`] pre-fills some placements greedily before handing the
//! remainder to a reduced model. HTTP transport, request validation, and
//! process bootstrap are out of scope — the caller owns those.

pub mod assemble;
pub mod constants;
pub mod error;
pub mod feasibility;
pub mod greedy;
pub mod model;
pub mod normalize;
pub mod session;
pub mod solver;
pub mod timeslot;
pub mod types;

pub use error::ScheduleError;
pub use model::{schedule_hybrid, schedule_strict};
pub use types::{
    Batch, Cell, Classroom, DayRow, Faculty, FixedSlot, HybridResponse, ScheduleRequest,
    StrictResponse, Subject, UnscheduledSession,
};
