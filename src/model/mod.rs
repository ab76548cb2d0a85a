//! Model building and constraint logic for the timetable scheduling solver.

pub mod builder;
pub mod context;
pub mod hybrid_driver;
pub mod reduced;
pub mod strict_driver;

pub use hybrid_driver::schedule_hybrid;
pub use strict_driver::schedule_strict;
