//! Request/response value objects (spec §3, §6). The core consumes a
//! `ScheduleRequest` and returns a `StrictResponse` or `HybridResponse`; HTTP
//! transport and wire-level status tagging are out of scope (spec §1).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{default_days, DEFAULT_MAX_CLASSES_PER_DAY, DEFAULT_ROOM_TYPE, DEFAULT_SLOTS_PER_DAY};

fn default_room_type() -> String {
    DEFAULT_ROOM_TYPE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: String,
    pub name: Option<String>,
    pub capacity: i64,
    #[serde(rename = "type", default = "default_room_type")]
    pub room_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub name: Option<String>,
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: Option<String>,
    pub batch_id: String,
    pub classes_per_week: u32,
    #[serde(default)]
    pub preferred_room_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub can_teach: Vec<String>,
    #[serde(default)]
    pub unavailable_slots: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedSlot {
    pub day: i64,
    pub slot: i64,
    pub subject_id: String,
    pub batch_id: String,
    #[serde(default)]
    pub faculty_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default = "default_days")]
    pub days: Vec<String>,
    #[serde(default = "default_slots_per_day")]
    pub slots_per_day: i64,
    #[serde(default = "default_max_classes_per_day")]
    pub max_classes_per_day: i64,
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
    #[serde(default)]
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub faculties: Vec<Faculty>,
    #[serde(default)]
    pub fixed_slots: Vec<FixedSlot>,
}

fn default_slots_per_day() -> i64 {
    DEFAULT_SLOTS_PER_DAY
}
fn default_max_classes_per_day() -> i64 {
    DEFAULT_MAX_CLASSES_PER_DAY
}

impl Default for ScheduleRequest {
    fn default() -> Self {
        ScheduleRequest {
            days: default_days(),
            slots_per_day: DEFAULT_SLOTS_PER_DAY,
            max_classes_per_day: DEFAULT_MAX_CLASSES_PER_DAY,
            classrooms: Vec::new(),
            batches: Vec::new(),
            subjects: Vec::new(),
            faculties: Vec::new(),
            fixed_slots: Vec::new(),
        }
    }
}

/// A single filled-in cell of the readable timetable matrix (spec §4.6, §6).
/// Each field is a human name when resolvable, else falls back to the raw id
/// (ported from the original's `subjects[id].name if ... else id` rule).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cell {
    pub subject: String,
    pub batch: String,
    /// `None` when no faculty id was assigned (hybrid "fixed" cells with no
    /// declared faculty, and "ortools" cells from the reduced model, which
    /// elides the faculty dimension) — mirrors the original's `None`/`null`,
    /// not an empty-string sentinel.
    pub faculty: Option<String>,
    /// `None` when no room id was assigned (hybrid "fixed" cells with no
    /// declared room).
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRow {
    pub day: String,
    pub slots: Vec<Option<Cell>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnscheduledSession {
    pub session_id: String,
    pub subject_id: String,
    pub batch_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrictResponse {
    pub scheduled_count: i64,
    pub timetable_matrix: Vec<DayRow>,
    pub unscheduled: Vec<UnscheduledSession>,
    pub faculty_loads: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridResponse {
    pub method: String,
    pub timetable_matrix: Vec<DayRow>,
    pub pre_filled: i64,
    pub remaining_scheduled: i64,
}
