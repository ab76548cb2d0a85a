//! Input normalizer (spec §4.1): builds dense integer indices and id
//! lookups. No semantic validation beyond the spec §3 invariants; unknown
//! cross-references silently shrink candidate sets rather than erroring.

use std::collections::HashMap;

use crate::types::{Batch, Classroom, Faculty, ScheduleRequest, Subject};

pub struct NormalizedRequest {
    pub days: Vec<String>,
    pub slots_per_day: i64,
    pub max_classes_per_day: i64,
    pub classrooms: Vec<Classroom>,
    pub batches: Vec<Batch>,
    pub faculties: Vec<Faculty>,
    pub subjects: Vec<Subject>,
    pub room_index: HashMap<String, usize>,
    pub faculty_index: HashMap<String, usize>,
    pub subject_index: HashMap<String, usize>,
    pub batch_index: HashMap<String, usize>,
}

impl NormalizedRequest {
    pub fn horizon(&self) -> i64 {
        self.days.len() as i64 * self.slots_per_day
    }

    pub fn batch_name_or_id(&self, id: &str) -> String {
        self.batches
            .iter()
            .find(|b| b.id == id)
            .and_then(|b| b.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn faculty_name_or_id(&self, id: &str) -> String {
        self.faculties
            .iter()
            .find(|f| f.id == id)
            .and_then(|f| f.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn room_name_or_id(&self, id: &str) -> String {
        self.classrooms
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| r.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn subject_name_or_id(&self, id: &str) -> String {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

pub fn normalize(req: &ScheduleRequest) -> NormalizedRequest {
    let room_index: HashMap<String, usize> = req
        .classrooms
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id.clone(), i))
        .collect();
    let faculty_index: HashMap<String, usize> = req
        .faculties
        .iter()
        .enumerate()
        .map(|(i, f)| (f.id.clone(), i))
        .collect();
    let batch_index: HashMap<String, usize> = req
        .batches
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id.clone(), i))
        .collect();
    let subject_index: HashMap<String, usize> = req
        .subjects
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.clone(), i))
        .collect();

    tracing::debug!(
        rooms = req.classrooms.len(),
        faculties = req.faculties.len(),
        batches = req.batches.len(),
        subjects = req.subjects.len(),
        "normalized request"
    );

    NormalizedRequest {
        days: req.days.clone(),
        slots_per_day: req.slots_per_day,
        max_classes_per_day: req.max_classes_per_day,
        classrooms: req.classrooms.clone(),
        batches: req.batches.clone(),
        faculties: req.faculties.clone(),
        subjects: req.subjects.clone(),
        room_index,
        faculty_index,
        subject_index,
        batch_index,
    }
}
