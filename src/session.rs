//! Session expander (spec §4.2): each subject yields `classes_per_week`
//! interchangeable session tokens.

use crate::types::ScheduleRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub subject_id: String,
    pub batch_id: String,
    pub preferred_room_type: Option<String>,
    /// Snapshot of `batch.size` at expansion time; 0 if `batch_id` dangles
    /// (spec §3 invariant).
    pub size: i64,
}

/// Expand every subject into its session tokens. Tokens are interchangeable
/// for scheduling purposes; this crate does not break that symmetry (spec
/// §4.2, §9).
pub fn expand_sessions(req: &ScheduleRequest) -> Vec<Session> {
    let mut sessions = Vec::new();
    for subject in &req.subjects {
        let size = req
            .batches
            .iter()
            .find(|b| b.id == subject.batch_id)
            .map(|b| b.size)
            .unwrap_or(0);
        for ordinal in 0..subject.classes_per_week {
            sessions.push(Session {
                session_id: format!("{}#{}", subject.id, ordinal),
                subject_id: subject.id.clone(),
                batch_id: subject.batch_id.clone(),
                preferred_room_type: subject.preferred_room_type.clone(),
                size,
            });
        }
    }
    tracing::debug!(count = sessions.len(), "expanded session tokens");
    sessions
}
