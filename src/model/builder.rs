//! Strict-mode model builder (spec §4.4): posts constraints 1–11 and the
//! composite objective over the candidate variables assembled in
//! `ModelBuilderContext`. The largest module in the core, per spec's size
//! budget.

use std::collections::HashMap;

use cp_sat::builder::{BoolVar, IntVar, LinearExpr};

use super::context::ModelBuilderContext;
use crate::constants::{BIG, MEDIUM};
use crate::types::FixedSlot;

/// Output of the strict builder needed by the result assembler and solver
/// driver: the reified scheduled-indicator per session, the per-faculty
/// load variable, and the max-load variable.
pub struct StrictArtifacts {
    pub sigma: Vec<Option<BoolVar>>,
    pub faculty_load: Vec<IntVar>,
    pub max_load: IntVar,
}

pub fn build_strict_model(ctx: &mut ModelBuilderContext, fixed_slots: &[FixedSlot]) -> StrictArtifacts {
    post_at_most_one_per_session(ctx);
    post_resource_exclusions(ctx);
    post_daily_caps(ctx);
    post_fixed_slots(ctx, fixed_slots);
    let sigma = post_scheduled_indicator(ctx);
    let faculty_load = post_faculty_load(ctx);
    let max_load = post_max_load(ctx, &faculty_load);
    let utilization = post_slot_utilization(ctx);
    post_objective(ctx, &sigma, &max_load, &utilization);

    tracing::debug!(
        sessions = ctx.sessions.len(),
        faculties = faculty_load.len(),
        utilization_terms = utilization.len(),
        "strict model constraints posted"
    );

    StrictArtifacts { sigma, faculty_load, max_load }
}

/// Constraint 1: `Σ_{t,r,f} x[s,t,r,f] ≤ 1` for each session `s`.
fn post_at_most_one_per_session(ctx: &mut ModelBuilderContext) {
    for vars in &ctx.session_vars {
        if vars.is_empty() {
            continue;
        }
        let sum = session_sum(vars);
        ctx.model.add_le(sum, LinearExpr::from(1));
    }
}

/// Constraints 2–4: faculty, room and batch exclusion — at most one session
/// per resource per timeslot.
fn post_resource_exclusions(ctx: &mut ModelBuilderContext) {
    let mut by_faculty_t: HashMap<(usize, i64), Vec<BoolVar>> = HashMap::new();
    let mut by_room_t: HashMap<(usize, i64), Vec<BoolVar>> = HashMap::new();
    let mut by_batch_t: HashMap<(usize, i64), Vec<BoolVar>> = HashMap::new();

    for (session, vars) in ctx.sessions.iter().zip(ctx.session_vars.iter()) {
        let batch_idx = ctx.normalized.batch_index.get(&session.batch_id).copied();
        for (candidate, var) in vars {
            by_faculty_t
                .entry((candidate.faculty_idx, candidate.timeslot))
                .or_default()
                .push(var.clone());
            by_room_t
                .entry((candidate.room_idx, candidate.timeslot))
                .or_default()
                .push(var.clone());
            if let Some(batch_idx) = batch_idx {
                by_batch_t
                    .entry((batch_idx, candidate.timeslot))
                    .or_default()
                    .push(var.clone());
            }
        }
    }

    for vars in by_faculty_t.values() {
        let sum = vars_sum(vars);
        ctx.model.add_le(sum, LinearExpr::from(1));
    }
    for vars in by_room_t.values() {
        let sum = vars_sum(vars);
        ctx.model.add_le(sum, LinearExpr::from(1));
    }
    for vars in by_batch_t.values() {
        let sum = vars_sum(vars);
        ctx.model.add_le(sum, LinearExpr::from(1));
    }
}

/// Constraints 5–6: daily caps for faculty and batch.
fn post_daily_caps(ctx: &mut ModelBuilderContext) {
    let slots_per_day = ctx.normalized.slots_per_day;
    let cap = ctx.normalized.max_classes_per_day;

    let mut by_faculty_day: HashMap<(usize, i64), Vec<BoolVar>> = HashMap::new();
    let mut by_batch_day: HashMap<(usize, i64), Vec<BoolVar>> = HashMap::new();

    for (session, vars) in ctx.sessions.iter().zip(ctx.session_vars.iter()) {
        let batch_idx = ctx.normalized.batch_index.get(&session.batch_id).copied();
        for (candidate, var) in vars {
            let day = candidate.timeslot / slots_per_day;
            by_faculty_day
                .entry((candidate.faculty_idx, day))
                .or_default()
                .push(var.clone());
            if let Some(batch_idx) = batch_idx {
                by_batch_day.entry((batch_idx, day)).or_default().push(var.clone());
            }
        }
    }

    for vars in by_faculty_day.values() {
        let sum = vars_sum(vars);
        ctx.model.add_le(sum, LinearExpr::from(cap));
    }
    for vars in by_batch_day.values() {
        let sum = vars_sum(vars);
        ctx.model.add_le(sum, LinearExpr::from(cap));
    }
}

/// Constraint 7: force each fixed slot's chosen session into its declared
/// timeslot (and optional room/faculty). Matching is the first unassigned
/// session with the same (subject, batch) — subject match is
/// case-insensitive, batch match is case-sensitive (spec §9 asymmetry,
/// preserved for parity). An empty intersection silently drops the fixed
/// slot (spec §4.4.7, §9 open question).
fn post_fixed_slots(ctx: &mut ModelBuilderContext, fixed_slots: &[FixedSlot]) {
    let slots_per_day = ctx.normalized.slots_per_day;
    let mut consumed = vec![false; ctx.sessions.len()];

    for fs in fixed_slots {
        let target_session = ctx.sessions.iter().enumerate().find(|(i, s)| {
            !consumed[*i]
                && s.subject_id.to_lowercase() == fs.subject_id.to_lowercase()
                && s.batch_id == fs.batch_id
        });

        let Some((idx, _)) = target_session else {
            tracing::debug!(
                subject = %fs.subject_id, batch = %fs.batch_id,
                "fixed slot dropped: no unassigned matching session"
            );
            continue;
        };

        let t = crate::timeslot::encode(fs.day, fs.slot, slots_per_day);
        let room_filter = fs.room_id.as_ref().and_then(|id| ctx.normalized.room_index.get(id).copied());
        let faculty_filter = fs.faculty_id.as_ref().and_then(|id| ctx.normalized.faculty_index.get(id).copied());

        let matching: Vec<BoolVar> = ctx.session_vars[idx]
            .iter()
            .filter(|(c, _)| {
                c.timeslot == t
                    && room_filter.map_or(true, |r| c.room_idx == r)
                    && faculty_filter.map_or(true, |f| c.faculty_idx == f)
            })
            .map(|(_, v)| v.clone())
            .collect();

        if matching.is_empty() {
            tracing::debug!(
                subject = %fs.subject_id, batch = %fs.batch_id, day = fs.day, slot = fs.slot,
                "fixed slot dropped: no candidate survives room/faculty filter"
            );
            continue;
        }

        let sum = vars_sum(&matching);
        ctx.model.add_eq(sum, LinearExpr::from(1));
        consumed[idx] = true;
    }
}

/// Constraint 8: `σ_s` is functionally redundant with `Σ x[s,·]` since that
/// sum is already boolean-valued under constraint 1 — spec §9 explicitly
/// sanctions defining it directly rather than via two reified implications.
fn post_scheduled_indicator(ctx: &mut ModelBuilderContext) -> Vec<Option<BoolVar>> {
    let mut sigma = Vec::with_capacity(ctx.sessions.len());
    for vars in &ctx.session_vars {
        if vars.is_empty() {
            sigma.push(None);
            continue;
        }
        let s = ctx.model.new_bool_var();
        let sum = session_sum(vars);
        ctx.model.add_eq(LinearExpr::from(s.clone()), sum);
        sigma.push(Some(s));
    }
    sigma
}

/// Constraint 9: `L_f = Σ_{s,t,r} x[s,t,r,f]`, one integer per faculty.
fn post_faculty_load(ctx: &mut ModelBuilderContext) -> Vec<IntVar> {
    let num_sessions = ctx.sessions.len() as i64;
    let num_faculties = ctx.normalized.faculties.len();

    let mut per_faculty: Vec<Vec<BoolVar>> = vec![Vec::new(); num_faculties];
    for vars in &ctx.session_vars {
        for (candidate, var) in vars {
            per_faculty[candidate.faculty_idx].push(var.clone());
        }
    }

    per_faculty
        .into_iter()
        .map(|vars| {
            let load = ctx.model.new_int_var(vec![(0, num_sessions)]);
            let sum = if vars.is_empty() { LinearExpr::from(0) } else { vars_sum(&vars) };
            ctx.model.add_eq(LinearExpr::from(load.clone()), sum);
            load
        })
        .collect()
}

/// Constraint 10: `M = max_f L_f`, encoded per spec §9 as `M ≥ L_f` for all
/// `f`, relying on `-M` in the objective to pin `M` to the true maximum.
fn post_max_load(ctx: &mut ModelBuilderContext, faculty_load: &[IntVar]) -> IntVar {
    let num_sessions = ctx.sessions.len() as i64;
    let max_load = ctx.model.new_int_var(vec![(0, num_sessions)]);
    for load in faculty_load {
        ctx.model.add_ge(LinearExpr::from(max_load.clone()), LinearExpr::from(load.clone()));
    }
    max_load
}

/// Constraint 11: `u_{b,t} = OR` of the variables for batch `b` at timeslot
/// `t`, encoded per spec §9 as `u ≥ x_i`, `u ≤ Σ x_i`.
fn post_slot_utilization(ctx: &mut ModelBuilderContext) -> HashMap<(usize, i64), BoolVar> {
    let mut by_batch_t: HashMap<(usize, i64), Vec<BoolVar>> = HashMap::new();
    for (session, vars) in ctx.sessions.iter().zip(ctx.session_vars.iter()) {
        let Some(batch_idx) = ctx.normalized.batch_index.get(&session.batch_id).copied() else {
            continue;
        };
        for (candidate, var) in vars {
            by_batch_t.entry((batch_idx, candidate.timeslot)).or_default().push(var.clone());
        }
    }

    let mut utilization = HashMap::with_capacity(by_batch_t.len());
    for (key, vars) in by_batch_t {
        let u = ctx.model.new_bool_var();
        for v in &vars {
            ctx.model.add_ge(LinearExpr::from(u.clone()), LinearExpr::from(v.clone()));
        }
        let sum = vars_sum(&vars);
        ctx.model.add_le(LinearExpr::from(u.clone()), sum);
        utilization.insert(key, u);
    }
    utilization
}

/// Objective: `maximize BIG·Σσ_s − M + MEDIUM·Σu_{b,t}`. `cp_sat` is driven
/// through `minimize`, so the sign is flipped once at the end rather than
/// relying on an unverified `maximize` entry point.
fn post_objective(
    ctx: &mut ModelBuilderContext,
    sigma: &[Option<BoolVar>],
    max_load: &IntVar,
    utilization: &HashMap<(usize, i64), BoolVar>,
) {
    let weighted: Vec<(i64, BoolVar)> = sigma
        .iter()
        .flatten()
        .map(|s| (BIG, s.clone()))
        .chain(utilization.values().map(|u| (MEDIUM, u.clone())))
        .collect();
    let objective: LinearExpr = weighted.into_iter().collect::<LinearExpr>() - LinearExpr::from(max_load.clone());
    ctx.model.minimize(LinearExpr::from(0) - objective);
}

fn session_sum(vars: &[(crate::feasibility::Candidate, BoolVar)]) -> LinearExpr {
    let mut sum = LinearExpr::from(0);
    for (_, v) in vars {
        sum = sum + LinearExpr::from(v.clone());
    }
    sum
}

fn vars_sum(vars: &[BoolVar]) -> LinearExpr {
    let mut sum = LinearExpr::from(0);
    for v in vars {
        sum = sum + LinearExpr::from(v.clone());
    }
    sum
}
