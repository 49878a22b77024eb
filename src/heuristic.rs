use crate::preprocessor::StaticCandidates;
use crate::problem::Problem;
use crate::slot::SlotId;
use crate::state::State;

/// An admissible (never-overestimating) lower bound on the soft cost still payable by any
/// completion of `state`. Only the two terms that can be bounded without knowing the final
/// assignment are included; pair and section-difference costs are left out since both can be
/// driven to zero by some completion.
pub fn estimate(problem: &Problem, state: &State, static_candidates: &StaticCandidates) -> i64 {
    min_filled_lower_bound(problem, state, static_candidates) + preference_lower_bound(problem, state)
}

/// For each slot, the best case is that every unassigned section whose static candidates
/// include it actually lands there. Relaxing to static feasibility (ignoring the dynamic
/// checker) can only overestimate the usage a slot might reach, so the resulting shortfall is
/// never more than what the true completion will owe -- this keeps the bound admissible.
fn min_filled_lower_bound(problem: &Problem, state: &State, static_candidates: &StaticCandidates) -> i64 {
    let mut potential = vec![0u32; problem.slots.len()];
    for slot in &problem.slots {
        potential[slot.slot_id.raw_index()] = state.usage(slot.slot_id).total();
    }
    for section in state.unassigned_sections() {
        for &slot_id in static_candidates.for_section(section) {
            potential[slot_id.raw_index()] += 1;
        }
    }

    let mut total = 0i64;
    for slot in &problem.slots {
        let potential_usage = potential[slot.slot_id.raw_index()];
        if potential_usage < slot.min_filled {
            total += (slot.min_filled - potential_usage) as i64 * problem.weights.w_minfilled;
        }
    }
    total
}

/// For each unassigned section with preferences, the best any completion can do is land on the
/// single candidate slot that keeps the most preference value; the remainder is guaranteed to
/// be paid no matter which feasible slot is eventually chosen.
fn preference_lower_bound(problem: &Problem, state: &State) -> i64 {
    let mut total = 0i64;
    for section in state.unassigned_sections() {
        let prefs = &problem.preferences[section.raw_index()];
        if prefs.is_empty() {
            continue;
        }

        let base: i64 = prefs.iter().map(|&(_, value)| value).sum();
        let max_reduction = best_reduction(prefs);
        total += (base - max_reduction) * problem.weights.w_pref;
    }
    total
}

fn best_reduction(prefs: &[(SlotId, i64)]) -> i64 {
    prefs
        .iter()
        .map(|&(slot, _)| prefs.iter().filter(|&&(s, _)| s == slot).map(|&(_, v)| v).sum())
        .max()
        .unwrap_or(0)
}
