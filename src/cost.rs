use enum_map::{Enum, EnumMap};
use strum::IntoStaticStr;

use crate::problem::Problem;
use crate::section::SectionId;
use crate::state::State;
use crate::utils::TwoCombIter;

/// One soft-constraint category. Kept separate from a single running total so that a caller
/// (or a future `--explain` flag) can see where the objective came from, mirroring the
/// teacher's per-constraint cost breakdown.
#[derive(Debug, Enum, IntoStaticStr, Clone, Copy)]
pub enum CostCategory {
    Preference,
    Pair,
    SectionDifference,
    MinFilled,
}

#[derive(Debug, Clone)]
pub struct CostBreakdown {
    totals: EnumMap<CostCategory, i64>,
}

impl CostBreakdown {
    fn zero() -> Self {
        CostBreakdown {
            totals: EnumMap::default(),
        }
    }

    fn add(&mut self, category: CostCategory, amount: i64) {
        self.totals[category] += amount;
    }

    pub fn total(&self) -> i64 {
        self.totals.values().sum()
    }
}

/// `g(S)`: preferences, pairs and section-difference over every currently-assigned section.
/// Does not include the min-filled term -- that is added separately at state completion so
/// that `f = g + h` stays well-defined against the admissible heuristic.
pub fn partial_cost(problem: &Problem, state: &State) -> CostBreakdown {
    let mut breakdown = CostBreakdown::zero();
    let weights = &problem.weights;

    for (section, slot) in state.assigned_pairs() {
        for &(pref_slot, value) in &problem.preferences[section.raw_index()] {
            if pref_slot != slot {
                breakdown.add(CostCategory::Preference, value * weights.w_pref);
            }
        }
    }

    for &(a, b) in &problem.pairs {
        if let (Some(slot_a), Some(slot_b)) = (state.assignment(a), state.assignment(b)) {
            if !problem.overlap.is_overlap(slot_a, slot_b) {
                breakdown.add(CostCategory::Pair, weights.pen_notpaired * weights.w_pair);
            }
        }
    }

    let assigned: Vec<(SectionId, _)> = state.assigned_pairs().collect();
    for ((sec_a, slot_a), (sec_b, slot_b)) in TwoCombIter::new(&assigned) {
        let section_a = problem.section(sec_a);
        let section_b = problem.section(sec_b);
        if section_a.is_sibling_section(section_b) && problem.overlap.is_overlap(slot_a, slot_b) {
            breakdown.add(
                CostCategory::SectionDifference,
                weights.pen_section * weights.w_secdiff,
            );
        }
    }

    breakdown
}

/// The min-filled shortfall over a complete (or partial) state: for every slot whose total
/// usage falls short of its `min_filled` threshold, the gap weighted by `w_minfilled`.
pub fn min_filled_cost(problem: &Problem, state: &State) -> i64 {
    let mut total = 0i64;
    for slot in &problem.slots {
        let usage = state.usage(slot.slot_id).total();
        if usage < slot.min_filled {
            total += (slot.min_filled - usage) as i64 * problem.weights.w_minfilled;
        }
    }
    total
}

/// The grand objective reported to the caller: `g(S) + min-filled-cost(S)`, defined only for
/// complete states (the caller is responsible for checking `state.is_complete()` first).
pub fn grand_objective(problem: &Problem, state: &State) -> i64 {
    partial_cost(problem, state).total() + min_filled_cost(problem, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Weights;
    use crate::section::{Section, SectionId};
    use crate::slot::{Slot, SlotId, SlotKind};
    use crate::utils::{Day, TimeOfDay};
    use std::collections::BTreeSet;

    fn two_slot_problem(w_pref: i64) -> Problem {
        let slots = vec![
            Slot::new(SlotId::from_index(0), SlotKind::Lecture, Day::Mo, TimeOfDay::new(8, 0), 1, 0, 0),
            Slot::new(SlotId::from_index(1), SlotKind::Lecture, Day::Mo, TimeOfDay::new(9, 0), 1, 0, 0),
        ];
        let section = Section::new(SectionId::from_index(0), "CPSC 433 LEC 01", false).unwrap();
        Problem::new(
            slots,
            2,
            vec![section],
            1,
            vec![BTreeSet::new()],
            vec![BTreeSet::new()],
            vec![vec![(SlotId::from_index(1), 10)]],
            vec![],
            vec![None],
            Weights {
                w_minfilled: 0,
                w_pref,
                w_pair: 0,
                w_secdiff: 0,
                pen_lecturemin: 0,
                pen_tutorialmin: 0,
                pen_notpaired: 0,
                pen_section: 0,
            },
        )
    }

    #[test]
    fn missed_preference_is_charged_but_matched_preference_is_free() {
        let problem = two_slot_problem(1);
        let missed = State::empty(&problem).assign(SectionId::from_index(0), SlotId::from_index(0));
        assert_eq!(partial_cost(&problem, &missed).total(), 10);

        let matched = State::empty(&problem).assign(SectionId::from_index(0), SlotId::from_index(1));
        assert_eq!(partial_cost(&problem, &matched).total(), 0);
    }

    #[test]
    fn min_filled_shortfall_is_excluded_from_partial_cost() {
        let mut problem = two_slot_problem(0);
        problem.slots[0].min_filled = 1;
        let state = State::empty(&problem);
        assert_eq!(partial_cost(&problem, &state).total(), 0);
        assert_eq!(min_filled_cost(&problem, &state), 0);
    }

    #[test]
    fn paired_sections_in_overlapping_slots_cost_nothing() {
        let slots = vec![Slot::new(
            SlotId::from_index(0),
            SlotKind::Lecture,
            Day::Mo,
            TimeOfDay::new(8, 0),
            2,
            0,
            0,
        )];
        let a = Section::new(SectionId::from_index(0), "CPSC 433 LEC 01", false).unwrap();
        let b = Section::new(SectionId::from_index(1), "CPSC 533 LEC 01", false).unwrap();
        let problem = Problem::new(
            slots,
            1,
            vec![a, b],
            2,
            vec![BTreeSet::new(), BTreeSet::new()],
            vec![BTreeSet::new(), BTreeSet::new()],
            vec![vec![], vec![]],
            vec![(SectionId::from_index(0), SectionId::from_index(1))],
            vec![None, None],
            Weights {
                w_minfilled: 0,
                w_pref: 0,
                w_pair: 1,
                w_secdiff: 0,
                pen_lecturemin: 0,
                pen_tutorialmin: 0,
                pen_notpaired: 5,
                pen_section: 0,
            },
        );

        let state = State::empty(&problem)
            .assign(SectionId::from_index(0), SlotId::from_index(0))
            .assign(SectionId::from_index(1), SlotId::from_index(0));
        assert_eq!(partial_cost(&problem, &state).total(), 0);
    }

    #[test]
    fn sibling_sections_on_the_same_slot_are_charged_once_not_per_self_pair() {
        let slots = vec![Slot::new(
            SlotId::from_index(0),
            SlotKind::Lecture,
            Day::Mo,
            TimeOfDay::new(8, 0),
            3,
            0,
            0,
        )];
        let a = Section::new(SectionId::from_index(0), "CPSC 433 LEC 01", false).unwrap();
        let b = Section::new(SectionId::from_index(1), "CPSC 433 LEC 02", false).unwrap();
        let c = Section::new(SectionId::from_index(2), "CPSC 433 LEC 03", false).unwrap();
        let problem = Problem::new(
            slots,
            1,
            vec![a, b, c],
            3,
            vec![BTreeSet::new(), BTreeSet::new(), BTreeSet::new()],
            vec![BTreeSet::new(), BTreeSet::new(), BTreeSet::new()],
            vec![vec![], vec![], vec![]],
            vec![],
            vec![None, None, None],
            Weights {
                w_minfilled: 0,
                w_pref: 0,
                w_pair: 0,
                w_secdiff: 1,
                pen_lecturemin: 0,
                pen_tutorialmin: 0,
                pen_notpaired: 0,
                pen_section: 1,
            },
        );

        let state = State::empty(&problem)
            .assign(SectionId::from_index(0), SlotId::from_index(0))
            .assign(SectionId::from_index(1), SlotId::from_index(0));
        assert_eq!(partial_cost(&problem, &state).total(), 1);

        let state = state.assign(SectionId::from_index(2), SlotId::from_index(0));
        assert_eq!(partial_cost(&problem, &state).total(), 3);
    }
}
