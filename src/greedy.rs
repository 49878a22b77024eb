use crate::cost;
use crate::ordering;
use crate::preprocessor::StaticCandidates;
use crate::problem::Problem;
use crate::state::State;

const NODE_BUDGET: usize = 5000;
const MAX_RESTARTS: usize = 20;

pub struct SeedResult<'p> {
    pub state: State<'p>,
    pub cost: i64,
}

/// Depth-first, MRV/LCV-guided probing for a single feasible complete assignment, used to seed
/// the branch-and-bound upper bound. A plain greedy pass is tried first; if it exhausts its
/// node budget without completing, up to twenty randomized restarts follow, each reseeded from
/// `seed` so a run is reproducible.
pub fn find_seed<'p>(
    problem: &'p Problem,
    initial: &State<'p>,
    static_candidates: &StaticCandidates,
    seed: u64,
) -> Option<SeedResult<'p>> {
    let mut nodes = 0usize;
    if let Some(result) = dfs(problem, initial.clone(), static_candidates, &mut nodes, None) {
        return Some(result);
    }

    for attempt in 0..MAX_RESTARTS {
        let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(attempt as u64 + 1));
        let mut nodes = 0usize;
        if let Some(result) = dfs(problem, initial.clone(), static_candidates, &mut nodes, Some(&mut rng)) {
            return Some(result);
        }
    }

    None
}

fn dfs<'p>(
    problem: &'p Problem,
    state: State<'p>,
    static_candidates: &StaticCandidates,
    nodes: &mut usize,
    mut rng: Option<&mut fastrand::Rng>,
) -> Option<SeedResult<'p>> {
    *nodes += 1;
    if *nodes > NODE_BUDGET {
        return None;
    }

    if state.is_complete() {
        let cost = cost::grand_objective(problem, &state);
        return Some(SeedResult { state, cost });
    }

    let candidates = ordering::mrv_candidates(problem, &state, static_candidates);
    if candidates.is_empty() {
        return None;
    }

    let chosen = match rng.as_deref_mut() {
        Some(r) => r.usize(0..candidates.len()),
        None => ordering::pick_by_degree(problem, &candidates),
    };
    let (section, valid_slots) = candidates[chosen].clone();

    // LCV: try the slot that leaves the lowest partial cost first. Randomized restarts add a
    // small amount of jitter so ties (and near-ties) break differently across attempts.
    let mut scored: Vec<(f64, State<'p>)> = valid_slots
        .into_iter()
        .map(|slot| {
            let next = state.assign(section, slot);
            let mut key = cost::partial_cost(problem, &next).total() as f64;
            if let Some(r) = rng.as_deref_mut() {
                key += r.f64() * 0.1;
            }
            (key, next)
        })
        .collect();
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    for (_, next) in scored {
        if let Some(result) = dfs(problem, next, static_candidates, nodes, rng.as_deref_mut()) {
            return Some(result);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Weights;
    use crate::section::{Section, SectionId};
    use crate::slot::{Slot, SlotId, SlotKind};
    use crate::utils::{Day, TimeOfDay};
    use std::collections::BTreeSet;

    fn weights_zero() -> Weights {
        Weights {
            w_minfilled: 0,
            w_pref: 0,
            w_pair: 0,
            w_secdiff: 0,
            pen_lecturemin: 0,
            pen_tutorialmin: 0,
            pen_notpaired: 0,
            pen_section: 0,
        }
    }

    #[test]
    fn finds_the_only_feasible_completion() {
        let slots = vec![Slot::new(
            SlotId::from_index(0),
            SlotKind::Lecture,
            Day::Mo,
            TimeOfDay::new(8, 0),
            1,
            0,
            0,
        )];
        let section = Section::new(SectionId::from_index(0), "CPSC 433 LEC 01", false).unwrap();
        let problem = Problem::new(
            slots,
            1,
            vec![section],
            1,
            vec![BTreeSet::new()],
            vec![BTreeSet::new()],
            vec![vec![]],
            vec![],
            vec![None],
            weights_zero(),
        );

        let static_candidates = StaticCandidates::compute(&problem).unwrap();
        let initial = State::empty(&problem);
        let result = find_seed(&problem, &initial, &static_candidates, 1).unwrap();
        assert!(result.state.is_complete());
        assert_eq!(result.cost, 0);
    }

    #[test]
    fn reports_no_seed_when_the_only_slot_is_banned() {
        let slots = vec![Slot::new(
            SlotId::from_index(0),
            SlotKind::Lecture,
            Day::Tu,
            TimeOfDay::new(11, 0),
            5,
            0,
            0,
        )];
        let section = Section::new(SectionId::from_index(0), "CPSC 433 LEC 01", false).unwrap();
        let problem = Problem::new(
            slots,
            1,
            vec![section],
            1,
            vec![BTreeSet::new()],
            vec![BTreeSet::new()],
            vec![vec![]],
            vec![],
            vec![None],
            weights_zero(),
        );

        let static_candidates = StaticCandidates::compute(&problem).unwrap();
        let initial = State::empty(&problem);
        assert!(find_seed(&problem, &initial, &static_candidates, 1).is_none());
    }
}
