use crate::checker;
use crate::preprocessor::StaticCandidates;
use crate::problem::Problem;
use crate::section::SectionId;
use crate::slot::SlotId;
use crate::state::State;

/// Every unassigned section tied for the fewest currently-valid slots (minimum remaining
/// values), each paired with that valid-slot list so the caller doesn't re-run the checker.
/// Shared between the greedy seed and the branch-and-bound search, which both select variables
/// this way.
pub fn mrv_candidates(
    problem: &Problem,
    state: &State,
    static_candidates: &StaticCandidates,
) -> Vec<(SectionId, Vec<SlotId>)> {
    let mut min_valid = usize::MAX;
    let mut candidates = Vec::new();

    for section in state.unassigned_sections() {
        let section_ref = problem.section(section);
        let valid: Vec<SlotId> = static_candidates
            .for_section(section)
            .iter()
            .copied()
            .filter(|&slot_id| checker::is_valid(problem, state, section_ref, problem.slot(slot_id)))
            .collect();

        if valid.len() < min_valid {
            min_valid = valid.len();
            candidates.clear();
            candidates.push((section, valid));
        } else if valid.len() == min_valid {
            candidates.push((section, valid));
        }
    }

    candidates
}

/// How many incompatibility or pair relationships a section participates in -- the degree
/// tie-break for MRV. Higher degree is picked first: it constrains more of the remaining
/// problem, so branching on it fails (or succeeds) fastest.
pub fn degree(problem: &Problem, section: SectionId) -> usize {
    problem.incompatible_adjacency[section.raw_index()].len()
        + problem
            .pairs
            .iter()
            .filter(|&&(a, b)| a == section || b == section)
            .count()
}

/// Index into `candidates` of the MRV-tied section with the highest degree; ties broken by
/// section-id so selection stays deterministic.
pub fn pick_by_degree(problem: &Problem, candidates: &[(SectionId, Vec<SlotId>)]) -> usize {
    candidates
        .iter()
        .enumerate()
        .max_by_key(|&(_, &(section, _))| (degree(problem, section), std::cmp::Reverse(section)))
        .map(|(i, _)| i)
        .expect("candidates must be non-empty")
}
