use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::cost;
use crate::greedy::SeedResult;
use crate::heuristic;
use crate::ordering;
use crate::preprocessor::StaticCandidates;
use crate::problem::Problem;
use crate::state::State;

/// A pending partial assignment on the best-first frontier. Ordering is by ascending `f`,
/// ties broken toward more assignments (deeper nodes are closer to a goal), so `BinaryHeap`
/// (a max-heap) pops the best candidate first.
struct Node<'p> {
    f: i64,
    num_assigned: usize,
    state: State<'p>,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.num_assigned == other.num_assigned
    }
}

impl Eq for Node<'_> {}

impl PartialOrd for Node<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.num_assigned.cmp(&other.num_assigned))
    }
}

pub struct SearchResult<'p> {
    pub state: Option<State<'p>>,
    pub cost: i64,
}

/// Best-first branch-and-bound: expands partial assignments ordered by `f = g + h`, pruned by
/// the running incumbent bound `U`. Terminates when the frontier empties (the incumbent, if
/// any, is then optimal) or when `deadline` elapses (the incumbent is the best known so far).
pub fn solve<'p>(
    problem: &'p Problem,
    initial: State<'p>,
    static_candidates: &StaticCandidates,
    deadline: Duration,
    seed: Option<SeedResult<'p>>,
) -> SearchResult<'p> {
    let start = Instant::now();

    let mut best_cost = seed.as_ref().map_or(i64::MAX, |s| s.cost);
    let mut best_state = seed.map(|s| s.state);

    let mut frontier = BinaryHeap::new();
    let g0 = cost::partial_cost(problem, &initial).total();
    let h0 = heuristic::estimate(problem, &initial, static_candidates);
    frontier.push(Node {
        f: g0 + h0,
        num_assigned: initial.num_assigned(),
        state: initial,
    });

    let mut nodes_expanded = 0u64;

    while let Some(node) = frontier.pop() {
        if start.elapsed() > deadline {
            eprintln!(
                "search deadline of {:.0}s reached after expanding {nodes_expanded} nodes; returning best known incumbent",
                deadline.as_secs_f64()
            );
            break;
        }

        if node.f >= best_cost {
            continue;
        }

        if node.state.is_complete() {
            let objective = cost::grand_objective(problem, &node.state);
            if objective < best_cost {
                best_cost = objective;
                best_state = Some(node.state);
            }
            continue;
        }

        nodes_expanded += 1;

        let candidates = ordering::mrv_candidates(problem, &node.state, static_candidates);
        if candidates.is_empty() {
            continue;
        }
        let idx = ordering::pick_by_degree(problem, &candidates);
        let (section, valid_slots) = &candidates[idx];

        for &slot in valid_slots {
            let child = node.state.assign(*section, slot);
            let g = cost::partial_cost(problem, &child).total();
            let h = heuristic::estimate(problem, &child, static_candidates);
            let f = g + h;
            if f < best_cost {
                frontier.push(Node {
                    f,
                    num_assigned: child.num_assigned(),
                    state: child,
                });
            }
        }
    }

    SearchResult {
        state: best_state,
        cost: best_cost,
    }
}
