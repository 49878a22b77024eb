use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use checker::is_valid;
use errors::Error;
use preprocessor::StaticCandidates;
use problem::{Problem, Weights};
use state::State;

mod checker;
mod cost;
mod errors;
mod greedy;
mod heuristic;
mod ordering;
mod output;
mod parser;
mod preprocessor;
mod problem;
mod search;
mod section;
mod slot;
mod state;
mod utils;

/// `input-file w_minfilled w_pref w_pair w_secdiff pen_lecturemin pen_tutorialmin pen_notpaired
/// pen_section`, plus two flags absent from the historical positional interface.
#[derive(Debug, Parser)]
struct Args {
    input_file: PathBuf,
    w_minfilled: i64,
    w_pref: i64,
    w_pair: i64,
    w_secdiff: i64,
    pen_lecturemin: i64,
    pen_tutorialmin: i64,
    pen_notpaired: i64,
    pen_section: i64,

    /// Wall-clock budget for the branch-and-bound search, in seconds.
    #[arg(long, default_value_t = 300)]
    deadline_secs: u64,

    /// Seed for the randomized greedy restarts, kept fixed by default so a run is reproducible.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

/// Applies forced partial assignments in file order, failing fast if one of them violates a
/// hard rule against the assignments already applied -- mirrors the dynamic checker rather than
/// treating forced assignments as exempt from it.
fn apply_partial_assignments<'p>(problem: &'p Problem, mut state: State<'p>) -> Result<State<'p>> {
    for section in &problem.sections {
        let Some(slot_id) = problem.partial_assignments[section.section_id.raw_index()] else {
            continue;
        };
        let slot = problem.slot(slot_id);
        if !is_valid(problem, &state, section, slot) {
            return Err(Error::PartialAssignmentInfeasible {
                section: section.identifier.to_string(),
                slot_id: slot.identifier.to_string(),
            }
            .into());
        }
        state = state.assign(section.section_id, slot_id);
    }
    Ok(state)
}

fn main_impl() -> Result<()> {
    let args = Args::parse();

    if args.pen_lecturemin != 0 || args.pen_tutorialmin != 0 {
        eprintln!(
            "warning: pen_lecturemin/pen_tutorialmin are accepted for compatibility but are not used by the cost function"
        );
    }

    let parsed = parser::parse(&args.input_file)?;
    eprintln!(
        "loaded {} lecture section(s), {} tutorial/lab section(s), {} lecture slot(s), {} tutorial slot(s)",
        parsed.num_lecture_sections,
        parsed.sections.len() - parsed.num_lecture_sections,
        parsed.num_lecture_slots,
        parsed.slots.len() - parsed.num_lecture_slots,
    );

    let weights = Weights {
        w_minfilled: args.w_minfilled,
        w_pref: args.w_pref,
        w_pair: args.w_pair,
        w_secdiff: args.w_secdiff,
        pen_lecturemin: args.pen_lecturemin,
        pen_tutorialmin: args.pen_tutorialmin,
        pen_notpaired: args.pen_notpaired,
        pen_section: args.pen_section,
    };

    let problem = Problem::new(
        parsed.slots,
        parsed.num_lecture_slots,
        parsed.sections,
        parsed.num_lecture_sections,
        parsed.incompatible_adjacency,
        parsed.unwanted,
        parsed.preferences,
        parsed.pairs,
        parsed.partial_assignments,
        weights,
    );

    let static_candidates = StaticCandidates::compute(&problem)?;
    let initial_state = apply_partial_assignments(&problem, State::empty(&problem))?;

    eprintln!("finding an initial feasible assignment by greedy depth-first search...");
    let seed_result = greedy::find_seed(&problem, &initial_state, &static_candidates, args.seed);
    match &seed_result {
        Some(seed) => eprintln!("greedy seed found with cost {}", seed.cost),
        None => eprintln!(
            "no greedy seed found after randomized restarts; branch-and-bound will run without an initial bound"
        ),
    }

    eprintln!(
        "starting branch-and-bound search (deadline {}s)...",
        args.deadline_secs
    );
    let result = search::solve(
        &problem,
        initial_state,
        &static_candidates,
        Duration::from_secs(args.deadline_secs),
        seed_result,
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match result.state {
        Some(state) => output::write_solution(&mut handle, &problem, &state)?,
        None => output::write_no_solution(&mut handle)?,
    }

    Ok(())
}

fn main() {
    if let Err(err) = main_impl() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
