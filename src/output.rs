use std::io::{self, Write};

use crate::cost;
use crate::problem::Problem;
use crate::state::State;

/// Writes the success contract: `Eval-value: <int>` followed by one `<section-id> : <slot-id>`
/// line per section, sorted ascending by section-id so output is deterministic regardless of
/// the order sections were assigned in.
pub fn write_solution(mut out: impl Write, problem: &Problem, solution: &State) -> io::Result<()> {
    let objective = cost::grand_objective(problem, solution);
    writeln!(out, "Eval-value: {objective}")?;

    let mut pairs: Vec<_> = solution.assigned_pairs().collect();
    pairs.sort_by(|&(a, _), &(b, _)| {
        problem
            .section(a)
            .identifier
            .cmp(&problem.section(b).identifier)
    });

    for (section, slot) in pairs {
        writeln!(
            out,
            "{} : {}",
            problem.section(section).identifier,
            problem.slot(slot).identifier
        )?;
    }
    Ok(())
}

pub fn write_no_solution(mut out: impl Write) -> io::Result<()> {
    writeln!(out, "No solution found.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Weights;
    use crate::section::{Section, SectionId};
    use crate::slot::{Slot, SlotId, SlotKind};
    use crate::utils::{Day, TimeOfDay};
    use std::collections::BTreeSet;

    #[test]
    fn formats_the_trivial_scenario() {
        let slots = vec![Slot::new(
            SlotId::from_index(0),
            SlotKind::Lecture,
            Day::Mo,
            TimeOfDay::new(8, 0),
            1,
            0,
            0,
        )];
        let section = Section::new(SectionId::from_index(0), "X 100 LEC 01", false).unwrap();
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
            Weights {
                w_minfilled: 0,
                w_pref: 0,
                w_pair: 0,
                w_secdiff: 0,
                pen_lecturemin: 0,
                pen_tutorialmin: 0,
                pen_notpaired: 0,
                pen_section: 0,
            },
        );
        let state = State::empty(&problem).assign(SectionId::from_index(0), SlotId::from_index(0));

        let mut buffer = Vec::new();
        write_solution(&mut buffer, &problem, &state).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Eval-value: 0\nX 100 LEC 01 : MO, 8:00\n"
        );
    }

    #[test]
    fn sorts_by_section_identifier_not_by_assignment_order() {
        let slots = vec![Slot::new(
            SlotId::from_index(0),
            SlotKind::Lecture,
            Day::Mo,
            TimeOfDay::new(8, 0),
            2,
            0,
            0,
        )];
        // SectionId(0) is "CPSC 533" and SectionId(1) is "CPSC 433", the reverse of their
        // string-identifier order, as would happen if the input file listed 533 before 433.
        let later_by_id = Section::new(SectionId::from_index(0), "CPSC 533 LEC 01", false).unwrap();
        let earlier_by_id = Section::new(SectionId::from_index(1), "CPSC 433 LEC 01", false).unwrap();
        let problem = Problem::new(
            slots,
            1,
            vec![later_by_id, earlier_by_id],
            2,
            vec![BTreeSet::new(), BTreeSet::new()],
            vec![BTreeSet::new(), BTreeSet::new()],
            vec![vec![], vec![]],
            vec![],
            vec![None, None],
            Weights {
                w_minfilled: 0,
                w_pref: 0,
                w_pair: 0,
                w_secdiff: 0,
                pen_lecturemin: 0,
                pen_tutorialmin: 0,
                pen_notpaired: 0,
                pen_section: 0,
            },
        );
        let state = State::empty(&problem)
            .assign(SectionId::from_index(0), SlotId::from_index(0))
            .assign(SectionId::from_index(1), SlotId::from_index(0));

        let mut buffer = Vec::new();
        write_solution(&mut buffer, &problem, &state).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let cpsc_433_line = output.find("CPSC 433").unwrap();
        let cpsc_533_line = output.find("CPSC 533").unwrap();
        assert!(cpsc_433_line < cpsc_533_line);
    }

    #[test]
    fn no_solution_message_matches_the_contract() {
        let mut buffer = Vec::new();
        write_no_solution(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "No solution found.\n");
    }
}
