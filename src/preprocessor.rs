use crate::errors::{Error, Result};
use crate::problem::Problem;
use crate::section::SectionId;
use crate::slot::SlotId;

/// For each section, the ordered list of slots that pass the purely static (state-independent)
/// constraints: matching kind, not unwanted, and -- for evening sections -- an hour of 18 or
/// later. Every dynamic rule lives in the checker instead.
pub struct StaticCandidates {
    by_section: Vec<Vec<SlotId>>,
}

impl StaticCandidates {
    pub fn compute(problem: &Problem) -> Result<Self> {
        let mut by_section = Vec::with_capacity(problem.num_sections());

        for section in &problem.sections {
            let unwanted = &problem.unwanted[section.section_id.raw_index()];
            let candidates: Vec<SlotId> = problem
                .slots_of_kind(section.slot_kind())
                .iter()
                .filter(|slot| !unwanted.contains(&slot.slot_id))
                .filter(|slot| !section.is_evening() || slot.start.hour() >= 18)
                .map(|slot| slot.slot_id)
                .collect();

            if candidates.is_empty() {
                return Err(Error::NoStaticCandidates {
                    id: section.identifier.to_string(),
                });
            }

            by_section.push(candidates);
        }

        Ok(StaticCandidates { by_section })
    }

    pub fn for_section(&self, section: SectionId) -> &[SlotId] {
        &self.by_section[section.raw_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Weights;
    use crate::section::Section;
    use crate::slot::{Slot, SlotKind};
    use crate::utils::{Day, TimeOfDay};
    use std::collections::BTreeSet;

    fn weights() -> Weights {
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
    fn evening_section_only_keeps_late_slots() {
        let slots = vec![
            Slot::new(
                SlotId::from_index(0),
                SlotKind::Lecture,
                Day::Mo,
                TimeOfDay::new(8, 0),
                5,
                0,
                0,
            ),
            Slot::new(
                SlotId::from_index(1),
                SlotKind::Lecture,
                Day::Tu,
                TimeOfDay::new(18, 0),
                5,
                0,
                0,
            ),
        ];
        let section = Section::new(SectionId::from_index(0), "CPSC 433 LEC 91", false).unwrap();
        let problem = Problem::new(
            slots,
            2,
            vec![section],
            1,
            vec![BTreeSet::new()],
            vec![BTreeSet::new()],
            vec![vec![]],
            vec![],
            vec![None],
            weights(),
        );

        let candidates = StaticCandidates::compute(&problem).unwrap();
        assert_eq!(candidates.for_section(SectionId::from_index(0)).len(), 1);
    }

    #[test]
    fn section_with_every_slot_unwanted_is_infeasible() {
        let slots = vec![Slot::new(
            SlotId::from_index(0),
            SlotKind::Lecture,
            Day::Mo,
            TimeOfDay::new(8, 0),
            5,
            0,
            0,
        )];
        let section = Section::new(SectionId::from_index(0), "CPSC 433 LEC 01", false).unwrap();
        let mut unwanted = BTreeSet::new();
        unwanted.insert(SlotId::from_index(0));
        let problem = Problem::new(
            slots,
            1,
            vec![section],
            1,
            vec![BTreeSet::new()],
            vec![unwanted],
            vec![vec![]],
            vec![],
            vec![None],
            weights(),
        );

        assert!(StaticCandidates::compute(&problem).is_err());
    }
}
