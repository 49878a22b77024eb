use crate::problem::Problem;
use crate::section::{SectionId, SectionKind};
use crate::slot::SlotId;

#[derive(Debug, Clone, Copy, Default)]
pub struct SlotUsage {
    pub lecture: u32,
    pub tutorial: u32,
    pub lab: u32,
}

impl SlotUsage {
    pub fn total(self) -> u32 {
        self.lecture + self.tutorial + self.lab
    }

    pub fn of_kind(self, kind: SectionKind) -> u32 {
        match kind {
            SectionKind::Lecture => self.lecture,
            SectionKind::Tutorial => self.tutorial,
            SectionKind::Lab => self.lab,
        }
    }

    fn increment(&mut self, kind: SectionKind) {
        match kind {
            SectionKind::Lecture => self.lecture += 1,
            SectionKind::Tutorial => self.tutorial += 1,
            SectionKind::Lab => self.lab += 1,
        }
    }
}

/// A partial (or complete) assignment of sections to slots, plus the auxiliary counters the
/// checker and cost evaluator need to stay fast. States are produced by `assign`, never mutated
/// in place once shared, and are cheap to clone: every field is a flat `Box<[_]>` indexed by the
/// dense section/slot ids, so cloning costs O(sections + slots) rather than O(history).
#[derive(Clone)]
pub struct State<'p> {
    pub problem: &'p Problem,
    assignments: Box<[Option<SlotId>]>,
    slot_usage: Box<[SlotUsage]>,
    al_usage: Box<[u32]>,
    occupied_500_lecture_slots: Vec<SlotId>,
    num_assigned: usize,
}

impl<'p> State<'p> {
    pub fn empty(problem: &'p Problem) -> Self {
        State {
            problem,
            assignments: vec![None; problem.num_sections()].into_boxed_slice(),
            slot_usage: vec![SlotUsage::default(); problem.slots.len()].into_boxed_slice(),
            al_usage: vec![0; problem.slots.len()].into_boxed_slice(),
            occupied_500_lecture_slots: Vec::new(),
            num_assigned: 0,
        }
    }

    pub fn assignment(&self, section: SectionId) -> Option<SlotId> {
        self.assignments[section.raw_index()]
    }

    pub fn usage(&self, slot: SlotId) -> SlotUsage {
        self.slot_usage[slot.raw_index()]
    }

    pub fn al_usage(&self, slot: SlotId) -> u32 {
        self.al_usage[slot.raw_index()]
    }

    pub fn occupied_500_lecture_slots(&self) -> &[SlotId] {
        &self.occupied_500_lecture_slots
    }

    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.problem.num_sections()
    }

    pub fn unassigned_sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| SectionId::from_index(i))
    }

    pub fn assigned_pairs(&self) -> impl Iterator<Item = (SectionId, SlotId)> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|s| (SectionId::from_index(i), s)))
    }

    /// Returns a new state with `section` assigned to `slot`. Does not itself check hard
    /// constraints -- callers run the checker first.
    pub fn assign(&self, section: SectionId, slot: SlotId) -> State<'p> {
        let mut assignments = self.assignments.clone();
        assignments[section.raw_index()] = Some(slot);

        let mut slot_usage = self.slot_usage.clone();
        let kind = self.problem.section(section).kind;
        slot_usage[slot.raw_index()].increment(kind);

        let mut al_usage = self.al_usage.clone();
        if self.problem.section(section).active_learning_required {
            al_usage[slot.raw_index()] += 1;
        }

        let mut occupied_500_lecture_slots = self.occupied_500_lecture_slots.clone();
        let section_ref = self.problem.section(section);
        if section_ref.is_500_level() && section_ref.kind == SectionKind::Lecture {
            occupied_500_lecture_slots.push(slot);
        }

        State {
            problem: self.problem,
            assignments,
            slot_usage,
            al_usage,
            occupied_500_lecture_slots,
            num_assigned: self.num_assigned + 1,
        }
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

    fn trivial_problem() -> Problem {
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
        Problem::new(
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
        )
    }

    #[test]
    fn assign_is_a_pure_extension_not_a_mutation() {
        let problem = trivial_problem();
        let empty = State::empty(&problem);
        let extended = empty.assign(SectionId::from_index(0), SlotId::from_index(0));

        assert_eq!(empty.num_assigned(), 0);
        assert_eq!(extended.num_assigned(), 1);
        assert_eq!(
            extended.assignment(SectionId::from_index(0)),
            Some(SlotId::from_index(0))
        );
        assert!(extended.is_complete());
    }

    #[test]
    fn usage_counts_track_the_assigned_kind() {
        let problem = trivial_problem();
        let state = State::empty(&problem).assign(SectionId::from_index(0), SlotId::from_index(0));
        let usage = state.usage(SlotId::from_index(0));
        assert_eq!(usage.lecture, 1);
        assert_eq!(usage.tutorial, 0);
        assert_eq!(usage.total(), 1);
    }
}
