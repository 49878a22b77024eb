use std::collections::{BTreeSet, HashMap};

use crate::section::{Section, SectionId};
use crate::slot::{OverlapMatrix, Slot, SlotId, SlotKind};

/// The eight weights supplied on the command line, in the order the CLI accepts them.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub w_minfilled: i64,
    pub w_pref: i64,
    pub w_pair: i64,
    pub w_secdiff: i64,
    pub pen_lecturemin: i64,
    pub pen_tutorialmin: i64,
    pub pen_notpaired: i64,
    pub pen_section: i64,
}

/// The fully-loaded, read-only problem instance. Every section and slot is interned into a
/// dense `SectionId`/`SlotId` so that search states can use plain `Vec` indexing instead of
/// hash lookups.
pub struct Problem {
    pub slots: Vec<Slot>,
    pub num_lecture_slots: usize,
    pub sections: Vec<Section>,
    pub num_lecture_sections: usize,
    pub overlap: OverlapMatrix,

    pub incompatible_adjacency: Vec<BTreeSet<SectionId>>,
    pub unwanted: Vec<BTreeSet<SlotId>>,
    pub preferences: Vec<Vec<(SlotId, i64)>>,
    pub pairs: Vec<(SectionId, SectionId)>,
    pub partial_assignments: Vec<Option<SlotId>>,

    pub weights: Weights,
    pub special_pairs: SpecialPairs,

    slot_lookup: HashMap<(Box<str>, SlotKind), SlotId>,
    section_lookup: HashMap<Box<str>, SectionId>,
}

/// The CPSC 351/851 and CPSC 413/913 paired-course rule (checker rule 10) is data-dependent:
/// it only fires when the department/course-number happens to appear in this particular
/// instance. Resolved once at load time instead of re-scanning every section on every
/// checker call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialPairs {
    pub cpsc_351: Option<SectionId>,
    pub cpsc_851: Option<SectionId>,
    pub cpsc_413: Option<SectionId>,
    pub cpsc_913: Option<SectionId>,
    pub special_slot: Option<SlotId>,
}

impl SpecialPairs {
    fn find(sections: &[Section], dept: &str, number: u32) -> Option<SectionId> {
        sections
            .iter()
            .find(|s| &*s.department == dept && s.course_number == number)
            .map(|s| s.section_id)
    }

    fn compute(lecture_sections: &[Section], slot_lookup: &HashMap<(Box<str>, SlotKind), SlotId>) -> Self {
        SpecialPairs {
            cpsc_351: Self::find(lecture_sections, "CPSC", 351),
            cpsc_851: Self::find(lecture_sections, "CPSC", 851),
            cpsc_413: Self::find(lecture_sections, "CPSC", 413),
            cpsc_913: Self::find(lecture_sections, "CPSC", 913),
            special_slot: slot_lookup
                .get(&(Box::from("TU, 18:00"), SlotKind::Lecture))
                .copied(),
        }
    }
}

impl Problem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        slots: Vec<Slot>,
        num_lecture_slots: usize,
        sections: Vec<Section>,
        num_lecture_sections: usize,
        incompatible_adjacency: Vec<BTreeSet<SectionId>>,
        unwanted: Vec<BTreeSet<SlotId>>,
        preferences: Vec<Vec<(SlotId, i64)>>,
        pairs: Vec<(SectionId, SectionId)>,
        partial_assignments: Vec<Option<SlotId>>,
        weights: Weights,
    ) -> Self {
        let overlap = OverlapMatrix::build(&slots);

        let slot_lookup = slots
            .iter()
            .map(|s| ((s.identifier.clone(), s.kind), s.slot_id))
            .collect();
        let section_lookup = sections
            .iter()
            .map(|s| (s.identifier.clone(), s.section_id))
            .collect();
        let special_pairs = SpecialPairs::compute(&sections[..num_lecture_sections], &slot_lookup);

        Problem {
            slots,
            num_lecture_slots,
            sections,
            num_lecture_sections,
            overlap,
            incompatible_adjacency,
            unwanted,
            preferences,
            pairs,
            partial_assignments,
            weights,
            special_pairs,
            slot_lookup,
            section_lookup,
        }
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id.raw_index()]
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.raw_index()]
    }

    pub fn lecture_slots(&self) -> &[Slot] {
        &self.slots[..self.num_lecture_slots]
    }

    pub fn tutorial_slots(&self) -> &[Slot] {
        &self.slots[self.num_lecture_slots..]
    }

    pub fn lecture_sections(&self) -> &[Section] {
        &self.sections[..self.num_lecture_sections]
    }

    pub fn tutorial_sections(&self) -> &[Section] {
        &self.sections[self.num_lecture_sections..]
    }

    pub fn slots_of_kind(&self, kind: SlotKind) -> &[Slot] {
        match kind {
            SlotKind::Lecture => self.lecture_slots(),
            SlotKind::Tutorial => self.tutorial_slots(),
        }
    }

    pub fn find_slot(&self, identifier: &str, kind: SlotKind) -> Option<SlotId> {
        self.slot_lookup.get(&(identifier.into(), kind)).copied()
    }

    pub fn find_section(&self, identifier: &str) -> Option<SectionId> {
        self.section_lookup.get(identifier).copied()
    }

    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }
}
