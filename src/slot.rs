use std::fmt;

use bit_set::BitSet;

use crate::utils::{Day, TimeInterval, TimeOfDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Lecture,
    Tutorial,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SlotKind::Lecture => "lecture",
            SlotKind::Tutorial => "tutorial",
        })
    }
}

/// Dense index into `Problem::slots`. Lecture slots are numbered first, then tutorial slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(u16);

impl SlotId {
    pub fn from_index(index: usize) -> Self {
        SlotId(index as u16)
    }

    pub fn raw_index(self) -> usize {
        self.0 as usize
    }
}

fn duration_minutes(day: Day) -> u32 {
    match day {
        Day::Tu | Day::Th => 90,
        Day::Mo | Day::We | Day::Fr => 60,
    }
}

fn occurrence_days(kind: SlotKind, day: Day) -> &'static [Day] {
    match (kind, day) {
        (SlotKind::Lecture, Day::Mo) => &[Day::Mo, Day::We, Day::Fr],
        (SlotKind::Lecture, Day::Tu) => &[Day::Tu, Day::Th],
        (SlotKind::Tutorial, Day::Mo) => &[Day::Mo, Day::We],
        (SlotKind::Tutorial, Day::Tu) => &[Day::Tu, Day::Th],
        (_, Day::We) => &[Day::We],
        (_, Day::Th) => &[Day::Th],
        (_, Day::Fr) => &[Day::Fr],
    }
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub slot_id: SlotId,
    pub kind: SlotKind,
    pub day: Day,
    pub start: TimeOfDay,
    pub capacity_max: u32,
    pub min_filled: u32,
    pub al_capacity: u32,
    pub identifier: Box<str>,
    occurrences: Box<[(Day, TimeInterval)]>,
}

impl Slot {
    pub fn new(
        slot_id: SlotId,
        kind: SlotKind,
        day: Day,
        start: TimeOfDay,
        capacity_max: u32,
        min_filled: u32,
        al_capacity: u32,
    ) -> Self {
        let duration = duration_minutes(day);
        let start_min = start.minutes_since_midnight();
        let interval = TimeInterval {
            start: start_min,
            end: start_min + duration,
        };
        let occurrences = occurrence_days(kind, day)
            .iter()
            .map(|&d| (d, interval))
            .collect();

        Slot {
            slot_id,
            kind,
            day,
            start,
            capacity_max,
            min_filled,
            al_capacity,
            identifier: format!("{day}, {start}").into_boxed_str(),
            occurrences,
        }
    }

    pub fn overlaps(&self, other: &Slot) -> bool {
        self.occurrences.iter().any(|&(day, interval)| {
            other
                .occurrences
                .iter()
                .any(|&(other_day, other_interval)| {
                    day == other_day && interval.overlaps(other_interval)
                })
        })
    }
}

/// Precomputed pairwise overlap between every slot of every kind, keyed by the dense
/// `SlotId` numbering shared across lecture and tutorial slots (mirrors the teacher's
/// session-overlap bitset, but over timetable slots instead of instructor sessions).
pub struct OverlapMatrix {
    num_slots: usize,
    overlaps: BitSet,
}

impl OverlapMatrix {
    fn index(num_slots: usize, a: SlotId, b: SlotId) -> usize {
        a.raw_index() * num_slots + b.raw_index()
    }

    pub fn build(slots: &[Slot]) -> Self {
        let num_slots = slots.len();
        let mut overlaps = BitSet::with_capacity(num_slots * num_slots);

        for a in slots {
            for b in slots {
                if a.overlaps(b) {
                    overlaps.insert(Self::index(num_slots, a.slot_id, b.slot_id));
                }
            }
        }

        OverlapMatrix { num_slots, overlaps }
    }

    pub fn is_overlap(&self, a: SlotId, b: SlotId) -> bool {
        self.overlaps.contains(Self::index(self.num_slots, a, b))
    }
}
