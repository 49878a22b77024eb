use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};
use crate::section::{Section, SectionId};
use crate::slot::{Slot, SlotId, SlotKind};
use crate::utils::{Day, TimeOfDay};

/// Everything the input file determines, short of the eight CLI weights -- those are supplied
/// separately and folded in by the caller to build a `Problem`.
pub struct ParsedInput {
    pub slots: Vec<Slot>,
    pub num_lecture_slots: usize,
    pub sections: Vec<Section>,
    pub num_lecture_sections: usize,
    pub incompatible_adjacency: Vec<BTreeSet<SectionId>>,
    pub unwanted: Vec<BTreeSet<SlotId>>,
    pub preferences: Vec<Vec<(SlotId, i64)>>,
    pub pairs: Vec<(SectionId, SectionId)>,
    pub partial_assignments: Vec<Option<SlotId>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Name,
    LectureSlots,
    TutorialSlots,
    Lectures,
    Tutorials,
    NotCompatible,
    Unwanted,
    Preferences,
    Pair,
    PartialAssignments,
}

fn header_mode(line: &str) -> Option<Mode> {
    Some(match line {
        "Name:" => Mode::Name,
        "Lecture slots:" => Mode::LectureSlots,
        "Tutorial slots:" => Mode::TutorialSlots,
        "Lectures:" => Mode::Lectures,
        "Tutorials:" => Mode::Tutorials,
        "Not compatible:" => Mode::NotCompatible,
        "Unwanted:" => Mode::Unwanted,
        "Preferences:" => Mode::Preferences,
        "Pair:" => Mode::Pair,
        "Partial assignments:" => Mode::PartialAssignments,
        _ => return None,
    })
}

struct Row<'a> {
    section: &'static str,
    line_no: usize,
    raw: &'a str,
}

impl<'a> Row<'a> {
    fn fields(&self, expected: usize) -> Result<Vec<&'a str>> {
        let parts: Vec<&str> = self.raw.split(',').map(str::trim).collect();
        if parts.len() != expected {
            return Err(Error::RowFieldCount {
                section: self.section.into(),
                line_no: self.line_no,
                expected,
                got: parts.len(),
                raw: self.raw.into(),
            });
        }
        Ok(parts)
    }

    fn parse<T: std::str::FromStr>(&self, field: &str, value: &str) -> Result<T> {
        value.parse().map_err(|_| Error::RowFieldParse {
            section: self.section.into(),
            line_no: self.line_no,
            field: field.into(),
            raw: self.raw.into(),
        })
    }
}

pub fn parse(path: &Path) -> Result<ParsedInput> {
    let contents = fs::read_to_string(path).map_err(|io_error| Error::FailedToReadInput {
        path: path.display().to_string(),
        io_error,
    })?;
    parse_str(&contents)
}

fn parse_str(contents: &str) -> Result<ParsedInput> {
    let mut mode: Option<Mode> = None;

    let mut lecture_slot_rows = Vec::new();
    let mut tutorial_slot_rows = Vec::new();
    let mut lecture_section_rows = Vec::new();
    let mut tutorial_section_rows = Vec::new();
    let mut not_compatible_rows = Vec::new();
    let mut unwanted_rows = Vec::new();
    let mut preference_rows = Vec::new();
    let mut pair_rows = Vec::new();
    let mut partial_assignment_rows = Vec::new();

    for (line_no0, raw_line) in contents.lines().enumerate() {
        let line_no = line_no0 + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(new_mode) = header_mode(line) {
            mode = Some(new_mode);
            continue;
        }

        match mode {
            None | Some(Mode::Name) => {}
            Some(Mode::LectureSlots) => lecture_slot_rows.push((line_no, line)),
            Some(Mode::TutorialSlots) => tutorial_slot_rows.push((line_no, line)),
            Some(Mode::Lectures) => lecture_section_rows.push((line_no, line)),
            Some(Mode::Tutorials) => tutorial_section_rows.push((line_no, line)),
            Some(Mode::NotCompatible) => not_compatible_rows.push((line_no, line)),
            Some(Mode::Unwanted) => unwanted_rows.push((line_no, line)),
            Some(Mode::Preferences) => preference_rows.push((line_no, line)),
            Some(Mode::Pair) => pair_rows.push((line_no, line)),
            Some(Mode::PartialAssignments) => partial_assignment_rows.push((line_no, line)),
        }
    }

    let mut slots = Vec::with_capacity(lecture_slot_rows.len() + tutorial_slot_rows.len());
    let mut slot_lookup: HashMap<(Box<str>, SlotKind), SlotId> = HashMap::new();
    for (kind, rows) in [
        (SlotKind::Lecture, &lecture_slot_rows),
        (SlotKind::Tutorial, &tutorial_slot_rows),
    ] {
        for &(line_no, raw) in rows {
            let slot = parse_slot_row(kind, slots.len(), line_no, raw)?;
            slot_lookup.insert((slot.identifier.clone(), slot.kind), slot.slot_id);
            slots.push(slot);
        }
    }
    let num_lecture_slots = lecture_slot_rows.len();

    let mut sections = Vec::with_capacity(lecture_section_rows.len() + tutorial_section_rows.len());
    let mut section_lookup: HashMap<Box<str>, SectionId> = HashMap::new();
    for (section_name, rows) in [
        ("Lectures", &lecture_section_rows),
        ("Tutorials", &tutorial_section_rows),
    ] {
        for &(line_no, raw) in rows {
            let section = parse_section_row(section_name, sections.len(), line_no, raw)?;
            section_lookup.insert(section.identifier.clone(), section.section_id);
            sections.push(section);
        }
    }
    let num_lecture_sections = lecture_section_rows.len();

    let mut incompatible_adjacency = vec![BTreeSet::new(); sections.len()];
    for &(line_no, raw) in &not_compatible_rows {
        let row = Row { section: "Not compatible", line_no, raw };
        let fields = row.fields(2)?;
        if let (Some(&a), Some(&b)) = (section_lookup.get(fields[0]), section_lookup.get(fields[1])) {
            incompatible_adjacency[a.raw_index()].insert(b);
            incompatible_adjacency[b.raw_index()].insert(a);
        }
    }

    let mut unwanted = vec![BTreeSet::new(); sections.len()];
    for &(line_no, raw) in &unwanted_rows {
        let row = Row { section: "Unwanted", line_no, raw };
        let fields = row.fields(3)?;
        let Some(&section_id) = section_lookup.get(fields[0]) else {
            continue;
        };
        let day: Day = row.parse("day", fields[1])?;
        let time: TimeOfDay = row.parse("time", fields[2])?;
        let slot_kind = sections[section_id.raw_index()].slot_kind();
        if let Some(&slot_id) = slot_lookup.get(&(slot_identifier(day, time), slot_kind)) {
            unwanted[section_id.raw_index()].insert(slot_id);
        }
    }

    let mut preferences: Vec<Vec<(SlotId, i64)>> = vec![Vec::new(); sections.len()];
    for &(line_no, raw) in &preference_rows {
        let row = Row { section: "Preferences", line_no, raw };
        let fields = row.fields(4)?;
        let day: Day = row.parse("day", fields[0])?;
        let time: TimeOfDay = row.parse("time", fields[1])?;
        let Some(&section_id) = section_lookup.get(fields[2]) else {
            continue;
        };
        let value: i64 = row.parse("value", fields[3])?;
        let slot_kind = sections[section_id.raw_index()].slot_kind();
        if let Some(&slot_id) = slot_lookup.get(&(slot_identifier(day, time), slot_kind)) {
            preferences[section_id.raw_index()].push((slot_id, value));
        }
    }

    let mut pairs = Vec::new();
    for &(line_no, raw) in &pair_rows {
        let row = Row { section: "Pair", line_no, raw };
        let fields = row.fields(2)?;
        if let (Some(&a), Some(&b)) = (section_lookup.get(fields[0]), section_lookup.get(fields[1])) {
            pairs.push((a, b));
        }
    }

    let mut partial_assignments: Vec<Option<SlotId>> = vec![None; sections.len()];
    for &(line_no, raw) in &partial_assignment_rows {
        let row = Row { section: "Partial assignments", line_no, raw };
        let fields = row.fields(3)?;
        let Some(&section_id) = section_lookup.get(fields[0]) else {
            continue;
        };
        let day: Day = row.parse("day", fields[1])?;
        let time: TimeOfDay = row.parse("time", fields[2])?;
        let slot_kind = sections[section_id.raw_index()].slot_kind();
        let identifier = slot_identifier(day, time);
        match slot_lookup.get(&(identifier.clone(), slot_kind)) {
            Some(&slot_id) => partial_assignments[section_id.raw_index()] = Some(slot_id),
            None => {
                return Err(Error::PartialAssignmentUnknownSlot {
                    section: fields[0].into(),
                    slot_id: identifier.to_string(),
                })
            }
        }
    }

    Ok(ParsedInput {
        slots,
        num_lecture_slots,
        sections,
        num_lecture_sections,
        incompatible_adjacency,
        unwanted,
        preferences,
        pairs,
        partial_assignments,
    })
}

fn slot_identifier(day: Day, time: TimeOfDay) -> Box<str> {
    format!("{day}, {time}").into_boxed_str()
}

fn parse_slot_row(kind: SlotKind, index: usize, line_no: usize, raw: &str) -> Result<Slot> {
    let row = Row {
        section: if kind == SlotKind::Lecture { "Lecture slots" } else { "Tutorial slots" },
        line_no,
        raw,
    };
    let fields = row.fields(5)?;
    let day: Day = row.parse("day", fields[0])?;
    let start: TimeOfDay = row.parse("start-time", fields[1])?;
    let capacity_max: u32 = row.parse("capacity-max", fields[2])?;
    let min_filled: u32 = row.parse("min-filled", fields[3])?;
    let al_capacity: u32 = row.parse("al-capacity", fields[4])?;

    Ok(Slot::new(SlotId::from_index(index), kind, day, start, capacity_max, min_filled, al_capacity))
}

fn parse_section_row(section_name: &'static str, index: usize, line_no: usize, raw: &str) -> Result<Section> {
    let row = Row { section: section_name, line_no, raw };
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let (identifier, active_learning_required) = match parts.as_slice() {
        [identifier] => (*identifier, false),
        [identifier, flag] => {
            let al: bool = row.parse("active-learning flag", flag)?;
            (*identifier, al)
        }
        _ => {
            return Err(Error::RowFieldCount {
                section: section_name.into(),
                line_no,
                expected: 2,
                got: parts.len(),
                raw: raw.into(),
            })
        }
    };

    Section::new(SectionId::from_index(index), identifier, active_learning_required).ok_or_else(|| {
        Error::RowFieldParse {
            section: section_name.into(),
            line_no,
            field: "section-id".into(),
            raw: raw.into(),
        }
    })
}
