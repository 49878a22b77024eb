use crate::problem::Problem;
use crate::section::{Section, SectionId, SectionKind};
use crate::slot::Slot;
use crate::state::State;
use crate::utils::Day;

/// Whether assigning `section` to `slot` leaves `state` feasible under every hard rule. Pure
/// and total: a violated rule is reported as `false`, never as an error. Order matches the
/// specification; a different order would not change the outcome since every rule only looks
/// at already-assigned sections, but fastest-to-fail checks are placed first.
pub fn is_valid(problem: &Problem, state: &State, section: &Section, slot: &Slot) -> bool {
    // 1. Capacity.
    if state.usage(slot.slot_id).of_kind(section.kind) >= slot.capacity_max {
        return false;
    }

    // 2. Active learning.
    if section.active_learning_required {
        if slot.al_capacity == 0 {
            return false;
        }
        if state.al_usage(slot.slot_id) >= slot.al_capacity {
            return false;
        }
    }

    // 3. Lecture/tutorial non-overlap.
    match section.kind {
        SectionKind::Tutorial | SectionKind::Lab => {
            if let Some(parent_id) = &section.parent_lecture_id {
                if let Some(parent) = problem.find_section(parent_id) {
                    if let Some(parent_slot) = state.assignment(parent) {
                        if slot.overlaps(problem.slot(parent_slot)) {
                            return false;
                        }
                    }
                }
            }
        }
        SectionKind::Lecture => {
            for (assigned_section, assigned_slot) in state.assigned_pairs() {
                let assigned = problem.section(assigned_section);
                if assigned.parent_lecture_id.as_deref() == Some(&*section.identifier)
                    && slot.overlaps(problem.slot(assigned_slot))
                {
                    return false;
                }
            }
        }
    }

    // 4. Incompatible pairs.
    for &incompatible in &problem.incompatible_adjacency[section.section_id.raw_index()] {
        if let Some(assigned_slot) = state.assignment(incompatible) {
            if slot.overlaps(problem.slot(assigned_slot)) {
                return false;
            }
        }
    }

    // 5. Unwanted.
    if problem.unwanted[section.section_id.raw_index()].contains(&slot.slot_id) {
        return false;
    }

    // 6. Partial assignment consistency.
    if let Some(required) = problem.partial_assignments[section.section_id.raw_index()] {
        if required != slot.slot_id {
            return false;
        }
    }

    // 7. 500-level exclusion.
    if section.is_500_level() && section.kind == SectionKind::Lecture {
        for &occupied in state.occupied_500_lecture_slots() {
            if slot.overlaps(problem.slot(occupied)) {
                return false;
            }
        }
    }

    // 8. Evening.
    if section.is_evening() && slot.start.hour() < 18 {
        return false;
    }

    // 9. Tuesday 11:00 lecture ban.
    if section.kind == SectionKind::Lecture
        && slot.day == Day::Tu
        && slot.start.hour() == 11
        && slot.start.minute() == 0
    {
        return false;
    }

    // 10. Special paired courses (CPSC 351/851, CPSC 413/913).
    if !check_special_pairs(problem, state, section, slot) {
        return false;
    }

    true
}

fn check_special_pairs(problem: &Problem, state: &State, section: &Section, slot: &Slot) -> bool {
    let sp = &problem.special_pairs;
    let is = |id: Option<SectionId>| id == Some(section.section_id);

    if is(sp.cpsc_851) && sp.cpsc_351.is_some() {
        match sp.special_slot {
            Some(special_id) if slot.slot_id == special_id => {}
            _ => return false,
        }
        if let Some(other_slot) = sp.cpsc_351.and_then(|c| state.assignment(c)) {
            if slot.overlaps(problem.slot(other_slot)) {
                return false;
            }
        }
    }

    if is(sp.cpsc_351) {
        if let Some(other_slot) = sp.cpsc_851.and_then(|c| state.assignment(c)) {
            if slot.overlaps(problem.slot(other_slot)) {
                return false;
            }
        }
    }

    if is(sp.cpsc_913) && sp.cpsc_413.is_some() {
        match sp.special_slot {
            Some(special_id) if slot.slot_id == special_id => {}
            _ => return false,
        }
        if let Some(other_slot) = sp.cpsc_413.and_then(|c| state.assignment(c)) {
            if slot.overlaps(problem.slot(other_slot)) {
                return false;
            }
        }
    }

    if is(sp.cpsc_413) {
        if let Some(other_slot) = sp.cpsc_913.and_then(|c| state.assignment(c)) {
            if slot.overlaps(problem.slot(other_slot)) {
                return false;
            }
        }
    }

    true
}
