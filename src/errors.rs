use std::{io, result};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input file {path}: {io_error}")]
    FailedToReadInput { path: String, io_error: io::Error },

    #[error("line {line_no} ({section}): expected {expected} fields, got {got}: {raw:?}")]
    RowFieldCount {
        section: String,
        line_no: usize,
        expected: usize,
        got: usize,
        raw: String,
    },

    #[error("line {line_no} ({section}): could not parse {field} from {raw:?}")]
    RowFieldParse {
        section: String,
        line_no: usize,
        field: String,
        raw: String,
    },

    #[error(
        "section {id} has no statically valid slot (every candidate is unwanted or excluded by the evening rule)"
    )]
    NoStaticCandidates { id: String },

    #[error("partial assignment for {section} references unknown slot {slot_id:?}")]
    PartialAssignmentUnknownSlot { section: String, slot_id: String },

    #[error("partial assignment {section} -> {slot_id:?} violates a hard constraint")]
    PartialAssignmentInfeasible { section: String, slot_id: String },
}

pub type Result<T> = result::Result<T, Error>;
