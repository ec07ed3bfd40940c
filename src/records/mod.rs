//! CSV and JSON adapters around the allocation engine.

pub mod reader;
pub mod writer;

pub use reader::{read_members, read_members_from, read_slips, read_slips_from};
pub use writer::{
    ASSIGNMENT_HEADER, ASSIGNMENTS_END_MARKER, ASSIGNMENTS_START_MARKER, write_assignments_csv,
    write_assignments_json,
};
