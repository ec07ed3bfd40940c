use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::allocation::{
    error::{AllocationError, io_error},
    summary::AllocationSummary,
    types::Assignment,
};

pub const ASSIGNMENT_HEADER: [&str; 11] = [
    "member_id",
    "assigned_slip",
    "status",
    "dock_status",
    "boat_length_ft",
    "boat_length_in",
    "boat_width_ft",
    "boat_width_in",
    "price",
    "upgraded",
    "comment",
];

pub const ASSIGNMENTS_START_MARKER: &str = ">>>>>>>>>>>>>>>>>>>>>>>>>>>ASSIGNMENTS START";
pub const ASSIGNMENTS_END_MARKER: &str = ">>>>>>>>>>>>>>>>>>>>>>>>>>>ASSIGNMENTS END";

#[derive(Serialize)]
struct AssignmentDocument<'a> {
    assignments: &'a [Assignment],
    summary: &'a AllocationSummary,
}

/// Writes the assignment sheet. Comments are quoted by hand, so the writer never quotes.
pub fn write_assignments_csv<W: Write>(
    sink: W,
    assignments: &[Assignment],
) -> Result<(), AllocationError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(sink);

    writer.write_record(ASSIGNMENT_HEADER).map_err(csv_error)?;
    for assignment in assignments {
        writer
            .write_record(assignment_record(assignment))
            .map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|err| io_error(format!("failed to flush assignments: {err}")))
}

pub fn write_assignments_json<W: Write>(
    mut sink: W,
    assignments: &[Assignment],
    summary: &AllocationSummary,
) -> Result<(), AllocationError> {
    serde_json::to_writer_pretty(
        &mut sink,
        &AssignmentDocument {
            assignments,
            summary,
        },
    )
    .map_err(|err| io_error(format!("failed to write assignments: {err}")))?;
    writeln!(sink).map_err(|err| io_error(format!("failed to write assignments: {err}")))
}

fn assignment_record(assignment: &Assignment) -> [String; 11] {
    let (length_ft, length_in) = assignment.requested_dimensions.length_feet_inches();
    let (width_ft, width_in) = assignment.requested_dimensions.width_feet_inches();

    [
        assignment.member_id.clone(),
        assignment.slip_id.clone().unwrap_or_default(),
        assignment.outcome.label().to_string(),
        assignment.priority_class.dock_status().to_string(),
        length_ft.to_string(),
        length_in.to_string(),
        width_ft.to_string(),
        width_in.to_string(),
        format!("{:.2}", assignment.price),
        assignment.was_promoted.to_string(),
        quote_comment(&assignment.comment),
    ]
}

fn quote_comment(comment: &str) -> String {
    if comment.is_empty() {
        return String::new();
    }
    format!("\"{}\"", comment.replace('"', "\"\""))
}

fn csv_error(err: csv::Error) -> AllocationError {
    io_error(format!("failed to write assignments: {err}"))
}
