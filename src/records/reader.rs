use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::allocation::{
    error::{AllocationError, invalid_input, io_error},
    types::{Dimensions, Member, PriorityClass, Slip},
};

#[derive(Debug, Deserialize)]
struct MemberRow {
    member_id: String,
    boat_length_ft: u32,
    boat_length_in: u32,
    boat_width_ft: u32,
    boat_width_in: u32,
    #[serde(default)]
    current_slip: Option<String>,
    dock_status: String,
}

#[derive(Debug, Deserialize)]
struct SlipRow {
    slip_id: String,
    max_length_ft: u32,
    max_length_in: u32,
    max_width_ft: u32,
    max_width_in: u32,
}

pub fn read_members(path: &Path) -> Result<Vec<Member>, AllocationError> {
    read_members_from(open(path)?).map_err(|err| with_source(err, path))
}

pub fn read_slips(path: &Path) -> Result<Vec<Slip>, AllocationError> {
    read_slips_from(open(path)?).map_err(|err| with_source(err, path))
}

pub fn read_members_from<R: Read>(source: R) -> Result<Vec<Member>, AllocationError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let mut members = Vec::new();

    for (index, result) in reader.deserialize::<MemberRow>().enumerate() {
        let line = index + 2;
        let row = result.map_err(|err| row_error(err, line))?;
        let priority_class = row
            .dock_status
            .parse::<PriorityClass>()
            .map_err(|err| invalid_input(format!("line {line}: {err}")))?;
        let current_slip = row.current_slip.filter(|slip_id| !slip_id.is_empty());

        members.push(Member::new(
            row.member_id,
            Dimensions::from_feet_inches(
                row.boat_length_ft,
                row.boat_length_in,
                row.boat_width_ft,
                row.boat_width_in,
            ),
            current_slip.as_deref(),
            priority_class,
        ));
    }

    tracing::debug!(target: "records", members = members.len(), "members_loaded");
    Ok(members)
}

pub fn read_slips_from<R: Read>(source: R) -> Result<Vec<Slip>, AllocationError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let mut slips = Vec::new();

    for (index, result) in reader.deserialize::<SlipRow>().enumerate() {
        let row = result.map_err(|err| row_error(err, index + 2))?;
        slips.push(Slip::new(
            row.slip_id,
            Dimensions::from_feet_inches(
                row.max_length_ft,
                row.max_length_in,
                row.max_width_ft,
                row.max_width_in,
            ),
        ));
    }

    tracing::debug!(target: "records", slips = slips.len(), "slips_loaded");
    Ok(slips)
}

fn open(path: &Path) -> Result<File, AllocationError> {
    File::open(path).map_err(|err| io_error(format!("cannot open {}: {err}", path.display())))
}

fn row_error(err: csv::Error, line: usize) -> AllocationError {
    if err.is_io_error() {
        io_error(format!("line {line}: {err}"))
    } else {
        invalid_input(format!("line {line}: {err}"))
    }
}

fn with_source(err: AllocationError, path: &Path) -> AllocationError {
    AllocationError::new(err.kind, format!("{}: {}", path.display(), err.message))
}
