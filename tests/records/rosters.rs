use slipway::{
    allocation::{AllocationErrorKind, Dimensions, PriorityClass},
    records::{read_members, read_slips},
};

use super::{MEMBERS_CSV, SLIPS_CSV, WorkDir};

#[test]
fn given_roster_files_when_read_then_members_and_slips_load() {
    let work = WorkDir::new();
    let slips = read_slips(&work.write("slips.csv", SLIPS_CSV)).expect("slips should load");
    let members = read_members(&work.write("members.csv", MEMBERS_CSV)).expect("members should load");

    assert_eq!(slips.len(), 2);
    assert_eq!(slips[1].id, "S2");
    assert_eq!(slips[1].max_dimensions, Dimensions::from_feet_inches(25, 6, 12, 0));

    assert_eq!(members.len(), 4);
    assert_eq!(members[1].priority_class, PriorityClass::Locked);
    assert_eq!(members[2].current_slip_id, None);
    assert_eq!(members[3].priority_class, PriorityClass::OnLeave);
}

#[test]
fn given_missing_file_when_read_then_io_error_names_the_path() {
    let work = WorkDir::new();
    let missing = work.path().join("nope.csv");

    let err = read_slips(&missing).expect_err("missing file must fail");
    assert_eq!(err.kind, AllocationErrorKind::Io);
    assert!(err.message.contains("nope.csv"), "unexpected error: {err}");
}

#[test]
fn given_bad_dock_status_in_file_when_read_then_error_carries_path_and_line() {
    let work = WorkDir::new();
    let path = work.write(
        "members.csv",
        "member_id,boat_length_ft,boat_length_in,boat_width_ft,boat_width_in,current_slip,dock_status\n\
         M001,18,6,8,0,S1,seasonal\n",
    );

    let err = read_members(&path).expect_err("unknown dock status must fail");
    assert_eq!(err.kind, AllocationErrorKind::InvalidInput);
    assert!(err.message.contains("members.csv"), "unexpected error: {err}");
    assert!(err.message.contains("line 2"), "unexpected error: {err}");
    assert!(err.message.contains("'seasonal'"), "unexpected error: {err}");
}
