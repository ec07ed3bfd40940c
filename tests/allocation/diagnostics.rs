use slipway::allocation::{
    AllocationSettings, Outcome, PriorityClass,
    diagnostics::{NO_DESIGNATED_SLIP_COMMENT, PREVIOUS_SLIP_MISSING_COMMENT},
};

use super::{assignment_for, member, run, run_with, slip};

#[test]
fn given_two_temporaries_sharing_a_preference_when_assigned_then_lower_id_keeps_it() {
    let report = run(
        vec![
            member("M2", 18, 8, Some("S1"), PriorityClass::Temporary),
            member("M1", 18, 8, Some("S1"), PriorityClass::Temporary),
        ],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    assert_eq!(assignment_for(&report, "M1").slip_id.as_deref(), Some("S1"));
    let loser = assignment_for(&report, "M2");
    assert_eq!(loser.outcome, Outcome::Unassigned);
    assert_eq!(
        loser.comment,
        "Evicted - outranked by higher priority member(s), all 1 suitable slips taken"
    );
}

#[test]
fn given_previous_slip_held_by_permanent_member_when_assigned_then_reason_names_it() {
    let report = run(
        vec![
            member("M1", 18, 8, Some("S1"), PriorityClass::Locked),
            member("M2", 18, 8, Some("S1"), PriorityClass::Temporary),
        ],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    assert_eq!(
        assignment_for(&report, "M2").comment,
        "Evicted - previous slip taken by permanent member, all 1 suitable slips taken"
    );
}

#[test]
fn given_previous_slip_removed_when_nothing_else_free_then_missing_slip_reason() {
    let report = run(
        vec![
            member("M0", 18, 8, Some("S1"), PriorityClass::Locked),
            member("M1", 18, 8, Some("S9"), PriorityClass::Temporary),
        ],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    let assignment = assignment_for(&report, "M1");
    assert_eq!(assignment.outcome, Outcome::Unassigned);
    assert_eq!(assignment.comment, PREVIOUS_SLIP_MISSING_COMMENT);
}

#[test]
fn given_no_previous_slip_when_all_fitting_slips_taken_then_generic_reason() {
    let report = run(
        vec![
            member("M0", 18, 8, Some("S1"), PriorityClass::Locked),
            member("M1", 18, 8, None, PriorityClass::WaitListed),
        ],
        vec![slip("S1", 20, 0, 10, 0), slip("S2", 10, 0, 5, 0)],
    );

    assert_eq!(
        assignment_for(&report, "M1").comment,
        "All 1 suitable slips taken by higher priority members"
    );
}

#[test]
fn given_outgrown_previous_slip_when_unplaced_then_reason_depends_on_legacy_recheck() {
    let members = || {
        vec![
            member("M0", 18, 8, Some("S2"), PriorityClass::Locked),
            member("M1", 18, 8, Some("S1"), PriorityClass::Temporary),
        ]
    };
    let slips = || vec![slip("S1", 15, 0, 10, 0), slip("S2", 20, 0, 10, 0)];

    let current = run(members(), slips());
    assert_eq!(
        assignment_for(&current, "M1").comment,
        "All 1 suitable slips taken by higher priority members"
    );

    let legacy = run_with(
        members(),
        slips(),
        AllocationSettings {
            legacy_fit_recheck: true,
            ..Default::default()
        },
    );
    assert_eq!(
        assignment_for(&legacy, "M1").comment,
        "Evicted - boat doesn't fit previous slip, all 1 suitable slips taken"
    );
}

#[test]
fn given_boat_larger_than_every_slip_when_assigned_then_too_large_reason() {
    let report = run(
        vec![
            member("M1", 40, 15, Some("S1"), PriorityClass::Temporary),
            member("M2", 40, 15, None, PriorityClass::Unranked),
        ],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    assert_eq!(
        assignment_for(&report, "M1").comment,
        "Evicted - boat too large for all available slips"
    );
    assert_eq!(
        assignment_for(&report, "M2").comment,
        "Boat too large for all available slips"
    );
}

#[test]
fn given_permanent_member_without_usable_slip_when_assigned_then_reported_unassigned() {
    let report = run(
        vec![
            member("M1", 18, 8, None, PriorityClass::Locked),
            member("M2", 18, 8, Some("S9"), PriorityClass::Locked),
        ],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    let without = assignment_for(&report, "M1");
    assert_eq!(without.outcome, Outcome::Unassigned);
    assert_eq!(without.comment, NO_DESIGNATED_SLIP_COMMENT);

    let missing = assignment_for(&report, "M2");
    assert_eq!(missing.outcome, Outcome::Unassigned);
    assert_eq!(missing.comment, PREVIOUS_SLIP_MISSING_COMMENT);
    assert_eq!(report.summary.empty_slips.len(), 1);
}
