use slipway::allocation::{
    AllocationSettings, Dimensions, Member, Outcome, PriorityClass,
    diagnostics::YEAR_OFF_COMMENT,
    fit::{DOES_NOT_FIT_NOTE, TIGHT_FIT_NOTE},
};

use super::{assignment_for, member, run, run_with, slip};

#[test]
fn given_single_free_slip_when_unranked_member_assigned_then_new_placement() {
    let report = run(
        vec![member("M1", 18, 8, None, PriorityClass::Unranked)],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    let assignment = assignment_for(&report, "M1");
    assert_eq!(assignment.outcome, Outcome::New);
    assert_eq!(assignment.slip_id.as_deref(), Some("S1"));
    assert_eq!(assignment.comment, "");
    assert_eq!(assignment.slip_dimensions, Dimensions::from_feet_inches(20, 0, 10, 0));
}

#[test]
fn given_oversized_locked_boat_when_assigned_then_designated_slip_is_forced_with_note() {
    let report = run(
        vec![member("M1", 25, 12, Some("S1"), PriorityClass::Locked)],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    let assignment = assignment_for(&report, "M1");
    assert_eq!(assignment.outcome, Outcome::Locked);
    assert_eq!(assignment.slip_id.as_deref(), Some("S1"));
    assert!(!assignment.was_promoted);
    assert!(
        assignment.comment.contains(DOES_NOT_FIT_NOTE),
        "unexpected comment: {}",
        assignment.comment
    );
}

#[test]
fn given_ignore_length_when_boat_overhangs_then_placed_with_length_note() {
    let settings = AllocationSettings {
        ignore_length: true,
        ..Default::default()
    };
    let report = run_with(
        vec![member("M1", 25, 8, None, PriorityClass::Unranked)],
        vec![slip("S1", 20, 0, 10, 0)],
        settings,
    );

    let assignment = assignment_for(&report, "M1");
    assert_eq!(assignment.outcome, Outcome::New);
    assert_eq!(assignment.slip_id.as_deref(), Some("S1"));
    assert_eq!(assignment.comment, "NOTE: boat is 5' longer than slip");
}

#[test]
fn given_full_fit_when_boat_overhangs_then_unassigned() {
    let report = run(
        vec![member("M1", 25, 8, None, PriorityClass::Unranked)],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    let assignment = assignment_for(&report, "M1");
    assert_eq!(assignment.outcome, Outcome::Unassigned);
    assert_eq!(assignment.comment, "Boat too large for all available slips");
}

#[test]
fn given_ignore_length_when_several_slips_fit_width_then_least_overhang_wins() {
    let settings = AllocationSettings {
        ignore_length: true,
        ..Default::default()
    };
    let report = run_with(
        vec![member("M1", 25, 8, None, PriorityClass::Temporary)],
        vec![slip("S1", 20, 0, 10, 0), slip("S2", 24, 0, 10, 0)],
        settings,
    );

    let assignment = assignment_for(&report, "M1");
    assert_eq!(assignment.slip_id.as_deref(), Some("S2"));
    assert_eq!(assignment.comment, "NOTE: boat is 1' longer than slip");
}

#[test]
fn given_several_fitting_slips_when_assigned_then_smallest_area_wins() {
    let report = run(
        vec![member("M1", 18, 8, None, PriorityClass::Temporary)],
        vec![
            slip("S1", 30, 0, 12, 0),
            slip("S2", 20, 0, 10, 0),
            slip("S3", 22, 0, 10, 0),
        ],
    );

    assert_eq!(assignment_for(&report, "M1").slip_id.as_deref(), Some("S2"));
}

#[test]
fn given_outgrown_current_slip_when_assigned_then_best_fit_elsewhere_is_new() {
    let report = run(
        vec![member("M1", 18, 8, Some("S1"), PriorityClass::Temporary)],
        vec![
            slip("S1", 15, 0, 10, 0),
            slip("S2", 25, 0, 12, 0),
            slip("S3", 20, 0, 10, 0),
        ],
    );

    let assignment = assignment_for(&report, "M1");
    assert_eq!(assignment.outcome, Outcome::New);
    assert_eq!(assignment.slip_id.as_deref(), Some("S3"));
}

#[test]
fn given_narrow_margin_when_assigned_then_tight_fit_is_noted() {
    let boat = Member::new(
        "M1",
        Dimensions::from_feet_inches(18, 0, 9, 8),
        None,
        PriorityClass::WaitListed,
    );
    let report = run(vec![boat], vec![slip("S1", 20, 0, 10, 0)]);

    assert_eq!(assignment_for(&report, "M1").comment, TIGHT_FIT_NOTE);
}

#[test]
fn given_rate_when_assigned_then_larger_area_is_priced() {
    let boat = Member::new(
        "M1",
        Dimensions::from_feet_inches(20, 0, 8, 6),
        None,
        PriorityClass::Unranked,
    );
    let settings = AllocationSettings {
        price_per_sqft: 2.75,
        ..Default::default()
    };
    let report = run_with(
        vec![boat, member("M2", 40, 20, None, PriorityClass::Unranked)],
        vec![slip("S1", 23, 6, 9, 6)],
        settings,
    );

    assert_eq!(assignment_for(&report, "M1").price, 613.94);
    assert_eq!(assignment_for(&report, "M2").price, 0.0);
}

#[test]
fn given_year_off_member_when_assigned_then_slip_is_released() {
    let report = run(
        vec![
            member("M1", 18, 8, Some("S1"), PriorityClass::OnLeave),
            member("M2", 18, 8, None, PriorityClass::Unranked),
        ],
        vec![slip("S1", 20, 0, 10, 0)],
    );

    let away = assignment_for(&report, "M1");
    assert_eq!(away.outcome, Outcome::Unassigned);
    assert_eq!(away.slip_id, None);
    assert_eq!(away.slip_dimensions, Dimensions::ZERO);
    assert_eq!(away.comment, YEAR_OFF_COMMENT);

    let filler = assignment_for(&report, "M2");
    assert_eq!(filler.outcome, Outcome::New);
    assert_eq!(filler.slip_id.as_deref(), Some("S1"));
}
