use crate::allocation::{
    fit::FitMode,
    types::{Dimensions, PriorityClass, Slip},
};

pub const YEAR_OFF_COMMENT: &str = "Year off - not assigned";
pub const NO_DESIGNATED_SLIP_COMMENT: &str = "Permanent member has no designated slip";
pub const PREVIOUS_SLIP_MISSING_COMMENT: &str = "Evicted - previous slip no longer exists";

/// What became of the slip a member held before the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousSlip<'a> {
    NeverHeld,
    Missing,
    Present {
        slip: &'a Slip,
        occupant_class: Option<PriorityClass>,
    },
}

impl PreviousSlip<'_> {
    fn was_held(&self) -> bool {
        !matches!(self, PreviousSlip::NeverHeld)
    }
}

pub fn count_fitting<'a, I>(mode: FitMode, request: &Dimensions, slips: I) -> usize
where
    I: IntoIterator<Item = &'a Slip>,
{
    slips
        .into_iter()
        .filter(|slip| mode.fits(request, &slip.max_dimensions))
        .count()
}

/// Explains why a competing member finished the run without a slip.
pub fn unassigned_comment(
    mode: FitMode,
    legacy_fit_recheck: bool,
    request: &Dimensions,
    fitting_slips: usize,
    previous: PreviousSlip<'_>,
) -> String {
    if fitting_slips == 0 {
        if previous.was_held() {
            return "Evicted - boat too large for all available slips".to_string();
        }
        return "Boat too large for all available slips".to_string();
    }

    match previous {
        PreviousSlip::Missing => return PREVIOUS_SLIP_MISSING_COMMENT.to_string(),
        PreviousSlip::Present {
            slip,
            occupant_class,
        } => {
            if legacy_fit_recheck && !mode.fits(request, &slip.max_dimensions) {
                return format!(
                    "Evicted - boat doesn't fit previous slip, all {fitting_slips} suitable slips taken"
                );
            }
            match occupant_class {
                Some(PriorityClass::Locked) => {
                    return format!(
                        "Evicted - previous slip taken by permanent member, all {fitting_slips} suitable slips taken"
                    );
                }
                Some(_) => {
                    return format!(
                        "Evicted - outranked by higher priority member(s), all {fitting_slips} suitable slips taken"
                    );
                }
                None => {}
            }
        }
        PreviousSlip::NeverHeld => {}
    }

    format!("All {fitting_slips} suitable slips taken by higher priority members")
}
