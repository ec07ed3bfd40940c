use std::cmp::{Ordering, Reverse};

use crate::allocation::{
    fit::FitMode,
    types::{Dimensions, Slip},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FitKey {
    overhang: u64,
    area: u64,
    margin: Reverse<i64>,
}

fn fit_key(mode: FitMode, request: &Dimensions, capacity: &Dimensions) -> FitKey {
    let overhang = if mode.ignores_length() {
        request.length_delta(capacity).max(0) as u64
    } else {
        0
    };

    FitKey {
        overhang,
        area: capacity.area(),
        margin: Reverse(request.width_margin(capacity)),
    }
}

/// Orders two candidate slips for `request`; `Less` means `lhs` is the better fit.
pub fn compare_candidates(mode: FitMode, request: &Dimensions, lhs: &Slip, rhs: &Slip) -> Ordering {
    fit_key(mode, request, &lhs.max_dimensions)
        .cmp(&fit_key(mode, request, &rhs.max_dimensions))
        .then_with(|| lhs.id.cmp(&rhs.id))
}

/// Picks the best-fitting slip among `candidates`.
pub fn best_fit<'a, I>(mode: FitMode, request: &Dimensions, candidates: I) -> Option<&'a Slip>
where
    I: IntoIterator<Item = &'a Slip>,
{
    candidates
        .into_iter()
        .min_by(|lhs, rhs| compare_candidates(mode, request, lhs, rhs))
}
