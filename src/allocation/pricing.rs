use crate::allocation::types::{Dimensions, Outcome};

pub const SQUARE_INCHES_PER_SQUARE_FOOT: f64 = 144.0;

pub fn square_feet(dimensions: &Dimensions) -> f64 {
    dimensions.area() as f64 / SQUARE_INCHES_PER_SQUARE_FOOT
}

/// Rounds half away from zero to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Billed on whichever is larger, the boat or the slip.
pub fn price_for(
    outcome: Outcome,
    requested: &Dimensions,
    slip: &Dimensions,
    price_per_sqft: f64,
) -> f64 {
    if outcome == Outcome::Unassigned || price_per_sqft <= 0.0 {
        return 0.0;
    }

    let billed_area = square_feet(requested).max(square_feet(slip));
    round_cents(billed_area * price_per_sqft)
}
