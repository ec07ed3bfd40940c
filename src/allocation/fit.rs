use crate::allocation::types::Dimensions;

/// Free width (inches) at or below which a placement is flagged as tight.
pub const TIGHT_FIT_MARGIN_INCHES: i64 = 5;

pub const DOES_NOT_FIT_NOTE: &str = "NOTE: Boat does not fit in assigned slip";
pub const TIGHT_FIT_NOTE: &str = "TIGHT FIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    Full,
    WidthOnly,
}

impl FitMode {
    pub fn from_ignore_length(ignore_length: bool) -> Self {
        if ignore_length {
            FitMode::WidthOnly
        } else {
            FitMode::Full
        }
    }

    pub fn fits(self, request: &Dimensions, capacity: &Dimensions) -> bool {
        match self {
            FitMode::Full => request.fits_in(capacity),
            FitMode::WidthOnly => request.fits_width_in(capacity),
        }
    }

    pub fn ignores_length(self) -> bool {
        self == FitMode::WidthOnly
    }

    /// Overhang/underhang note; only produced when length is ignored.
    pub fn length_note(self, request: &Dimensions, capacity: &Dimensions) -> Option<String> {
        if !self.ignores_length() {
            return None;
        }

        let delta = request.length_delta(capacity);
        if delta == 0 {
            return None;
        }

        let magnitude = delta.unsigned_abs();
        let feet = magnitude / 12;
        let inches = magnitude % 12;
        let rendered = match (feet, inches) {
            (0, inches) => format!("{inches}\""),
            (feet, 0) => format!("{feet}'"),
            (feet, inches) => format!("{feet}' {inches}\""),
        };

        let direction = if delta > 0 { "longer" } else { "shorter" };
        Some(format!("NOTE: boat is {rendered} {direction} than slip"))
    }
}

pub fn tight_fit_note(request: &Dimensions, capacity: &Dimensions) -> Option<&'static str> {
    let margin = request.width_margin(capacity);
    (0..=TIGHT_FIT_MARGIN_INCHES)
        .contains(&margin)
        .then_some(TIGHT_FIT_NOTE)
}

/// Joins the placement notes for one assignment with `"; "`.
pub fn placement_comment(
    mode: FitMode,
    request: &Dimensions,
    capacity: &Dimensions,
    flag_misfit: bool,
) -> String {
    let mut notes: Vec<String> = Vec::new();
    if flag_misfit && !mode.fits(request, capacity) {
        notes.push(DOES_NOT_FIT_NOTE.to_string());
    }
    if let Some(note) = mode.length_note(request, capacity) {
        notes.push(note);
    }
    if let Some(note) = tight_fit_note(request, capacity) {
        notes.push(note.to_string());
    }
    notes.join("; ")
}
