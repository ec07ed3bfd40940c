use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::allocation::error::{AllocationError, invalid_input};

pub type MemberId = String;
pub type SlipId = String;

const INCHES_PER_FOOT: u32 = 12;

/// Length and width in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_inches: u32,
    pub width_inches: u32,
}

impl Dimensions {
    pub const ZERO: Dimensions = Dimensions {
        length_inches: 0,
        width_inches: 0,
    };

    pub fn new(length_inches: u32, width_inches: u32) -> Self {
        Self {
            length_inches,
            width_inches,
        }
    }

    pub fn from_feet_inches(length_ft: u32, length_in: u32, width_ft: u32, width_in: u32) -> Self {
        Self {
            length_inches: length_ft
                .saturating_mul(INCHES_PER_FOOT)
                .saturating_add(length_in),
            width_inches: width_ft
                .saturating_mul(INCHES_PER_FOOT)
                .saturating_add(width_in),
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.length_inches) * u64::from(self.width_inches)
    }

    pub fn length_feet_inches(&self) -> (u32, u32) {
        split_feet_inches(self.length_inches)
    }

    pub fn width_feet_inches(&self) -> (u32, u32) {
        split_feet_inches(self.width_inches)
    }

    pub fn fits_in(&self, capacity: &Dimensions) -> bool {
        self.length_inches <= capacity.length_inches && self.width_inches <= capacity.width_inches
    }

    pub fn fits_width_in(&self, capacity: &Dimensions) -> bool {
        self.width_inches <= capacity.width_inches
    }

    /// Positive when the request overhangs the capacity.
    pub fn length_delta(&self, capacity: &Dimensions) -> i64 {
        i64::from(self.length_inches) - i64::from(capacity.length_inches)
    }

    /// Free width left over in `capacity`; negative when the request is wider.
    pub fn width_margin(&self, capacity: &Dimensions) -> i64 {
        i64::from(capacity.width_inches) - i64::from(self.width_inches)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (length_ft, length_in) = self.length_feet_inches();
        let (width_ft, width_in) = self.width_feet_inches();
        write!(f, "{length_ft}' {length_in}\" x {width_ft}' {width_in}\"")
    }
}

fn split_feet_inches(inches: u32) -> (u32, u32) {
    (inches / INCHES_PER_FOOT, inches % INCHES_PER_FOOT)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slip {
    pub id: SlipId,
    pub max_dimensions: Dimensions,
}

impl Slip {
    pub fn new(id: impl Into<SlipId>, max_dimensions: Dimensions) -> Self {
        Self {
            id: id.into(),
            max_dimensions,
        }
    }
}

/// Declaration order is eviction priority: earlier variants outrank later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityClass {
    Locked,
    WaitListed,
    Temporary,
    Unranked,
    OnLeave,
}

impl PriorityClass {
    pub const ALL: [PriorityClass; 5] = [
        PriorityClass::Locked,
        PriorityClass::WaitListed,
        PriorityClass::Temporary,
        PriorityClass::Unranked,
        PriorityClass::OnLeave,
    ];

    /// Classes that compete for slips, in processing order.
    pub const COMPETITIVE: [PriorityClass; 3] = [
        PriorityClass::WaitListed,
        PriorityClass::Temporary,
        PriorityClass::Unranked,
    ];

    pub fn rank(self) -> u8 {
        match self {
            PriorityClass::Locked => 0,
            PriorityClass::WaitListed => 1,
            PriorityClass::Temporary => 2,
            PriorityClass::Unranked => 3,
            PriorityClass::OnLeave => 4,
        }
    }

    /// Token used by the member roster's `dock_status` column.
    pub fn dock_status(self) -> &'static str {
        match self {
            PriorityClass::Locked => "permanent",
            PriorityClass::WaitListed => "waiting_list",
            PriorityClass::Temporary => "temporary",
            PriorityClass::Unranked => "unassigned",
            PriorityClass::OnLeave => "year_off",
        }
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dock_status())
    }
}

impl FromStr for PriorityClass {
    type Err = AllocationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "permanent" | "locked" => Ok(PriorityClass::Locked),
            "waiting_list" | "wait_listed" | "waitlist" => Ok(PriorityClass::WaitListed),
            "temporary" => Ok(PriorityClass::Temporary),
            "unassigned" | "unranked" => Ok(PriorityClass::Unranked),
            "year_off" | "yearoff" | "on_leave" => Ok(PriorityClass::OnLeave),
            _ => Err(invalid_input(format!("unknown dock status '{}'", raw.trim()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub requested_dimensions: Dimensions,
    #[serde(default)]
    pub current_slip_id: Option<SlipId>,
    pub priority_class: PriorityClass,
}

impl Member {
    pub fn new(
        id: impl Into<MemberId>,
        requested_dimensions: Dimensions,
        current_slip_id: Option<&str>,
        priority_class: PriorityClass,
    ) -> Self {
        Self {
            id: id.into(),
            requested_dimensions,
            current_slip_id: current_slip_id.map(str::to_string),
            priority_class,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Locked,
    KeptSame,
    New,
    Unassigned,
}

impl Outcome {
    /// Status label used in the assignment sheet.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Locked => "PERMANENT",
            Outcome::KeptSame => "SAME",
            Outcome::New => "NEW",
            Outcome::Unassigned => "UNASSIGNED",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub member_id: MemberId,
    #[serde(default)]
    pub slip_id: Option<SlipId>,
    pub outcome: Outcome,
    pub priority_class: PriorityClass,
    pub requested_dimensions: Dimensions,
    pub slip_dimensions: Dimensions,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub was_promoted: bool,
}

impl Assignment {
    pub fn placed(member: &Member, slip: &Slip, outcome: Outcome, comment: String) -> Self {
        Self {
            member_id: member.id.clone(),
            slip_id: Some(slip.id.clone()),
            outcome,
            priority_class: member.priority_class,
            requested_dimensions: member.requested_dimensions,
            slip_dimensions: slip.max_dimensions,
            comment,
            price: 0.0,
            was_promoted: false,
        }
    }

    pub fn unassigned(member: &Member, comment: impl Into<String>) -> Self {
        Self {
            member_id: member.id.clone(),
            slip_id: None,
            outcome: Outcome::Unassigned,
            priority_class: member.priority_class,
            requested_dimensions: member.requested_dimensions,
            slip_dimensions: Dimensions::ZERO,
            comment: comment.into(),
            price: 0.0,
            was_promoted: false,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.slip_id.is_some()
    }

    /// Rewrites a kept slip into a locked allocation. No-op for every other outcome.
    pub fn promote(&mut self) {
        if self.outcome == Outcome::KeptSame {
            self.outcome = Outcome::Locked;
            self.was_promoted = true;
        }
    }
}
