use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::allocation::types::{Assignment, Outcome, Slip};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub locked: usize,
    pub promoted: usize,
    pub kept_same: usize,
    pub new: usize,
    pub unassigned: usize,
    pub placed: usize,
    pub total_slips: usize,
    pub occupied_slips: usize,
    pub empty_slips: Vec<Slip>,
    pub passes: usize,
}

impl AllocationSummary {
    pub fn from_run<'a, I>(assignments: &[Assignment], slips: I, passes: usize) -> Self
    where
        I: IntoIterator<Item = &'a Slip>,
    {
        let mut summary = AllocationSummary {
            passes,
            ..Default::default()
        };

        let mut occupied = BTreeSet::new();
        for assignment in assignments {
            match assignment.outcome {
                Outcome::Locked if assignment.was_promoted => summary.promoted += 1,
                Outcome::Locked => summary.locked += 1,
                Outcome::KeptSame => summary.kept_same += 1,
                Outcome::New => summary.new += 1,
                Outcome::Unassigned => summary.unassigned += 1,
            }
            if let Some(slip_id) = assignment.slip_id.as_deref() {
                occupied.insert(slip_id);
            }
        }
        summary.placed = summary.locked + summary.promoted + summary.kept_same + summary.new;

        for slip in slips {
            summary.total_slips += 1;
            if !occupied.contains(slip.id.as_str()) {
                summary.empty_slips.push(slip.clone());
            }
        }
        summary.occupied_slips = summary.total_slips - summary.empty_slips.len();

        summary
    }
}
