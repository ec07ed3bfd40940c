use std::io::Write;

use crate::allocation::{
    summary::AllocationSummary,
    types::{MemberId, PriorityClass, SlipId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Locked,
    OnLeave,
    Competitive(PriorityClass),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AllocationEvent {
    PhaseStarted {
        phase: Phase,
    },
    PassStarted {
        class: PriorityClass,
        pass: usize,
    },
    MemberPlaced {
        member_id: MemberId,
        slip_id: SlipId,
        kept_current: bool,
        locked: bool,
        comment: String,
    },
    MemberEvicted {
        member_id: MemberId,
        slip_id: SlipId,
        evicted_by: MemberId,
    },
    PhaseCompleted {
        phase: Phase,
        passes: usize,
    },
    RunCompleted {
        summary: AllocationSummary,
    },
}

pub trait NarrationSink {
    fn on_event(&self, event: &AllocationEvent);
}

#[derive(Default)]
pub struct NoopNarrationSink;

impl NarrationSink for NoopNarrationSink {
    fn on_event(&self, _event: &AllocationEvent) {}
}

/// Prints human-readable progress to stdout; used for `--verbose` runs.
#[derive(Default)]
pub struct StdoutNarrationSink;

impl NarrationSink for StdoutNarrationSink {
    fn on_event(&self, event: &AllocationEvent) {
        let mut stdout = std::io::stdout().lock();
        // best effort; write failures are ignored
        let _ = stdout.write_all(render_event(event).as_bytes());
    }
}

pub fn render_event(event: &AllocationEvent) -> String {
    match event {
        AllocationEvent::PhaseStarted { phase } => match phase {
            Phase::Locked => "\n===== PHASE 1: Permanent Member Assignments =====\n".to_string(),
            Phase::OnLeave => "\n===== PHASE 2: Year-Off Members =====\n".to_string(),
            Phase::Competitive(class) => format!(
                "\n===== PHASE {}: Iterative Assignment ({}) =====\n",
                class.rank() + 2,
                class
            ),
        },
        AllocationEvent::PassStarted { pass, .. } => format!("\n--- Pass {pass} ---\n"),
        AllocationEvent::MemberPlaced {
            member_id,
            slip_id,
            kept_current,
            locked,
            comment,
        } => {
            let label = if *locked {
                "PERMANENT"
            } else if *kept_current {
                "keeping current"
            } else {
                "new assignment"
            };
            let mut line = format!("  Member {member_id} -> Slip {slip_id} ({label})");
            if !comment.is_empty() {
                line.push_str(&format!(" [{comment}]"));
            }
            line.push('\n');
            line
        }
        AllocationEvent::MemberEvicted {
            member_id,
            slip_id,
            evicted_by,
        } => format!("  Member {member_id} evicted from Slip {slip_id} by {evicted_by}\n"),
        AllocationEvent::PhaseCompleted { phase, passes } => match phase {
            Phase::Competitive(_) => {
                format!("\nAssignment complete after {passes} pass(es)\n")
            }
            Phase::Locked | Phase::OnLeave => String::new(),
        },
        AllocationEvent::RunCompleted { summary } => render_summary(summary),
    }
}

fn render_summary(summary: &AllocationSummary) -> String {
    let mut out = String::new();
    out.push_str("\n===== SUMMARY STATISTICS =====\n");
    out.push_str(&format!("Permanent assignments: {}\n", summary.locked));
    out.push_str(&format!("Upgraded to permanent: {}\n", summary.promoted));
    out.push_str(&format!("New assignments:       {}\n", summary.new));
    out.push_str(&format!("Total boats placed:    {}\n", summary.placed));
    out.push_str(&format!("Unassigned boats:      {}\n", summary.unassigned));
    out.push('\n');
    out.push_str(&format!("Total slips:           {}\n", summary.total_slips));
    out.push_str(&format!("Occupied slips:        {}\n", summary.occupied_slips));
    out.push_str(&format!("Empty slips:           {}\n", summary.empty_slips.len()));

    if !summary.empty_slips.is_empty() {
        out.push_str("\nEmpty slip list:\n");
        for slip in &summary.empty_slips {
            out.push_str(&format!("  {}: {}\n", slip.id, slip.max_dimensions));
        }
    }
    out.push('\n');
    out
}
