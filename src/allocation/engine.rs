use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::allocation::{
    diagnostics::{
        NO_DESIGNATED_SLIP_COMMENT, PREVIOUS_SLIP_MISSING_COMMENT, PreviousSlip, YEAR_OFF_COMMENT,
        count_fitting, unassigned_comment,
    },
    eviction::member_can_evict,
    fit::{FitMode, placement_comment},
    narration::{AllocationEvent, NarrationSink, NoopNarrationSink, Phase},
    pricing::price_for,
    ranking::best_fit,
    summary::AllocationSummary,
    types::{Assignment, Member, MemberId, Outcome, PriorityClass, Slip, SlipId},
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationSettings {
    #[serde(default)]
    pub ignore_length: bool,
    #[serde(default)]
    pub price_per_sqft: f64,
    #[serde(default)]
    pub legacy_fit_recheck: bool,
}

impl AllocationSettings {
    pub fn fit_mode(&self) -> FitMode {
        FitMode::from_ignore_length(self.ignore_length)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationReport {
    pub assignments: Vec<Assignment>,
    pub summary: AllocationSummary,
}

/// Run-scoped allocator. Members and slips are immutable; occupancy lives in
/// the two indices, which always mirror each other.
pub struct AllocationEngine {
    members: Vec<Member>,
    member_index: BTreeMap<MemberId, usize>,
    slips: BTreeMap<SlipId, Slip>,
    settings: AllocationSettings,
    narration: Arc<dyn NarrationSink>,
    slip_occupant: BTreeMap<SlipId, MemberId>,
    member_slip: BTreeMap<MemberId, SlipId>,
}

impl AllocationEngine {
    pub fn new(members: Vec<Member>, slips: Vec<Slip>) -> Self {
        let mut members = members;
        members.sort_by(|lhs, rhs| lhs.id.cmp(&rhs.id));
        let member_index = members
            .iter()
            .enumerate()
            .map(|(index, member)| (member.id.clone(), index))
            .collect();
        let slips = slips
            .into_iter()
            .map(|slip| (slip.id.clone(), slip))
            .collect();

        Self {
            members,
            member_index,
            slips,
            settings: AllocationSettings::default(),
            narration: Arc::new(NoopNarrationSink),
            slip_occupant: BTreeMap::new(),
            member_slip: BTreeMap::new(),
        }
    }

    pub fn with_settings(mut self, settings: AllocationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_narration(mut self, narration: Arc<dyn NarrationSink>) -> Self {
        self.narration = narration;
        self
    }

    #[tracing::instrument(
        name = "allocation_run",
        target = "allocation",
        skip(self),
        fields(members = self.members.len(), slips = self.slips.len())
    )]
    pub fn assign(mut self) -> AllocationReport {
        let mut assignments = Vec::with_capacity(self.members.len());

        self.assign_locked(&mut assignments);
        self.emit_on_leave(&mut assignments);

        let mut passes = 0;
        for class in PriorityClass::COMPETITIVE {
            passes += self.assign_competitive_class(class);
        }
        self.emit_competitive(&mut assignments);

        promote_kept_assignments(&mut assignments);
        self.apply_pricing(&mut assignments);

        let summary = AllocationSummary::from_run(&assignments, self.slips.values(), passes);
        tracing::info!(
            target: "allocation",
            locked = summary.locked,
            promoted = summary.promoted,
            new = summary.new,
            unassigned = summary.unassigned,
            empty_slips = summary.empty_slips.len(),
            passes = summary.passes,
            "allocation_completed"
        );
        self.narration.on_event(&AllocationEvent::RunCompleted {
            summary: summary.clone(),
        });

        AllocationReport {
            assignments,
            summary,
        }
    }

    fn assign_locked(&mut self, assignments: &mut Vec<Assignment>) {
        self.narration.on_event(&AllocationEvent::PhaseStarted {
            phase: Phase::Locked,
        });
        let mode = self.settings.fit_mode();

        for index in self.cohort(PriorityClass::Locked) {
            let member = &self.members[index];
            let Some(slip_id) = member.current_slip_id.as_deref() else {
                tracing::debug!(target: "allocation", member_id = %member.id, "locked_member_without_slip");
                assignments.push(Assignment::unassigned(member, NO_DESIGNATED_SLIP_COMMENT));
                continue;
            };
            let Some(slip) = self.slips.get(slip_id) else {
                tracing::warn!(
                    target: "allocation",
                    member_id = %member.id,
                    slip_id = %slip_id,
                    "locked_member_slip_missing"
                );
                assignments.push(Assignment::unassigned(member, PREVIOUS_SLIP_MISSING_COMMENT));
                continue;
            };

            if let Some(holder_id) = self.slip_occupant.get(slip_id) {
                tracing::warn!(
                    target: "allocation",
                    member_id = %member.id,
                    slip_id = %slip_id,
                    holder_id = %holder_id,
                    "locked_slip_already_held"
                );
                let fitting = count_fitting(mode, &member.requested_dimensions, self.slips.values());
                let comment = unassigned_comment(
                    mode,
                    self.settings.legacy_fit_recheck,
                    &member.requested_dimensions,
                    fitting,
                    PreviousSlip::Present {
                        slip,
                        occupant_class: Some(PriorityClass::Locked),
                    },
                );
                assignments.push(Assignment::unassigned(member, comment));
                continue;
            }

            let comment = placement_comment(
                mode,
                &member.requested_dimensions,
                &slip.max_dimensions,
                true,
            );
            let assignment = Assignment::placed(member, slip, Outcome::Locked, comment);
            let member_id = member.id.clone();
            let slip_id = slip.id.clone();

            self.narration.on_event(&AllocationEvent::MemberPlaced {
                member_id: member_id.clone(),
                slip_id: slip_id.clone(),
                kept_current: true,
                locked: true,
                comment: assignment.comment.clone(),
            });
            assignments.push(assignment);
            self.occupy(member_id, slip_id);
        }

        self.narration.on_event(&AllocationEvent::PhaseCompleted {
            phase: Phase::Locked,
            passes: 1,
        });
    }

    fn emit_on_leave(&self, assignments: &mut Vec<Assignment>) {
        self.narration.on_event(&AllocationEvent::PhaseStarted {
            phase: Phase::OnLeave,
        });
        for index in self.cohort(PriorityClass::OnLeave) {
            assignments.push(Assignment::unassigned(
                &self.members[index],
                YEAR_OFF_COMMENT,
            ));
        }
        self.narration.on_event(&AllocationEvent::PhaseCompleted {
            phase: Phase::OnLeave,
            passes: 1,
        });
    }

    /// Runs one class to a fixed point and returns the number of passes taken.
    fn assign_competitive_class(&mut self, class: PriorityClass) -> usize {
        let cohort = self.cohort(class);
        if cohort.is_empty() {
            return 0;
        }

        let phase = Phase::Competitive(class);
        self.narration.on_event(&AllocationEvent::PhaseStarted { phase });

        let max_passes = self.members.len() + 1;
        let mut pass = 0;
        loop {
            pass += 1;
            self.narration
                .on_event(&AllocationEvent::PassStarted { class, pass });

            let mut changed = false;
            for &index in &cohort {
                if self.member_slip.contains_key(&self.members[index].id) {
                    continue;
                }
                if let Some(slip_id) = self.claim_slip(index, &mut changed) {
                    let member = &self.members[index];
                    let member_id = member.id.clone();
                    let kept_current = member.current_slip_id.as_deref() == Some(slip_id.as_str());
                    self.narration.on_event(&AllocationEvent::MemberPlaced {
                        member_id: member_id.clone(),
                        slip_id: slip_id.clone(),
                        kept_current,
                        locked: false,
                        comment: String::new(),
                    });
                    self.occupy(member_id, slip_id);
                }
            }
            debug_assert!(self.indices_consistent());

            tracing::debug!(
                target: "allocation",
                class = %class,
                pass,
                changed,
                occupied = self.slip_occupant.len(),
                "allocation_pass_completed"
            );

            if !changed {
                break;
            }
            if pass >= max_passes {
                tracing::warn!(
                    target: "allocation",
                    class = %class,
                    pass,
                    "allocation_pass_limit_reached"
                );
                break;
            }
        }

        self.narration
            .on_event(&AllocationEvent::PhaseCompleted { phase, passes: pass });
        pass
    }

    /// Finds a slip for the member at `index`, evicting a removable occupant when needed.
    fn claim_slip(&mut self, index: usize, changed: &mut bool) -> Option<SlipId> {
        let mode = self.settings.fit_mode();
        let member = &self.members[index];
        let request = member.requested_dimensions;
        let current_slip_id = member.current_slip_id.as_deref();

        let preferred = current_slip_id
            .filter(|slip_id| {
                self.slips
                    .get(*slip_id)
                    .is_some_and(|slip| mode.fits(&request, &slip.max_dimensions))
            })
            .and_then(|slip_id| match self.slip_occupant.get(slip_id) {
                None => Some((slip_id.to_string(), false)),
                Some(occupant_id) if self.is_removable(member, occupant_id) => {
                    Some((slip_id.to_string(), true))
                }
                Some(_) => None,
            });
        if let Some((slip_id, occupied)) = preferred {
            if occupied {
                self.evict(&slip_id, index);
                *changed = true;
            }
            return Some(slip_id);
        }

        let winner = best_fit(
            mode,
            &request,
            self.slips.values().filter(|slip| {
                Some(slip.id.as_str()) != current_slip_id
                    && mode.fits(&request, &slip.max_dimensions)
                    && self
                        .slip_occupant
                        .get(&slip.id)
                        .is_none_or(|occupant_id| self.is_removable(member, occupant_id))
            }),
        )?
        .id
        .clone();

        if self.slip_occupant.contains_key(&winner) {
            self.evict(&winner, index);
            *changed = true;
        }
        Some(winner)
    }

    fn is_removable(&self, member: &Member, occupant_id: &str) -> bool {
        self.member_index
            .get(occupant_id)
            .is_some_and(|&occupant_index| member_can_evict(member, &self.members[occupant_index]))
    }

    fn occupy(&mut self, member_id: MemberId, slip_id: SlipId) {
        self.slip_occupant.insert(slip_id.clone(), member_id.clone());
        self.member_slip.insert(member_id, slip_id);
    }

    fn evict(&mut self, slip_id: &str, evictor_index: usize) {
        let Some(occupant_id) = self.slip_occupant.remove(slip_id) else {
            return;
        };
        self.member_slip.remove(&occupant_id);

        let evictor_id = self.members[evictor_index].id.clone();
        tracing::debug!(
            target: "allocation",
            member_id = %occupant_id,
            slip_id = %slip_id,
            evicted_by = %evictor_id,
            "member_evicted"
        );
        self.narration.on_event(&AllocationEvent::MemberEvicted {
            member_id: occupant_id,
            slip_id: slip_id.to_string(),
            evicted_by: evictor_id,
        });
    }

    fn emit_competitive(&self, assignments: &mut Vec<Assignment>) {
        let mode = self.settings.fit_mode();

        for (member_id, slip_id) in &self.member_slip {
            let (Some(&index), Some(slip)) =
                (self.member_index.get(member_id), self.slips.get(slip_id))
            else {
                continue;
            };
            let member = &self.members[index];
            if !is_competitive(member.priority_class) {
                continue;
            }

            let outcome = if member.current_slip_id.as_deref() == Some(slip_id.as_str()) {
                Outcome::KeptSame
            } else {
                Outcome::New
            };
            let comment = placement_comment(
                mode,
                &member.requested_dimensions,
                &slip.max_dimensions,
                false,
            );
            assignments.push(Assignment::placed(member, slip, outcome, comment));
        }

        for member in &self.members {
            if !is_competitive(member.priority_class) || self.member_slip.contains_key(&member.id) {
                continue;
            }

            let fitting = count_fitting(mode, &member.requested_dimensions, self.slips.values());
            let comment = unassigned_comment(
                mode,
                self.settings.legacy_fit_recheck,
                &member.requested_dimensions,
                fitting,
                self.previous_slip(member),
            );
            tracing::debug!(
                target: "allocation",
                member_id = %member.id,
                comment = %comment,
                "member_unassigned"
            );
            assignments.push(Assignment::unassigned(member, comment));
        }
    }

    fn previous_slip(&self, member: &Member) -> PreviousSlip<'_> {
        let Some(slip_id) = member.current_slip_id.as_deref() else {
            return PreviousSlip::NeverHeld;
        };
        let Some(slip) = self.slips.get(slip_id) else {
            return PreviousSlip::Missing;
        };

        let occupant_class = self
            .slip_occupant
            .get(slip_id)
            .and_then(|occupant_id| self.member_index.get(occupant_id))
            .map(|&index| self.members[index].priority_class);
        PreviousSlip::Present {
            slip,
            occupant_class,
        }
    }

    fn apply_pricing(&self, assignments: &mut [Assignment]) {
        let rate = self.settings.price_per_sqft;
        for assignment in assignments.iter_mut() {
            assignment.price = price_for(
                assignment.outcome,
                &assignment.requested_dimensions,
                &assignment.slip_dimensions,
                rate,
            );
        }
    }

    /// Indices are in ascending id order, so each cohort is already priority sorted.
    fn cohort(&self, class: PriorityClass) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.priority_class == class)
            .map(|(index, _)| index)
            .collect()
    }

    fn indices_consistent(&self) -> bool {
        self.slip_occupant.len() == self.member_slip.len()
            && self.slip_occupant.iter().all(|(slip_id, member_id)| {
                self.member_slip.get(member_id).map(String::as_str) == Some(slip_id.as_str())
            })
    }
}

fn is_competitive(class: PriorityClass) -> bool {
    PriorityClass::COMPETITIVE.contains(&class)
}

/// Members who held on to their slip through the competitive phases earn a locked allocation.
pub fn promote_kept_assignments(assignments: &mut [Assignment]) {
    for assignment in assignments.iter_mut() {
        assignment.promote();
    }
}
