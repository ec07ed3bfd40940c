mod diagnostics;
mod placement;

use std::sync::{Arc, Mutex};

use slipway::allocation::{
    AllocationEngine, AllocationEvent, AllocationReport, AllocationSettings, Assignment,
    Dimensions, Member, NarrationSink, PriorityClass, Slip,
};

pub fn slip(id: &str, length_ft: u32, length_in: u32, width_ft: u32, width_in: u32) -> Slip {
    Slip::new(
        id,
        Dimensions::from_feet_inches(length_ft, length_in, width_ft, width_in),
    )
}

pub fn member(
    id: &str,
    length_ft: u32,
    width_ft: u32,
    current_slip: Option<&str>,
    class: PriorityClass,
) -> Member {
    Member::new(
        id,
        Dimensions::from_feet_inches(length_ft, 0, width_ft, 0),
        current_slip,
        class,
    )
}

pub fn run(members: Vec<Member>, slips: Vec<Slip>) -> AllocationReport {
    AllocationEngine::new(members, slips).assign()
}

pub fn run_with(
    members: Vec<Member>,
    slips: Vec<Slip>,
    settings: AllocationSettings,
) -> AllocationReport {
    AllocationEngine::new(members, slips)
        .with_settings(settings)
        .assign()
}

pub fn assignment_for<'a>(report: &'a AllocationReport, member_id: &str) -> &'a Assignment {
    report
        .assignments
        .iter()
        .find(|assignment| assignment.member_id == member_id)
        .unwrap_or_else(|| panic!("no assignment for {member_id}"))
}

#[derive(Default)]
pub struct RecordingNarrationSink {
    events: Mutex<Vec<AllocationEvent>>,
}

impl RecordingNarrationSink {
    pub fn events(&self) -> Vec<AllocationEvent> {
        self.events.lock().expect("recorder lock").clone()
    }
}

impl NarrationSink for RecordingNarrationSink {
    fn on_event(&self, event: &AllocationEvent) {
        self.events
            .lock()
            .expect("recorder lock")
            .push(event.clone());
    }
}

pub fn recorder() -> Arc<RecordingNarrationSink> {
    Arc::new(RecordingNarrationSink::default())
}
