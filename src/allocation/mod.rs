pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod eviction;
pub mod fit;
pub mod narration;
pub mod pricing;
pub mod ranking;
pub mod summary;
pub mod types;

pub use engine::{AllocationEngine, AllocationReport, AllocationSettings, promote_kept_assignments};
pub use error::{AllocationError, AllocationErrorKind};
pub use narration::{AllocationEvent, NarrationSink, NoopNarrationSink, StdoutNarrationSink};
pub use summary::AllocationSummary;
pub use types::{Assignment, Dimensions, Member, MemberId, Outcome, PriorityClass, Slip, SlipId};
