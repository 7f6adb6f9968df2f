//! Roadmap core: pure workflow state machine and view-model helpers.
mod completion;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use completion::CompletionTracker;
pub use effect::Effect;
pub use model::{Roadmap, RoadmapRequest, RoadmapShapeError, Step, ValidationError};
pub use msg::{ExportOutcome, Msg};
pub use state::{AppState, Epoch, Notice, NoticeKind, WorkflowState};
pub use update::{update, EXPORT_FAILED_NOTICE, SAVE_UNAVAILABLE_NOTICE, SHARE_UNAVAILABLE_NOTICE};
pub use view_model::{AppViewModel, StepView, WorkflowPhase};
