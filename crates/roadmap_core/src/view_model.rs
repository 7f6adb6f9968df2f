use crate::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: WorkflowPhase,
    pub goal_input: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub steps: Vec<StepView>,
    pub completed_count: usize,
    pub step_count: usize,
    pub progress_label: Option<String>,
    /// Message of the `Failed` state.
    pub error: Option<String>,
    pub notice: Option<Notice>,
    pub submit_enabled: bool,
    pub export_enabled: bool,
    pub exporting: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub number: u32,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub timeframe: String,
    pub completed: bool,
}
