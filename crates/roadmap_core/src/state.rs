use crate::view_model::{AppViewModel, StepView, WorkflowPhase};
use crate::{CompletionTracker, Roadmap};

/// Monotonic generation counter used to discard stale completions.
pub type Epoch = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading,
    Ready(Roadmap),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    goal_input: String,
    workflow: WorkflowState,
    completion: CompletionTracker,
    epoch: Epoch,
    exporting: bool,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn completion(&self) -> &CompletionTracker {
        &self.completion
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn goal_input(&self) -> &str {
        &self.goal_input
    }

    pub fn active_roadmap(&self) -> Option<&Roadmap> {
        match &self.workflow {
            WorkflowState::Ready(roadmap) => Some(roadmap),
            _ => None,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let phase = match &self.workflow {
            WorkflowState::Idle => WorkflowPhase::Idle,
            WorkflowState::Loading => WorkflowPhase::Loading,
            WorkflowState::Ready(_) => WorkflowPhase::Ready,
            WorkflowState::Failed(_) => WorkflowPhase::Failed,
        };
        let error = match &self.workflow {
            WorkflowState::Failed(message) => Some(message.clone()),
            _ => None,
        };

        let mut view = AppViewModel {
            phase,
            goal_input: self.goal_input.clone(),
            error,
            notice: self.notice.clone(),
            submit_enabled: phase != WorkflowPhase::Loading,
            export_enabled: phase == WorkflowPhase::Ready && !self.exporting,
            exporting: self.exporting,
            dirty: self.dirty,
            ..AppViewModel::default()
        };

        if let Some(roadmap) = self.active_roadmap() {
            view.title = Some(roadmap.title.clone());
            view.description = Some(roadmap.description.clone());
            view.steps = roadmap
                .steps
                .iter()
                .map(|step| StepView {
                    number: step.number,
                    title: step.title.clone(),
                    description: step.description.clone(),
                    skills: step.skills.clone(),
                    timeframe: step.timeframe.clone(),
                    completed: self.completion.is_complete(step.number),
                })
                .collect();
            view.completed_count = self.completion.completed_count();
            view.step_count = roadmap.steps.len();
            view.progress_label = Some(format!(
                "{} of {} steps completed",
                view.completed_count, view.step_count
            ));
        }

        view
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_goal_input(&mut self, goal: String) {
        self.goal_input = goal;
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: Option<Notice>) {
        self.notice = notice;
        self.mark_dirty();
    }

    /// Enters `Loading` for a new epoch, discarding the previous roadmap and
    /// its completion marks before any request is issued.
    pub(crate) fn begin_generation(&mut self) -> Epoch {
        self.epoch += 1;
        self.workflow = WorkflowState::Loading;
        self.completion = CompletionTracker::new();
        self.notice = None;
        self.mark_dirty();
        self.epoch
    }

    /// Applies a generation completion. Returns false when the completion is
    /// stale (older epoch or no longer loading) and was ignored.
    pub(crate) fn finish_generation(
        &mut self,
        epoch: Epoch,
        result: Result<Roadmap, String>,
    ) -> bool {
        if epoch != self.epoch || self.workflow != WorkflowState::Loading {
            return false;
        }
        self.workflow = match result {
            Ok(roadmap) => {
                self.completion.reset();
                WorkflowState::Ready(roadmap)
            }
            Err(message) => WorkflowState::Failed(message),
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn toggle_step(&mut self, step_number: u32) -> bool {
        let known = self
            .active_roadmap()
            .is_some_and(|roadmap| roadmap.contains_step(step_number));
        if !known {
            return false;
        }
        self.completion.toggle(step_number);
        self.mark_dirty();
        true
    }

    pub(crate) fn set_exporting(&mut self, exporting: bool) {
        self.exporting = exporting;
        self.mark_dirty();
    }
}
