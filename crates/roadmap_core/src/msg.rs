#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the career goal input.
    GoalInputChanged(String),
    /// User submitted the current goal input.
    GoalSubmitted,
    /// Engine completion for a generation request.
    GenerationFinished {
        epoch: crate::Epoch,
        result: Result<crate::Roadmap, String>,
    },
    /// User clicked "Mark as Done" / "Completed" on a step.
    StepToggled(u32),
    /// User clicked Download PDF.
    ExportClicked,
    /// Engine completion for an export.
    ExportFinished(ExportOutcome),
    /// User clicked Save.
    SaveClicked,
    /// User clicked Share.
    ShareClicked,
    /// User dismissed the current notice.
    NoticeDismissed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The document was written locally.
    Saved { path: String },
    /// The remote exporter accepted the job; no file was transferred.
    Accepted { message: String },
    /// Every export strategy failed.
    Failed,
}
