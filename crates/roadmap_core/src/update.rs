use crate::{AppState, Effect, ExportOutcome, Msg, Notice, RoadmapRequest};

pub const EXPORT_FAILED_NOTICE: &str = "Failed to generate PDF. Please try again.";
pub const SAVE_UNAVAILABLE_NOTICE: &str = "Saving roadmaps to your account is not available yet.";
pub const SHARE_UNAVAILABLE_NOTICE: &str = "Sharing roadmaps is not available yet.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::GoalInputChanged(goal) => {
            state.set_goal_input(goal);
            Vec::new()
        }
        Msg::GoalSubmitted => match RoadmapRequest::new(state.goal_input()) {
            // Rejected before `Loading`: the workflow state is left untouched.
            Err(err) => {
                state.set_notice(Some(Notice::error(err.to_string())));
                Vec::new()
            }
            Ok(request) => {
                let epoch = state.begin_generation();
                vec![Effect::GenerateRoadmap { epoch, request }]
            }
        },
        Msg::GenerationFinished { epoch, result } => {
            state.finish_generation(epoch, result);
            Vec::new()
        }
        Msg::StepToggled(step_number) => {
            state.toggle_step(step_number);
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.is_exporting() {
                return (state, Vec::new());
            }
            let Some(roadmap) = state.active_roadmap().cloned() else {
                return (state, Vec::new());
            };
            let completed = state.completion().completed().collect();
            state.set_exporting(true);
            vec![Effect::ExportRoadmap { roadmap, completed }]
        }
        Msg::ExportFinished(outcome) => {
            state.set_exporting(false);
            let notice = match outcome {
                ExportOutcome::Saved { path } => Notice::info(format!("PDF saved to {path}")),
                ExportOutcome::Accepted { message } => Notice::info(message),
                ExportOutcome::Failed => Notice::error(EXPORT_FAILED_NOTICE),
            };
            state.set_notice(Some(notice));
            Vec::new()
        }
        Msg::SaveClicked => {
            if state.active_roadmap().is_some() {
                state.set_notice(Some(Notice::info(SAVE_UNAVAILABLE_NOTICE)));
            }
            Vec::new()
        }
        Msg::ShareClicked => {
            if state.active_roadmap().is_some() {
                state.set_notice(Some(Notice::info(SHARE_UNAVAILABLE_NOTICE)));
            }
            Vec::new()
        }
        Msg::NoticeDismissed => {
            if state.notice().is_some() {
                state.set_notice(None);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
