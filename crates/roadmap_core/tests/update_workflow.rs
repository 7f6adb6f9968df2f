use std::sync::Once;

use pretty_assertions::assert_eq;
use serde_json::json;
use roadmap_core::{
    update, AppState, Effect, Epoch, Msg, NoticeKind, Roadmap, RoadmapRequest, Step,
    WorkflowPhase, WorkflowState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(roadmap_logging::initialize_for_tests);
}

fn step(number: u32, title: &str) -> Step {
    Step {
        number,
        title: title.to_string(),
        description: format!("About {title}"),
        skills: vec!["Python".to_string()],
        timeframe: "2 months".to_string(),
    }
}

/// Body returned by the generation service, including fields the client ignores.
fn data_scientist_roadmap() -> Roadmap {
    serde_json::from_value(json!({
        "title": "Data Scientist Path",
        "description": "From zero to data scientist",
        "model": "gpt-4",
        "steps": [
            {
                "number": 1,
                "title": "Statistics",
                "description": "About Statistics",
                "skills": ["Python"],
                "timeframe": "2 months",
                "resources": []
            },
            {
                "number": 2,
                "title": "Machine Learning",
                "description": "About Machine Learning",
                "skills": ["Python"],
                "timeframe": "2 months"
            }
        ]
    }))
    .expect("roadmap fixture")
}

fn submit_goal(state: AppState, goal: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::GoalInputChanged(goal.to_string()));
    update(state, Msg::GoalSubmitted)
}

fn submitted_epoch(effects: &[Effect]) -> Epoch {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::GenerateRoadmap { epoch, .. } => Some(*epoch),
            _ => None,
        })
        .expect("generate effect")
}

#[test]
fn submit_enters_loading_and_emits_one_request() {
    init_logging();
    let (mut state, effects) = submit_goal(AppState::new(), "  Data Scientist ");

    assert_eq!(state.workflow(), &WorkflowState::Loading);
    assert_eq!(
        effects,
        vec![Effect::GenerateRoadmap {
            epoch: 1,
            request: RoadmapRequest::new("Data Scientist").unwrap(),
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, WorkflowPhase::Loading);
    assert!(!view.submit_enabled);
    assert!(state.consume_dirty());
}

#[test]
fn empty_goal_is_rejected_without_state_change() {
    init_logging();
    let (state, effects) = submit_goal(AppState::new(), "");

    assert!(effects.is_empty());
    assert_eq!(state.workflow(), &WorkflowState::Idle);
    assert_eq!(state.epoch(), 0);
    let notice = state.notice().expect("validation notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Please enter a career goal");
}

#[test]
fn whitespace_goal_rejected_from_ready_keeps_roadmap() {
    init_logging();
    let (state, effects) = submit_goal(AppState::new(), "Data Scientist");
    let epoch = submitted_epoch(&effects);
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            epoch,
            result: Ok(data_scientist_roadmap()),
        },
    );
    let (state, _) = update(state, Msg::StepToggled(2));

    let (state, effects) = submit_goal(state, "   \t ");

    assert!(effects.is_empty());
    assert_eq!(
        state.workflow(),
        &WorkflowState::Ready(data_scientist_roadmap())
    );
    assert!(state.completion().is_complete(2));
}

#[test]
fn data_scientist_scenario_reaches_ready_with_empty_completion() {
    init_logging();
    let (state, effects) = submit_goal(AppState::new(), "Data Scientist");
    let epoch = submitted_epoch(&effects);

    let (mut state, effects) = update(
        state,
        Msg::GenerationFinished {
            epoch,
            result: Ok(data_scientist_roadmap()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.workflow(),
        &WorkflowState::Ready(data_scientist_roadmap())
    );
    assert!(state.completion().is_empty());
    let view = state.view();
    assert_eq!(view.phase, WorkflowPhase::Ready);
    assert_eq!(view.title.as_deref(), Some("Data Scientist Path"));
    assert_eq!(
        view.steps.iter().map(|s| s.number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(view.progress_label.as_deref(), Some("0 of 2 steps completed"));
    assert!(view.submit_enabled);
    assert!(view.export_enabled);
    assert!(state.consume_dirty());
}

#[test]
fn generation_failure_enters_failed_with_message() {
    init_logging();
    let (state, effects) = submit_goal(AppState::new(), "Astronaut");
    let epoch = submitted_epoch(&effects);

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            epoch,
            result: Err("AI service unavailable".to_string()),
        },
    );

    assert_eq!(
        state.workflow(),
        &WorkflowState::Failed("AI service unavailable".to_string())
    );
    let view = state.view();
    assert_eq!(view.phase, WorkflowPhase::Failed);
    assert_eq!(view.error.as_deref(), Some("AI service unavailable"));
    assert!(view.steps.is_empty());
}

#[test]
fn resubmit_from_failed_reenters_loading() {
    init_logging();
    let (state, effects) = submit_goal(AppState::new(), "Astronaut");
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            epoch: submitted_epoch(&effects),
            result: Err("boom".to_string()),
        },
    );

    let (state, effects) = submit_goal(state, "Pilot");

    assert_eq!(state.workflow(), &WorkflowState::Loading);
    assert_eq!(submitted_epoch(&effects), 2);
}

#[test]
fn resubmit_from_ready_discards_roadmap_and_completion_immediately() {
    init_logging();
    let (state, effects) = submit_goal(AppState::new(), "Data Scientist");
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            epoch: submitted_epoch(&effects),
            result: Ok(data_scientist_roadmap()),
        },
    );
    let (state, _) = update(state, Msg::StepToggled(1));
    assert!(state.completion().is_complete(1));

    let (state, effects) = submit_goal(state, "Data Engineer");

    assert_eq!(state.workflow(), &WorkflowState::Loading);
    assert!(state.active_roadmap().is_none());
    assert!(state.completion().is_empty());
    assert_eq!(submitted_epoch(&effects), 2);
}

#[test]
fn stale_response_does_not_overwrite_newer_result() {
    init_logging();
    let (state, first) = submit_goal(AppState::new(), "Data Scientist");
    let first_epoch = submitted_epoch(&first);
    // Second submission while the first is still loading.
    let (state, second) = submit_goal(state, "Data Engineer");
    let second_epoch = submitted_epoch(&second);
    assert!(second_epoch > first_epoch);

    let engineer = Roadmap {
        title: "Data Engineer Path".to_string(),
        description: "Pipelines".to_string(),
        steps: vec![step(1, "SQL")],
    };
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            epoch: second_epoch,
            result: Ok(engineer.clone()),
        },
    );
    let (mut state, _) = update(state, Msg::StepToggled(1));
    assert!(state.consume_dirty());

    // The first response arrives last and must be ignored.
    let (mut state, effects) = update(
        state,
        Msg::GenerationFinished {
            epoch: first_epoch,
            result: Ok(data_scientist_roadmap()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.workflow(), &WorkflowState::Ready(engineer));
    assert!(state.completion().is_complete(1));
    assert!(!state.consume_dirty());
}

#[test]
fn stale_failure_is_ignored_while_newer_request_loads() {
    init_logging();
    let (state, first) = submit_goal(AppState::new(), "A");
    let (state, _second) = submit_goal(state, "B");

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            epoch: submitted_epoch(&first),
            result: Err("late failure".to_string()),
        },
    );

    assert_eq!(state.workflow(), &WorkflowState::Loading);
}

#[test]
fn notice_can_be_dismissed() {
    init_logging();
    let (state, _) = submit_goal(AppState::new(), " ");
    assert!(state.notice().is_some());

    let (state, _) = update(state, Msg::NoticeDismissed);
    assert!(state.notice().is_none());
}

#[test]
fn fixture_matches_built_steps_and_request_uses_wire_name() {
    let roadmap = data_scientist_roadmap();
    assert_eq!(
        roadmap.steps,
        vec![step(1, "Statistics"), step(2, "Machine Learning")]
    );
    assert_eq!(roadmap.validate(), Ok(()));

    let request = RoadmapRequest::new(" Data Scientist ").unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "careerGoal": "Data Scientist" })
    );
}
