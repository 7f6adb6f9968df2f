use roadmap_core::{AppViewModel, NoticeKind, StepView, WorkflowPhase};

pub fn render(view: &AppViewModel) -> String {
    let mut lines = Vec::new();

    match view.phase {
        WorkflowPhase::Idle => {
            lines.push("Enter a career goal with `goal <text>`.".to_string());
        }
        WorkflowPhase::Loading => {
            lines.push(format!("Generating a roadmap for \"{}\"...", view.goal_input));
        }
        WorkflowPhase::Failed => {
            let message = view.error.as_deref().unwrap_or("Something went wrong");
            lines.push(format!("Error: {message}"));
        }
        WorkflowPhase::Ready => render_roadmap(view, &mut lines),
    }

    if let Some(notice) = &view.notice {
        let prefix = match notice.kind {
            NoticeKind::Info => "Note",
            NoticeKind::Error => "Error",
        };
        lines.push(format!("[{prefix}] {}", notice.message));
    }

    let mut actions = Vec::new();
    if view.submit_enabled {
        actions.push("goal");
    }
    if view.export_enabled {
        actions.push("export");
    } else if view.exporting {
        actions.push("export (in progress)");
    }
    if view.phase == WorkflowPhase::Ready {
        actions.extend(["done", "save", "share"]);
    }
    lines.push(format!("Available: {}", actions.join(", ")));

    lines.join("\n")
}

fn render_roadmap(view: &AppViewModel, lines: &mut Vec<String>) {
    if let Some(title) = &view.title {
        lines.push(format!("== {title} =="));
    }
    if let Some(description) = &view.description {
        lines.push(description.clone());
    }
    if let Some(progress) = &view.progress_label {
        lines.push(progress.clone());
    }
    for step in &view.steps {
        lines.push(String::new());
        render_step(step, lines);
    }
    lines.push(String::new());
}

fn render_step(step: &StepView, lines: &mut Vec<String>) {
    let mark = if step.completed { "x" } else { " " };
    lines.push(format!("[{mark}] {}. {}", step.number, step.title));
    lines.push(format!("    {}", step.description));
    if !step.skills.is_empty() {
        lines.push(format!("    Skills: {}", step.skills.join(", ")));
    }
    lines.push(format!("    Timeframe: {}", step.timeframe));
}
