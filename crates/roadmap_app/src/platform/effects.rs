use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use roadmap_core::{Effect, ExportOutcome, Msg};
use roadmap_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle, ExportSuccess};
use roadmap_logging::{roadmap_error, roadmap_info, roadmap_warn};

use super::ui::card_view::CardGridView;
use super::ui::commands::AppEvent;

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(
        config: EngineConfig,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = Arc::new(EngineHandle::new(config)?);
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::GenerateRoadmap { epoch, request } => {
                    roadmap_info!(
                        "GenerateRoadmap epoch={} goal_len={}",
                        epoch,
                        request.goal().len()
                    );
                    self.engine.generate(epoch, request);
                }
                Effect::ExportRoadmap { roadmap, completed } => {
                    roadmap_info!(
                        "ExportRoadmap steps={} completed={}",
                        roadmap.steps.len(),
                        completed.len()
                    );
                    let view = Arc::new(CardGridView::new(&roadmap, &completed));
                    self.engine.export(roadmap, view);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = Arc::clone(&self.engine);
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if event_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::GenerationCompleted { epoch, result } => Msg::GenerationFinished {
            epoch,
            result: result.map_err(|err| {
                roadmap_warn!("Generation {} failed: {}", epoch, err);
                err.user_message()
            }),
        },
        EngineEvent::ExportCompleted { result } => {
            let outcome = match result {
                Ok(report) => match report.success {
                    ExportSuccess::Saved { path } => ExportOutcome::Saved {
                        path: path.display().to_string(),
                    },
                    ExportSuccess::Accepted { message } => ExportOutcome::Accepted { message },
                },
                Err(err) => {
                    roadmap_error!("Export failed: {}", err);
                    ExportOutcome::Failed
                }
            };
            Msg::ExportFinished(outcome)
        }
    }
}
