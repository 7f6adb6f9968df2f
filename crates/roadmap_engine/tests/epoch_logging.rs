//! Runs in its own binary because it installs the global logger.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use log::{LevelFilter, Log, Metadata, Record};
use roadmap_core::RoadmapRequest;
use roadmap_engine::{EngineConfig, EngineEvent, EngineHandle};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct CapturingLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    lines: Mutex::new(Vec::new()),
};

fn captured() -> Vec<String> {
    LOGGER.lines.lock().unwrap().clone()
}

async fn next_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "timed out waiting for engine event");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn generation_logs_carry_the_epoch() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Debug);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/generate-roadmap"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Chef Path",
            "description": "desc",
            "steps": [
                { "number": 1, "title": "Knives", "description": "", "skills": [], "timeframe": "1 week" },
                { "number": 2, "title": "Sauces", "description": "", "skills": [], "timeframe": "2 weeks" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fail/api/ai/generate-roadmap"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let output = TempDir::new().unwrap();

    let mut config = EngineConfig::default_with_output(output.path().to_path_buf());
    config.base_url = server.uri();
    let engine = EngineHandle::new(config.clone()).unwrap();
    engine.generate(42, RoadmapRequest::new("Chef").unwrap());
    assert!(matches!(
        next_event(&engine).await,
        EngineEvent::GenerationCompleted { epoch: 42, .. }
    ));

    config.base_url = format!("{}/fail", server.uri());
    let failing = EngineHandle::new(config).unwrap();
    failing.generate(43, RoadmapRequest::new("Chef").unwrap());
    assert!(matches!(
        next_event(&failing).await,
        EngineEvent::GenerationCompleted { epoch: 43, .. }
    ));

    let lines = captured();
    for expected in [
        "epoch=42 generation started",
        "epoch=42 generation succeeded steps=2",
        "epoch=43 generation started",
    ] {
        assert!(
            lines.iter().any(|line| line == expected),
            "missing {expected:?} in {lines:#?}"
        );
    }
    assert!(lines
        .iter()
        .any(|line| line.starts_with("epoch=43 generation failed:")));
}
