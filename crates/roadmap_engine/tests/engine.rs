use std::sync::Arc;
use std::time::{Duration, Instant};

use roadmap_core::RoadmapRequest;
use roadmap_engine::{
    EngineConfig, EngineEvent, EngineHandle, ExportSuccess, RasterImage, RasterOptions,
    RenderError, RenderedView, ServiceError, StrategyKind,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TinyView;

impl RenderedView for TinyView {
    fn rasterize(&self, _options: &RasterOptions) -> Result<RasterImage, RenderError> {
        RasterImage::filled(4, 4, [0, 128, 0])
    }
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

fn roadmap_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "desc",
        "steps": [
            { "number": 1, "title": "One", "description": "", "skills": [], "timeframe": "1 week" }
        ]
    })
}

#[tokio::test]
async fn generation_completion_carries_its_epoch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/generate-roadmap"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roadmap_body("Chef Path")))
        .expect(1)
        .mount(&server)
        .await;
    let output = TempDir::new().unwrap();
    let mut config = EngineConfig::default_with_output(output.path().to_path_buf());
    config.base_url = server.uri();
    let engine = EngineHandle::new(config).unwrap();

    engine.generate(7, RoadmapRequest::new("Chef").unwrap());

    match next_event(&engine).await {
        EngineEvent::GenerationCompleted { epoch, result } => {
            assert_eq!(epoch, 7);
            assert_eq!(result.unwrap().title, "Chef Path");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn generation_failure_is_reported_as_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/generate-roadmap"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Career goal is required" })),
        )
        .mount(&server)
        .await;
    let output = TempDir::new().unwrap();
    let mut config = EngineConfig::default_with_output(output.path().to_path_buf());
    config.base_url = server.uri();
    let engine = EngineHandle::new(config).unwrap();

    engine.generate(1, RoadmapRequest::new("Chef").unwrap());

    match next_event(&engine).await {
        EngineEvent::GenerationCompleted { epoch: 1, result } => {
            let err = result.unwrap_err();
            assert_eq!(
                err,
                ServiceError::Status {
                    status: 400,
                    message: Some("Career goal is required".to_string())
                }
            );
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn export_runs_on_the_engine_runtime() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    let mut config = EngineConfig::default_with_output(output.path().to_path_buf());
    config.base_url = server.uri();
    config.generated_on = Arc::new(|| "2024-01-01".to_string());
    let engine = EngineHandle::new(config).unwrap();
    let roadmap = serde_json::from_value(roadmap_body("Chef Path")).unwrap();

    engine.export(roadmap, Arc::new(TinyView));

    match next_event(&engine).await {
        EngineEvent::ExportCompleted { result } => {
            let report = result.expect("export");
            assert_eq!(report.strategy, StrategyKind::Client);
            assert_eq!(
                report.success,
                ExportSuccess::Saved {
                    path: output.path().join("Chef_Path_Roadmap.pdf")
                }
            );
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
