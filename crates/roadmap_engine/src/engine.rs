use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use roadmap_core::{Epoch, Roadmap, RoadmapRequest};
use roadmap_logging::{roadmap_debug, roadmap_info, roadmap_warn};

use crate::{
    DocumentExporter, EngineConfig, EngineError, EngineEvent, RenderedView, RoadmapRequestClient,
};

enum EngineCommand {
    Generate {
        epoch: Epoch,
        request: RoadmapRequest,
    },
    Export {
        roadmap: Roadmap,
        view: Arc<dyn RenderedView>,
    },
}

struct Services {
    client: RoadmapRequestClient,
    exporter: DocumentExporter,
}

/// Runs generation and export requests on a background tokio runtime.
///
/// Commands are fire-and-forget; completions arrive as [`EngineEvent`]s via
/// [`EngineHandle::try_recv`]. The engine does not order or filter
/// completions: stale generations are discarded by the caller using the
/// epoch carried in each event.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let services = Arc::new(Services {
            client: RoadmapRequestClient::new(&config)?,
            exporter: DocumentExporter::from_config(&config)?,
        });
        Self::with_services(services)
    }

    /// Builds a handle around a custom exporter, e.g. one with extra strategies.
    pub fn with_exporter(
        config: EngineConfig,
        exporter: DocumentExporter,
    ) -> Result<Self, EngineError> {
        let services = Arc::new(Services {
            client: RoadmapRequestClient::new(&config)?,
            exporter,
        });
        Self::with_services(services)
    }

    fn with_services(services: Arc<Services>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("roadmap-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let services = services.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(services.as_ref(), command, event_tx).await;
                    });
                }
                roadmap_debug!("Engine command channel closed; shutting down runtime");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn generate(&self, epoch: Epoch, request: RoadmapRequest) {
        self.send(EngineCommand::Generate { epoch, request });
    }

    pub fn export(&self, roadmap: Roadmap, view: Arc<dyn RenderedView>) {
        self.send(EngineCommand::Export { roadmap, view });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            roadmap_warn!("Engine thread is gone; dropping command");
        }
    }
}

async fn handle_command(
    services: &Services,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Generate { epoch, request } => {
            roadmap_info!("epoch={} generation started", epoch);
            let result = services.client.generate_request(&request).await;
            match &result {
                Ok(roadmap) => roadmap_info!(
                    "epoch={} generation succeeded steps={}",
                    epoch,
                    roadmap.steps.len()
                ),
                Err(err) => roadmap_warn!("epoch={} generation failed: {}", epoch, err),
            }
            EngineEvent::GenerationCompleted { epoch, result }
        }
        EngineCommand::Export { roadmap, view } => {
            let result = services.exporter.export(&roadmap, view.as_ref()).await;
            EngineEvent::ExportCompleted { result }
        }
    };
    deliver(&event_tx, event);
}

/// Returns false when the receiving side is gone and the event was dropped.
fn deliver(event_tx: &mpsc::Sender<EngineEvent>, event: EngineEvent) -> bool {
    match event_tx.send(event) {
        Ok(()) => true,
        Err(mpsc::SendError(event)) => {
            roadmap_warn!("Event receiver is gone; dropping {:?}", event);
            false
        }
    }
}
