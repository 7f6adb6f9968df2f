//! Roadmap engine: generation client, export pipeline and effect execution.
mod client;
mod config;
mod engine;
mod export;
mod filename;
mod http;
mod layout;
mod pdf;
mod pdf_export;
mod persist;
mod render;
mod server_export;
mod types;

pub use client::RoadmapRequestClient;
pub use config::{DateClock, EngineConfig, PageSettings, RequestSettings, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use export::{DocumentExporter, ExportStrategy};
pub use filename::roadmap_filename;
pub use layout::{fit_ratio, wrap_text};
pub use pdf::{Align, DocumentInfo, PdfDocument, PdfPage, Rgb};
pub use pdf_export::{ClientPdfStrategy, DOCUMENT_CREATOR};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use render::{
    scaled_dimension, RasterImage, RasterOptions, RenderError, RenderedView, EXPORT_RASTER_SCALE,
};
pub use server_export::{ServerExportStrategy, SERVER_EXPORT_NOTICE};
pub use types::{
    EngineError, EngineEvent, ExportError, ExportJob, ExportReport, ExportSuccess, GenerateError,
    JobOutcome, ServiceError, StrategyError, StrategyFailure, StrategyKind,
};
