pub mod config;
pub mod pipeline;

pub use config::{ConfigOverrides, ExportConfig};
pub use pipeline::{ExportSummary, FetchExportPipeline, PipelineError, PipelineOptions};
