use chembl_client::{BioactivitySource, ClientError, DEFAULT_SEARCH_LIMIT};
use exporters::{ActivityTable, CsvExporter};
use shared_types::{Accession, ExportError, ResolutionPolicy, StandardType, TargetRecord};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No target found for accession {0}")]
    TargetNotFound(Accession),

    #[error("No exact target match for accession {accession}; candidates: {}", .candidates.join(", "))]
    AmbiguousTarget {
        accession: Accession,
        candidates: Vec<String>,
    },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub standard_type: StandardType,
    pub output_dir: PathBuf,
    pub resolution: ResolutionPolicy,
    pub search_limit: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            standard_type: StandardType::default(),
            output_dir: PathBuf::from("."),
            resolution: ResolutionPolicy::First,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub accession: Accession,
    pub target: TargetRecord,
    pub standard_type: StandardType,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub output_path: PathBuf,
    pub bytes_written: usize,
}

/// Resolve a target, pull its activities of one standard type, write them
/// as CSV.
pub struct FetchExportPipeline {
    source: Arc<dyn BioactivitySource>,
    options: PipelineOptions,
    exporter: CsvExporter,
}

impl FetchExportPipeline {
    pub fn new(source: Arc<dyn BioactivitySource>, options: PipelineOptions) -> Self {
        Self {
            source,
            options,
            exporter: CsvExporter::new(),
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Every target the search returns for `accession`, in ranking order.
    pub async fn list_candidates(
        &self,
        accession: &Accession,
    ) -> Result<Vec<TargetRecord>, PipelineError> {
        Ok(self
            .source
            .search_targets(accession.as_str(), self.options.search_limit)
            .await?)
    }

    pub async fn resolve_target(&self, accession: &Accession) -> Result<TargetRecord, PipelineError> {
        let candidates = self.list_candidates(accession).await?;
        if candidates.is_empty() {
            return Err(PipelineError::TargetNotFound(accession.clone()));
        }

        match self.options.resolution.select(accession, &candidates) {
            Some(target) => {
                if candidates.len() > 1 {
                    tracing::debug!(
                        candidates = candidates.len(),
                        policy = ?self.options.resolution,
                        "multiple targets matched, picked {}",
                        target.target_chembl_id
                    );
                }
                Ok(target.clone())
            }
            None => Err(PipelineError::AmbiguousTarget {
                accession: accession.clone(),
                candidates: candidates
                    .into_iter()
                    .map(|t| t.target_chembl_id)
                    .collect(),
            }),
        }
    }

    pub async fn run(&self, accession: &Accession) -> Result<ExportSummary, PipelineError> {
        tracing::info!(%accession, "Resolving target");
        let target = self.resolve_target(accession).await?;
        tracing::info!(
            %accession,
            target = %target.target_chembl_id,
            name = target.display_name(),
            "Target resolved"
        );

        let standard_type = self.options.standard_type.clone();
        tracing::info!(
            target = %target.target_chembl_id,
            %standard_type,
            "Fetching activities"
        );
        let records = self
            .source
            .fetch_activities(&target.target_chembl_id, &standard_type)
            .await?;
        tracing::info!(count = records.len(), "Activities fetched");

        if records.is_empty() {
            tracing::warn!(
                target = %target.target_chembl_id,
                %standard_type,
                "No activities returned, writing header only"
            );
        }

        let table = ActivityTable::from_records(&records);
        let output_path = accession.output_path(&self.options.output_dir);
        let bytes_written = self.exporter.write(&table, &output_path)?;

        Ok(ExportSummary {
            accession: accession.clone(),
            target,
            standard_type,
            row_count: table.row_count(),
            columns: table.columns().to_vec(),
            output_path,
            bytes_written,
        })
    }
}
