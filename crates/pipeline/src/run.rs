//! Pipeline execution.

use std::sync::Arc;

use partlens_core::classification::Classification;
use partlens_core::image::ImagePayload;
use partlens_gateway::ModelGateway;

use crate::error::AnalysisError;
use crate::router::{route, Specialist};

/// The successful outcome of one pipeline run.
///
/// Exactly one of `Ok(AnalysisRecord)` / `Err(AnalysisError)` is
/// authoritative for the caller; there is no partial-success state.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    /// Cleaned label produced by the identify stage.
    pub classification: Classification,
    /// Which specialist prompt was dispatched.
    pub specialist: Specialist,
    /// Free-text specialist analysis.
    pub raw_analysis: String,
    /// Bulleted digest of the analysis; the user-facing payload.
    pub summary: String,
}

/// Runs the identify -> route -> analyze -> summarize flow.
///
/// Holds the gateway behind `Arc<dyn ModelGateway>` so handlers and
/// tests can inject any implementation. The pipeline itself is
/// stateless; each [`run`](Self::run) is independent.
pub struct AnalysisPipeline {
    gateway: Arc<dyn ModelGateway>,
}

impl AnalysisPipeline {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Execute the full pipeline for one image.
    ///
    /// Stage order and the single branch:
    /// 1. identify -- a gateway failure or an error-shaped label
    ///    short-circuits; no further model call is made.
    /// 2. route + specialist analysis -- a failure here skips
    ///    summarization and becomes the final payload.
    /// 3. summarize -- only reached with a valid raw analysis.
    pub async fn run(&self, image: &ImagePayload) -> Result<AnalysisRecord, AnalysisError> {
        let classification = self.identify(image).await?;
        let specialist = route(&classification);
        tracing::info!(
            classification = %classification,
            specialist = specialist.name(),
            "Routed to specialist"
        );

        let raw_analysis = self
            .gateway
            .analyze(image, specialist.prompt())
            .await
            .map_err(AnalysisError::Analyze)?;

        let summary = self
            .gateway
            .summarize(&raw_analysis)
            .await
            .map_err(AnalysisError::Summarize)?;
        tracing::info!("Analysis summarized");

        Ok(AnalysisRecord {
            classification,
            specialist,
            raw_analysis,
            summary,
        })
    }

    /// Identify stage: vision call plus the label-shaped-error guard.
    async fn identify(&self, image: &ImagePayload) -> Result<Classification, AnalysisError> {
        let raw_label = self
            .gateway
            .identify(image)
            .await
            .map_err(AnalysisError::Identify)?;

        let classification = Classification::from_raw(&raw_label);
        if classification.looks_like_error() {
            // The call succeeded but the answer is an error report, not
            // a category.
            return Err(AnalysisError::Unidentifiable(
                classification.label().to_string(),
            ));
        }

        tracing::info!(classification = %classification, "Identified component");
        Ok(classification)
    }
}
