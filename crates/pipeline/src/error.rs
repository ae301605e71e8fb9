use partlens_gateway::GatewayError;

/// A failed pipeline run, tagged with the stage that failed.
///
/// The inner [`GatewayError`] is carried verbatim, so callers can always
/// distinguish "the vision step failed" from "the summarization step
/// failed" and surface the original provider detail.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The identification call failed before any classification existed.
    #[error("Identification failed: {0}")]
    Identify(#[source] GatewayError),

    /// The model answered the identify prompt with an error report
    /// instead of a category.
    #[error("Could not identify a component: {0:?}")]
    Unidentifiable(String),

    /// The specialist analysis call failed.
    #[error("Analysis failed: {0}")]
    Analyze(#[source] GatewayError),

    /// The summarization call failed after a successful analysis.
    #[error("Summarization failed: {0}")]
    Summarize(#[source] GatewayError),
}

impl AnalysisError {
    /// The provider-level failure underlying this error, if any.
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            Self::Identify(e) | Self::Analyze(e) | Self::Summarize(e) => Some(e),
            Self::Unidentifiable(_) => None,
        }
    }
}
