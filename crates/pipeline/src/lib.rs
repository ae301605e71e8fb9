//! Analysis pipeline: identify -> route -> specialist analysis -> summary.
//!
//! A linear flow with a single branch, executed once per request. Every
//! stage returns `Result`, so a provider failure is routed as data to
//! the error terminal rather than unwinding -- the HTTP layer renders
//! whichever side of the final `Result` is authoritative.

pub mod error;
pub mod router;

mod run;

pub use error::AnalysisError;
pub use router::{route, Specialist};
pub use run::{AnalysisPipeline, AnalysisRecord};
