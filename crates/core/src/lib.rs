//! Domain types for the PartLens analysis service.
//!
//! Holds everything the pipeline and HTTP layers share: the component
//! classification model, the specialist prompt catalog, the in-memory
//! session store for follow-up chat, and the core error taxonomy.

pub mod classification;
pub mod error;
pub mod image;
pub mod prompts;
pub mod session;
