//! Finex Domain Layer
//!
//! This crate contains the core domain model for Finex, the financial report
//! field extractor. It has no infrastructure dependencies and defines the
//! value objects, outcome types, and trait interfaces that the other crates
//! build upon.
//!
//! ## Key Concepts
//!
//! - **ExtractionResult**: Outcome of asking the model for the four report fields
//! - **ErrorKind**: Labelled failure taxonomy shared by every layer
//! - **Relevance**: Keyword heuristic deciding whether text looks financial
//! - **GenerationConfig / GenerationResponse**: Provider-neutral request settings
//!   and response shape
//! - **DisplayState**: Terminal outcome of one pipeline run
//!
//! ## Architecture
//!
//! - Pure logic only, no I/O
//! - Infrastructure implementations (PDF parsing, HTTP) live in other crates
//! - Trait definitions for every external interaction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod display;
pub mod error_kind;
pub mod extraction;
pub mod generation;
pub mod relevance;
pub mod run;
pub mod traits;

// Re-exports for convenience
pub use display::{DisplayState, ExtractionFailure, LowConfidenceWarning};
pub use error_kind::ErrorKind;
pub use extraction::ExtractionResult;
pub use generation::{
    Candidate, Content, GenerationConfig, GenerationResponse, HarmBlockThreshold, HarmCategory,
    Part, SafetySetting,
};
pub use relevance::{is_financial_document, RelevanceAssessment, RelevanceHeuristic};
pub use run::RunId;
