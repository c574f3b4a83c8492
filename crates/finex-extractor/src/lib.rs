//! Finex Extractor
//!
//! Turns a PDF financial report into the model's plain-text answer for four
//! fields: Company Name, Stock Symbol, Revenue and Net Income.
//!
//! # Architecture
//!
//! ```text
//! PDF bytes → TextExtractor → RelevanceHeuristic → FieldExtractor → LLM → DisplayState
//! ```
//!
//! # Key Features
//!
//! - **Text Extraction**: Page-by-page `lopdf` extraction that tolerates bad pages
//! - **Relevance Check**: Advisory keyword heuristic, configurable via `PipelineConfig`
//! - **Field Extraction**: Fixed prompt, plain-text output, safety filters off
//! - **Error Capture**: Every failure becomes a labelled result, never a panic
//!
//! # Example Usage
//!
//! ```
//! use finex_extractor::{FieldExtractor, Pipeline, PipelineConfig};
//! use finex_domain::DisplayState;
//! use finex_llm::MockProvider;
//!
//! let llm = MockProvider::new("Company Name: TechCorp Inc.");
//! let pipeline = Pipeline::new(FieldExtractor::new(llm), &PipelineConfig::default()).unwrap();
//!
//! // Not a PDF: extraction fails before the model is called
//! let state = pipeline.analyze(b"not a pdf");
//! assert!(matches!(state, DisplayState::ExtractionFailed { .. }));
//!
//! // Already-extracted text skips the PDF stage
//! let state = pipeline.analyze_text("TechCorp revenue and net income rose");
//! assert!(state.is_success());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod pdf;
mod pipeline;
mod prompt;

pub use config::PipelineConfig;
pub use error::{ExtractorError, TextExtractionError};
pub use extractor::{FieldExtractor, SAMPLE_TEXT};
pub use parser::normalize_response;
pub use pdf::{extract_text, ExtractedDocument, LopdfReader, TextExtractor};
pub use pipeline::Pipeline;
pub use prompt::{PromptBuilder, FIELDS, NOT_FOUND};
