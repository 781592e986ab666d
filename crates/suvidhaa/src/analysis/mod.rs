//! AI structuring of extracted document text

mod analyzer;
mod parser;
mod prompt;

pub use analyzer::DocumentAnalyzer;
pub use parser::{parse_model_output, AnalysisField, AnalysisOutcome};
pub use prompt::{build_prompt, truncate_chars, SYSTEM_DIRECTIVE};
