//! Stage identity and the degrade outcome shared by the advisory stages.

use std::fmt;

use thiserror::Error;

use crate::extract::ExtractionDegrade;
use crate::llm::LlmError;

/// Pipeline stages in execution order.
///
/// Classify and Concept are advisory and fall back to defaults; Compose
/// failures abort the run; Assemble makes no model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Classify,
    Concept,
    Compose,
    Assemble,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Classify => "classify_ingredients",
            Stage::Concept => "generate_concept",
            Stage::Compose => "compose_recipe",
            Stage::Assemble => "assemble_output",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an advisory stage fell back to its defaults.
#[derive(Debug, Error)]
pub(crate) enum Degrade {
    #[error("model call failed: {0}")]
    Provider(#[from] LlmError),

    #[error("unusable model output: {0}")]
    Extraction(#[from] ExtractionDegrade),
}
