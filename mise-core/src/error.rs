use thiserror::Error;

use crate::llm::LlmError;
use crate::pipeline::Stage;

/// A request rejected before the pipeline runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("At least one ingredient is required")]
    EmptyIngredients,

    #[error("Ingredient at position {0} is blank")]
    BlankIngredient(usize),
}

/// A failure that aborts a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{stage} failed: {source}")]
    Provider {
        stage: Stage,
        #[source]
        source: LlmError,
    },
}

impl PipelineError {
    /// Stage that aborted the run.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Provider { stage, .. } => *stage,
        }
    }
}
