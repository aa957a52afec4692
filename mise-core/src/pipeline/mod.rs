//! The four-stage recipe pipeline.
//!
//! Stages run strictly in order: classify ingredients, generate a concept,
//! compose the recipe text, assemble the response. Each stage takes the
//! [`WorkflowState`](crate::types::WorkflowState) by value and returns it with
//! its own field filled. A stage whose input is missing runs the upstream
//! stage first, so any stage can be entered on a fresh state.
//!
//! The first two stages are advisory: a failed model call or unusable output
//! is replaced by documented defaults. Composition has no fallback; its
//! failure aborts the run.

mod step;
pub mod steps;
mod workflow;

pub use step::Stage;
pub(crate) use step::Degrade;
pub use steps::{
    assemble_output, classification_from_map, classify_ingredients, compose_recipe,
    concept_from_map, generate_concept,
};
pub use workflow::Workflow;
