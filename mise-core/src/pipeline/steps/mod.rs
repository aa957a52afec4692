//! Pipeline stage implementations.

mod assemble;
mod classify;
mod compose;
mod concept;

pub use assemble::assemble_output;
pub use classify::{classification_from_map, classify_ingredients};
pub use compose::compose_recipe;
pub use concept::{concept_from_map, generate_concept};
