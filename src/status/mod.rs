//! Status module
//!
//! Pure status logic: Ready-condition lookup for entities and bindings, and
//! the priority-ordered status derivation for workflow runs.

mod conditions;
mod run;

pub use conditions::*;
pub use run::*;
