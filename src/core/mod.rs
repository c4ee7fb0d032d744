//! Core pipeline modules: text normalization, safety filtering,
//! batch validation, generation orchestration, and persistence.

pub mod cards;
pub mod logging;
pub mod resources;
