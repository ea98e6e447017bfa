// src/pipeline/mod.rs

//! Pipeline entry points for alert operations.
//!
//! - `matcher`: keyword matching and deduplication engine
//! - `run`: the fetch → match → notify → persist cycle

pub mod matcher;
pub mod run;

pub use matcher::match_papers;
pub use run::{RunOptions, RunReport, run_alert};
