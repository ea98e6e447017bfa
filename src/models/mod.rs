// src/models/mod.rs

//! Domain models for the alert application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod paper;
mod rules;

// Re-export all public types
pub use config::{ArxivConfig, Config, EmailConfig, HistoryConfig, HttpConfig, SearchConfig};
pub use paper::Paper;
pub use rules::{KeywordGroup, KeywordRuleSet, SearchScope};
