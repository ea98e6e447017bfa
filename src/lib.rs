// src/lib.rs

//! arXiv Alert Library
//!
//! Fetches recent arXiv submissions, filters them against keyword rules,
//! deduplicates against the history of already-mailed papers, and emails
//! an HTML digest of the new matches.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
