// src/services/mod.rs

//! External collaborator services: the paper source and the notifier.

pub mod arxiv;
pub mod mailer;

pub use arxiv::{ArxivSource, PaperSource, filter_by_date};
pub use mailer::{MockNotifier, Notifier, SmtpMailer, render_digest};
