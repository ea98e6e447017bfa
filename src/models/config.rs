// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{KeywordRuleSet, SearchScope};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Which categories to fetch and how
    #[serde(default)]
    pub arxiv: ArxivConfig,

    /// Keyword rules and search scope
    #[serde(default)]
    pub search: SearchConfig,

    /// SMTP delivery settings
    #[serde(default)]
    pub email: EmailConfig,

    /// Sent-paper history persistence
    #[serde(default)]
    pub history: HistoryConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::config(format!(
                "cannot read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!("{}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    ///
    /// Keyword rule validation happens here, before the match engine ever
    /// sees the rule set.
    pub fn validate(&self) -> Result<()> {
        if self.arxiv.categories.is_empty() {
            return Err(AppError::validation("arxiv.categories is empty"));
        }
        if self.arxiv.max_results == 0 {
            return Err(AppError::validation("arxiv.max_results must be > 0"));
        }
        if self.arxiv.days_back < 1 {
            return Err(AppError::validation("arxiv.days_back must be > 0"));
        }
        self.search.keyword_groups.validate()?;
        if self.email.smtp_server.trim().is_empty() {
            return Err(AppError::validation("email.smtp_server is empty"));
        }
        if self.email.sender.trim().is_empty() {
            return Err(AppError::validation("email.sender is empty"));
        }
        if self.email.recipients.is_empty() {
            return Err(AppError::validation("email.recipients is empty"));
        }
        if self.history.file.trim().is_empty() {
            return Err(AppError::validation("history.file is empty"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// arXiv feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArxivConfig {
    /// Categories to fetch (e.g., ["cs.LG"])
    #[serde(default = "defaults::categories")]
    pub categories: Vec<String>,

    /// Maximum number of results per fetch
    #[serde(default = "defaults::max_results")]
    pub max_results: usize,

    /// Query the most recent submissions directly. When false, fetch and
    /// filter by publication date instead.
    #[serde(default = "defaults::recent_feed")]
    pub recent_feed: bool,

    /// Date filter window in days, used when `recent_feed` is false
    #[serde(default = "defaults::days_back")]
    pub days_back: i64,

    /// Skip runs on Saturday and Sunday (arXiv does not announce then)
    #[serde(default = "defaults::skip_weekends")]
    pub skip_weekends: bool,
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self {
            categories: defaults::categories(),
            max_results: defaults::max_results(),
            recent_feed: defaults::recent_feed(),
            days_back: defaults::days_back(),
            skip_weekends: defaults::skip_weekends(),
        }
    }
}

/// Keyword search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keyword groups: all keywords within a group must match (AND),
    /// any one group matching is enough (OR)
    #[serde(default)]
    pub keyword_groups: KeywordRuleSet,

    /// Search in the title
    #[serde(default = "defaults::search_flag")]
    pub search_title: bool,

    /// Search in the abstract
    #[serde(default = "defaults::search_flag")]
    pub search_abstract: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keyword_groups: KeywordRuleSet::default(),
            search_title: defaults::search_flag(),
            search_abstract: defaults::search_flag(),
        }
    }
}

impl SearchConfig {
    /// The search scope described by the two flags.
    pub fn scope(&self) -> SearchScope {
        SearchScope {
            title: self.search_title,
            abstract_text: self.search_abstract,
        }
    }
}

/// SMTP delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP server host
    #[serde(default = "defaults::smtp_server")]
    pub smtp_server: String,

    /// SMTP server port (STARTTLS)
    #[serde(default = "defaults::smtp_port")]
    pub smtp_port: u16,

    /// Sender address, also used as the SMTP login
    #[serde(default)]
    pub sender: String,

    /// SMTP app password
    #[serde(default)]
    pub password: String,

    /// Recipient addresses
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: defaults::smtp_server(),
            smtp_port: defaults::smtp_port(),
            sender: String::new(),
            password: String::new(),
            recipients: Vec::new(),
        }
    }
}

/// Sent-paper history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path of the history file
    #[serde(default = "defaults::history_file")]
    pub file: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: defaults::history_file(),
        }
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay before each request in milliseconds, to be polite to the API
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

mod defaults {
    // arXiv defaults
    pub fn categories() -> Vec<String> {
        vec!["cs.LG".into()]
    }
    pub fn max_results() -> usize {
        50
    }
    pub fn recent_feed() -> bool {
        true
    }
    pub fn days_back() -> i64 {
        1
    }
    pub fn skip_weekends() -> bool {
        true
    }

    // Search defaults
    pub fn search_flag() -> bool {
        true
    }

    // Email defaults
    pub fn smtp_server() -> String {
        "smtp.gmail.com".into()
    }
    pub fn smtp_port() -> u16 {
        587
    }

    // History defaults
    pub fn history_file() -> String {
        "sent_papers.json".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; arxiv-alert/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.search.keyword_groups = toml::from_str::<SearchConfig>(
            r#"keyword_groups = [["deep learning"], ["reinforcement", "robot"]]"#,
        )
        .unwrap()
        .keyword_groups;
        config.email.sender = "alerts@example.com".to_string();
        config.email.recipients = vec!["me@example.com".to_string()];
        config
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_default_config() {
        // Defaults have no keyword groups and no recipients.
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_categories() {
        let mut config = valid_config();
        config.arxiv.categories.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_results() {
        let mut config = valid_config();
        config.arxiv.max_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_recipients() {
        let mut config = valid_config();
        config.email.recipients.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_full_toml() {
        let config: Config = toml::from_str(
            r#"
            [arxiv]
            categories = ["cs.LG", "cs.CL"]
            max_results = 25
            recent_feed = false
            days_back = 2

            [search]
            keyword_groups = [["diffusion"], ["graph", "neural"]]
            search_title = true
            search_abstract = false

            [email]
            sender = "alerts@example.com"
            password = "secret"
            recipients = ["a@example.com", "b@example.com"]

            [history]
            file = "state/sent_papers.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.arxiv.categories, vec!["cs.LG", "cs.CL"]);
        assert_eq!(config.arxiv.max_results, 25);
        assert!(!config.arxiv.recent_feed);
        assert_eq!(config.search.keyword_groups.len(), 2);
        assert!(!config.search.scope().abstract_text);
        assert_eq!(config.email.recipients.len(), 2);
        assert_eq!(config.history.file, "state/sent_papers.json");
        // Unspecified [http] section falls back to defaults.
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_minimal_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.arxiv.categories, vec!["cs.LG"]);
        assert_eq!(config.arxiv.max_results, 50);
        assert!(config.arxiv.recent_feed);
        assert!(config.search.search_title);
        assert!(config.search.search_abstract);
        assert_eq!(config.history.file, "sent_papers.json");
    }
}
