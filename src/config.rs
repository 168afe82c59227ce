use std::path::PathBuf;

use crate::practice::SubmitFailurePolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

fn get_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\vocab-trainer")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/vocab-trainer")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub log_file: PathBuf,
    pub offer_submit_retry: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_file: get_data_dir().join("vocab.log"),
            offer_submit_retry: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

impl Config {
    /// Defaults overridden by `VOCAB_URL`, `VOCAB_LOG` and `VOCAB_RETRY_SUBMIT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("VOCAB_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        if let Some(path) = lookup("VOCAB_LOG").filter(|v| !v.trim().is_empty()) {
            config.log_file = PathBuf::from(path);
        }
        if let Some(flag) = lookup("VOCAB_RETRY_SUBMIT") {
            config.offer_submit_retry = parse_flag(&flag);
        }
        config.normalize()
    }

    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        log_file: Option<PathBuf>,
        offer_submit_retry: bool,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self.offer_submit_retry |= offer_submit_retry;
        self.normalize()
    }

    fn normalize(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn submit_failure_policy(&self) -> SubmitFailurePolicy {
        if self.offer_submit_retry {
            SubmitFailurePolicy::OfferRetry
        } else {
            SubmitFailurePolicy::LogOnly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.log_file.ends_with("vocab.log"));
        assert_eq!(config.submit_failure_policy(), SubmitFailurePolicy::LogOnly);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("VOCAB_URL", "http://vocab.local:8080/"),
            ("VOCAB_LOG", "/tmp/vocab.log"),
            ("VOCAB_RETRY_SUBMIT", "true"),
        ]));
        assert_eq!(config.base_url, "http://vocab.local:8080");
        assert_eq!(config.log_file, PathBuf::from("/tmp/vocab.log"));
        assert_eq!(config.submit_failure_policy(), SubmitFailurePolicy::OfferRetry);
    }

    #[test]
    fn test_flags_override_env() {
        let config = Config::from_lookup(lookup(&[("VOCAB_URL", "http://env:1")]))
            .with_overrides(Some("http://flag:2/".to_string()), None, true);
        assert_eq!(config.base_url, "http://flag:2");
        assert!(config.offer_submit_retry);
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config = Config::from_lookup(lookup(&[("VOCAB_URL", "  "), ("VOCAB_RETRY_SUBMIT", "0")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.offer_submit_retry);
    }
}
