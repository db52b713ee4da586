use std::time::Duration;

use tracing_subscriber::filter::LevelFilter;

pub const DEFAULT_API_BASE: &str = "https://api.perplexity.ai";
pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
    pub search_debounce: Duration,
    pub log_level: LevelFilter,
    pub api_key_override: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            log_level: LevelFilter::INFO,
            api_key_override: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source so tests never touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            api_base: non_empty("CLAIMSCOPE_API_BASE")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            model: non_empty("CLAIMSCOPE_MODEL").unwrap_or(defaults.model),
            timeout: non_empty("CLAIMSCOPE_TIMEOUT_SECS")
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            search_debounce: non_empty("CLAIMSCOPE_SEARCH_DEBOUNCE_MS")
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            log_level: log_level_from(non_empty("CLAIMSCOPE_LOG").as_deref()),
            api_key_override: non_empty("CLAIMSCOPE_API_KEY"),
        }
    }
}

fn log_level_from(raw: Option<&str>) -> LevelFilter {
    match raw.unwrap_or("info").to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use tracing_subscriber::filter::LevelFilter;

    use super::AppConfig;

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.search_debounce, Duration::from_millis(300));
    }

    #[test]
    fn overrides_are_trimmed_and_bad_numbers_ignored() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CLAIMSCOPE_API_BASE", " https://example.test/v1/ "),
            ("CLAIMSCOPE_MODEL", "sonar-pro"),
            ("CLAIMSCOPE_TIMEOUT_SECS", "not-a-number"),
            ("CLAIMSCOPE_SEARCH_DEBOUNCE_MS", "150"),
            ("CLAIMSCOPE_LOG", "DEBUG"),
            ("CLAIMSCOPE_API_KEY", "   "),
        ]);
        let config = AppConfig::from_lookup(|name| vars.get(name).map(|value| value.to_string()));

        assert_eq!(config.api_base, "https://example.test/v1");
        assert_eq!(config.model, "sonar-pro");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.search_debounce, Duration::from_millis(150));
        assert_eq!(config.log_level, LevelFilter::DEBUG);
        assert_eq!(config.api_key_override, None);
    }
}
