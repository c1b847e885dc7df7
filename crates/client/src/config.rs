/// Default backend address for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Errors raised while reading client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Client configuration.
///
/// Construct explicitly with [`ClientConfig::new`], or load from the
/// environment with [`ClientConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. `None` leaves the HTTP client default.
    pub request_timeout_secs: Option<u64>,
    /// Install the tracing hook that logs every request and response.
    pub debug_logging: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            request_timeout_secs: None,
            debug_logging: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `RULE_API_URL`          | `http://localhost:8000` |
    /// | `RULE_API_TIMEOUT_SECS` | unset                   |
    /// | `RULE_API_DEBUG`        | `false`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("RULE_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let request_timeout_secs = match lookup("RULE_API_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    var: "RULE_API_TIMEOUT_SECS",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };

        let debug_logging = lookup("RULE_API_DEBUG")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        Ok(Self {
            base_url: normalize_base_url(base_url),
            request_timeout_secs,
            debug_logging,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, None);
        assert!(!config.debug_logging);
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("RULE_API_URL", "https://rules.internal:9000/"),
            ("RULE_API_TIMEOUT_SECS", "15"),
            ("RULE_API_DEBUG", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://rules.internal:9000");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert!(config.debug_logging);
    }

    #[test]
    fn debug_flag_only_accepts_true_or_one() {
        let on = ClientConfig::from_lookup(lookup_from(&[("RULE_API_DEBUG", "1")])).unwrap();
        let off = ClientConfig::from_lookup(lookup_from(&[("RULE_API_DEBUG", "yes")])).unwrap();
        assert!(on.debug_logging);
        assert!(!off.debug_logging);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let result =
            ClientConfig::from_lookup(lookup_from(&[("RULE_API_TIMEOUT_SECS", "soon")]));
        assert_matches!(
            result,
            Err(ConfigError::InvalidValue { var: "RULE_API_TIMEOUT_SECS", .. })
        );
    }

    #[test]
    fn builder_methods_normalize_url() {
        let config = ClientConfig::new("http://a:1///")
            .with_base_url("http://b:2/")
            .with_timeout_secs(5)
            .with_debug_logging(true);
        assert_eq!(config.base_url, "http://b:2");
        assert_eq!(config.request_timeout_secs, Some(5));
        assert!(config.debug_logging);
    }
}
