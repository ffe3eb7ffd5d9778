//! Configuration file
//!
//! Optional YAML file holding endpoints, transport settings and paging
//! defaults. Every field has a default, so an empty file is valid.
//!
//! ```yaml
//! region: eu-west-1
//! endpoints:
//!   transcribe: http://localhost:4566
//! http:
//!   timeout_secs: 30
//!   max_retries: 3
//!   rate_limit_rps: 5
//!   headers:
//!     x-forwarded-for: listpager
//! paging:
//!   page_size: 50
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Region used when neither the file, the command line nor the
/// environment names one
pub const DEFAULT_REGION: &str = "us-east-1";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// AWS region for default endpoints
    #[serde(default)]
    pub region: Option<String>,

    /// Endpoint overrides keyed by service name (`transcribe`, `dlm`)
    #[serde(default)]
    pub endpoints: StringMap,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Paging defaults
    #[serde(default)]
    pub paging: PagingSettings,
}

impl Config {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!(path = %path.display(), "Loading config file");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, mid-listing
    pub fn validate(&self) -> Result<()> {
        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Err(Error::invalid_config("region", "must not be empty"));
            }
        }

        for (service, endpoint) in &self.endpoints {
            let url = url::Url::parse(endpoint).map_err(|e| {
                Error::invalid_config(format!("endpoints.{service}"), format!("'{endpoint}': {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::invalid_config(
                    format!("endpoints.{service}"),
                    format!("unsupported scheme '{}'", url.scheme()),
                ));
            }
        }

        self.http.validate()?;
        self.paging.validate()
    }

    /// Region from the first of: `explicit`, this file, `AWS_REGION`,
    /// `AWS_DEFAULT_REGION`, then [`DEFAULT_REGION`]
    pub fn resolve_region(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.region.clone())
            .or_else(|| std::env::var("AWS_REGION").ok())
            .or_else(|| std::env::var("AWS_DEFAULT_REGION").ok())
            .filter(|region| !region.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Endpoint override for `service`, if any
    pub fn endpoint_for(&self, service: &str) -> Option<&str> {
        self.endpoints.get(service).map(String::as_str)
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// Transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries per request for throttling and transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff
    #[serde(default)]
    pub backoff: BackoffSettings,

    /// Requests per second; unset means unlimited
    #[serde(default)]
    pub rate_limit_rps: Option<u32>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffSettings::default(),
            rate_limit_rps: None,
            user_agent: None,
            headers: StringMap::new(),
        }
    }
}

impl HttpSettings {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("http.timeout_secs", "must be greater than 0"));
        }
        if self.rate_limit_rps == Some(0) {
            return Err(Error::invalid_config("http.rate_limit_rps", "must be greater than 0"));
        }
        if self.backoff.initial_ms > self.backoff.max_ms {
            return Err(Error::invalid_config(
                "http.backoff",
                format!(
                    "initial_ms ({}) exceeds max_ms ({})",
                    self.backoff.initial_ms, self.backoff.max_ms
                ),
            ));
        }
        Ok(())
    }

    /// Build the transport configuration
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff.backoff_type,
                Duration::from_millis(self.backoff.initial_ms),
                Duration::from_millis(self.backoff.max_ms),
            );

        builder = match self.rate_limit_rps {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        };
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }

        builder.build()
    }
}

/// Retry backoff settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackoffSettings {
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    #[serde(default = "default_initial_backoff")]
    pub initial_ms: u64,

    #[serde(default = "default_max_backoff")]
    pub max_ms: u64,
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    20_000
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::default(),
            initial_ms: default_initial_backoff(),
            max_ms: default_max_backoff(),
        }
    }
}

// ============================================================================
// Paging Settings
// ============================================================================

/// Defaults for listing commands; command-line flags take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagingSettings {
    /// Results requested per call
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Total items emitted per run
    #[serde(default)]
    pub max_items: Option<usize>,
}

impl PagingSettings {
    fn validate(&self) -> Result<()> {
        if self.page_size == Some(0) {
            return Err(Error::invalid_config("paging.page_size", "must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
region: eu-west-1
endpoints:
  transcribe: "http://localhost:4566"
  dlm: "https://dlm.eu-west-1.amazonaws.com"
http:
  timeout_secs: 10
  max_retries: 5
  backoff:
    type: linear
    initial_ms: 250
    max_ms: 5000
  rate_limit_rps: 4
  user_agent: "ops-audit/2.0"
  headers:
    x-team: media
paging:
  page_size: 25
  max_items: 200
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint_for("transcribe"), Some("http://localhost:4566"));
        assert_eq!(config.endpoint_for("s3"), None);
        assert_eq!(config.http.backoff.backoff_type, BackoffType::Linear);
        assert_eq!(config.paging.page_size, Some(25));
        assert_eq!(config.paging.max_items, Some(200));

        let client = config.http.client_config();
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!(client.max_retries, 5);
        assert_eq!(client.initial_backoff, Duration::from_millis(250));
        assert_eq!(client.max_backoff, Duration::from_millis(5000));
        assert_eq!(client.rate_limit, Some(RateLimiterConfig::per_second(4)));
        assert_eq!(client.user_agent, "ops-audit/2.0");
        assert_eq!(client.default_headers.get("x-team").map(String::as_str), Some("media"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.max_retries, 3);
        assert!(config.http.client_config().rate_limit.is_none());
    }

    #[test]
    fn test_explicit_region_wins() {
        let config = Config::from_yaml("region: ap-southeast-2").unwrap();
        assert_eq!(config.resolve_region(Some("ca-central-1")), "ca-central-1");
        assert_eq!(config.resolve_region(None), "ap-southeast-2");
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let err = Config::from_yaml("endpoints:\n  transcribe: not a url\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "endpoints.transcribe"));

        let err = Config::from_yaml("endpoints:\n  dlm: \"ftp://example.com\"\n").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_rejects_zero_values() {
        assert!(Config::from_yaml("http:\n  timeout_secs: 0\n").is_err());
        assert!(Config::from_yaml("http:\n  rate_limit_rps: 0\n").is_err());
        assert!(Config::from_yaml("paging:\n  page_size: 0\n").is_err());
    }

    #[test]
    fn test_rejects_inverted_backoff() {
        let yaml = "http:\n  backoff:\n    initial_ms: 900\n    max_ms: 100\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("initial_ms (900) exceeds max_ms (100)"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = Config::from_yaml("paging:\n  pagesize: 10\n").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "region: us-west-2\npaging:\n  max_items: 10").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.region.as_deref(), Some("us-west-2"));
        assert_eq!(config.paging.max_items, Some(10));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
