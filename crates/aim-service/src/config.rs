//! Session configuration.

use std::fmt;

use aim_problem::{Precision, ProblemResult};
use serde::{Deserialize, Serialize};

use crate::poll::PollPolicy;

/// Environment variable naming the service endpoint.
pub const ENV_ENDPOINT: &str = "AIM_ENDPOINT";
/// Environment variable holding the bearer token.
pub const ENV_TOKEN: &str = "AIM_TOKEN";
/// Environment variable selecting the precision.
pub const ENV_PRECISION: &str = "AIM_PRECISION";

/// Immutable configuration of one solver session.
///
/// The precision chosen here is attached to every job the session submits.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Workspace name (e.g. `local`, `http`).
    pub workspace: String,
    /// Service endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Bearer token.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Numeric precision for all submissions.
    #[serde(default)]
    pub precision: Precision,
    /// Poll loop policy.
    #[serde(default)]
    pub poll: PollPolicy,
}

impl SessionConfig {
    /// Create a configuration for a named workspace with default precision
    /// and poll policy.
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            endpoint: None,
            token: None,
            precision: Precision::default(),
            poll: PollPolicy::default(),
        }
    }

    /// Read endpoint, token and precision from `AIM_*` environment variables.
    ///
    /// Unset variables keep their defaults; an unrecognized precision fails.
    pub fn from_env(workspace: impl Into<String>) -> ProblemResult<Self> {
        let mut config = Self::new(workspace);
        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
            config.endpoint = Some(endpoint);
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            config.token = Some(token);
        }
        if let Ok(precision) = std::env::var(ENV_PRECISION) {
            config.precision = precision.parse()?;
        }
        Ok(config)
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the precision.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the precision by name (`Float16`, `BFloat16`, `Float32`,
    /// `Float64`).
    pub fn with_precision_name(self, name: &str) -> ProblemResult<Self> {
        Ok(self.with_precision(name.parse()?))
    }

    /// Set the poll policy.
    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("workspace", &self.workspace)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("precision", &self.precision)
            .field("poll", &self.poll)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_problem::ProblemError;

    #[test]
    fn test_session_config() {
        let config = SessionConfig::new("http")
            .with_endpoint("https://aim.example.com")
            .with_token("secret-token")
            .with_precision(Precision::Float32);

        assert_eq!(config.workspace, "http");
        assert_eq!(config.endpoint.as_deref(), Some("https://aim.example.com"));
        assert_eq!(config.precision, Precision::Float32);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = SessionConfig::new("http").with_token("secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_token_not_serialized() {
        let config = SessionConfig::new("http").with_token("secret-token");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn test_precision_by_name() {
        let config = SessionConfig::new("local")
            .with_precision_name("Float64")
            .unwrap();
        assert_eq!(config.precision, Precision::Float64);

        let err = SessionConfig::new("local")
            .with_precision_name("Float128")
            .unwrap_err();
        assert!(matches!(err, ProblemError::InvalidPrecision(_)));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"workspace": "local"}"#).unwrap();
        assert_eq!(config.precision, Precision::Float16);
        assert_eq!(config.poll, PollPolicy::default());
    }
}
