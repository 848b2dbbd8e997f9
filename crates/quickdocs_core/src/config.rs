use std::fmt;

use thiserror::Error;

/// Address used when nothing has been saved yet.
pub const DEFAULT_BACKEND_ADDRESS: &str = "http://localhost:8000";

/// Key under which the backend address is persisted.
pub const SETTINGS_KEY: &str = "chatbot_api_url";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid backend address: {0}")]
    InvalidAddress(String),
    #[error("failed to persist settings: {0}")]
    Persist(String),
}

/// Validated base address of the retrieval backend, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendAddress(String);

impl BackendAddress {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidAddress("address is empty".into()));
        }
        let parsed = url::Url::parse(trimmed)
            .map_err(|err| ConfigError::InvalidAddress(format!("{trimmed}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidAddress(format!(
                "{trimmed}: unsupported scheme {}",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidAddress(format!("{trimmed}: missing host")));
        }
        Ok(Self(trimmed.trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins a fixed endpoint path such as `/chat` onto the base address.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl Default for BackendAddress {
    fn default() -> Self {
        Self(DEFAULT_BACKEND_ADDRESS.to_string())
    }
}

impl fmt::Display for BackendAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub backend_address: BackendAddress,
}

impl Config {
    /// Builds a config from a persisted value, falling back to the default
    /// address when the value is missing or no longer valid.
    pub fn from_persisted(value: Option<&str>) -> Self {
        let backend_address = value
            .and_then(|raw| BackendAddress::parse(raw).ok())
            .unwrap_or_default();
        Self { backend_address }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_strips_trailing_slash() {
        let address = BackendAddress::parse("  https://rag.example.com/api/  ").unwrap();
        assert_eq!(address.as_str(), "https://rag.example.com/api");
        assert_eq!(address.endpoint("/chat"), "https://rag.example.com/api/chat");
    }

    #[test]
    fn parse_rejects_blank_and_non_http() {
        assert!(matches!(
            BackendAddress::parse("   "),
            Err(ConfigError::InvalidAddress(_))
        ));
        assert!(BackendAddress::parse("not a url").is_err());
        assert!(BackendAddress::parse("ftp://example.com").is_err());
    }

    #[test]
    fn invalid_persisted_value_falls_back_to_default() {
        assert_eq!(
            Config::from_persisted(Some("")).backend_address.as_str(),
            DEFAULT_BACKEND_ADDRESS
        );
        assert_eq!(
            Config::from_persisted(Some("http://10.0.0.2:9000")).backend_address.as_str(),
            "http://10.0.0.2:9000"
        );
    }
}
