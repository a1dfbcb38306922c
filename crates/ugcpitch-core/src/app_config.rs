use std::net::SocketAddr;

use crate::pitch::Creator;
use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Creator identity used when a pitch request leaves those fields out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatorDefaults {
    pub name: Option<String>,
    pub portfolio_url: Option<String>,
    pub social_handle: Option<String>,
}

impl CreatorDefaults {
    /// Fills any creator field the caller left out from these defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingCreatorField`] naming the first field that
    /// is blank in both the request and the defaults.
    pub fn resolve(
        &self,
        name: Option<&str>,
        portfolio_url: Option<&str>,
        social_handle: Option<&str>,
    ) -> Result<Creator, CoreError> {
        Ok(Creator {
            name: pick(name, self.name.as_ref(), "creator_name")?,
            portfolio_url: pick(portfolio_url, self.portfolio_url.as_ref(), "portfolio_url")?,
            social_handle: pick(social_handle, self.social_handle.as_ref(), "social_handle")?,
        })
    }
}

fn pick(
    given: Option<&str>,
    fallback: Option<&String>,
    field: &'static str,
) -> Result<String, CoreError> {
    given
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .or_else(|| fallback.cloned())
        .ok_or(CoreError::MissingCreatorField(field))
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub anthropic_api_key: String,
    pub anthropic_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Per-request timeout for generation calls. `None` keeps the transport default.
    pub request_timeout_secs: Option<u64>,
    pub run_timeout_secs: u64,
    pub rate_limit_per_minute: usize,
    pub creator: CreatorDefaults,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("anthropic_api_key", &"[redacted]")
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("run_timeout_secs", &self.run_timeout_secs)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("creator", &self.creator)
            .finish()
    }
}
