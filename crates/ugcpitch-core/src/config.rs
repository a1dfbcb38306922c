use crate::app_config::{AppConfig, CreatorDefaults, Environment};
use crate::ConfigError;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let anthropic_api_key = require("ANTHROPIC_API_KEY")?;

    let env = parse_environment(&or_default("UGCPITCH_ENV", "development"))?;
    let bind_addr = parse_addr("UGCPITCH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("UGCPITCH_LOG_LEVEL", "info");

    let anthropic_base_url = or_default("UGCPITCH_ANTHROPIC_BASE_URL", DEFAULT_ANTHROPIC_BASE_URL);
    let model = or_default("UGCPITCH_MODEL", DEFAULT_MODEL);
    let max_tokens = parse_u32("UGCPITCH_MAX_TOKENS", "2000")?;
    if max_tokens == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "UGCPITCH_MAX_TOKENS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let request_timeout_secs = match optional("UGCPITCH_REQUEST_TIMEOUT_SECS") {
        Some(_) => Some(parse_u64("UGCPITCH_REQUEST_TIMEOUT_SECS", "0")?),
        None => None,
    };
    let run_timeout_secs = parse_u64("UGCPITCH_RUN_TIMEOUT_SECS", "300")?;
    let rate_limit_per_minute = parse_usize("UGCPITCH_RATE_LIMIT_PER_MINUTE", "30")?;

    let creator = CreatorDefaults {
        name: optional("UGCPITCH_CREATOR_NAME"),
        portfolio_url: optional("UGCPITCH_CREATOR_PORTFOLIO"),
        social_handle: optional("UGCPITCH_CREATOR_HANDLE"),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        anthropic_api_key,
        anthropic_base_url,
        model,
        max_tokens,
        request_timeout_secs,
        run_timeout_secs,
        rate_limit_per_minute,
        creator,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "UGCPITCH_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
