use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("ANTHROPIC_API_KEY", "sk-ant-test");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "UGCPITCH_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ANTHROPIC_API_KEY"),
        "expected MissingEnvVar(ANTHROPIC_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("ANTHROPIC_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ANTHROPIC_API_KEY"),
        "expected MissingEnvVar(ANTHROPIC_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.anthropic_api_key, "sk-ant-test");
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.anthropic_base_url, "https://api.anthropic.com");
    assert_eq!(cfg.model, "claude-sonnet-4-20250514");
    assert_eq!(cfg.max_tokens, 2000);
    assert!(cfg.request_timeout_secs.is_none());
    assert_eq!(cfg.run_timeout_secs, 300);
    assert_eq!(cfg.rate_limit_per_minute, 30);
    assert_eq!(cfg.creator, CreatorDefaults::default());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("UGCPITCH_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UGCPITCH_BIND_ADDR"),
        "expected InvalidEnvVar(UGCPITCH_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn model_and_base_url_override() {
    let mut map = full_env();
    map.insert("UGCPITCH_MODEL", "claude-test-model");
    map.insert("UGCPITCH_ANTHROPIC_BASE_URL", "http://127.0.0.1:9999");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.model, "claude-test-model");
    assert_eq!(cfg.anthropic_base_url, "http://127.0.0.1:9999");
}

#[test]
fn max_tokens_override() {
    let mut map = full_env();
    map.insert("UGCPITCH_MAX_TOKENS", "4096");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_tokens, 4096);
}

#[test]
fn max_tokens_invalid() {
    let mut map = full_env();
    map.insert("UGCPITCH_MAX_TOKENS", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UGCPITCH_MAX_TOKENS"),
        "expected InvalidEnvVar(UGCPITCH_MAX_TOKENS), got: {result:?}"
    );
}

#[test]
fn max_tokens_zero_is_rejected() {
    let mut map = full_env();
    map.insert("UGCPITCH_MAX_TOKENS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UGCPITCH_MAX_TOKENS"),
        "expected InvalidEnvVar(UGCPITCH_MAX_TOKENS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("UGCPITCH_REQUEST_TIMEOUT_SECS", "90");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, Some(90));
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("UGCPITCH_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UGCPITCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(UGCPITCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn run_timeout_secs_override() {
    let mut map = full_env();
    map.insert("UGCPITCH_RUN_TIMEOUT_SECS", "45");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.run_timeout_secs, 45);
}

#[test]
fn rate_limit_per_minute_invalid() {
    let mut map = full_env();
    map.insert("UGCPITCH_RATE_LIMIT_PER_MINUTE", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UGCPITCH_RATE_LIMIT_PER_MINUTE"),
        "expected InvalidEnvVar(UGCPITCH_RATE_LIMIT_PER_MINUTE), got: {result:?}"
    );
}

#[test]
fn creator_defaults_are_read_and_trimmed() {
    let mut map = full_env();
    map.insert("UGCPITCH_CREATOR_NAME", " Julia ");
    map.insert("UGCPITCH_CREATOR_PORTFOLIO", "https://julia.example.com/");
    map.insert("UGCPITCH_CREATOR_HANDLE", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.creator.name.as_deref(), Some("Julia"));
    assert_eq!(
        cfg.creator.portfolio_url.as_deref(),
        Some("https://julia.example.com/")
    );
    assert!(cfg.creator.social_handle.is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("sk-ant-test"), "api key leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
