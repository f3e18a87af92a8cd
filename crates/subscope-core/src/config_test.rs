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

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
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
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SUBSCOPE_ENV"));
}

#[test]
fn build_app_config_defaults() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir.to_str(), Some("./data"));
    assert_eq!(cfg.max_posts, 10);
    assert_eq!(cfg.feed_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "subscope/0.1 (newsletter-analysis)");
    assert!(cfg.model.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SUBSCOPE_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SUBSCOPE_BIND_ADDR"),
        "expected InvalidEnvVar(SUBSCOPE_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_max_posts() {
    let mut map = HashMap::new();
    map.insert("SUBSCOPE_MAX_POSTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SUBSCOPE_MAX_POSTS"),
        "expected InvalidEnvVar(SUBSCOPE_MAX_POSTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_max_posts_override() {
    let mut map = HashMap::new();
    map.insert("SUBSCOPE_MAX_POSTS", "25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_posts, 25);
}

#[test]
fn build_app_config_feed_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("SUBSCOPE_FEED_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SUBSCOPE_FEED_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SUBSCOPE_FEED_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn model_config_present_when_api_key_set() {
    let mut map = HashMap::new();
    map.insert("OPENAI_API_KEY", "sk-test");
    map.insert("SUBSCOPE_MODEL", "gpt-4.1-mini");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let model = cfg.model.expect("model config");
    assert_eq!(model.api_key, "sk-test");
    assert_eq!(model.model, "gpt-4.1-mini");
    assert_eq!(model.base_url, "https://api.openai.com/v1");
    assert_eq!(model.timeout_secs, 60);
}

#[test]
fn model_config_absent_when_api_key_blank() {
    let mut map = HashMap::new();
    map.insert("OPENAI_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.model.is_none());
}

#[test]
fn model_config_debug_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("OPENAI_API_KEY", "sk-very-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("sk-very-secret"));
    assert!(rendered.contains("[redacted]"));
}
