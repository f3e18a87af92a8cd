use crate::app_config::{AppConfig, Environment, ModelConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SUBSCOPE_ENV", "development"))?;

    let bind_addr = or_default("SUBSCOPE_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SUBSCOPE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SUBSCOPE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("SUBSCOPE_DATA_DIR", "./data"));

    let max_posts = parse_usize("SUBSCOPE_MAX_POSTS", "10")?;
    if max_posts == 0 {
        return Err(invalid("SUBSCOPE_MAX_POSTS", "must be at least 1".to_string()));
    }
    let feed_timeout_secs = parse_u64("SUBSCOPE_FEED_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SUBSCOPE_USER_AGENT", "subscope/0.1 (newsletter-analysis)");

    let model = match lookup("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Some(ModelConfig {
            api_key: key.trim().to_string(),
            model: or_default("SUBSCOPE_MODEL", "gpt-4o-mini"),
            base_url: or_default("SUBSCOPE_MODEL_BASE_URL", "https://api.openai.com/v1"),
            timeout_secs: parse_u64("SUBSCOPE_MODEL_TIMEOUT_SECS", "60")?,
        }),
        _ => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        max_posts,
        feed_timeout_secs,
        user_agent,
        model,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SUBSCOPE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
