use crate::app_config::{AppConfig, Environment, FallbackPolicy, SerpApiEngine};
use crate::ConfigError;

/// Value shipped in sample `.env` files; treated the same as an unset key.
pub const SERPAPI_KEY_PLACEHOLDER: &str = "YOUR_SERPAPI_KEY_HERE";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if a value is present but invalid.
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
/// Returns `ConfigError::InvalidEnvVar` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here so tests can drive them with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PRICESCOUT_ENV", "development"));

    let bind_addr = or_default("PRICESCOUT_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PRICESCOUT_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PRICESCOUT_LOG_LEVEL", "info");

    let serpapi_key = lookup("SERPAPI_KEY")
        .ok()
        .map(|k| k.trim().to_owned())
        .filter(|k| !k.is_empty() && k != SERPAPI_KEY_PLACEHOLDER);
    let serpapi_base_url = or_default("SERPAPI_BASE_URL", "https://serpapi.com/");
    let serpapi_engine = parse_serpapi_engine(&or_default(
        "PRICESCOUT_SERPAPI_ENGINE",
        "google_shopping",
    ))?;
    let language = or_default("PRICESCOUT_LANGUAGE", "en");

    let result_limit = parse_u32("PRICESCOUT_RESULT_LIMIT", "20")?;
    if result_limit == 0 {
        return Err(invalid(
            "PRICESCOUT_RESULT_LIMIT",
            "must be at least 1".to_string(),
        ));
    }

    let provider_timeout_secs = parse_u64("PRICESCOUT_PROVIDER_TIMEOUT_SECS", "30")?;
    let provider_user_agent = or_default(
        "PRICESCOUT_PROVIDER_USER_AGENT",
        "pricescout/0.1 (price-discovery)",
    );
    let provider_max_retries = parse_u32("PRICESCOUT_PROVIDER_MAX_RETRIES", "1")?;
    let provider_backoff_base_secs = parse_u64("PRICESCOUT_PROVIDER_BACKOFF_BASE_SECS", "1")?;
    let fallback_policy =
        parse_fallback_policy(&or_default("PRICESCOUT_TIER1_FALLBACK", "requery"))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        serpapi_key,
        serpapi_base_url,
        serpapi_engine,
        language,
        result_limit,
        provider_timeout_secs,
        provider_user_agent,
        provider_max_retries,
        provider_backoff_base_secs,
        fallback_policy,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_serpapi_engine(s: &str) -> Result<SerpApiEngine, ConfigError> {
    match s {
        "google_shopping" => Ok(SerpApiEngine::GoogleShopping),
        "google" => Ok(SerpApiEngine::Google),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICESCOUT_SERPAPI_ENGINE".to_string(),
            reason: format!("unsupported engine \"{other}\"; expected google_shopping or google"),
        }),
    }
}

fn parse_fallback_policy(s: &str) -> Result<FallbackPolicy, ConfigError> {
    match s {
        "requery" => Ok(FallbackPolicy::Requery),
        "reuse_tier1" => Ok(FallbackPolicy::ReuseTierOne),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICESCOUT_TIER1_FALLBACK".to_string(),
            reason: format!("unsupported policy \"{other}\"; expected requery or reuse_tier1"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
