use crate::app_config::{
    AppConfig, DEFAULT_AUTHOR_CLASS, DEFAULT_AUTHOR_PREFIX, DEFAULT_LEXICON_URL,
    DEFAULT_PAGE_URL_TEMPLATE, DEFAULT_REVIEW_CLASS,
};
use crate::review::MarkerSignature;
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
/// Every variable has a default, so the only failure mode is a value that
/// does not parse.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let lexicon_url = or_default("PRAISECHECK_LEXICON_URL", DEFAULT_LEXICON_URL);
    let page_url_template = or_default("PRAISECHECK_PAGE_URL_TEMPLATE", DEFAULT_PAGE_URL_TEMPLATE);
    let page_count = parse_u32("PRAISECHECK_PAGE_COUNT", "5")?;
    let rank_size = parse_usize("PRAISECHECK_RANK_SIZE", "3")?;

    let author_prefix = or_default("PRAISECHECK_AUTHOR_PREFIX", DEFAULT_AUTHOR_PREFIX);
    if author_prefix.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRAISECHECK_AUTHOR_PREFIX".to_string(),
            reason: "prefix must not be empty".to_string(),
        });
    }
    let author_marker = MarkerSignature::class(
        "span",
        &or_default("PRAISECHECK_AUTHOR_CLASS", DEFAULT_AUTHOR_CLASS),
    );
    let review_marker = MarkerSignature::class(
        "p",
        &or_default("PRAISECHECK_REVIEW_CLASS", DEFAULT_REVIEW_CLASS),
    );

    let request_timeout_secs = parse_u64("PRAISECHECK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PRAISECHECK_USER_AGENT", "praisecheck/0.1 (review-analysis)");
    let max_concurrent_fetches = parse_usize("PRAISECHECK_MAX_CONCURRENT_FETCHES", "1")?;
    if max_concurrent_fetches == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRAISECHECK_MAX_CONCURRENT_FETCHES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let log_level = or_default("PRAISECHECK_LOG_LEVEL", "info");

    Ok(AppConfig {
        lexicon_url,
        page_url_template,
        page_count,
        rank_size,
        author_prefix,
        author_marker,
        review_marker,
        request_timeout_secs,
        user_agent,
        max_concurrent_fetches,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
