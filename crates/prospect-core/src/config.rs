use std::path::PathBuf;

use crate::app_config::{AppConfig, MailCredentials};
use crate::ConfigError;

pub(crate) const DEFAULT_SCRAPER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const DEFAULT_MAILGUN_BASE_URL: &str = "https://api.mailgun.net/v3";

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let invalid = |reason: String| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        };
        match raw.parse::<u64>() {
            Ok(0) => Err(invalid(format!("\"{raw}\" must be greater than zero"))),
            Ok(value) => Ok(value),
            Err(e) => Err(invalid(e.to_string())),
        }
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match optional(var).map(|v| v.to_ascii_lowercase()).as_deref() {
            None => Ok(default),
            Some("1" | "true" | "yes" | "on") => Ok(true),
            Some("0" | "false" | "no" | "off") => Ok(false),
            Some(other) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got \"{other}\""),
            }),
        }
    };

    let google_maps_api_key = require("GOOGLE_MAPS_API_KEY")?;
    let search_location = or_default("SEARCH_LOCATION", "Istanbul, Turkey");
    let search_keyword = or_default("SEARCH_KEYWORD", "textile fabric company");
    let additional_keywords = optional("ADDITIONAL_KEYWORDS")
        .map(|raw| parse_keyword_list(&raw))
        .unwrap_or_default();
    let search_radius_m = parse_radius(&or_default("SEARCH_RADIUS", "50000"))?;

    let mail = match (optional("MAILGUN_API_KEY"), optional("MAILGUN_DOMAIN")) {
        (Some(api_key), Some(domain)) => {
            let from_address =
                optional("EMAIL_FROM_ADDRESS").unwrap_or_else(|| format!("postmaster@{domain}"));
            Some(MailCredentials {
                api_key,
                base_url: or_default("MAILGUN_BASE_URL", DEFAULT_MAILGUN_BASE_URL),
                domain,
                from_address,
            })
        }
        _ => None,
    };

    let email_from_name = or_default("EMAIL_FROM_NAME", "Business Inquiry");
    let email_subject = or_default("EMAIL_SUBJECT", "Business Inquiry");
    let output_dir = PathBuf::from(or_default("OUTPUT_DIR", "data"));
    let log_level = or_default("LOG_LEVEL", "info");

    let scraper_timeout_secs = parse_positive_u64("SCRAPER_TIMEOUT_SECS", "10")?;
    let scraper_user_agent = or_default("SCRAPER_USER_AGENT", DEFAULT_SCRAPER_USER_AGENT);
    let scraper_single_page = parse_bool("SCRAPER_SINGLE_PAGE", false)?;

    Ok(AppConfig {
        google_maps_api_key,
        search_location,
        search_keyword,
        additional_keywords,
        search_radius_m,
        mail,
        email_from_name,
        email_subject,
        output_dir,
        log_level,
        scraper_timeout_secs,
        scraper_user_agent,
        scraper_single_page,
    })
}

/// Parse `SEARCH_RADIUS` into a strictly positive, finite number of metres.
fn parse_radius(raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "SEARCH_RADIUS".to_string(),
        reason,
    };
    let radius = raw
        .parse::<f64>()
        .map_err(|e| invalid(format!("\"{raw}\" is not a number: {e}")))?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(invalid(format!("\"{raw}\" must be a positive number")));
    }
    Ok(radius)
}

/// Split a comma-separated keyword list, trimming each entry and dropping
/// empty ones.
fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
