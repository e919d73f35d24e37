use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Upper bound on the default worker pool size.
const MAX_DEFAULT_CONCURRENCY: usize = 32;

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

/// Default size of the concurrent worker pool: the number of available CPUs
/// plus four, capped at 32.
#[must_use]
pub fn default_max_concurrency() -> usize {
    std::thread::available_parallelism()
        .map_or(1, std::num::NonZeroUsize::get)
        .saturating_add(4)
        .min(MAX_DEFAULT_CONCURRENCY)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real process environment so it can be tested with a
/// plain `HashMap` lookup.
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

    let parse_non_negative_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(invalid(var, format!("expected a non-negative number, got {value}")))
        }
    };

    let google_api_key = require("GOOGLE_API_KEY")?;
    let env = parse_environment(&or_default("TRIPTAP_ENV", "development"))?;
    let log_level = or_default("TRIPTAP_LOG_LEVEL", "info");

    let places_base_url = or_default(
        "TRIPTAP_PLACES_BASE_URL",
        "https://places.googleapis.com/v1",
    );
    let maps_base_url = or_default(
        "TRIPTAP_MAPS_BASE_URL",
        "https://maps.googleapis.com/maps/api",
    );
    let geocoder_url = or_default(
        "TRIPTAP_GEOCODER_URL",
        "https://nominatim.openstreetmap.org/search",
    );
    let user_agent = or_default("TRIPTAP_USER_AGENT", "triptap/0.1 (itinerary-planner)");
    let request_timeout_secs = parse_u64("TRIPTAP_REQUEST_TIMEOUT_SECS", "10")?;

    let search_radius_meters = parse_non_negative_f64("TRIPTAP_SEARCH_RADIUS_METERS", "1500")?;
    let min_rating = parse_non_negative_f64("TRIPTAP_MIN_RATING", "3.5")?;
    let min_rating_count = parse_u32("TRIPTAP_MIN_RATING_COUNT", "100")?;

    let max_concurrent_entries = match lookup("TRIPTAP_MAX_CONCURRENT_ENTRIES") {
        Ok(raw) => {
            let n = raw
                .parse::<usize>()
                .map_err(|e| invalid("TRIPTAP_MAX_CONCURRENT_ENTRIES", e.to_string()))?;
            if n == 0 {
                return Err(invalid(
                    "TRIPTAP_MAX_CONCURRENT_ENTRIES",
                    "must be at least 1".to_string(),
                ));
            }
            n
        }
        Err(_) => default_max_concurrency(),
    };

    Ok(AppConfig {
        env,
        log_level,
        google_api_key,
        places_base_url,
        maps_base_url,
        geocoder_url,
        user_agent,
        request_timeout_secs,
        search_radius_meters,
        min_rating,
        min_rating_count,
        max_concurrent_entries,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TRIPTAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
