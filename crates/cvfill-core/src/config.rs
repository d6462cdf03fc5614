use thiserror::Error;

use crate::options::FillOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Runtime settings for the fill engine.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    /// Whether automatic (non-manual) fills are permitted at all.
    pub auto_fill_enabled: bool,
    /// Window after a successful fill during which a page is treated as
    /// already handled.
    pub fill_window_secs: u64,
    pub request_timeout_secs: u64,
    pub default_employment_type: String,
    pub default_location: String,
    pub default_availability: String,
    pub default_expected_salary: Option<String>,
    pub default_cover_letter: Option<String>,
}

impl Settings {
    /// Answers to use when the caller provides no per-run options.
    #[must_use]
    pub fn default_options(&self) -> FillOptions {
        FillOptions {
            employment_type: Some(self.default_employment_type.clone()),
            location: Some(self.default_location.clone()),
            availability_date: Some(self.default_availability.clone()),
            expected_salary: self.default_expected_salary.clone(),
            cover_letter: self.default_cover_letter.clone(),
            ..FillOptions::default()
        }
    }
}

/// Load settings from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_settings() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    load_settings_from_env()
}

/// Load settings from environment variables already in the process.
///
/// Unlike [`load_settings`], this does NOT load `.env` files. Useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_settings_from_env() -> Result<Settings, ConfigError> {
    build_settings(|key| std::env::var(key))
}

/// Build settings using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_settings<F>(lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got {other:?}"),
            }),
        }
    };

    let webdriver_url = or_default("CVFILL_WEBDRIVER_URL", "http://localhost:9515");
    let auto_fill_enabled = parse_bool("CVFILL_AUTO_FILL_ENABLED", "true")?;
    let fill_window_secs = parse_u64("CVFILL_FILL_WINDOW_SECS", "30")?;
    let request_timeout_secs = parse_u64("CVFILL_REQUEST_TIMEOUT_SECS", "30")?;

    let default_employment_type = or_default("CVFILL_DEFAULT_EMPLOYMENT_TYPE", "B2B");
    let default_location = or_default("CVFILL_DEFAULT_LOCATION", "Warszawa");
    let default_availability = or_default("CVFILL_DEFAULT_AVAILABILITY", "Natychmiast");
    let default_expected_salary = lookup("CVFILL_DEFAULT_EXPECTED_SALARY").ok();
    let default_cover_letter = lookup("CVFILL_DEFAULT_COVER_LETTER").ok();

    Ok(Settings {
        webdriver_url,
        auto_fill_enabled,
        fill_window_secs,
        request_timeout_secs,
        default_employment_type,
        default_location,
        default_availability,
        default_expected_salary,
        default_cover_letter,
    })
}

#[cfg(test)]
mod tests {
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
    fn build_settings_all_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let settings = build_settings(lookup_from_map(&map)).unwrap();
        assert_eq!(settings.webdriver_url, "http://localhost:9515");
        assert!(settings.auto_fill_enabled);
        assert_eq!(settings.fill_window_secs, 30);
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.default_employment_type, "B2B");
        assert_eq!(settings.default_location, "Warszawa");
        assert_eq!(settings.default_availability, "Natychmiast");
        assert!(settings.default_expected_salary.is_none());
        assert!(settings.default_cover_letter.is_none());
    }

    #[test]
    fn build_settings_overrides() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CVFILL_WEBDRIVER_URL", "http://127.0.0.1:4444");
        map.insert("CVFILL_AUTO_FILL_ENABLED", "false");
        map.insert("CVFILL_FILL_WINDOW_SECS", "60");
        map.insert("CVFILL_DEFAULT_EXPECTED_SALARY", "25000");
        let settings = build_settings(lookup_from_map(&map)).unwrap();
        assert_eq!(settings.webdriver_url, "http://127.0.0.1:4444");
        assert!(!settings.auto_fill_enabled);
        assert_eq!(settings.fill_window_secs, 60);
        assert_eq!(settings.default_expected_salary.as_deref(), Some("25000"));
    }

    #[test]
    fn build_settings_invalid_bool() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CVFILL_AUTO_FILL_ENABLED", "maybe");
        let result = build_settings(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CVFILL_AUTO_FILL_ENABLED"),
            "expected InvalidEnvVar(CVFILL_AUTO_FILL_ENABLED), got: {result:?}"
        );
    }

    #[test]
    fn build_settings_invalid_window() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CVFILL_FILL_WINDOW_SECS", "not-a-number");
        let result = build_settings(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CVFILL_FILL_WINDOW_SECS"),
            "expected InvalidEnvVar(CVFILL_FILL_WINDOW_SECS), got: {result:?}"
        );
    }

    #[test]
    fn default_options_carry_configured_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let settings = build_settings(lookup_from_map(&map)).unwrap();
        let opts = settings.default_options();
        assert_eq!(opts.employment_type.as_deref(), Some("B2B"));
        assert_eq!(opts.location.as_deref(), Some("Warszawa"));
        assert_eq!(opts.availability_date.as_deref(), Some("Natychmiast"));
        assert!(opts.expected_salary.is_none());
    }
}
