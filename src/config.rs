//! Application-level configuration constants and page-level overrides.

use log::LevelFilter;

// Data source
pub const CATALOG_URL: &str = "/api/songs";

// Session defaults
pub const DEFAULT_LEVEL: &str = "Medium";
pub const DEFAULT_DURATION_SECS: u32 = 30;
pub const DEFAULT_PREP_SECS: u32 = 0;

// UI behavior
pub const PREP_STEP_SECS: i32 = 5;
pub const TICK_MS: u32 = 1_000;
pub const MAX_PREP_SECS: u32 = 600;

// Video embedding
pub const EMBED_BASE_URL: &str = "https://www.youtube-nocookie.com/embed/";

pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Runtime configuration, built from the constants above and optionally
/// overridden from the page query string.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub catalog_url: String,
    pub initial_prep_secs: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: CATALOG_URL.to_string(),
            initial_prep_secs: DEFAULT_PREP_SECS,
            log_level: LOG_LEVEL,
        }
    }
}

impl AppConfig {
    /// Apply `catalog`, `prep` and `log` overrides from a query string such
    /// as `?catalog=/data.json&prep=10&log=debug`.
    ///
    /// Unknown keys and unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = match pair.split_once('=') {
                Some(kv) => kv,
                None => continue,
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key {
                "catalog" => config.catalog_url = value.to_string(),
                "prep" => {
                    if let Ok(secs) = value.parse::<u32>() {
                        config.initial_prep_secs = secs.min(MAX_PREP_SECS);
                    }
                }
                "log" => {
                    if let Ok(level) = value.parse::<LevelFilter>() {
                        config.log_level = level;
                    }
                }
                _ => {}
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_defaults() {
        assert_eq!(AppConfig::from_query(""), AppConfig::default());
        assert_eq!(AppConfig::from_query("?"), AppConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_query("?catalog=/fixtures/songs.json&prep=10&log=debug");
        assert_eq!(config.catalog_url, "/fixtures/songs.json");
        assert_eq!(config.initial_prep_secs, 10);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = AppConfig::from_query("prep=-3&log=loud&catalog=&unknown=1&flag");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn prep_override_is_capped() {
        let config = AppConfig::from_query("prep=100000");
        assert_eq!(config.initial_prep_secs, MAX_PREP_SECS);
    }
}
