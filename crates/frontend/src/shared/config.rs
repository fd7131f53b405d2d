//! Client configuration
//!
//! Values are fixed at build time through optional environment variables and
//! fall back to the defaults below.

/// Overrides the API base URL derived from `window.location`
pub const API_BASE_OVERRIDE: Option<&str> = option_env!("MEAMS_API_BASE");

pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 500;
pub const DEFAULT_LOG_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Quiet period after the last keystroke before a search is sent
    pub search_debounce_ms: u32,
    /// Length of the trailing date window the logs page opens with
    pub log_window_days: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            log_window_days: DEFAULT_LOG_WINDOW_DAYS,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Self {
        Self::from_values(
            option_env!("MEAMS_SEARCH_DEBOUNCE_MS"),
            option_env!("MEAMS_LOG_WINDOW_DAYS"),
        )
    }

    fn from_values(debounce_ms: Option<&str>, window_days: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = debounce_ms {
            match raw.trim().parse::<u32>() {
                Ok(ms) => config.search_debounce_ms = ms,
                Err(_) => log::warn!("Ignoring invalid MEAMS_SEARCH_DEBOUNCE_MS: {}", raw),
            }
        }

        if let Some(raw) = window_days {
            match raw.trim().parse::<i64>() {
                Ok(days) if days >= 0 => config.log_window_days = days,
                _ => log::warn!("Ignoring invalid MEAMS_LOG_WINDOW_DAYS: {}", raw),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_values(None, None);
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.log_window_days, 30);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_values(Some("250"), Some(" 7 "));
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.log_window_days, 7);
    }

    #[test]
    fn test_invalid_overrides_fall_back() {
        let config = ClientConfig::from_values(Some("soon"), Some("-3"));
        assert_eq!(config, ClientConfig::default());
    }
}
