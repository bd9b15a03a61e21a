//! Runtime configuration read from environment variables.
//!
//! `.env` is loaded by `main` before [`Config::from_env`] runs, so values may
//! come from either place.

use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Gemini API key. An empty key is passed through as-is; the provider
    /// rejects the request and the search panel shows the fallback text.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: Timeouts,
}

impl Config {
    /// Build the config from the process environment.
    ///
    /// - `GEMINI_API_KEY`: API key (default empty)
    /// - `GEMINI_MODEL`: model name (default `gemini-3-flash-preview`)
    /// - `GEMINI_BASE_URL`: API base URL
    /// - `SPIRITLABS_REQUEST_TIMEOUT_SECS`: default 60
    /// - `SPIRITLABS_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY").unwrap_or_default();
        let model = lookup("GEMINI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let base_url = lookup("GEMINI_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = Timeouts {
            request_secs: parse_u64(
                lookup("SPIRITLABS_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            connect_secs: parse_u64(
                lookup("SPIRITLABS_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        };

        Self {
            api_key,
            model,
            base_url,
            timeouts,
        }
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(|_| None);
        assert_eq!(cfg.api_key, "");
        assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(cfg.timeouts, Timeouts::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("GEMINI_BASE_URL", "http://localhost:8080/v1beta/"),
            ("SPIRITLABS_REQUEST_TIMEOUT_SECS", "5"),
            ("SPIRITLABS_CONNECT_TIMEOUT_SECS", "2"),
        ]));
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.model, "gemini-2.5-flash");
        assert_eq!(cfg.base_url, "http://localhost:8080/v1beta");
        assert_eq!(cfg.timeouts.request(), Duration::from_secs(5));
        assert_eq!(cfg.timeouts.connect(), Duration::from_secs(2));
    }

    #[test]
    fn bad_timeouts_fall_back_to_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("SPIRITLABS_REQUEST_TIMEOUT_SECS", "soon"),
            ("SPIRITLABS_CONNECT_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(cfg.timeouts, Timeouts::default());
    }

    #[test]
    fn blank_model_uses_default() {
        let cfg = Config::from_lookup(lookup_from(&[("GEMINI_MODEL", "  ")]));
        assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
    }
}
