//! Runtime configuration resolved from the environment.
//!
//! Only the binary reads the environment. Library types take everything
//! through constructors and builders.

use crate::error::{Result, StudioError};
use crate::video::{progress, ApiKey, PollPolicy, VeoModel, DEFAULT_BASE_URL};
use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Fallback variable for the API key.
pub const API_KEY_FALLBACK_VAR: &str = "API_KEY";

/// Everything needed to wire up a client, driver and progress ticker.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Service credential.
    pub api_key: ApiKey,
    /// Model to submit to.
    pub model: VeoModel,
    /// API root.
    pub base_url: String,
    /// Poll interval and limits.
    pub poll: PollPolicy,
    /// Time between progress labels.
    pub progress_cadence: Duration,
}

impl StudioConfig {
    /// Defaults around an explicit key.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            model: VeoModel::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll: PollPolicy::default(),
            progress_cadence: progress::DEFAULT_CADENCE,
        }
    }

    /// Reads the process environment.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `GOOGLE_API_KEY` (or `API_KEY`) | API key, required |
    /// | `VEO_STUDIO_MODEL` | `veo-3.1-fast-generate-preview` or `veo-3.1-generate-preview` |
    /// | `VEO_STUDIO_BASE_URL` | API root |
    /// | `VEO_STUDIO_POLL_INTERVAL_SECS` | seconds between status checks |
    /// | `VEO_STUDIO_MAX_WAIT_SECS` | give up after this long, `0` waits forever |
    /// | `VEO_STUDIO_PROGRESS_CADENCE_SECS` | seconds per progress label |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR)
            .or_else(|| get(API_KEY_FALLBACK_VAR))
            .map(ApiKey::new)
            .ok_or_else(|| {
                StudioError::Auth(format!(
                    "{API_KEY_VAR} not set. Use a paid-tier Gemini API key with billing enabled."
                ))
            })?;

        let mut config = Self::new(api_key);

        if let Some(model) = get("VEO_STUDIO_MODEL") {
            config.model = model.parse().map_err(config_error("VEO_STUDIO_MODEL"))?;
        }
        if let Some(url) = get("VEO_STUDIO_BASE_URL") {
            config.base_url = url;
        }
        if let Some(secs) = get("VEO_STUDIO_POLL_INTERVAL_SECS") {
            config.poll.interval = parse_secs("VEO_STUDIO_POLL_INTERVAL_SECS", &secs)?;
        }
        if let Some(secs) = get("VEO_STUDIO_MAX_WAIT_SECS") {
            let wait = parse_secs("VEO_STUDIO_MAX_WAIT_SECS", &secs)?;
            config.poll.max_wait = (!wait.is_zero()).then_some(wait);
        }
        if let Some(secs) = get("VEO_STUDIO_PROGRESS_CADENCE_SECS") {
            config.progress_cadence = parse_secs("VEO_STUDIO_PROGRESS_CADENCE_SECS", &secs)?;
        }

        Ok(config)
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(config_error(var))
}

fn config_error<E: std::fmt::Display>(var: &'static str) -> impl FnOnce(E) -> StudioError {
    move |e| StudioError::Config(format!("invalid {var}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_requires_api_key() {
        let err = StudioConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, StudioError::Auth(_)));

        let err = StudioConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", " ")])).unwrap_err();
        assert!(matches!(err, StudioError::Auth(_)));
    }

    #[test]
    fn test_defaults() {
        let config = StudioConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key.expose(), "k");
        assert_eq!(config.model, VeoModel::Veo31FastPreview);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll, PollPolicy::default());
        assert_eq!(config.progress_cadence, Duration::from_secs(4));
    }

    #[test]
    fn test_fallback_key_var() {
        let config = StudioConfig::from_lookup(lookup(&[("API_KEY", "fallback")])).unwrap();
        assert_eq!(config.api_key.expose(), "fallback");
    }

    #[test]
    fn test_overrides() {
        let config = StudioConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "k"),
            ("VEO_STUDIO_MODEL", "veo-3.1-generate-preview"),
            ("VEO_STUDIO_POLL_INTERVAL_SECS", "2"),
            ("VEO_STUDIO_MAX_WAIT_SECS", "0"),
            ("VEO_STUDIO_PROGRESS_CADENCE_SECS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.model, VeoModel::Veo31Preview);
        assert_eq!(config.poll.interval, Duration::from_secs(2));
        assert_eq!(config.poll.max_wait, None);
        assert_eq!(config.progress_cadence, Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = StudioConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "k"),
            ("VEO_STUDIO_POLL_INTERVAL_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("VEO_STUDIO_POLL_INTERVAL_SECS"));
    }
}
