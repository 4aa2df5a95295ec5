// src/config.rs
use anyhow::{Context, Result};
use log::{info, warn};
use std::env;

use crate::services::build_hook::BUILD_HOOK_ENV;
use crate::services::html::{PageAssets, DEFAULT_CHARTJS_SCRIPT_URL, DEFAULT_TRADINGVIEW_SCRIPT_URL};
use crate::services::scheduler::DEFAULT_BUILD_SCHEDULE;

pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_DATA_SOURCE: &str = "public/data/data.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// File path or http(s) URL of `data.json`.
    pub data_source: String,
    pub build_hook_url: Option<String>,
    pub build_schedule: String,
    pub scheduler_enabled: bool,
    pub assets: PageAssets,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            build_hook_url: None,
            build_schedule: DEFAULT_BUILD_SCHEDULE.to_string(),
            scheduler_enabled: true,
            assets: PageAssets::default(),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be true or false, got {:?}", name, other),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().context("PORT must be a number")?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                defaults.port
            }
        };

        let data_source = lookup("DATA_SOURCE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.data_source);

        let build_hook_url = lookup(BUILD_HOOK_ENV).filter(|s| !s.trim().is_empty());
        if build_hook_url.is_none() {
            warn!("{} not set, build trigger will report failure", BUILD_HOOK_ENV);
        }

        let build_schedule = lookup("BUILD_SCHEDULE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.build_schedule);

        let scheduler_enabled = match lookup("BUILD_SCHEDULER_ENABLED") {
            Some(raw) => parse_bool("BUILD_SCHEDULER_ENABLED", &raw)?,
            None => defaults.scheduler_enabled,
        };

        let chartjs_script_url = lookup("CHARTJS_SCRIPT_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CHARTJS_SCRIPT_URL.to_string());

        // An explicitly empty value disables the widget library.
        let tradingview_script_url = match lookup("TRADINGVIEW_SCRIPT_URL") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(raw),
            None => Some(DEFAULT_TRADINGVIEW_SCRIPT_URL.to_string()),
        };

        let config = AppConfig {
            port,
            data_source,
            build_hook_url,
            build_schedule,
            scheduler_enabled,
            assets: PageAssets { chartjs_script_url, tradingview_script_url },
        };
        info!("Using data source: {}", config.data_source);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = from_pairs(&[]).unwrap();
        assert_eq!(cfg.port, 3030);
        assert_eq!(cfg.data_source, DEFAULT_DATA_SOURCE);
        assert!(cfg.build_hook_url.is_none());
        assert_eq!(cfg.build_schedule, "0 0 0 * * *");
        assert!(cfg.scheduler_enabled);
        assert!(cfg.assets.widget_library_available());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = from_pairs(&[
            ("PORT", "8080"),
            ("DATA_SOURCE", "https://example.netlify.app/data/data.json"),
            ("NETLIFY_BUILD_HOOK_URL", "https://api.netlify.com/build_hooks/abc"),
            ("BUILD_SCHEDULER_ENABLED", "false"),
            ("TRADINGVIEW_SCRIPT_URL", ""),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert!(cfg.data_source.starts_with("https://"));
        assert!(cfg.build_hook_url.is_some());
        assert!(!cfg.scheduler_enabled);
        assert!(!cfg.assets.widget_library_available());
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(from_pairs(&[("PORT", "http")]).is_err());
        assert!(from_pairs(&[("BUILD_SCHEDULER_ENABLED", "maybe")]).is_err());
    }

    #[test]
    fn blank_hook_counts_as_unset() {
        let cfg = from_pairs(&[("NETLIFY_BUILD_HOOK_URL", "  ")]).unwrap();
        assert!(cfg.build_hook_url.is_none());
    }
}
