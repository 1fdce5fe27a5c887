//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::duration::parse_duration;

const LISTEN_ADDRESS_VAR: &str = "MC_SERVER_LISTEN_ADDRESS";
const CLEANING_INTERVAL_VAR: &str = "MC_CACHE_CLEANING_INTERVAL";

const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_CLEANING_INTERVAL: Duration = Duration::from_secs(30);

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_address: String,
    /// Interval between two reaper sweeps
    pub cleaning_interval: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MC_SERVER_LISTEN_ADDRESS` - Server listen address (default: 127.0.0.1:8080)
    /// - `MC_CACHE_CLEANING_INTERVAL` - Reaper interval, e.g. `30s` or `1m30s` (default: 30s)
    ///
    /// Unparsable or non-positive intervals fall back to the default.
    pub fn from_env() -> Self {
        Self {
            listen_address: env::var(LISTEN_ADDRESS_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_string()),
            cleaning_interval: env::var(CLEANING_INTERVAL_VAR)
                .ok()
                .and_then(|v| parse_interval(&v))
                .unwrap_or(DEFAULT_CLEANING_INTERVAL),
        }
    }

    /// Help text listing every supported environment variable.
    pub fn usage() -> String {
        format!(
            "This application is configured via the environment. The following environment\n\
             variables can be used:\n\n\
             KEY{pad:<27}TYPE{pad:<12}DEFAULT{pad:<10}DESCRIPTION\n\
             {addr:<30}{string:<16}{addr_default:<17}Server listen address\n\
             {interval:<30}{duration:<16}{interval_default:<17}Cleaning cache interval\n",
            pad = "",
            addr = LISTEN_ADDRESS_VAR,
            string = "String",
            addr_default = DEFAULT_LISTEN_ADDRESS,
            interval = CLEANING_INTERVAL_VAR,
            duration = "Duration",
            interval_default = "30s",
        )
    }
}

fn parse_interval(raw: &str) -> Option<Duration> {
    parse_duration(raw.trim())
        .ok()
        .and_then(|d| d.to_std().ok())
        .filter(|d| !d.is_zero())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            cleaning_interval: DEFAULT_CLEANING_INTERVAL,
        }
    }
}
