// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use eventhub_core::{APP_NAME, Config as CoreConfig};

use crate::util::OutputFormat;

const EVENTHUB_CONFIG_ENV: &str = "EVENTHUB_CONFIG";
const EVENTHUB_DEV_ENV: &str = "EVENTHUB_DEV";

const EVENTHUB_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const EVENTHUB_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Loads the configuration.
///
/// The file is taken from `path`, then `$EVENTHUB_CONFIG`, then the user
/// config directory. Only the last one may be missing, in which case the
/// defaults are used.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(EVENTHUB_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({EVENTHUB_DEV_ENV} is set): config must be explicitly specified via --config or {EVENTHUB_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::info!(path = %config.display(), "no config found, using defaults");
            return Ok((CoreConfig::default(), Config::default()));
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| (a.core, a.cli))
}

/// Configuration of the command-line front end, the `[cli]` table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct Config {
    /// Output format used when `--output-format` is not given.
    #[serde(default)]
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,

    #[serde(default)]
    cli: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s).map_err(|e| format!("Failed to parse config: {e}"))?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(EVENTHUB_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if EVENTHUB_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if EVENTHUB_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            EVENTHUB_DEV_ENV,
            val,
            EVENTHUB_DEV_VALID_TRUE.join(", "),
            EVENTHUB_DEV_VALID_FALSE.join(", "),
        );
        None
    }
}
