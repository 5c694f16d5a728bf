// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

/// The name of the EventHub application.
pub const APP_NAME: &str = "eventhub";

/// File name of the event database inside the state directory.
pub const DB_FILENAME: &str = "eventhub.db";

const DEFAULT_ORGANIZER: &str = "EventHub Organizer";
const DEFAULT_FALLBACK_IMAGE: &str = "assets/event-music.jpg";

/// Configuration for the EventHub application.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Config {
    /// Directory holding the event database.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Organizer shown on dashboard rows of stored events.
    #[serde(default = "default_organizer")]
    pub organizer: String,

    /// Cover image used when an event has none.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,

    /// If true, the showcase events are listed before the stored ones.
    #[serde(default = "default_true")]
    pub show_seed_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            organizer: default_organizer(),
            fallback_image: default_fallback_image(),
            show_seed_events: true,
        }
    }
}

impl Config {
    /// Expands `state_dir`, or picks the platform state directory when unset.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        self.state_dir = match self.state_dir.take() {
            Some(dir) => Some(
                expand_path(&dir).map_err(|e| format!("Cannot expand state_dir {dir:?}: {e}"))?,
            ),
            None => match state_dir() {
                Ok(dir) => Some(dir.join(APP_NAME)),
                Err(e) => {
                    tracing::warn!(err = %e, "events are kept in memory");
                    None
                }
            },
        };
        Ok(())
    }

    /// Path of the event database, `None` keeps events in memory.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|a| a.join(DB_FILENAME))
    }
}

fn default_organizer() -> String {
    DEFAULT_ORGANIZER.to_owned()
}

fn default_fallback_image() -> String {
    DEFAULT_FALLBACK_IMAGE.to_owned()
}

fn default_true() -> bool {
    true
}

#[cfg(unix)]
const HOME_PREFIXES: &[&str] = &["~/", "$HOME/", "${HOME}/"];
#[cfg(not(unix))]
const HOME_PREFIXES: &[&str] = &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"];

#[cfg(unix)]
const CONFIG_PREFIXES: &[&str] = &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"];
#[cfg(not(unix))]
const CONFIG_PREFIXES: &[&str] = &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"];

/// Expands a leading `~`, home or config directory variable. Other paths are
/// returned unchanged.
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let text = path.to_str().ok_or("State directory is not valid UTF-8")?;
    let bases: [(&[&str], fn() -> Result<PathBuf, Box<dyn Error>>); 2] =
        [(HOME_PREFIXES, home_dir), (CONFIG_PREFIXES, config_dir)];
    for (prefixes, base) in bases {
        if let Some(rest) = prefixes.iter().find_map(|p| text.strip_prefix(p)) {
            return Ok(base()?.join(rest));
        }
    }
    Ok(path.to_owned())
}

fn home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or_else(|| "Home directory not found".into())
}

fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let dir = dirs::config_dir();
    dir.ok_or_else(|| "Config directory not found".into())
}

fn state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(not(unix))]
    let dir = dirs::data_dir();
    dir.ok_or_else(|| "State directory not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_keys_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.organizer, "EventHub Organizer");
        assert_eq!(config.fallback_image, "assets/event-music.jpg");
        assert!(config.show_seed_events);
        assert_eq!(config.db_path(), None);
    }

    #[test]
    fn test_parse_all_keys() {
        let config: Config = toml::from_str(
            r#"
state_dir = "/var/lib/eventhub"
organizer = "ABC Events"
fallback_image = "cover.jpg"
show_seed_events = false
"#,
        )
        .unwrap();
        assert_eq!(config.organizer, "ABC Events");
        assert!(!config.show_seed_events);
        assert_eq!(
            config.db_path(),
            Some(PathBuf::from("/var/lib/eventhub/eventhub.db"))
        );
    }

    #[test]
    fn test_normalize_keeps_absolute_state_dir() {
        let mut config = Config {
            state_dir: Some(PathBuf::from("/tmp/eventhub")),
            ..Default::default()
        };
        config.normalize().unwrap();
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/eventhub")));
    }

    #[test]
    fn test_expand_path_prefixes() {
        let home = home_dir().unwrap();
        for prefix in HOME_PREFIXES {
            let result = expand_path(&PathBuf::from(format!("{prefix}events"))).unwrap();
            assert_eq!(result, home.join("events"));
        }

        let config = config_dir().unwrap();
        for prefix in CONFIG_PREFIXES {
            let result = expand_path(&PathBuf::from(format!("{prefix}eventhub"))).unwrap();
            assert_eq!(result, config.join("eventhub"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_relative() {
        let relative_path = PathBuf::from("relative/path/to/state");
        let result = expand_path(&relative_path).unwrap();
        assert_eq!(result, relative_path);
    }
}
