use crate::engine::SpinSettings;
use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSecondsWithFrac, serde_as};
use spindle::planner::BoundsError;
use spindle::{Pointer, TurnBounds};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub title: String,
    pub hue: Option<f64>,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SpinConfig {
    /// How long one spin takes from request to resolution.
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    #[serde(default = "default_duration")]
    pub duration_secs: Duration,
    #[serde(default = "default_min_turns")]
    pub min_turns: f64,
    #[serde(default = "default_max_turns")]
    pub max_turns: f64,
    #[serde(default)]
    pub pointer: Pointer,
}

fn default_duration() -> Duration {
    Duration::from_secs(10)
}

fn default_min_turns() -> f64 {
    spindle::planner::MIN_TURNS
}

fn default_max_turns() -> f64 {
    spindle::planner::MAX_TURNS
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            min_turns: default_min_turns(),
            max_turns: default_max_turns(),
            pointer: Pointer::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Config {
    pub fn spin_settings(&self) -> Result<SpinSettings, ConfigError> {
        Ok(SpinSettings {
            duration: self.spin.duration_secs,
            bounds: TurnBounds::new(self.spin.min_turns, self.spin.max_turns)?,
            pointer: self.spin.pointer,
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid turn bounds: {0}")]
    Bounds(#[from] BoundsError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "spindle", "roulette").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ROULETTE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the config, falling back to the built-in defaults so the app stays
/// usable with no file present (the wheel is simply empty until items are
/// added).
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        log::info!("no config at {}; using defaults", path.display());
        return Config::default();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {e}");
            Config::default()
        }
    }
}

/// Writes the bundled default config unless one already exists. Returns the
/// path and whether a file was actually written.
pub fn write_default_config() -> std::io::Result<(std::path::PathBuf, bool)> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_at(&path)
}

fn write_default_config_at(
    path: &std::path::Path,
) -> std::io::Result<(std::path::PathBuf, bool)> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if path.exists() {
        return Ok((path.to_path_buf(), false));
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok((path.to_path_buf(), true))
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Watches the config directory and asks the event loop to reload spin
/// settings when the file changes.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {e}");
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {e}");
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {e}");
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {e}"),
        }
    }
}
