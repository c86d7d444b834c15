use crate::events::AppEvent;
use async_channel::Sender;
use derive_more::{Deref, From, Into};
use directories::ProjectDirs;
use gnomon::clock::DEFAULT_ZONE;
use gnomon::scene::{
    CONTAINER_HEIGHT, DEFAULT_HEIGHT, DEFAULT_TIME, MAX_INPUT_HEIGHT, OBJECT_WIDTH,
    OFFSCREEN_SHADOW,
};
use gnomon::units::{Centimeters, Pixels};
use gnomon::{Inputs, Viewport};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// An sRGB colour written as `#rrggbb` or `#rgb` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn with_alpha(self, alpha: f64) -> Srgba<f64> {
        self.0.into_format::<f64>().with_alpha(alpha)
    }
}

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub height: f64,
    pub time: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            time: DEFAULT_TIME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub max_input_height: f64,
    pub container_height: f64,
    pub object_width: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            max_input_height: MAX_INPUT_HEIGHT,
            container_height: CONTAINER_HEIGHT,
            object_width: OBJECT_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    pub zone: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            zone: DEFAULT_ZONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub sun: HexColor,
    pub object: HexColor,
    pub shadow: HexColor,
    pub ground: HexColor,
    pub beam: HexColor,
    pub background: HexColor,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            sun: HexColor::new(0xfd, 0xe0, 0x47),
            object: HexColor::new(0x06, 0xb6, 0xd4),
            shadow: HexColor::new(0xcb, 0xd5, 0xe1),
            ground: HexColor::new(0x47, 0x55, 0x69),
            beam: HexColor::new(0xfd, 0xe0, 0x47),
            background: HexColor::new(0x1e, 0x29, 0x3b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

impl Config {
    pub fn inputs(&self) -> Inputs {
        Inputs::new(self.defaults.height, self.defaults.time)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            max_input_height: Centimeters::new(self.viewport.max_input_height),
            container_height: Pixels::new(self.viewport.container_height),
            object_width: Pixels::new(self.viewport.object_width),
            offscreen_shadow: Pixels::new(OFFSCREEN_SHADOW),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let viewport = [
            ("viewport.max_input_height", self.viewport.max_input_height),
            ("viewport.container_height", self.viewport.container_height),
            ("viewport.object_width", self.viewport.object_width),
        ];
        for (key, value) in viewport {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("expected a positive number, got {}", value),
                });
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "gnomon", "shadowcast").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("SHADOWCAST")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using built-in configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Editors write a file in several steps; events closer together than this
/// collapse into one reload.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(200);

/// Whether a watcher event changed the config file itself. Swap and backup
/// files next to it, and plain reads, are ignored.
fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    let changed = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    changed
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == config_path.file_name())
}

fn watch_config_dir(
    config_dir: &Path,
    bridge_tx: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Sends one [`AppEvent::ConfigReload`] per burst of changes to the config
/// file. Returns when the GUI side of `tx` is gone.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config reload disabled: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent() else {
        return;
    };
    if let Err(e) = fs_err::create_dir_all(config_dir) {
        log::error!("Config reload disabled: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    // dropping the watcher stops the events
    let _watcher = match watch_config_dir(config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Config reload disabled: {}", e);
            return;
        }
    };
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                tokio::time::sleep(RELOAD_DEBOUNCE).await;
                let mut burst = 1;
                while bridge_rx.try_recv().is_ok() {
                    burst += 1;
                }
                log::debug!("Config changed ({} events)", burst);

                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Config watch error: {}", e),
        }
    }
}
