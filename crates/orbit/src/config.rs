use crate::geometry::{Point, Size};
use crate::gesture::ClickThresholds;
use crate::menu::{
    ArcConfig, CLICK_THRESHOLD_MS, CLICK_THRESHOLD_PX, DEFAULT_ANCHOR_SIZE,
    DEFAULT_BOUNDARY_PADDING, DEFAULT_ITEM_COUNT, DEFAULT_ITEM_SIZE, DEFAULT_RADIUS,
    DEFAULT_START_ANGLE, DEFAULT_SWEEP_ANGLE,
};
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Radians. Parsed from `"1.2"`, `"1.2rad"`, `"-90deg"`, `"0.25turn"`, or `"-pi/2"`-style forms.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, SerializeDisplay, DeserializeFromStr)]
pub struct Angle(f64);

impl Angle {
    pub const fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    pub const fn radians(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid angle '{0}'")]
pub struct AngleParseError(String);

impl FromStr for Angle {
    type Err = AngleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let err = || AngleParseError(s.clone());
        let number = |n: &str| n.trim().parse::<f64>().map_err(|_| err());

        let radians = if let Some(n) = s.strip_suffix("deg") {
            number(n)?.to_radians()
        } else if let Some(n) = s.strip_suffix("turn") {
            number(n)? * 2.0 * PI
        } else if let Some(n) = s.strip_suffix("rad") {
            number(n)?
        } else if s.contains("pi") {
            parse_pi_fraction(&s).ok_or_else(err)?
        } else {
            number(&s)?
        };

        radians.is_finite().then_some(Angle(radians)).ok_or_else(err)
    }
}

// "pi", "-pi", "3pi/4", "2*pi", "-pi/2"
fn parse_pi_fraction(s: &str) -> Option<f64> {
    let (numerator, denominator) = match s.split_once('/') {
        Some((n, d)) => (n, d.trim().parse::<f64>().ok()?),
        None => (s, 1.0),
    };
    let coefficient = numerator.trim().strip_suffix("pi")?.trim().trim_end_matches('*');
    let coefficient = match coefficient.trim() {
        "" | "+" => 1.0,
        "-" => -1.0,
        c => c.parse::<f64>().ok()?,
    };
    (denominator != 0.0).then(|| coefficient * PI / denominator)
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub item_count: usize,
    pub radius: f64,
    pub start_angle: Angle,
    pub sweep_angle: Angle,
    pub anchor_size: f64,
    pub item_size: f64,
    pub boundary_padding: f64,
    /// Anchor center at startup. Defaults to the left edge, vertically centered.
    pub initial_position: Option<Point>,
    pub click_threshold_ms: f64,
    pub click_threshold_px: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_count: DEFAULT_ITEM_COUNT,
            radius: DEFAULT_RADIUS,
            start_angle: Angle::from_radians(DEFAULT_START_ANGLE),
            sweep_angle: Angle::from_radians(DEFAULT_SWEEP_ANGLE),
            anchor_size: DEFAULT_ANCHOR_SIZE,
            item_size: DEFAULT_ITEM_SIZE,
            boundary_padding: DEFAULT_BOUNDARY_PADDING,
            initial_position: None,
            click_threshold_ms: CLICK_THRESHOLD_MS,
            click_threshold_px: CLICK_THRESHOLD_PX,
        }
    }
}

impl MenuConfig {
    pub fn arc(&self) -> ArcConfig {
        ArcConfig::new(
            self.item_count,
            self.radius,
            self.start_angle.radians(),
            self.sweep_angle.radians(),
        )
    }

    pub fn thresholds(&self) -> ClickThresholds {
        ClickThresholds {
            max_duration_ms: self.click_threshold_ms,
            max_distance_px: self.click_threshold_px,
        }
    }

    pub fn initial_position_in(&self, viewport: Size) -> Point {
        self.initial_position.unwrap_or_else(|| {
            Point::new(
                self.anchor_size / 2.0 + self.boundary_padding,
                viewport.height / 2.0,
            )
        })
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        [
            ("radius", self.radius),
            ("anchor_size", self.anchor_size),
            ("item_size", self.item_size),
            ("boundary_padding", self.boundary_padding),
            ("click_threshold_ms", self.click_threshold_ms),
            ("click_threshold_px", self.click_threshold_px),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
        .map_or(Ok(self), |(field, value)| {
            Err(ConfigError::Invalid { field, value })
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid value for '{field}': {value}")]
    Invalid { field: &'static str, value: f64 },
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<MenuConfig, ConfigError> {
    load_config_from(&get_config_path()?)
}

/// File at `path` overlaid by `ORBIT_*` environment variables.
pub fn load_config_from(path: &Path) -> Result<MenuConfig, ConfigError> {
    load_layered(path, Some(config::Environment::with_prefix(ENV_PREFIX)))
}

/// File at `path` only; the process environment is ignored.
pub fn load_file(path: &Path) -> Result<MenuConfig, ConfigError> {
    load_layered(path, None)
}

fn load_layered(
    path: &Path,
    env: Option<config::Environment>,
) -> Result<MenuConfig, ConfigError> {
    let mut builder =
        config::Config::builder().add_source(config::File::from(path).required(false));
    if let Some(env) = env {
        builder = builder.add_source(env);
    }

    builder.build()?.try_deserialize::<MenuConfig>()?.validate()
}

pub fn load_or_default() -> MenuConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default menu config: {}", e);
            MenuConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

const ENV_PREFIX: &str = "ORBIT";

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Changed(PathBuf),
}

/// Emits [`WatchEvent::Changed`] whenever one of `paths` is created, modified, or removed.
/// Returns once the receiving side hangs up or the watcher cannot be set up.
pub async fn run_async_watcher(paths: Vec<PathBuf>, tx: Sender<WatchEvent>) {
    let watched: BTreeSet<PathBuf> = paths
        .iter()
        .filter_map(|p| std::path::absolute(p).ok())
        .collect();
    let dirs: BTreeSet<PathBuf> = watched
        .iter()
        .filter_map(|p| p.parent().map(Path::to_path_buf))
        .collect();

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    for dir in &dirs {
        if let Err(e) = fs_err::create_dir_all(dir) {
            log::error!("Failed to create directory for watching: {}", e);
            return;
        }
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            log::error!("Failed to watch {}: {}", dir.display(), e);
            return;
        }
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                if !meaningful_event {
                    continue;
                }
                if let Some(path) = event.paths.into_iter().find(|p| watched.contains(p))
                    && tx.send(WatchEvent::Changed(path)).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
