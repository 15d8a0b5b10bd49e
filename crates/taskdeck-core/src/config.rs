use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::scroll::{Axis, AxisPolicy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Surface units covered by one terminal column
    #[serde(default = "default_cell_width")]
    pub cell_width: u16,
    /// Surface units covered by one terminal row
    #[serde(default = "default_cell_height")]
    pub cell_height: u16,
    /// Card width in surface units
    #[serde(default = "default_item_width")]
    pub item_width: u32,
    /// Card height in surface units
    #[serde(default = "default_item_height")]
    pub item_height: u32,
    /// Gap between cards in surface units
    #[serde(default = "default_item_gap")]
    pub item_gap: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            item_width: default_item_width(),
            item_height: default_item_height(),
            item_gap: default_item_gap(),
        }
    }
}

/// Which axis a surface scrolls along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPreference {
    /// Vertical on wide viewports, horizontal on narrow ones
    #[default]
    Auto,
    Horizontal,
    Vertical,
}

/// Drag, momentum and wheel tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default)]
    pub axis: AxisPreference,
    /// Viewport width at or above which `auto` resolves to vertical
    #[serde(default = "default_breakpoint_width")]
    pub breakpoint_width: f64,
    /// Amplification of pointer travel while dragging
    #[serde(default = "default_drag_gain")]
    pub drag_gain: f64,
    /// Velocity (units/ms) below which momentum does not start or stops
    #[serde(default = "default_velocity_threshold")]
    pub velocity_threshold: f64,
    /// Per-frame velocity multiplier during momentum
    #[serde(default = "default_friction")]
    pub friction: f64,
    /// Assumed frame duration for one momentum step
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    /// Multiplier applied to wheel deltas
    #[serde(default = "default_wheel_speed")]
    pub wheel_speed: f64,
    /// Inactivity after which the wheeling flag clears
    #[serde(default = "default_wheel_debounce")]
    pub wheel_debounce_ms: u64,
    /// Exponential smoothing factor for drag velocity; raw samples when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_smoothing: Option<f64>,
    /// Wrap the offset between the two extremes when it reaches either
    #[serde(default = "default_true")]
    pub circular: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            axis: AxisPreference::default(),
            breakpoint_width: default_breakpoint_width(),
            drag_gain: default_drag_gain(),
            velocity_threshold: default_velocity_threshold(),
            friction: default_friction(),
            frame_interval_ms: default_frame_interval(),
            wheel_speed: default_wheel_speed(),
            wheel_debounce_ms: default_wheel_debounce(),
            velocity_smoothing: None,
            circular: default_true(),
        }
    }
}

impl ScrollConfig {
    /// Axis policy described by this configuration
    pub fn axis_policy(&self) -> AxisPolicy {
        match self.axis {
            AxisPreference::Auto => AxisPolicy::Breakpoint {
                min_width: self.breakpoint_width,
            },
            AxisPreference::Horizontal => AxisPolicy::Fixed(Axis::Horizontal),
            AxisPreference::Vertical => AxisPolicy::Fixed(Axis::Vertical),
        }
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    #[inline]
    pub fn wheel_debounce(&self) -> Duration {
        Duration::from_millis(self.wheel_debounce_ms)
    }

    /// Reject settings under which momentum would never settle
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(crate::Error::Config(format!(
                "scroll.friction must be in (0, 1), got {}",
                self.friction
            )));
        }
        if !(self.velocity_threshold > 0.0) {
            return Err(crate::Error::Config(format!(
                "scroll.velocity_threshold must be positive, got {}",
                self.velocity_threshold
            )));
        }
        if !(self.drag_gain > 0.0) {
            return Err(crate::Error::Config(format!(
                "scroll.drag_gain must be positive, got {}",
                self.drag_gain
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(crate::Error::Config(
                "scroll.frame_interval_ms must be at least 1".to_string(),
            ));
        }
        if let Some(alpha) = self.velocity_smoothing {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(crate::Error::Config(format!(
                    "scroll.velocity_smoothing must be in (0, 1], got {}",
                    alpha
                )));
            }
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskdeck")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width() -> u16 {
    8
}

fn default_cell_height() -> u16 {
    16
}

fn default_item_width() -> u32 {
    180
}

fn default_item_height() -> u32 {
    120
}

fn default_item_gap() -> u32 {
    1
}

fn default_breakpoint_width() -> f64 {
    768.0
}

fn default_drag_gain() -> f64 {
    2.0
}

fn default_velocity_threshold() -> f64 {
    0.1
}

fn default_friction() -> f64 {
    0.95
}

fn default_frame_interval() -> u64 {
    16 // ~60fps
}

fn default_wheel_speed() -> f64 {
    0.5
}

fn default_wheel_debounce() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.scroll.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/taskdeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("taskdeck")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("taskdeck.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
