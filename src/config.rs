//! Configuration types for the group chart.

use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::chart::allocator::DEFAULT_NEW_PAD_FRACTION;
use crate::controllers::{SelectorController, ViewController};
use crate::data::group::DEFAULT_LABEL_FORMAT;
use crate::engine::window::{DEFAULT_BAR_INTERVAL_SECS, DEFAULT_TRAILING_BARS};
use crate::error::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// ChartSettings – serializable engine settings
// ─────────────────────────────────────────────────────────────────────────────

/// Engine settings that can be loaded from a JSON or YAML file.
///
/// Missing keys fall back to their defaults, so an empty document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Native window title.
    pub title: String,
    /// Length of one bar, in seconds. Drives the trailing window.
    pub bar_interval_secs: i64,
    /// Bars shown behind a freshly anchored window.
    pub trailing_bars: i32,
    /// Share of the canvas height given to each new pad.
    pub new_pad_fraction: f64,
    /// Legend / series color for groups without a `Color` field (RGBA).
    pub default_color: [u8; 4],
    /// Y-axis label format for groups without a `Format` field.
    pub default_label_format: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: "GroupChart".to_string(),
            bar_interval_secs: DEFAULT_BAR_INTERVAL_SECS,
            trailing_bars: DEFAULT_TRAILING_BARS,
            new_pad_fraction: DEFAULT_NEW_PAD_FRACTION,
            default_color: [0, 0, 0, 255],
            default_label_format: DEFAULT_LABEL_FORMAT.to_string(),
        }
    }
}

impl ChartSettings {
    pub fn default_color(&self) -> Color32 {
        let [r, g, b, a] = self.default_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_yaml::from_str(s)?;
        settings.validate()
    }

    /// Load settings from `path`, picking the parser from the extension
    /// (`.json`, `.yaml`, `.yml`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let text = std::fs::read_to_string(path)?;
        match ext.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.bar_interval_secs <= 0 {
            return Err(ConfigError::Invalid {
                field: "bar_interval_secs",
                reason: format!("must be positive, got {}", self.bar_interval_secs),
            });
        }
        if self.trailing_bars < 0 {
            return Err(ConfigError::Invalid {
                field: "trailing_bars",
                reason: format!("must not be negative, got {}", self.trailing_bars),
            });
        }
        if !(self.new_pad_fraction > 0.0 && self.new_pad_fraction < 1.0) {
            return Err(ConfigError::Invalid {
                field: "new_pad_fraction",
                reason: format!("must lie in (0, 1), got {}", self.new_pad_fraction),
            });
        }
        Ok(self)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GroupChartConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for [`run_groupchart`](crate::run_groupchart) and
/// [`GroupChartPanel`](crate::GroupChartPanel).
#[derive(Clone, Default)]
pub struct GroupChartConfig {
    pub settings: ChartSettings,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
    /// External handle to read and change the active selector.
    pub selector_controller: Option<SelectorController>,
    /// External handle to observe the visible range and re-anchor it.
    pub view_controller: Option<ViewController>,
}

impl GroupChartConfig {
    pub fn with_settings(mut self, settings: ChartSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.settings.title = title.into();
        self
    }

    pub fn with_bar_interval_secs(mut self, secs: i64) -> Self {
        self.settings.bar_interval_secs = secs;
        self
    }

    pub fn with_selector_controller(mut self, ctrl: SelectorController) -> Self {
        self.selector_controller = Some(ctrl);
        self
    }

    pub fn with_view_controller(mut self, ctrl: ViewController) -> Self {
        self.view_controller = Some(ctrl);
        self
    }
}
