use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub guide: GuideConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (holds the log file in TUI mode)
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

/// Pointer tracking parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Spring stiffness; damping is always critical (2 * sqrt(stiffness))
    #[serde(default = "default_spring_stiffness")]
    pub spring_stiffness: f64,
    /// Distance and speed below which a spring counts as settled
    #[serde(default = "default_rest_epsilon")]
    pub rest_epsilon: f64,
    #[serde(default = "default_size_sm")]
    pub sm: SizeConfig,
    #[serde(default = "default_size_md")]
    pub md: SizeConfig,
    #[serde(default = "default_size_lg")]
    pub lg: SizeConfig,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            spring_stiffness: default_spring_stiffness(),
            rest_epsilon: default_rest_epsilon(),
            sm: default_size_sm(),
            md: default_size_md(),
            lg: default_size_lg(),
        }
    }
}

/// Geometry constants selected by a target's size preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeConfig {
    /// Maximum displacement toward the pointer
    pub max_deflection: f64,
    /// Visual diameter of the tracked element
    pub diameter: f64,
}

/// Step guide definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Ordered step descriptors
    #[serde(default = "default_steps")]
    pub steps: Vec<StepConfig>,
    /// Piecewise-linear (fraction, coordinate) control points
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<[f64; 2]>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            breakpoints: default_breakpoints(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Destination handed to the action callback; never interpreted here
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Pin position in guide space; defaults to a zig-zag column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Disable pointer tracking and pulse travel
    #[serde(default)]
    pub reduced_motion: bool,
    /// Size preset of the tracked eyes in the header
    #[serde(default)]
    pub eye_size: crate::pointer::SizePreset,
    /// Duration of one pulse traversal along a connector
    #[serde(default = "default_pulse_period")]
    pub pulse_period_ms: u64,
    /// Easing applied to the pulse traversal
    #[serde(default = "default_pulse_easing")]
    pub pulse_easing: EasingType,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Smooth scroll settings for the guide's scroll source
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            reduced_motion: false,
            eye_size: crate::pointer::SizePreset::default(),
            pulse_period_ms: default_pulse_period(),
            pulse_easing: default_pulse_easing(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the end value
    None,
    Linear,
    /// 1 - (1-t)^3
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll fraction changes
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one scroll animation
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default = "default_scroll_easing")]
    pub easing: EasingType,
    /// Fraction moved by a single scroll step
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f64,
    /// Frame rate while anything is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: default_scroll_easing(),
            scroll_step: default_scroll_step(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Theme name plus optional hex color overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse: Option<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            accent: None,
            complete: None,
            pending: None,
            pulse: None,
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<S-n>" (Shift+n), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Scroll the guide forward by one scroll step
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    /// Scroll by a quarter of the guide
    #[serde(default = "default_key_page_down")]
    pub page_down: String,
    #[serde(default = "default_key_page_up")]
    pub page_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Scroll to the start of the next step
    #[serde(default = "default_key_next_step")]
    pub next_step: String,
    #[serde(default = "default_key_prev_step")]
    pub prev_step: String,
    /// Trigger the focused step's action
    #[serde(default = "default_key_trigger")]
    pub trigger: String,
    /// Toggle reduced motion
    #[serde(default = "default_key_toggle_motion")]
    pub toggle_motion: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            page_down: default_key_page_down(),
            page_up: default_key_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_step: default_key_next_step(),
            prev_step: default_key_prev_step(),
            trigger: default_key_trigger(),
            toggle_motion: default_key_toggle_motion(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_page_down() -> String { "<C-d>".to_string() }
fn default_key_page_up() -> String { "<C-u>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_step() -> String { "n".to_string() }
fn default_key_prev_step() -> String { "N".to_string() }
fn default_key_trigger() -> String { "<CR>".to_string() }
fn default_key_toggle_motion() -> String { "m".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("glidepath")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_spring_stiffness() -> f64 {
    170.0
}

fn default_rest_epsilon() -> f64 {
    0.01
}

fn default_size_sm() -> SizeConfig {
    SizeConfig { max_deflection: 4.0, diameter: 12.0 }
}

fn default_size_md() -> SizeConfig {
    SizeConfig { max_deflection: 8.0, diameter: 24.0 }
}

fn default_size_lg() -> SizeConfig {
    SizeConfig { max_deflection: 12.0, diameter: 36.0 }
}

fn default_steps() -> Vec<StepConfig> {
    let step = |id: &str, title: &str, destination: &str, params: Option<serde_json::Value>| StepConfig {
        id: id.to_string(),
        title: title.to_string(),
        destination: destination.to_string(),
        params,
        anchor: None,
    };
    vec![
        step("create-account", "Create your account", "signup", None),
        step(
            "pick-tokens",
            "Pick your design tokens",
            "settings",
            Some(serde_json::json!({ "section": "tokens" })),
        ),
        step("browse-catalog", "Browse the component catalog", "catalog", None),
        step(
            "ship",
            "Ship it",
            "home",
            Some(serde_json::json!({ "welcome": true })),
        ),
    ]
}

fn default_breakpoints() -> Vec<[f64; 2]> {
    vec![
        [0.0, 0.0],
        [0.15, 1.0],
        [0.3, 2.0],
        [0.45, 3.0],
        [0.6, 4.0],
        [1.0, 4.0],
    ]
}

fn default_tick_rate() -> u64 {
    100
}

fn default_pulse_period() -> u64 {
    1600
}

fn default_pulse_easing() -> EasingType {
    EasingType::Cubic
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_easing() -> EasingType {
    EasingType::Cubic
}

fn default_scroll_step() -> f64 {
    0.02
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
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

impl PointerConfig {
    pub fn size(&self, preset: crate::pointer::SizePreset) -> SizeConfig {
        use crate::pointer::SizePreset;
        match preset {
            SizePreset::Sm => self.sm,
            SizePreset::Md => self.md,
            SizePreset::Lg => self.lg,
        }
    }

    pub fn size_mut(&mut self, preset: crate::pointer::SizePreset) -> &mut SizeConfig {
        use crate::pointer::SizePreset;
        match preset {
            SizePreset::Sm => &mut self.sm,
            SizePreset::Md => &mut self.md,
            SizePreset::Lg => &mut self.lg,
        }
    }
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, falling back to defaults when absent
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/glidepath/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("glidepath")
            .join("config.toml")
    }

    /// Get the log file path used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("glidepath.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.guide.steps.len(), 4);
        assert_eq!(config.guide.breakpoints.len(), 6);
        assert_eq!(config.pointer.md.max_deflection, 8.0);
        assert!(config.ui.scroll.smooth_enabled);
        assert_eq!(config.ui.scroll.easing, EasingType::Cubic);
        assert_eq!(config.ui.scroll.animation_fps, 60);
        assert!(!config.ui.reduced_motion);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.guide.breakpoints, config.guide.breakpoints);
        assert_eq!(parsed.guide.steps[1].params, config.guide.steps[1].params);
        assert_eq!(parsed.keymap.trigger, "<CR>");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let text = r#"
            [pointer]
            spring_stiffness = 300.0

            [ui]
            eye_size = "lg"

            [ui.scroll]
            easing = "quintic"
        "#;
        let config = AppConfig::from_toml(text).unwrap();
        assert_eq!(config.pointer.spring_stiffness, 300.0);
        assert_eq!(config.pointer.lg.max_deflection, 12.0);
        assert_eq!(config.ui.scroll.easing, EasingType::Quintic);
        assert_eq!(config.ui.scroll.animation_duration_ms, 150);
        assert_eq!(config.ui.eye_size, crate::pointer::SizePreset::Lg);
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.guide.steps[0].id, "create-account");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[pointer\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join(format!("glidepath-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.pointer.size_mut(crate::pointer::SizePreset::Sm).max_deflection = 2.5;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.pointer.sm.max_deflection, 2.5);
        std::fs::remove_dir_all(&dir).unwrap();

        let missing = AppConfig::load_from(&path).unwrap();
        assert_eq!(missing.pointer.sm.max_deflection, 4.0);
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        let path = std::path::Path::new("/tmp/glidepath");
        assert_eq!(expand_tilde(path), PathBuf::from("/tmp/glidepath"));
    }
}
