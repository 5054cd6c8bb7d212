use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width_percent: u16,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    /// Seed the workspace with demo tasks, notes and reminders on startup
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
    /// How many upcoming reminders the overview shows
    #[serde(default = "default_reminder_preview_limit")]
    pub reminder_preview_limit: usize,
    /// Clock/countdown refresh interval
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_status_message_timeout_secs")]
    pub status_message_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Empty means the active profile's data dir
    #[serde(default)]
    pub log_file: String,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_edit")]
    pub edit: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_tab_left")]
    pub tab_left: String,
    #[serde(default = "default_tab_right")]
    pub tab_right: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_cycle_task_status")]
    pub cycle_task_status: String,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_toggle_pin")]
    pub toggle_pin: String,
    #[serde(default = "default_prev_month")]
    pub prev_month: String,
    #[serde(default = "default_next_month")]
    pub next_month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_tab_bg")]
    pub tab_bg: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sidebar_width_percent: default_sidebar_width(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            seed_demo_data: default_seed_demo_data(),
            reminder_preview_limit: default_reminder_preview_limit(),
            tick_interval_ms: default_tick_interval_ms(),
            status_message_timeout_secs: default_status_message_timeout_secs(),
            log_level: default_log_level(),
            log_file: String::new(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            new: default_new(),
            edit: default_edit(),
            save: default_save(),
            delete: default_delete(),
            search: default_search(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            tab_left: default_tab_left(),
            tab_right: default_tab_right(),
            help: default_help(),
            cycle_task_status: default_cycle_task_status(),
            filter: default_filter(),
            toggle_pin: default_toggle_pin(),
            prev_month: default_prev_month(),
            next_month: default_next_month(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            tab_bg: default_tab_bg(),
            accent: default_accent(),
        }
    }
}

impl Theme {
    /// Preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let preset = |fg: &str, bg: &str, highlight_bg: &str, highlight_fg: &str, accent: &str| Theme {
            fg: fg.to_string(),
            bg: bg.to_string(),
            highlight_bg: highlight_bg.to_string(),
            highlight_fg: highlight_fg.to_string(),
            tab_bg: "gray".to_string(),
            accent: accent.to_string(),
        };

        HashMap::from([
            ("default".to_string(), preset("white", "black", "blue", "white", "cyan")),
            ("dark".to_string(), preset("white", "black", "cyan", "black", "yellow")),
            ("light".to_string(), preset("black", "white", "blue", "white", "magenta")),
            ("green".to_string(), preset("green", "black", "yellow", "black", "lightgreen")),
            ("monochrome".to_string(), preset("white", "black", "white", "black", "white")),
        ])
    }
}

fn default_sidebar_width() -> u16 {
    35
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_reminder_preview_limit() -> usize {
    5
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_status_message_timeout_secs() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_edit() -> String {
    "e".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_search() -> String {
    "/".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_tab_left() -> String {
    "Left".to_string()
}

fn default_tab_right() -> String {
    "Right".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_cycle_task_status() -> String {
    "Space".to_string()
}

fn default_filter() -> String {
    "f".to_string()
}

fn default_toggle_pin() -> String {
    "p".to_string()
}

fn default_prev_month() -> String {
    "[".to_string()
}

fn default_next_month() -> String {
    "]".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_tab_bg() -> String {
    "gray".to_string()
}

fn default_accent() -> String {
    "cyan".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load the profile's config file, creating it with defaults when missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            Self::load_from_path(&config_path, profile)
        } else {
            let mut config = Config::default();
            config.log_file = Self::default_log_file_for_profile(profile);
            if let Err(e) = config.save_to_path(&config_path) {
                eprintln!("ERROR: Failed to save config file: {}", e);
                eprintln!("Config path: {:?}", config_path);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load a config file; missing fields take defaults, and a missing
    /// `log_file` resolves against `profile`
    pub fn load_from_path(path: &Path, profile: utils::Profile) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        let mut config: Config = toml::from_str(&contents)?;
        if config.log_file.trim().is_empty() {
            config.log_file = Self::default_log_file_for_profile(profile);
        }
        Ok(config)
    }

    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    fn default_log_file_for_profile(profile: utils::Profile) -> String {
        match utils::get_data_dir(profile) {
            Some(data_dir) => data_dir.join("veer.log").to_string_lossy().to_string(),
            None => match profile {
                utils::Profile::Dev => "~/.local/share/veer-dev/veer.log".to_string(),
                utils::Profile::Prod => "~/.local/share/veer/veer.log".to_string(),
            },
        }
    }

    /// Log file path with `~` expanded
    pub fn get_log_path(&self) -> PathBuf {
        utils::expand_path(&self.log_file)
    }

    /// The active theme: user-defined first, then presets, then the built-in default.
    /// An empty `highlight_fg` is derived from `highlight_bg`.
    pub fn get_active_theme(&self) -> Theme {
        use crate::tui::widgets::color::{format_color_for_display, get_contrast_text_color, parse_color};

        let mut theme = self
            .themes
            .get(&self.current_theme)
            .cloned()
            .or_else(|| Theme::get_preset_themes().remove(&self.current_theme))
            .unwrap_or_default();

        if theme.highlight_fg.is_empty() {
            let calculated = get_contrast_text_color(parse_color(&theme.highlight_bg));
            theme.highlight_fg = format_color_for_display(&calculated);
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_interval_ms = 250\n[key_bindings]\nquit = \"x\"\n").unwrap();

        let config = Config::load_from_path(&path, utils::Profile::Prod).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.key_bindings.quit, "x");
        assert_eq!(config.key_bindings.new, "n");
        assert_eq!(config.reminder_preview_limit, 5);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.current_theme = "green".to_string();
        config.seed_demo_data = false;
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path, utils::Profile::Prod).unwrap();
        assert_eq!(loaded.current_theme, "green");
        assert!(!loaded.seed_demo_data);
        assert_eq!(loaded.config_version, Some(CURRENT_CONFIG_VERSION));
    }

    #[test]
    fn missing_log_file_follows_the_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let dev = Config::load_from_path(&path, utils::Profile::Dev).unwrap();
        let prod = Config::load_from_path(&path, utils::Profile::Prod).unwrap();
        assert_eq!(dev.log_file, Config::default_log_file_for_profile(utils::Profile::Dev));
        assert_eq!(prod.log_file, Config::default_log_file_for_profile(utils::Profile::Prod));
        assert_ne!(dev.log_file, prod.log_file);

        fs::write(&path, "log_file = \"/tmp/custom.log\"\n").unwrap();
        let custom = Config::load_from_path(&path, utils::Profile::Dev).unwrap();
        assert_eq!(custom.log_file, "/tmp/custom.log");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_interval_ms = \"soon\"").unwrap();
        assert!(matches!(Config::load_from_path(&path, utils::Profile::Prod), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn active_theme_prefers_user_theme_then_preset() {
        let mut config = Config::default();
        config.current_theme = "light".to_string();
        assert_eq!(config.get_active_theme().bg, "white");

        config.themes.insert(
            "light".to_string(),
            Theme {
                bg: "navy".to_string(),
                highlight_fg: String::new(),
                highlight_bg: "white".to_string(),
                ..Theme::default()
            },
        );
        let theme = config.get_active_theme();
        assert_eq!(theme.bg, "navy");
        assert_eq!(theme.highlight_fg, "black");

        config.current_theme = "missing".to_string();
        assert_eq!(config.get_active_theme(), Theme::default());
    }
}
