use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::filters::GameFilter;
use crate::{Error, Result};

/// System short name to hex color. The `default` key is the fallback.
pub type ColorMapping = HashMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub library_path: PathBuf,
    pub log_level: String,
    #[serde(default = "default_filter_name")]
    pub default_filter: String,
    /// Cycle only through filters that currently match something
    #[serde(default = "default_true")]
    pub cycle_available_only: bool,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_config_version")]
    pub config_version: u32,
    #[serde(default = "default_colors")]
    pub colors: ColorMapping,
}

fn default_filter_name() -> String {
    GameFilter::All.name().to_string()
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

fn default_colors() -> ColorMapping {
    [
        ("default", "#2f3640"),
        ("nes", "#c23b22"),
        ("snes", "#6a5acd"),
        ("gb", "#8bac0f"),
        ("gba", "#4b0082"),
        ("megadrive", "#1c1c1c"),
        ("psx", "#7f8c8d"),
    ]
    .into_iter()
    .map(|(system, color)| (system.to_string(), color.to_string()))
    .collect()
}

fn default_config_version() -> u32 {
    2
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "game-shelf")
}

impl Default for Config {
    fn default() -> Self {
        let library_path = project_dirs()
            .map(|dirs| dirs.data_dir().join("library.json"))
            .unwrap_or_else(|| PathBuf::from("library.json"));

        Self {
            library_path,
            log_level: "info".to_string(),
            default_filter: default_filter_name(),
            cycle_available_only: default_true(),
            date_format: default_date_format(),
            config_version: default_config_version(),
            colors: default_colors(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load from an explicit file, migrating or repairing it in place.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        match toml::from_str::<Config>(&contents) {
            Ok(mut config) => {
                if config.config_version < default_config_version() {
                    config = Self::migrate_config(config)?;
                    config.save_to(path)?;
                }
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                log::warn!("Failed to parse config: {}. Using defaults and merging.", e);
                let mut config = Self::default();

                if let Ok(value) = toml::from_str::<toml::Value>(&contents) {
                    if let Some(table) = value.as_table() {
                        config.merge_table(table);
                    }
                }

                if config.config_version < default_config_version() {
                    config = Self::migrate_config(config)?;
                }

                config.validate()?;
                config.save_to(path)?;
                Ok(config)
            }
        }
    }

    /// Copy every field of a partially invalid file that still has the right type.
    fn merge_table(&mut self, table: &toml::map::Map<String, toml::Value>) {
        let string = |key: &str| table.get(key).and_then(|v| v.as_str()).map(str::to_string);

        if let Some(path_str) = string("library_path") {
            self.library_path = PathBuf::from(path_str);
        }
        if let Some(level) = string("log_level") {
            self.log_level = level;
        }
        if let Some(filter) = string("default_filter") {
            self.default_filter = filter;
        }
        if let Some(format) = string("date_format") {
            self.date_format = format;
        }
        if let Some(cycle) = table.get("cycle_available_only").and_then(|v| v.as_bool()) {
            self.cycle_available_only = cycle;
        }
        if let Some(version) = table
            .get("config_version")
            .and_then(|v| v.as_integer())
            .and_then(|v| u32::try_from(v).ok())
        {
            self.config_version = version;
        }
        if let Some(colors) = table.get("colors").and_then(|v| v.as_table()) {
            self.colors = colors
                .iter()
                .filter_map(|(system, color)| {
                    color.as_str().map(|c| (system.clone(), c.to_string()))
                })
                .collect();
        }
    }

    /// Migrate config from older versions
    fn migrate_config(mut config: Config) -> Result<Self> {
        let current_version = config.config_version;
        let target_version = default_config_version();

        log::info!("Migrating config from v{} to v{}", current_version, target_version);

        if current_version < 2 {
            // v1 spelled the third filter "Last played"
            if config.default_filter.eq_ignore_ascii_case(GameFilter::LastPlayed.name()) {
                config.default_filter = GameFilter::LastPlayed.name().to_string();
            }
            if !config.colors.contains_key("default") {
                if let Some(color) = default_colors().remove("default") {
                    config.colors.insert("default".to_string(), color);
                }
            }
        }

        config.config_version = target_version;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(Error::Config(format!(
                "Invalid log level: '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            )));
        }

        if GameFilter::from_name(&self.default_filter).is_none() {
            let names: Vec<_> = GameFilter::ALL.iter().map(|f| f.name()).collect();
            return Err(Error::Config(format!(
                "Invalid default_filter: '{}'. Must be one of: {}",
                self.default_filter,
                names.join(", ")
            )));
        }

        if self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(Error::Config(format!(
                "Invalid date_format: '{}'",
                self.date_format
            )));
        }

        for (system, color) in &self.colors {
            if !is_hex_color(color) {
                return Err(Error::Config(format!(
                    "Invalid color for '{}': '{}'. Expected #rrggbb",
                    system, color
                )));
            }
        }

        Ok(())
    }

    /// The configured default filter, parsed.
    pub fn default_filter(&self) -> GameFilter {
        GameFilter::from_name(&self.default_filter).unwrap_or_default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = project_dirs()
            .ok_or_else(|| Error::Config("Failed to determine project directories".to_string()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let project_dirs = project_dirs()
            .ok_or_else(|| Error::Config("Failed to determine project directories".to_string()))?;

        Ok(project_dirs.data_dir().to_path_buf())
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
