use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;

use crate::camera::Orientation;
use crate::error::ConfigError;
use crate::movement::MoveRates;
use crate::vector::Vector2;
use crate::world::Grid;

pub const DEFAULT_CONFIG_PATH: &str = "raycaster.toml";

/// Startup settings. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub minimap_width: u32,
    pub minimap_height: u32,
    pub show_minimap: bool,
    pub move_rate: f64,
    pub turn_rate: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub start_dir_x: f64,
    pub start_dir_y: f64,
    pub plane_length: f64,
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Raycaster".to_owned(),
            screen_width: 1024,
            screen_height: 512,
            minimap_width: 120,
            minimap_height: 120,
            show_minimap: false,
            move_rate: 3.0,
            turn_rate: 2.0,
            start_x: 22.0,
            start_y: 12.0,
            start_dir_x: -1.0,
            start_dir_y: 0.0,
            plane_length: 0.66,
            log_level: LevelFilter::Info,
        }
    }
}

impl Settings {
    /// Reads settings from `path`. When `required` is false a missing file
    /// yields the defaults.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        let settings: Settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(invalid("screen_width/screen_height", "must be non-zero"));
        }
        for (field, rate) in [("move_rate", self.move_rate), ("turn_rate", self.turn_rate)] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(invalid(field, format!("{rate} is not a finite non-negative rate")));
            }
        }
        if !self.start_position().is_finite() {
            return Err(invalid("start_x/start_y", "must be finite"));
        }
        let heading = Vector2::new(self.start_dir_x, self.start_dir_y);
        if !heading.is_finite() || heading.length() == 0.0 {
            return Err(invalid("start_dir_x/start_dir_y", "heading must be a non-zero vector"));
        }
        if !self.plane_length.is_finite() || self.plane_length <= 0.0 {
            return Err(invalid("plane_length", "must be positive"));
        }
        Ok(())
    }

    pub fn start_position(&self) -> Vector2 {
        Vector2::new(self.start_x, self.start_y)
    }

    /// Starting orientation, checked against the map it will move in.
    pub fn start_orientation(&self, grid: &Grid) -> Result<Orientation, ConfigError> {
        if !grid.is_open(self.start_x, self.start_y) {
            return Err(ConfigError::BlockedStart {
                x: self.start_x,
                y: self.start_y,
            });
        }
        Ok(Orientation::new(
            self.start_position(),
            Vector2::new(self.start_dir_x, self.start_dir_y),
            self.plane_length,
        ))
    }

    pub fn rates(&self) -> MoveRates {
        MoveRates {
            move_rate: self.move_rate,
            turn_rate: self.turn_rate,
        }
    }
}
