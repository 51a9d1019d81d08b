//! User settings for the gridfix front end.
//!
//! Settings are read from `settings.json` in the platform config directory,
//! e.g. `~/.config/gridfix/settings.json` on Linux, or from the file named by
//! `--config`. A missing file means defaults; a file that cannot be read or
//! parsed is reported and then ignored.

use directories::ProjectDirs;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use gridfix_core::{DatumShift, DistanceUnit, SpeedUnit};

use crate::error::CliError;

const SETTINGS_FILE: &str = "settings.json";

pub fn get_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("uk", "gridfix", "gridfix")
}

/// Default location of the settings file, if the platform has one
pub fn default_settings_path() -> Option<PathBuf> {
    get_project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Datum handling between WGS84 and the national grid
    pub datum: DatumShift,
    /// Unit for distances shown next to meters
    pub distance_unit: DistanceUnit,
    pub speed_unit: SpeedUnit,
    /// Print JSON instead of text
    pub json: bool,
}

impl Settings {
    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Settings {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Settings::default();
        }

        match Self::read(path) {
            Ok(settings) => {
                debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Settings::default()
            }
        }
    }

    /// Load from `--config` if given, otherwise from the default location
    pub fn load_or_default(path: Option<&Path>) -> Settings {
        match path.map(Path::to_path_buf).or_else(default_settings_path) {
            Some(path) => Settings::load(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Settings::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Settings, CliError> {
        let file = fs::File::open(path).map_err(|source| CliError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        let io_err = |source| CliError::ConfigIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let file = fs::File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| {
            CliError::ConfigFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        info!("Stored settings in {}", path.display());
        Ok(())
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "datum: {}", self.datum)?;
        writeln!(f, "distance unit: {}", self.distance_unit)?;
        writeln!(f, "speed unit: {}", self.speed_unit)?;
        write!(f, "json: {}", self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(&temp.path().join("nothing.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.datum, DatumShift::None);
        assert_eq!(settings.distance_unit, DistanceUnit::NauticalMiles);
        assert_eq!(settings.speed_unit, SpeedUnit::Knots);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(SETTINGS_FILE);
        let settings = Settings {
            datum: DatumShift::Helmert,
            distance_unit: DistanceUnit::Miles,
            speed_unit: SpeedUnit::Kmh,
            json: true,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "datum": "helmert", "distanceUnit": "m" }"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.datum, DatumShift::Helmert);
        assert_eq!(settings.distance_unit, DistanceUnit::Meters);
        assert_eq!(settings.speed_unit, SpeedUnit::Knots);
        assert!(!settings.json);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());

        fs::write(&path, r#"{ "datum": "ostn15" }"#).unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.json");
        fs::write(&path, r#"{ "json": true }"#).unwrap();
        assert!(Settings::load_or_default(Some(&path)).json);
    }
}
