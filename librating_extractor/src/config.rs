use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::constants::{
    DEFAULT_DIAL_RATINGS_FILE_NAME, DEFAULT_INPUT_EXTENSION, DEFAULT_RATINGS_FILE_NAME,
    DIAL_RATINGS_FILE_SUFFIX, RATINGS_FILE_SUFFIX,
};
use super::error::ConfigError;

/// Structure representing the batch configuration. Contains pathing and output naming information
/// Configs are seralizable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub ratings_file_name: String,
    pub dial_ratings_file_name: String,
    pub input_extension: String,
}

impl Default for Config {
    /// Generate a new Config object, reading from ./results and writing to the working directory
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("results"),
            output_path: PathBuf::from("."),
            ratings_file_name: String::from(DEFAULT_RATINGS_FILE_NAME),
            dial_ratings_file_name: String::from(DEFAULT_DIAL_RATINGS_FILE_NAME),
            input_extension: String::from(DEFAULT_INPUT_EXTENSION),
        }
    }
}

impl Config {
    /// Make a config for the given directories with the default file names
    pub fn new(input_path: &Path, output_path: &Path) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            ..Default::default()
        }
    }

    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Write the configuration to a YAML file
    pub fn write_config_file(&self, config_path: &Path) -> Result<(), ConfigError> {
        let yaml_str = serde_yaml::to_string(self)?;
        std::fs::write(config_path, yaml_str)?;
        Ok(())
    }

    /// Get the path to the combined discrete ratings table
    pub fn get_ratings_file_name(&self) -> PathBuf {
        self.output_path.join(&self.ratings_file_name)
    }

    /// Get the path to the combined dial ratings table
    pub fn get_dial_ratings_file_name(&self) -> PathBuf {
        self.output_path.join(&self.dial_ratings_file_name)
    }
}

/// Strip the extension from a session log path and append suffix
fn derive_output_path(input_path: &Path, suffix: &str) -> PathBuf {
    let stem = input_path.with_extension("");
    let mut name = stem.into_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Default discrete table path for a single session log (session.json -> session_ratings.csv)
pub fn default_ratings_path(input_path: &Path) -> PathBuf {
    derive_output_path(input_path, RATINGS_FILE_SUFFIX)
}

/// Default dial table path for a single session log (session.json -> session_dial_ratings.csv)
pub fn default_dial_ratings_path(input_path: &Path) -> PathBuf {
    derive_output_path(input_path, DIAL_RATINGS_FILE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_paths() {
        let input = Path::new("results/wave1/p01.json");
        assert_eq!(
            default_ratings_path(input),
            PathBuf::from("results/wave1/p01_ratings.csv")
        );
        assert_eq!(
            default_dial_ratings_path(input),
            PathBuf::from("results/wave1/p01_dial_ratings.csv")
        );
        assert_eq!(
            default_ratings_path(Path::new("session")),
            PathBuf::from("session_ratings.csv")
        );
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut config = Config::new(Path::new("data"), Path::new("out"));
        config.ratings_file_name = String::from("discrete.csv");
        config.write_config_file(&path).unwrap();
        let loaded = Config::read_config_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get_ratings_file_name(), PathBuf::from("out/discrete.csv"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "input_path: sessions\n").unwrap();
        let config = Config::read_config_file(&path).unwrap();
        assert_eq!(config.input_path, PathBuf::from("sessions"));
        assert_eq!(config.get_dial_ratings_file_name(), PathBuf::from("./all_dial_ratings.csv"));
        assert_eq!(config.input_extension, "json");
    }

    #[test]
    fn test_missing_config() {
        assert!(matches!(
            Config::read_config_file(Path::new("does/not/exist.yml")),
            Err(ConfigError::BadFilePath(_))
        ));
    }
}
