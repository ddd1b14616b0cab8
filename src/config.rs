use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where `save` and `load` read and write the program snapshot
    pub program_file: String,
    /// Print the recorded program after every input line
    pub echo_program: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program_file: "tally_program.json".to_string(),
            echo_program: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at '{}', using defaults.", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.program_file.trim().is_empty() {
            return Err("program_file must not be empty".to_string());
        }
        Ok(())
    }
}
