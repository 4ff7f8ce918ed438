//! Configuration for the hours application.
//!
//! Settings live in `config.json` inside the data directory. A missing file
//! is not an error: every field is optional and falls back to a default, so
//! the tool works without running `hours init` first.
//!
//! ```rust,no_run
//! use hours::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("reports cover {} days by default", config.report_days());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Report defaults used by the `report` command.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReportConfig {
    /// Number of days, ending today, covered when no range is given.
    pub default_days: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig { default_days: 7 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Database file. Defaults to `hours.db` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        Self::read_path(&config_file_path)
    }

    fn read_path(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn report_days(&self) -> u32 {
        self.report.clone().unwrap_or_default().default_days.max(1)
    }

    /// Interactive setup, seeded with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        msg_print!(Message::ConfigModuleStorage);
        let default_database = match &config.database {
            Some(path) => path.display().to_string(),
            None => String::new(),
        };
        let database: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(default_database)
            .allow_empty(true)
            .interact_text()?;
        config.database = if database.trim().is_empty() { None } else { Some(PathBuf::from(database.trim())) };

        msg_print!(Message::ConfigModuleReport);
        let default = config.report.clone().unwrap_or_default();
        config.report = Some(ReportConfig {
            default_days: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptReportDays.to_string())
                .default(default.default_days)
                .interact_text()?,
        });

        Ok(config)
    }
}
