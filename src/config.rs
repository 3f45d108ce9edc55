use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::F1Error;

const CONFIG_DIR_NAME: &str = "f1champions";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_API_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";
/// The Jolpica mirror caps `limit` at 100.
pub const DEFAULT_PAGE_LIMIT: usize = 100;
const DEFAULT_WINDOW_WIDTH: f32 = 480.;
const DEFAULT_WINDOW_HEIGHT: f32 = 720.;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_limit: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, F1Error> {
        Ok(dirs::config_dir()
            .ok_or(F1Error::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Reads the config from the user's config directory, `None` when no
    /// config has been saved yet.
    pub fn from_local_file() -> Result<Option<Self>, F1Error> {
        Self::from_path(&Self::default_path()?)
    }

    pub fn from_path(config_path: &Path) -> Result<Option<Self>, F1Error> {
        if !config_path.exists() {
            debug!("No config file at {:?}", config_path);
            return Ok(None);
        }

        let file = std::fs::File::open(config_path)
            .map_err(|e| F1Error::ConfigIOError { source: e })?;
        let config = serde_json::from_reader(file)
            .map_err(|e| F1Error::ConfigSerializeError { source: e })?;
        info!("Loaded config from {:?}", config_path);
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<(), F1Error> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), F1Error> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| F1Error::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| F1Error::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| F1Error::ConfigSerializeError { source: e })
    }
}
