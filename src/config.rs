use crate::app_dirs::AppDirs;
use crate::language::SupportedLanguage;
use crate::typing_policy::LookalikePolicy;
use crate::word_generator::DEFAULT_WORD_COUNT;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub word_count: usize,
    pub language: SupportedLanguage,
    pub countdown_secs: u64,
    /// Time limits offered on the main menu, in seconds
    pub time_limits: Vec<u64>,
    pub lookalikes: LookalikePolicy,
    pub history_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            language: SupportedLanguage::Russian,
            countdown_secs: 3,
            time_limits: vec![15, 30, 60],
            lookalikes: LookalikePolicy::default(),
            history_len: 10,
        }
    }
}

impl Config {
    pub fn countdown(&self) -> Duration {
        Duration::from_secs(self.countdown_secs)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring unreadable config {}: {}", self.path.display(), e);
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
