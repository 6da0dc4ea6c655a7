use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "keytrainer";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/keytrainer`, or the platform data-local dir
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn attempts_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("attempts.csv"))
            .unwrap_or_else(|| PathBuf::from("keytrainer_attempts.csv"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("keytrainer.log"))
    }

    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("keytrainer_config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_named_after_app() {
        assert!(AppDirs::attempts_path().ends_with("attempts.csv"));
        assert!(AppDirs::config_path()
            .to_string_lossy()
            .contains("keytrainer"));
    }
}
