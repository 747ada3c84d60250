use std::path::{Path, PathBuf};

use crate::history::HistoryFile;

const DEFAULT_APP_NAME: &str = "hostlib";

/// Settings for one shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Shown in the banner and used to name the history file.
    pub app_name: String,
    pub history_path: PathBuf,
    /// The idle prompt.
    pub prompt: String,
}

impl ShellConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        Self {
            history_path: HistoryFile::default_path(&app_name),
            app_name,
            prompt: "> ".to_string(),
        }
    }

    /// Named after the running executable.
    pub fn from_program() -> Self {
        let name = std::env::args_os()
            .next()
            .as_deref()
            .map(Path::new)
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        Self::new(name)
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}
