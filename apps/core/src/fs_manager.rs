use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolves the on-disk layout under a configured root directory.
///
/// Layout mirrors the deployment convention: `data/` holds datasets and the
/// feedback log, `models/` holds the serialized artifact pair.
#[derive(Debug, Clone)]
pub struct PathManager {
    root: PathBuf,
}

impl PathManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    /// Directory for datasets and logs (`<root>/data`).
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    /// Directory for the vectorizer/classifier artifact pair (`<root>/models`).
    pub fn models_dir(&self) -> PathBuf {
        self.root.join("models")
    }

    /// Default training dataset location (`<root>/data/emotion.csv`).
    pub fn default_dataset_path(&self) -> PathBuf {
        self.data_dir().join("emotion.csv")
    }

    /// Append-only feedback log (`<root>/data/feedback_log.csv`).
    pub fn feedback_log_path(&self) -> PathBuf {
        self.data_dir().join("feedback_log.csv")
    }

    /// Creates the data and models directories if they do not exist.
    pub fn init(&self) -> Result<(), std::io::Error> {
        for dir in [self.data_dir(), self.models_dir()] {
            if !dir.exists() {
                info!("Creating directory: {:?}", dir);
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
