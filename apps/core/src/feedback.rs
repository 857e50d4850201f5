//! Feedback recorder: appends user corrections to a CSV log for later
//! retraining runs.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use crate::error::AppError;
use crate::polarity::Polarity;

/// Appends one row per feedback submission.
///
/// Rows are `[text, predicted, actual, sentiment, prediction_id, timestamp]`.
/// `actual` may be empty when the user only confirmed the prediction, and
/// `prediction_id` ties the row back to the report it corrects. A mutex
/// serializes appends so concurrent submissions never interleave rows.
pub struct FeedbackRecorder {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FeedbackRecorder {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one feedback row.
    pub fn record(
        &self,
        text: &str,
        predicted: &str,
        actual: &str,
        sentiment: Polarity,
        prediction_id: Option<&str>,
    ) -> Result<(), AppError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::Internal("Feedback log lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        let timestamp = Utc::now().to_rfc3339();
        writer.write_record([
            text,
            predicted,
            actual,
            sentiment.as_str(),
            prediction_id.unwrap_or(""),
            timestamp.as_str(),
        ])?;
        writer.flush()?;

        debug!(path = %self.path.display(), "Feedback row appended");
        Ok(())
    }
}
