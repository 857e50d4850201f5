//! Training dataset loading.
//!
//! The on-disk contract is a plain CSV with one free-text column and one mood
//! label column. Column names vary across public emotion datasets, so headers
//! are matched against known candidates, falling back to positional columns.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::error::AppError;

/// Datasets smaller than this are rejected after cleaning.
pub const MIN_DATASET_ROWS: usize = 10;

const TEXT_COLUMN_NAMES: &[&str] = &[
    "text", "message", "sentence", "utterance", "input", "review", "content", "msg",
];
const LABEL_COLUMN_NAMES: &[&str] = &["mood", "label", "sentiment", "emotion", "target", "class"];

/// Paired texts and mood labels.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub texts: Vec<String>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Sorted unique labels, the class set for training.
    pub fn label_set(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self.labels.iter().map(|l| l.as_str()).collect();
        unique.into_iter().map(|l| l.to_string()).collect()
    }

    /// Load a CSV dataset, auto-detecting the text and label columns.
    /// Rows with an empty text or label are dropped.
    pub fn load_csv(path: &Path) -> Result<Dataset, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let (text_idx, label_idx) = detect_columns(&headers)?;

        let mut dataset = Dataset::default();
        for record in reader.records() {
            let record = record?;
            let text = record.get(text_idx).unwrap_or("").trim();
            let label = record.get(label_idx).unwrap_or("").trim();
            if text.is_empty() || label.is_empty() {
                continue;
            }
            dataset.texts.push(text.to_string());
            dataset.labels.push(label.to_string());
        }

        if dataset.len() < MIN_DATASET_ROWS {
            return Err(AppError::Dataset(format!(
                "Dataset too small after cleaning: {} rows (minimum {})",
                dataset.len(),
                MIN_DATASET_ROWS
            )));
        }

        info!(
            rows = dataset.len(),
            moods = dataset.label_set().len(),
            "Loaded dataset from {:?}",
            path
        );
        Ok(dataset)
    }

    /// Built-in samples so the system stays bootable without a CSV on disk.
    pub fn fallback_samples() -> Dataset {
        let entries = [
            ("I am so happy and excited today!", "happy"),
            ("I feel very sad and down.", "sad"),
            ("I'm angry about what happened", "angry"),
            ("I'm feeling okay, just normal", "neutral"),
            ("This is amazing, I'm thrilled", "happy"),
            ("I'm disappointed and upset", "sad"),
            ("I'm scared and nervous about it", "fear"),
            ("What a surprise, I didn't expect that", "surprise"),
        ];

        Dataset {
            texts: entries.iter().map(|(text, _)| text.to_string()).collect(),
            labels: entries.iter().map(|(_, label)| label.to_string()).collect(),
        }
    }
}

fn detect_columns(headers: &csv::StringRecord) -> Result<(usize, usize), AppError> {
    let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let named_text = lowered
        .iter()
        .position(|h| TEXT_COLUMN_NAMES.contains(&h.as_str()));
    let named_label = lowered
        .iter()
        .position(|h| LABEL_COLUMN_NAMES.contains(&h.as_str()));

    // Positional fallback: text takes the first column unless the label was
    // recognized there, and the label takes whichever of the first two is left.
    let text_idx = named_text.unwrap_or_else(|| if named_label == Some(0) { 1 } else { 0 });
    let label_idx = named_label.unwrap_or_else(|| if text_idx == 0 { 1 } else { 0 });

    if text_idx == label_idx || text_idx >= headers.len() || label_idx >= headers.len() {
        return Err(AppError::Dataset(
            "Could not detect text and label columns; expected headers like 'text' and 'mood'"
                .to_string(),
        ));
    }

    Ok((text_idx, label_idx))
}

/// Seeded shuffle split. The test side gets `ceil(n * fraction)` rows,
/// clamped so both sides stay non-empty when `n >= 2`.
pub fn train_test_split(dataset: &Dataset, test_fraction: f32, seed: u64) -> (Dataset, Dataset) {
    let n = dataset.len();
    if n < 2 {
        return (dataset.clone(), Dataset::default());
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let test_len = ((n as f32) * test_fraction).ceil() as usize;
    let test_len = test_len.clamp(1, n - 1);

    let mut train = Dataset::default();
    let mut test = Dataset::default();
    for (position, &idx) in order.iter().enumerate() {
        let side = if position < test_len { &mut test } else { &mut train };
        side.texts.push(dataset.texts[idx].clone());
        side.labels.push(dataset.labels[idx].clone());
    }

    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv_with_standard_headers() {
        let file = write_csv(
            "text,mood\n\
             i am happy,happy\n\
             i am sad,sad\n\
             great day,happy\n\
             awful day,sad\n\
             feeling fine,neutral\n\
             so excited,happy\n\
             really down,sad\n\
             just okay,neutral\n\
             what a joy,happy\n\
             utterly miserable,sad\n",
        );

        let dataset = Dataset::load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.label_set(), vec!["happy", "neutral", "sad"]);
    }

    #[test]
    fn test_load_csv_detects_alternate_headers() {
        let file = write_csv(
            "emotion,utterance\n\
             happy,i am happy\n\
             sad,i am sad\n\
             happy,great day\n\
             sad,awful day\n\
             neutral,feeling fine\n\
             happy,so excited\n\
             sad,really down\n\
             neutral,just okay\n\
             happy,what a joy\n\
             sad,utterly miserable\n",
        );

        let dataset = Dataset::load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 10);
        // Label column listed first: detection must not swap the two.
        assert_eq!(dataset.texts[0], "i am happy");
        assert_eq!(dataset.labels[0], "happy");
    }

    #[test]
    fn test_load_csv_named_label_with_unnamed_text() {
        let file = write_csv(
            "mood,note\n\
             happy,i am happy\n\
             sad,i am sad\n\
             happy,great day\n\
             sad,awful day\n\
             neutral,feeling fine\n\
             happy,so excited\n\
             sad,really down\n\
             neutral,just okay\n\
             happy,what a joy\n\
             sad,utterly miserable\n",
        );

        let dataset = Dataset::load_csv(file.path()).unwrap();
        assert_eq!(dataset.texts[0], "i am happy");
        assert_eq!(dataset.labels[0], "happy");
    }

    #[test]
    fn test_load_csv_rejects_single_column() {
        let file = write_csv("text\nhello\n");
        let err = Dataset::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
    }

    #[test]
    fn test_load_csv_drops_empty_rows_and_enforces_minimum() {
        let file = write_csv(
            "text,mood\n\
             one,happy\n\
             ,sad\n\
             three,\n\
             four,sad\n",
        );

        let err = Dataset::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
    }

    #[test]
    fn test_fallback_samples_shape() {
        let dataset = Dataset::fallback_samples();
        assert_eq!(dataset.len(), 8);
        assert_eq!(
            dataset.label_set(),
            vec!["angry", "fear", "happy", "neutral", "sad", "surprise"]
        );
    }

    #[test]
    fn test_split_is_seeded_and_non_empty() {
        let dataset = Dataset::fallback_samples();
        let (train_a, test_a) = train_test_split(&dataset, 0.15, 42);
        let (train_b, test_b) = train_test_split(&dataset, 0.15, 42);

        assert_eq!(train_a.texts, train_b.texts);
        assert_eq!(test_a.texts, test_b.texts);
        assert!(!train_a.is_empty());
        assert!(!test_a.is_empty());
        assert_eq!(train_a.len() + test_a.len(), dataset.len());
    }

    #[test]
    fn test_split_sizes_follow_fraction() {
        let dataset = Dataset::fallback_samples();
        let (train, test) = train_test_split(&dataset, 0.5, 7);
        assert_eq!(test.len(), 4);
        assert_eq!(train.len(), 4);

        // A tiny fraction still leaves at least one test row.
        let (_, test) = train_test_split(&dataset, 0.01, 7);
        assert_eq!(test.len(), 1);
    }
}
