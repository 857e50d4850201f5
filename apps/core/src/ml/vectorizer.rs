//! TF-IDF text vectorization.
//!
//! Word unigrams and bigrams, a capped vocabulary, sublinear term frequency,
//! smoothed inverse document frequency and l2-normalized rows. Vocabulary and
//! idf weights are fixed at fit time; `transform` is pure and lock-free.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Sparse feature vector: (feature index, value) pairs sorted by index.
pub type SparseVector = Vec<(usize, f32)>;

/// Vectorizer hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerOptions {
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub max_features: usize,
    pub sublinear_tf: bool,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            ngram_min: 1,
            ngram_max: 2,
            max_features: 15_000,
            sublinear_tf: true,
        }
    }
}

/// Fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    options: VectorizerOptions,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from a corpus.
    ///
    /// Terms are ranked by corpus frequency (ties broken alphabetically) and
    /// truncated to `max_features`; indices follow sorted term order so the
    /// fitted state is deterministic for a given corpus.
    pub fn fit(documents: &[String], options: VectorizerOptions) -> Self {
        let mut corpus_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = extract_terms(doc, &options);
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *corpus_counts.entry(term.clone()).or_insert(0) += 1;
            }
            for term in &terms {
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(options.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n_docs = documents.len();
        let mut idf = vec![0.0f32; terms.len()];
        for term in &terms {
            let idx = vocabulary[term];
            let df = doc_freq.get(term).copied().unwrap_or(0);
            idf[idx] = (((1 + n_docs) as f32) / ((1 + df) as f32)).ln() + 1.0;
        }

        Self {
            vocabulary,
            idf,
            options,
        }
    }

    /// Vectorize a single text against the fitted vocabulary.
    /// Unknown terms are dropped; texts with no known terms yield an empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in extract_terms(text, &self.options) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.options.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (idx, tf * self.idf[idx])
            })
            .collect();
        features.sort_by_key(|&(idx, _)| idx);

        let norm: f32 = features.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for feature in &mut features {
                feature.1 /= norm;
            }
        }

        features
    }

    /// Number of features (vocabulary size).
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Index of a term in the vocabulary, if present.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

/// Tokenize into lowercase word tokens of at least two characters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|word| word.chars().count() >= 2)
        .map(|word| word.to_string())
        .collect()
}

/// Expand tokens into the configured ngram range.
fn extract_terms(text: &str, options: &VectorizerOptions) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::new();
    for n in options.ngram_min..=options.ngram_max {
        if n == 0 || tokens.len() < n {
            continue;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_has_unigrams_and_bigrams() {
        let vectorizer = TfidfVectorizer::fit(
            &docs(&["happy days ahead", "sad days behind"]),
            VectorizerOptions::default(),
        );

        assert!(vectorizer.term_index("happy").is_some());
        assert!(vectorizer.term_index("days").is_some());
        assert!(vectorizer.term_index("happy days").is_some());
        assert!(vectorizer.term_index("days behind").is_some());
    }

    #[test]
    fn test_short_tokens_are_dropped() {
        let vectorizer =
            TfidfVectorizer::fit(&docs(&["i am ok now", "i go up"]), VectorizerOptions::default());
        // Single-character words never enter the vocabulary.
        assert!(vectorizer.term_index("i").is_none());
        assert!(vectorizer.term_index("am").is_some());
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let vectorizer = TfidfVectorizer::fit(
            &docs(&["good good day", "bad day", "plain day today"]),
            VectorizerOptions::default(),
        );

        let features = vectorizer.transform("good day");
        assert!(!features.is_empty());
        let norm: f32 = features.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {}", norm);
    }

    #[test]
    fn test_unknown_words_yield_empty_vector() {
        let vectorizer =
            TfidfVectorizer::fit(&docs(&["alpha beta", "gamma delta"]), VectorizerOptions::default());
        assert!(vectorizer.transform("zetas omicron").is_empty());
        assert!(vectorizer.transform("").is_empty());
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let options = VectorizerOptions {
            max_features: 3,
            ..VectorizerOptions::default()
        };
        let vectorizer = TfidfVectorizer::fit(
            &docs(&["one two three four five six seven"]),
            options,
        );
        assert_eq!(vectorizer.n_features(), 3);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = docs(&["calm sea", "stormy sea ahead", "calm morning"]);
        let a = TfidfVectorizer::fit(&corpus, VectorizerOptions::default());
        let b = TfidfVectorizer::fit(&corpus, VectorizerOptions::default());
        assert_eq!(a.transform("calm sea ahead"), b.transform("calm sea ahead"));
    }
}
