// ============================================================
// Baseline — TF-IDF Vectorizer
// ============================================================
// Term frequency × inverse document frequency with the usual
// text-classification defaults:
//
//   tokens      lowercase runs of 2+ word characters
//   vocabulary  sorted alphabetically
//   idf         ln((1 + n) / (1 + df)) + 1
//   rows        L2-normalized
//
// Reference: Manning et al. (2008) Introduction to IR, §6.2

use anyhow::{bail, Result};
use ndarray::{Array1, Array2};
use regex::Regex;
use std::collections::{HashMap, HashSet};

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token_pattern: Regex,
    /// term -> column index
    vocabulary:    HashMap<String, usize>,
    /// column index -> term
    terms:         Vec<String>,
    idf:           Array1<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            token_pattern: Regex::new(TOKEN_PATTERN)?,
            vocabulary:    HashMap::new(),
            terms:         Vec::new(),
            idf:           Array1::zeros(0),
        })
    }

    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let lower = document.to_lowercase();
        self.token_pattern
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Learn the vocabulary and idf weights
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            bail!("cannot fit TF-IDF on an empty corpus");
        }

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique: HashSet<String> = self.tokenize(doc).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            bail!("empty vocabulary; the documents contain no tokens");
        }

        let mut terms: Vec<String> = doc_freq.keys().cloned().collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        self.idf = terms
            .iter()
            .map(|t| ((1.0 + n_docs) / (1.0 + doc_freq[t] as f64)).ln() + 1.0)
            .collect();
        self.vocabulary = terms.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();
        self.terms = terms;

        tracing::debug!("TF-IDF vocabulary: {} terms from {} documents", self.terms.len(), documents.len());
        Ok(())
    }

    /// One L2-normalized TF-IDF row per document; unseen terms are ignored
    pub fn transform(&self, documents: &[String]) -> Result<Array2<f64>> {
        if self.terms.is_empty() {
            bail!("TF-IDF vectorizer used before fit()");
        }

        let mut matrix = Array2::<f64>::zeros((documents.len(), self.terms.len()));
        for (i, doc) in documents.iter().enumerate() {
            let mut row = matrix.row_mut(i);
            for term in self.tokenize(doc) {
                if let Some(&j) = self.vocabulary.get(&term) {
                    row[j] += 1.0;
                }
            }
            row *= &self.idf;

            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }
        Ok(matrix)
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Array2<f64>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &Array1<f64> {
        &self.idf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_sorted_and_short_tokens_dropped() {
        let mut tfidf = TfidfVectorizer::new().unwrap();
        tfidf.fit(&docs(&["The fire spread", "a flood", "the FIRE"])).unwrap();
        assert_eq!(tfidf.terms(), &["fire", "flood", "spread", "the"]);
    }

    #[test]
    fn test_common_terms_get_lower_idf() {
        let mut tfidf = TfidfVectorizer::new().unwrap();
        tfidf.fit(&docs(&["the fire", "the flood", "the fire"])).unwrap();

        // terms: fire, flood, the
        let idf = tfidf.idf();
        assert!((idf[2] - 1.0).abs() < 1e-12);
        assert!((idf[0] - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!(idf[1] > idf[0]);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let mut tfidf = TfidfVectorizer::new().unwrap();
        let m = tfidf.fit_transform(&docs(&["fire fire smoke", "calm sunny day"])).unwrap();
        for row in m.rows() {
            assert!((row.dot(&row) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_terms_give_zero_row() {
        let mut tfidf = TfidfVectorizer::new().unwrap();
        tfidf.fit(&docs(&["fire smoke"])).unwrap();
        let m = tfidf.transform(&docs(&["tsunami"])).unwrap();
        assert!(m.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let tfidf = TfidfVectorizer::new().unwrap();
        assert!(tfidf.transform(&docs(&["fire"])).is_err());
    }
}
