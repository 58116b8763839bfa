// ============================================================
// Classical baseline (no burn)
// ============================================================
// A bag-of-words baseline built from two pieces:
//
//   tfidf.rs        — TF-IDF document vectors (ndarray)
//   naive_bayes.rs  — multinomial Naive Bayes on those vectors
//   pipeline.rs     — the two chained behind TextClassifier
//
// Reference: Manning et al. (2008) Introduction to IR, ch. 6 and 13

pub mod tfidf;

pub mod naive_bayes;

pub mod pipeline;
