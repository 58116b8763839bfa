// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting pieces used by the use cases:
//
//   text_vectorizer.rs — Vectorization layer
//                        Adapts a word-level vocabulary on the
//                        training sentences and realizes it as a
//                        HuggingFace tokenizer. Encodes each
//                        sentence to a fixed number of ids.
//
//   metrics.rs         — Evaluation and training metrics
//                        Accuracy / weighted precision, recall
//                        and F1, the confusion matrix, and the
//                        per-epoch history CSV logger.
//
//   report.rs          — JSON summary of one exercise run
//
//   submission.rs      — Kaggle id,target submission writer
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Text vectorization backed by a word-level tokenizer
pub mod text_vectorizer;

/// Classification metrics and training history logging
pub mod metrics;

/// Run report persistence
pub mod report;

/// Submission CSV writer
pub mod submission;
