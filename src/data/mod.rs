// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the Kaggle CSV to tensor batches:
//
//   train.csv
//       │
//       ▼
//   TweetCsvLoader    → reads rows into Tweet records
//       │
//       ▼
//   PreprocessData    → keeps labelled rows, splits train/val
//       │
//       ▼
//   TextVectorizer    → (infra) maps sentences to token ids
//       │
//       ▼
//   TweetDataset      → implements Burn's Dataset trait
//       │
//       ▼
//   TweetBatcher      → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads Kaggle-format tweet CSVs
pub mod loader;

/// Builds the train/validation sentence and label lists
pub mod preprocessor;

/// Implements Burn's Dataset trait for vectorized tweets
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seeded shuffle-and-split
pub mod splitter;
