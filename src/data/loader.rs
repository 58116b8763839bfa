// ============================================================
// Layer 4 — Tweet CSV Loader
// ============================================================
// Loads the Kaggle disaster tweets files with the csv crate.
//
// File layout:
//   train.csv   id,keyword,location,text,target
//   test.csv    id,keyword,location,text
//
// Empty keyword/location cells deserialise to None, and a
// missing target column leaves Tweet::target as None.
//
// Reference: csv crate documentation (Reader::deserialize)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use csv::Reader;
use std::{fs::File, path::PathBuf};

use crate::domain::traits::TweetSource;
use crate::domain::tweet::Tweet;

/// Reads every row of one tweets CSV file.
pub struct TweetCsvLoader {
    path: PathBuf,
}

impl TweetCsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TweetSource for TweetCsvLoader {
    fn load_all(&self) -> Result<Vec<Tweet>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open tweets file '{}'", self.path.display()))?;

        let mut reader = Reader::from_reader(file);
        let mut tweets = Vec::new();

        for (row, record) in reader.deserialize::<Tweet>().enumerate() {
            // +2: one for the header, one for 1-based line numbers
            let tweet = record.with_context(|| {
                format!("Malformed row at line {} of '{}'", row + 2, self.path.display())
            })?;
            tweets.push(tweet);
        }

        tracing::info!("Loaded {} tweets from '{}'", tweets.len(), self.path.display());
        Ok(tweets)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_loads_labelled_rows() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("train.csv");
        fs::write(
            &path,
            "id,keyword,location,text,target\n\
             1,,,Our Deeds are the Reason of this #earthquake,1\n\
             4,ablaze,\"London, UK\",\"Forest fire near La Ronge Sask. Canada\",1\n\
             7,,,What a goooooooaaaaaal!!!!!!,0\n",
        )
        .unwrap();

        let tweets = TweetCsvLoader::new(&path).load_all().unwrap();

        assert_eq!(tweets.len(), 3);
        assert_eq!(tweets[0].keyword, None);
        assert_eq!(tweets[1].keyword.as_deref(), Some("ablaze"));
        assert_eq!(tweets[1].location.as_deref(), Some("London, UK"));
        assert_eq!(tweets[2].target, Some(0));
    }

    #[test]
    fn test_test_file_has_no_target() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("test.csv");
        fs::write(
            &path,
            "id,keyword,location,text\n0,,,Just happened a terrible car crash\n",
        )
        .unwrap();

        let tweets = TweetCsvLoader::new(&path).load_all().unwrap();

        assert_eq!(tweets.len(), 1);
        assert_eq!(tweets[0].id, 0);
        assert_eq!(tweets[0].target, None);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = TweetCsvLoader::new(dir.path().join("nope.csv")).load_all();
        assert!(err.is_err());
    }

    #[test]
    fn test_bad_label_reports_line() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("train.csv");
        fs::write(&path, "id,keyword,location,text,target\n1,,,hello,yes\n").unwrap();

        let err = TweetCsvLoader::new(&path).load_all().unwrap_err();
        assert!(format!("{err}").contains("line 2"));
    }
}
