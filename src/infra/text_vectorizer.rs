// ============================================================
// Layer 6 — Text Vectorizer
// ============================================================
// Maps raw tweets to fixed-length sequences of integer token ids.
//
// adapt() scans the training sentences once and builds a
// frequency-ranked vocabulary:
//
//   id 0       padding
//   id 1       [UNK]  (out-of-vocabulary)
//   id 2..     tokens, most frequent first (ties alphabetical)
//
// capped at max_tokens ids in total. The vocabulary is then
// written out as a HuggingFace WordLevel tokenizer definition
// whose normalizer lowercases and strips ASCII punctuation, and
// whose pre-tokenizer splits on whitespace, so counting during
// adapt() and encoding later apply the same standardization.
//
// encode() truncates from the end and right-pads with 0 to
// exactly output_sequence_length ids.
//
// Reference: tokenizers crate documentation (Tokenizer, WordLevel)

use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;
use tokenizers::Tokenizer;

const PAD_TOKEN: &str = "[PAD]";
const UNK_TOKEN: &str = "[UNK]";
pub const PAD_ID: u32 = 0;
pub const OOV_ID: u32 = 1;

/// Characters removed by standardization.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// The same set as an Oniguruma character class for the tokenizer normalizer.
const PUNCTUATION_CLASS: &str = r##"[!"#$%&'()*+,\-./:;<=>?@\[\\\]^_`{|}~]"##;

pub struct TextVectorizer {
    max_tokens:             usize,
    output_sequence_length: usize,
    vocabulary:             Vec<String>,
    tokenizer:              Option<Tokenizer>,
}

impl TextVectorizer {
    pub fn new(max_tokens: usize, output_sequence_length: usize) -> Self {
        Self {
            max_tokens,
            output_sequence_length,
            vocabulary: Vec::new(),
            tokenizer:  None,
        }
    }

    /// Build the vocabulary from `sentences`
    pub fn adapt(&mut self, sentences: &[String]) -> Result<()> {
        if self.max_tokens < 2 {
            bail!("max_tokens must leave room for padding and [UNK], got {}", self.max_tokens);
        }

        let mut freq: HashMap<String, usize> = HashMap::new();
        for sentence in sentences {
            for token in standardize(sentence) {
                *freq.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_tokens - 2);

        let mut vocabulary = vec![String::new(), UNK_TOKEN.to_string()];
        vocabulary.extend(ranked.into_iter().map(|(token, _)| token));

        self.tokenizer  = Some(build_tokenizer(&vocabulary)?);
        self.vocabulary = vocabulary;

        tracing::info!(
            "Text vectorizer adapted: {} ids (cap {}), sequence length {}",
            self.vocabulary.len(),
            self.max_tokens,
            self.output_sequence_length
        );
        Ok(())
    }

    /// Fixed-length token ids for one sentence
    pub fn encode(&self, sentence: &str) -> Result<Vec<u32>> {
        let tokenizer = self
            .tokenizer
            .as_ref()
            .ok_or_else(|| anyhow!("text vectorizer used before adapt()"))?;

        let encoding = tokenizer
            .encode(sentence, false)
            .map_err(|e| anyhow!("Tokenisation error: {e}"))?;

        let mut ids = encoding.get_ids().to_vec();
        ids.truncate(self.output_sequence_length);
        ids.resize(self.output_sequence_length, PAD_ID);
        Ok(ids)
    }

    pub fn encode_batch(&self, sentences: &[String]) -> Result<Vec<Vec<u32>>> {
        sentences.iter().map(|s| self.encode(s)).collect()
    }

    /// Vocabulary ordered by id; index 0 is the empty padding token
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn output_sequence_length(&self) -> usize {
        self.output_sequence_length
    }
}

/// Lowercase, strip punctuation, split on whitespace
///
/// Lowercases one char at a time like the tokenizer's `Lowercase`
/// normalizer; `str::to_lowercase` would turn a word-final `Σ` into `ς`.
pub fn standardize(text: &str) -> Vec<String> {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !PUNCTUATION.contains(*c))
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Write the vocabulary as a tokenizer JSON definition and load it
fn build_tokenizer(vocabulary: &[String]) -> Result<Tokenizer> {
    let mut vocab = serde_json::Map::new();
    vocab.insert(PAD_TOKEN.to_string(), serde_json::json!(PAD_ID));
    for (id, token) in vocabulary.iter().enumerate().skip(OOV_ID as usize) {
        vocab.insert(token.clone(), serde_json::json!(id));
    }

    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": {
            "type": "Sequence",
            "normalizers": [
                { "type": "Lowercase" },
                {
                    "type": "Replace",
                    "pattern": { "Regex": PUNCTUATION_CLASS },
                    "content": ""
                }
            ]
        },
        "pre_tokenizer": { "type": "WhitespaceSplit" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": UNK_TOKEN
        }
    });

    serde_json::to_string(&tokenizer_json)?
        .parse::<Tokenizer>()
        .map_err(|e| anyhow!("Cannot build tokenizer: {e}"))
}
