//! Vocabulary and merge-rank construction for CLIP BPE.
//!
//! The pretrained data ships as a plain-text merge list:
//!
//! ```text
//! #version: 0.2
//! i n
//! t h
//! a n
//! ```
//!
//! The first line is a header and is discarded. Every other line holds one merge
//! as two whitespace-separated symbols; its position (0-based, after the header)
//! is the merge rank. Lower ranks merge first.
//!
//! # Vocabulary Layout
//!
//! Token ids are positions in a vocabulary assembled in a fixed order:
//!
//! 1. the base alphabet symbols
//! 2. the same symbols with the word-final marker `</w>` appended
//! 3. one token per merge (the two halves concatenated), in rank order
//! 4. `<|startoftext|>` and `<|endoftext|>`

use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

/// Suffix marking the last symbol of a pretoken.
pub const WORD_END: &str = "</w>";

/// Start-of-text marker, second to last entry of the vocabulary.
pub const START_OF_TEXT: &str = "<|startoftext|>";

/// End-of-text marker, last entry of the vocabulary.
pub const END_OF_TEXT: &str = "<|endoftext|>";

/// Errors that can occur while building the vocabulary tables.
#[derive(Error, Debug)]
pub enum VocabError {
    #[error("Malformed merge on line {line}: {content:?}")]
    MalformedMerge { line: usize, content: String },
    #[error("Duplicate vocabulary token: {0:?}")]
    DuplicateToken(String),
    #[error("Vocabulary size {0} leaves no room for the byte alphabet and special tokens")]
    VocabSizeTooSmall(usize),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Parse the merge list, keeping at most `max_merges` entries.
///
/// Blank lines are skipped and do not count towards the limit.
pub fn parse_merges(data: &str, max_merges: usize) -> Result<Vec<(String, String)>, VocabError> {
    let mut merges = Vec::new();

    for (idx, line) in data.lines().enumerate().skip(1) {
        if merges.len() == max_merges {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(left), Some(right), None) => merges.push((left.to_string(), right.to_string())),
            _ => {
                return Err(VocabError::MalformedMerge {
                    line: idx + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(merges)
}

/// Load a merge list from a file path.
pub fn load_merges_file(
    path: impl AsRef<Path>,
    max_merges: usize,
) -> Result<Vec<(String, String)>, VocabError> {
    let data = std::fs::read_to_string(path)?;
    parse_merges(&data, max_merges)
}

/// Bidirectional token ↔ id table.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    encoder: FxHashMap<String, u32>,
    decoder: Vec<String>,
}

impl Vocabulary {
    /// Build the vocabulary from a base alphabet and the ordered merge list.
    ///
    /// Fails if two entries produce the same token string.
    pub fn build<S: AsRef<str>>(
        base: &[S],
        merges: &[(String, String)],
    ) -> Result<Self, VocabError> {
        let mut decoder = Vec::with_capacity(base.len() * 2 + merges.len() + 2);
        decoder.extend(base.iter().map(|s| s.as_ref().to_string()));
        decoder.extend(base.iter().map(|s| format!("{}{}", s.as_ref(), WORD_END)));
        decoder.extend(merges.iter().map(|(a, b)| format!("{a}{b}")));
        decoder.push(START_OF_TEXT.to_string());
        decoder.push(END_OF_TEXT.to_string());

        let mut encoder = FxHashMap::default();
        encoder.reserve(decoder.len());
        for (id, token) in decoder.iter().enumerate() {
            if encoder.insert(token.clone(), id as u32).is_some() {
                return Err(VocabError::DuplicateToken(token.clone()));
            }
        }

        log::debug!(
            "built vocabulary: {} tokens ({} base symbols, {} merges)",
            decoder.len(),
            base.len(),
            merges.len()
        );

        Ok(Self { encoder, decoder })
    }

    /// Look up the id of a token.
    #[inline]
    pub fn id(&self, token: &str) -> Option<u32> {
        self.encoder.get(token).copied()
    }

    /// Look up the token string of an id.
    #[inline]
    pub fn token(&self, id: u32) -> Option<&str> {
        self.decoder.get(id as usize).map(String::as_str)
    }

    /// Number of tokens, special tokens included.
    pub fn len(&self) -> usize {
        self.decoder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoder.is_empty()
    }

    /// Id of `<|startoftext|>`.
    pub fn start_token_id(&self) -> u32 {
        (self.decoder.len() - 2) as u32
    }

    /// Id of `<|endoftext|>`.
    pub fn end_token_id(&self) -> u32 {
        (self.decoder.len() - 1) as u32
    }

    /// Get the encoder map (token -> id).
    pub fn encoder(&self) -> &FxHashMap<String, u32> {
        &self.encoder
    }
}

/// Merge priorities keyed by symbol pair.
///
/// Stored as a two-level map so lookups by `(&str, &str)` need no allocation.
#[derive(Debug, Clone, Default)]
pub struct MergeRanks {
    ranks: FxHashMap<String, FxHashMap<String, u32>>,
    len: usize,
}

impl MergeRanks {
    /// Build the rank table; rank = position in `merges`.
    ///
    /// A pair listed twice keeps its first (lowest) rank.
    pub fn new(merges: &[(String, String)]) -> Self {
        let mut ranks: FxHashMap<String, FxHashMap<String, u32>> = FxHashMap::default();
        let mut len = 0;
        for (rank, (left, right)) in merges.iter().enumerate() {
            let inner = ranks.entry(left.clone()).or_default();
            if !inner.contains_key(right) {
                inner.insert(right.clone(), rank as u32);
                len += 1;
            }
        }
        Self { ranks, len }
    }

    /// Rank of the pair `(left, right)`, if it is a known merge.
    #[inline]
    pub fn rank(&self, left: &str, right: &str) -> Option<u32> {
        self.ranks.get(left)?.get(right).copied()
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
