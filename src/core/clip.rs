//! Pretrained CLIP vocabulary support.
//!
//! The CLIP text encoder uses a 49,408-token byte-level BPE vocabulary built
//! from the `bpe_simple_vocab_16e6.txt` merge list (48,894 merges after the
//! header). The merge list is not bundled; point [`from_file`] at it or set
//! `CLIP_BPE_VOCAB`.
//!
//! # Example
//!
//! ```no_run
//! let tokenizer = cliptok::clip::from_file("bpe_simple_vocab_16e6.txt").unwrap();
//! let window = tokenizer.encode_for_clip("a photo of a cat").unwrap();
//! assert_eq!(window.len(), cliptok::clip::CLIP_CONTEXT_LENGTH);
//! assert_eq!(window[0], cliptok::clip::START_OF_TEXT_ID);
//! ```

use std::path::{Path, PathBuf};

use super::tokenizer::{Tokenizer, TokenizerError, TokenizerOptions};

/// Total vocabulary size of the pretrained CLIP tokenizer.
pub const CLIP_VOCAB_SIZE: usize = 49408;

/// Token window of the CLIP text encoder.
pub const CLIP_CONTEXT_LENGTH: usize = 77;

/// `<|startoftext|>` in the pretrained vocabulary.
pub const START_OF_TEXT_ID: u32 = 49406;

/// `<|endoftext|>` in the pretrained vocabulary; also the padding id.
pub const END_OF_TEXT_ID: u32 = 49407;

/// Environment variable holding the merge-list path.
pub const MERGES_PATH_ENV: &str = "CLIP_BPE_VOCAB";

/// Fallback merge-list location, relative to the working directory.
pub const DEFAULT_MERGES_PATH: &str = "vocab/bpe_simple_vocab_16e6.txt";

/// Create the pretrained CLIP tokenizer from a merge-list file.
pub fn from_file(path: impl AsRef<Path>) -> Result<Tokenizer, TokenizerError> {
    Tokenizer::from_file(path, TokenizerOptions::default())
}

/// Create the pretrained CLIP tokenizer from merge-list text.
pub fn from_merges_text(data: &str) -> Result<Tokenizer, TokenizerError> {
    Tokenizer::from_merges_text(data, TokenizerOptions::default())
}

/// Find the merge list: `CLIP_BPE_VOCAB` if set, else [`DEFAULT_MERGES_PATH`]
/// if it exists.
pub fn locate_merges() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(MERGES_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    let fallback = PathBuf::from(DEFAULT_MERGES_PATH);
    fallback.exists().then_some(fallback)
}

/// Create the pretrained CLIP tokenizer from the located merge list.
///
/// Fails with an IO error when no merge list can be found.
pub fn from_env() -> Result<Tokenizer, TokenizerError> {
    let path = locate_merges().unwrap_or_else(|| PathBuf::from(DEFAULT_MERGES_PATH));
    log::debug!("loading CLIP merges from {}", path.display());
    from_file(path)
}
