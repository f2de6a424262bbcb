//! Core tokenization engine for cliptok.
//!
//! This module contains the CLIP byte-level BPE tokenizer:
//! - Byte ↔ symbol remapping so any byte sequence can be merged
//! - Vocabulary and merge-rank construction from the CLIP merge list
//! - Text cleaning and Unicode-aware pretokenization
//! - Rank-guided pair merging with a per-instance memo cache
//! - Fixed-window encoding for the CLIP text encoder
//!
//! # Architecture
//!
//! - [`ByteSymbolMap`]: bijection between bytes and printable symbols
//! - [`vocab`]: merge-list parsing, [`Vocabulary`] and [`MergeRanks`]
//! - [`Pretokenizer`]: cleaning and pattern-based segmentation
//! - [`bpe_merge`]: the merge loop for one pretoken
//! - [`Tokenizer`]: encode/decode facade with the merge cache
//! - [`clip`]: pretrained CLIP constants and loaders

mod bpe;
pub mod byte_level;
pub mod clip;
mod pretokenize;
mod tokenizer;
pub mod vocab;

pub use bpe::bpe_merge;
pub use byte_level::ByteSymbolMap;
pub use pretokenize::{Pretokenizer, Pretokens, CLIP_PATTERN};
pub use tokenizer::{ByteMode, Tokenizer, TokenizerError, TokenizerOptions};
pub use vocab::{
    load_merges_file, parse_merges, MergeRanks, VocabError, Vocabulary, END_OF_TEXT,
    START_OF_TEXT, WORD_END,
};
