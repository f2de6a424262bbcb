pub mod core;
#[cfg(feature = "python")]
mod python;

pub use self::core::{
    bpe_merge, clip, ByteMode, ByteSymbolMap, MergeRanks, Pretokenizer, Tokenizer,
    TokenizerError, TokenizerOptions, VocabError, Vocabulary, CLIP_PATTERN,
};
