//! The [`Tokenizer`] facade: cleaning, pretokenization, memoized BPE merging,
//! fixed-window encoding and decoding.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use super::bpe::bpe_merge;
use super::byte_level::ByteSymbolMap;
use super::clip::{CLIP_CONTEXT_LENGTH, CLIP_VOCAB_SIZE};
use super::pretokenize::Pretokenizer;
use super::vocab::{
    load_merges_file, parse_merges, MergeRanks, VocabError, Vocabulary, END_OF_TEXT,
    START_OF_TEXT, WORD_END,
};

/// Number of special tokens appended after the merges.
const SPECIAL_TOKEN_COUNT: usize = 2;

/// Ids taken by the byte alphabet: every symbol plus its word-final variant.
const BASE_TOKEN_COUNT: usize = 2 * 256;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
    #[error("Vocabulary error: {0}")]
    VocabError(#[from] VocabError),
    #[error("Window size must be a positive multiple of 77, got {0}")]
    InvalidWindowSize(usize),
    #[error("Unknown token id: {0}")]
    UnknownTokenId(u32),
    #[error("Unknown symbol: {0:?}")]
    UnknownSymbol(String),
    #[error("Character {0:?} has no byte symbol in code-unit mode")]
    UnmappableChar(char),
    #[error("Decoding error: invalid UTF-8")]
    Utf8Error,
}

/// How pretoken characters are turned into byte symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteMode {
    /// Encode the pretoken to UTF-8 and map every byte (reference CLIP behaviour).
    #[default]
    Utf8,
    /// Use each character's scalar value as the byte.
    ///
    /// Matches tokenizers that remap code units directly. Characters above
    /// U+00FF cannot be represented and fail with
    /// [`TokenizerError::UnmappableChar`].
    CodeUnit,
}

/// Construction options for [`Tokenizer`].
///
/// The defaults describe the pretrained CLIP vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Total vocabulary size; bounds how many merges are read.
    pub vocab_size: usize,
    pub byte_mode: ByteMode,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            vocab_size: CLIP_VOCAB_SIZE,
            byte_mode: ByteMode::Utf8,
        }
    }
}

impl TokenizerOptions {
    pub fn vocab_size(mut self, vocab_size: usize) -> Self {
        self.vocab_size = vocab_size;
        self
    }

    pub fn byte_mode(mut self, byte_mode: ByteMode) -> Self {
        self.byte_mode = byte_mode;
        self
    }

    /// Maximum number of merge lines consumed from the merge list.
    pub fn max_merges(&self) -> Result<usize, VocabError> {
        self.vocab_size
            .checked_sub(BASE_TOKEN_COUNT + SPECIAL_TOKEN_COUNT)
            .ok_or(VocabError::VocabSizeTooSmall(self.vocab_size))
    }
}

/// CLIP byte-level BPE tokenizer.
///
/// Encoding runs: clean (HTML entities, whitespace, lowercase) → pretokenize →
/// map each pretoken to byte symbols → BPE merge (memoized) → vocabulary ids.
///
/// # Merge Cache
///
/// Merge results are memoized per instance, keyed by the byte-symbol form of the
/// pretoken. The cache is never evicted; it sits behind a `Mutex`, so a shared
/// `&Tokenizer` can encode from several threads (see [`encode_batch`]).
/// Cloning yields an independent instance with a fresh cache.
///
/// [`encode_batch`]: Tokenizer::encode_batch
pub struct Tokenizer {
    byte_map: ByteSymbolMap,
    vocab: Vocabulary,
    ranks: MergeRanks,
    pretokenizer: Pretokenizer,
    cache: Mutex<FxHashMap<String, String>>,
    merge_count: AtomicUsize,
    byte_mode: ByteMode,
}

impl Tokenizer {
    /// Create a tokenizer from an ordered merge list, using the byte alphabet as
    /// base vocabulary and UTF-8 byte mode.
    pub fn new(merges: &[(String, String)]) -> Result<Self, TokenizerError> {
        Self::with_byte_mode(merges, ByteMode::Utf8)
    }

    /// Create a tokenizer from a merge list with the given byte mode.
    pub fn with_byte_mode(
        merges: &[(String, String)],
        byte_mode: ByteMode,
    ) -> Result<Self, TokenizerError> {
        let byte_map = ByteSymbolMap::new();
        let base: Vec<String> = byte_map.alphabet().map(String::from).collect();
        Self::with_base_vocab(byte_map, &base, merges, byte_mode)
    }

    /// Create a tokenizer from an explicit base vocabulary and merge list.
    ///
    /// # Arguments
    /// * `byte_map` - Byte/symbol tables used for remapping and decoding
    /// * `base` - Base vocabulary symbols, in id order
    /// * `merges` - Ordered merge pairs; position is the merge rank
    /// * `byte_mode` - How pretoken characters become byte symbols
    pub fn with_base_vocab<S: AsRef<str>>(
        byte_map: ByteSymbolMap,
        base: &[S],
        merges: &[(String, String)],
        byte_mode: ByteMode,
    ) -> Result<Self, TokenizerError> {
        let vocab = Vocabulary::build(base, merges)?;
        let ranks = MergeRanks::new(merges);
        let pretokenizer = Pretokenizer::new()?;

        log::debug!(
            "tokenizer ready: vocab_size={} merges={} byte_mode={:?}",
            vocab.len(),
            ranks.len(),
            byte_mode
        );

        Ok(Self {
            byte_map,
            vocab,
            ranks,
            pretokenizer,
            cache: Mutex::new(seed_cache()),
            merge_count: AtomicUsize::new(0),
            byte_mode,
        })
    }

    /// Create a tokenizer from merge-list text (header line first).
    pub fn from_merges_text(data: &str, options: TokenizerOptions) -> Result<Self, TokenizerError> {
        let merges = parse_merges(data, options.max_merges()?)?;
        Self::with_byte_mode(&merges, options.byte_mode)
    }

    /// Create a tokenizer from a merge-list file.
    pub fn from_file(
        path: impl AsRef<Path>,
        options: TokenizerOptions,
    ) -> Result<Self, TokenizerError> {
        let merges = load_merges_file(path, options.max_merges()?)?;
        Self::with_byte_mode(&merges, options.byte_mode)
    }

    /// Merge one byte-symbol pretoken, returning space-separated symbols.
    ///
    /// Results for pretokens of two or more symbols are cached; shorter input
    /// just gets the word-final marker.
    pub fn bpe(&self, token: &str) -> String {
        if let Ok(cache) = self.cache.lock() {
            if let Some(cached) = cache.get(token) {
                return cached.clone();
            }
        }

        let mut chars = token.chars();
        if chars.next().is_none() || chars.next().is_none() {
            return format!("{token}{WORD_END}");
        }

        self.merge_count.fetch_add(1, Ordering::Relaxed);
        log::trace!("merge cache miss: {token:?}");
        let merged = bpe_merge(token, &self.ranks).join(" ");

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(token.to_string(), merged.clone());
        }

        merged
    }

    /// Map a pretoken to its byte-symbol string.
    fn to_symbols(&self, pretoken: &str) -> Result<String, TokenizerError> {
        match self.byte_mode {
            ByteMode::Utf8 => Ok(self.byte_map.encode(pretoken.as_bytes())),
            ByteMode::CodeUnit => pretoken
                .chars()
                .map(|ch| {
                    u8::try_from(ch)
                        .map(|b| self.byte_map.symbol(b))
                        .map_err(|_| TokenizerError::UnmappableChar(ch))
                })
                .collect(),
        }
    }

    /// Encode text to token IDs.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        let cleaned = self.pretokenizer.clean(text);
        let mut ids = Vec::new();

        for pretoken in self.pretokenizer.pretokenize(&cleaned) {
            let symbols = self.to_symbols(pretoken)?;
            for piece in self.bpe(&symbols).split(' ') {
                let id = self
                    .vocab
                    .id(piece)
                    .ok_or_else(|| TokenizerError::UnknownSymbol(piece.to_string()))?;
                ids.push(id);
            }
        }

        Ok(ids)
    }

    /// Encode text into exactly `window_size` ids.
    ///
    /// The start id is prepended, the sequence is cut to 76 ids, the end id is
    /// appended and the rest is padded with the end id. Windows larger than 77
    /// only get more padding.
    ///
    /// # Errors
    /// [`TokenizerError::InvalidWindowSize`] unless `window_size` is a positive
    /// multiple of 77.
    pub fn encode_for_fixed_window(
        &self,
        text: &str,
        window_size: usize,
    ) -> Result<Vec<u32>, TokenizerError> {
        if window_size == 0 || window_size % CLIP_CONTEXT_LENGTH != 0 {
            return Err(TokenizerError::InvalidWindowSize(window_size));
        }

        let end = self.end_token_id();
        let mut tokens = Vec::with_capacity(window_size);
        tokens.push(self.start_token_id());
        tokens.extend(self.encode(text)?);
        tokens.truncate(CLIP_CONTEXT_LENGTH - 1);
        tokens.push(end);
        tokens.resize(window_size, end);

        Ok(tokens)
    }

    /// Encode text into the default 77-id CLIP window.
    pub fn encode_for_clip(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        self.encode_for_fixed_window(text, CLIP_CONTEXT_LENGTH)
    }

    /// Number of tokens `text` encodes to; 0 for missing or empty input.
    pub fn parse_length(&self, text: Option<&str>) -> Result<usize, TokenizerError> {
        match text {
            None | Some("") => Ok(0),
            Some(text) => Ok(self.encode(text)?.len()),
        }
    }

    /// Concatenate the token strings of `tokens`.
    fn join_tokens(&self, tokens: &[u32]) -> Result<String, TokenizerError> {
        let mut joined = String::with_capacity(tokens.len() * 4);
        for &id in tokens {
            let token = self
                .vocab
                .token(id)
                .ok_or(TokenizerError::UnknownTokenId(id))?;
            joined.push_str(token);
        }
        Ok(joined)
    }

    /// Decode token IDs back to raw bytes.
    ///
    /// Word-final markers are kept as-is in the returned bytes.
    pub fn decode_bytes(&self, tokens: &[u32]) -> Result<Vec<u8>, TokenizerError> {
        let joined = self.join_tokens(tokens)?;
        joined
            .chars()
            .map(|ch| {
                self.byte_map
                    .byte(ch)
                    .ok_or_else(|| TokenizerError::UnknownSymbol(ch.to_string()))
            })
            .collect()
    }

    /// Decode token IDs to a string.
    ///
    /// Every word-final marker becomes a space, so decoded text ends with one.
    pub fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError> {
        let bytes = self.decode_bytes(tokens)?;
        let text = match self.byte_mode {
            ByteMode::Utf8 => String::from_utf8(bytes).map_err(|_| TokenizerError::Utf8Error)?,
            ByteMode::CodeUnit => bytes.into_iter().map(char::from).collect(),
        };
        Ok(text.replace(WORD_END, " "))
    }

    /// Decode token IDs to a string, skipping unknown ids and symbols and
    /// replacing invalid UTF-8 with the replacement character.
    pub fn decode_lossy(&self, tokens: &[u32]) -> String {
        let bytes: Vec<u8> = tokens
            .iter()
            .filter_map(|&id| self.vocab.token(id))
            .flat_map(str::chars)
            .filter_map(|ch| self.byte_map.byte(ch))
            .collect();
        let text = match self.byte_mode {
            ByteMode::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
            ByteMode::CodeUnit => bytes.into_iter().map(char::from).collect(),
        };
        text.replace(WORD_END, " ")
    }

    /// Batch encode multiple texts in parallel.
    pub fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<u32>>, TokenizerError> {
        texts.par_iter().map(|text| self.encode(text)).collect()
    }

    /// Batch encode multiple texts into fixed windows in parallel.
    pub fn encode_for_fixed_window_batch(
        &self,
        texts: &[String],
        window_size: usize,
    ) -> Result<Vec<Vec<u32>>, TokenizerError> {
        texts
            .par_iter()
            .map(|text| self.encode_for_fixed_window(text, window_size))
            .collect()
    }

    /// Get the vocabulary size (number of tokens, special tokens included).
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Id of `<|startoftext|>`.
    pub fn start_token_id(&self) -> u32 {
        self.vocab.start_token_id()
    }

    /// Id of `<|endoftext|>`, also used for padding.
    pub fn end_token_id(&self) -> u32 {
        self.vocab.end_token_id()
    }

    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.vocab.id(token)
    }

    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.vocab.token(id)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn merge_ranks(&self) -> &MergeRanks {
        &self.ranks
    }

    pub fn byte_map(&self) -> &ByteSymbolMap {
        &self.byte_map
    }

    pub fn byte_mode(&self) -> ByteMode {
        self.byte_mode
    }

    /// How many times the merge loop ran (cache misses on multi-symbol input).
    pub fn merge_count(&self) -> usize {
        self.merge_count.load(Ordering::Relaxed)
    }

    /// Clear the merge cache, keeping the special-token entries.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            *cache = seed_cache();
        }
    }

    /// Get the current cache size, special-token entries included.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }
}

/// Cache with both special tokens mapped to themselves.
fn seed_cache() -> FxHashMap<String, String> {
    let mut cache = FxHashMap::default();
    cache.insert(START_OF_TEXT.to_string(), START_OF_TEXT.to_string());
    cache.insert(END_OF_TEXT.to_string(), END_OF_TEXT.to_string());
    cache
}

impl Clone for Tokenizer {
    fn clone(&self) -> Self {
        // Caches are not shared
        Self {
            byte_map: self.byte_map.clone(),
            vocab: self.vocab.clone(),
            ranks: self.ranks.clone(),
            pretokenizer: self.pretokenizer.clone(),
            cache: Mutex::new(seed_cache()),
            merge_count: AtomicUsize::new(0),
            byte_mode: self.byte_mode,
        }
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("vocab_size", &self.vocab.len())
            .field("merges", &self.ranks.len())
            .field("byte_mode", &self.byte_mode)
            .field("cache_len", &self.cache_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MERGES: &str = "#version: 0.2
h e
l l
he ll
hell o</w>
w o
r l
wo rl
worl d</w>
' s</w>
i t</w>
c a
ca f
caf é</w>
";

    fn make_test_tokenizer() -> Tokenizer {
        Tokenizer::from_merges_text(TEST_MERGES, TokenizerOptions::default()).unwrap()
    }

    fn id(tokenizer: &Tokenizer, token: &str) -> u32 {
        tokenizer.token_to_id(token).unwrap()
    }

    #[test]
    fn test_vocab_layout() {
        let tokenizer = make_test_tokenizer();
        // 256 symbols, 256 word-final symbols, 13 merges, 2 specials
        assert_eq!(tokenizer.vocab_size(), 527);
        assert_eq!(tokenizer.start_token_id(), 525);
        assert_eq!(tokenizer.end_token_id(), 526);
        assert_eq!(id(&tokenizer, "!"), 0);
        assert_eq!(id(&tokenizer, "!</w>"), 256);
        assert_eq!(id(&tokenizer, "he"), 512);
    }

    #[test]
    fn test_encode_decode() {
        let tokenizer = make_test_tokenizer();
        let tokens = tokenizer.encode("Hello World").unwrap();
        assert_eq!(
            tokens,
            vec![id(&tokenizer, "hello</w>"), id(&tokenizer, "world</w>")]
        );
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "hello world ");
    }

    #[test]
    fn test_encode_contraction_and_punctuation() {
        let tokenizer = make_test_tokenizer();
        let tokens = tokenizer.encode("it's!").unwrap();
        assert_eq!(
            tokens,
            vec![
                id(&tokenizer, "it</w>"),
                id(&tokenizer, "'s</w>"),
                id(&tokenizer, "!</w>")
            ]
        );
    }

    #[test]
    fn test_encode_special_markers() {
        let tokenizer = make_test_tokenizer();
        let tokens = tokenizer.encode("<|startoftext|>hello<|endoftext|>").unwrap();
        assert_eq!(
            tokens,
            vec![
                tokenizer.start_token_id(),
                id(&tokenizer, "hello</w>"),
                tokenizer.end_token_id()
            ]
        );
    }

    #[test]
    fn test_encode_empty() {
        let tokenizer = make_test_tokenizer();
        assert!(tokenizer.encode("").unwrap().is_empty());
        assert!(tokenizer.encode("   \n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_utf8_byte_mode() {
        let tokenizer = make_test_tokenizer();
        // 'é' is two UTF-8 bytes, so the Latin-1 merge "caf é</w>" never applies
        let tokens = tokenizer.encode("Café").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], id(&tokenizer, "caf"));
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "café ");

        let tokens = tokenizer.encode("日本").unwrap();
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "日本 ");
    }

    #[test]
    fn test_code_unit_byte_mode() {
        let options = TokenizerOptions::default().byte_mode(ByteMode::CodeUnit);
        let tokenizer = Tokenizer::from_merges_text(TEST_MERGES, options).unwrap();

        let tokens = tokenizer.encode("Café").unwrap();
        assert_eq!(tokens, vec![id(&tokenizer, "café</w>")]);
        assert_eq!(tokenizer.decode(&tokens).unwrap(), "café ");

        let err = tokenizer.encode("日本").unwrap_err();
        assert!(matches!(err, TokenizerError::UnmappableChar('日')));
    }

    #[test]
    fn test_fixed_window() {
        let tokenizer = make_test_tokenizer();
        let start = tokenizer.start_token_id();
        let end = tokenizer.end_token_id();

        let window = tokenizer.encode_for_clip("hello world").unwrap();
        assert_eq!(window.len(), 77);
        assert_eq!(window[0], start);
        assert_eq!(window[1], id(&tokenizer, "hello</w>"));
        assert_eq!(window[2], id(&tokenizer, "world</w>"));
        assert!(window[3..].iter().all(|&t| t == end));

        let window = tokenizer.encode_for_fixed_window("", 77).unwrap();
        assert_eq!(window.len(), 77);
        assert_eq!(window[0], start);
        assert!(window[1..].iter().all(|&t| t == end));

        let window = tokenizer.encode_for_fixed_window("hello", 154).unwrap();
        assert_eq!(window.len(), 154);
        assert!(window[2..].iter().all(|&t| t == end));
    }

    #[test]
    fn test_fixed_window_truncates() {
        let tokenizer = make_test_tokenizer();
        let text = "hello ".repeat(100);
        let window = tokenizer.encode_for_fixed_window(&text, 154).unwrap();
        assert_eq!(window.len(), 154);
        assert_eq!(window[0], tokenizer.start_token_id());
        let hello = id(&tokenizer, "hello</w>");
        assert!(window[1..76].iter().all(|&t| t == hello));
        assert!(window[76..].iter().all(|&t| t == tokenizer.end_token_id()));
    }

    #[test]
    fn test_fixed_window_rejects_bad_size() {
        let tokenizer = make_test_tokenizer();
        for size in [0, 50, 76, 78, 100] {
            let err = tokenizer.encode_for_fixed_window("hello", size).unwrap_err();
            assert!(matches!(err, TokenizerError::InvalidWindowSize(s) if s == size));
        }
    }

    #[test]
    fn test_parse_length() {
        let tokenizer = make_test_tokenizer();
        assert_eq!(tokenizer.parse_length(None).unwrap(), 0);
        assert_eq!(tokenizer.parse_length(Some("")).unwrap(), 0);
        assert_eq!(tokenizer.parse_length(Some("hello world!")).unwrap(), 3);
    }

    #[test]
    fn test_decode_unknown_id() {
        let tokenizer = make_test_tokenizer();
        let err = tokenizer.decode(&[0, 9999]).unwrap_err();
        assert!(matches!(err, TokenizerError::UnknownTokenId(9999)));
        assert_eq!(tokenizer.decode_lossy(&[id(&tokenizer, "hello</w>"), 9999]), "hello ");
    }

    #[test]
    fn test_bpe_is_cached() {
        let tokenizer = make_test_tokenizer();
        assert_eq!(tokenizer.cache_len(), 2);
        assert_eq!(tokenizer.merge_count(), 0);

        let first = tokenizer.bpe("hello");
        assert_eq!(first, "hello</w>");
        assert_eq!(tokenizer.merge_count(), 1);

        let second = tokenizer.bpe("hello");
        assert_eq!(second, first);
        assert_eq!(tokenizer.merge_count(), 1);
        assert_eq!(tokenizer.cache_len(), 3);
    }

    #[test]
    fn test_bpe_short_input_bypasses_cache() {
        let tokenizer = make_test_tokenizer();
        assert_eq!(tokenizer.bpe("x"), "x</w>");
        assert_eq!(tokenizer.bpe("x"), "x</w>");
        assert_eq!(tokenizer.merge_count(), 0);
        assert_eq!(tokenizer.cache_len(), 2);
    }

    #[test]
    fn test_special_tokens_seeded() {
        let tokenizer = make_test_tokenizer();
        assert_eq!(tokenizer.bpe(START_OF_TEXT), START_OF_TEXT);
        assert_eq!(tokenizer.bpe(END_OF_TEXT), END_OF_TEXT);
        assert_eq!(tokenizer.merge_count(), 0);
    }

    #[test]
    fn test_clear_cache() {
        let tokenizer = make_test_tokenizer();
        tokenizer.encode("hello world").unwrap();
        assert_eq!(tokenizer.cache_len(), 4);
        tokenizer.clear_cache();
        assert_eq!(tokenizer.cache_len(), 2);
    }

    #[test]
    fn test_clone_has_fresh_cache() {
        let tokenizer = make_test_tokenizer();
        tokenizer.encode("hello world").unwrap();
        let cloned = tokenizer.clone();
        assert_eq!(cloned.cache_len(), 2);
        assert_eq!(cloned.merge_count(), 0);
        assert_eq!(
            cloned.encode("hello world").unwrap(),
            tokenizer.encode("hello world").unwrap()
        );
    }

    #[test]
    fn test_batch_encode() {
        let tokenizer = make_test_tokenizer();
        let texts = vec!["hello".to_string(), "world".to_string(), "hello".to_string()];
        let batch = tokenizer.encode_batch(&texts).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], batch[2]);
        assert_eq!(batch[1], vec![id(&tokenizer, "world</w>")]);

        let windows = tokenizer.encode_for_fixed_window_batch(&texts, 77).unwrap();
        assert!(windows.iter().all(|w| w.len() == 77));
    }

    #[test]
    fn test_options_vocab_size() {
        let options = TokenizerOptions::default().vocab_size(512 + 2 + 4);
        assert_eq!(options.max_merges().unwrap(), 4);
        let tokenizer = Tokenizer::from_merges_text(TEST_MERGES, options).unwrap();
        assert_eq!(tokenizer.merge_ranks().len(), 4);
        assert_eq!(tokenizer.vocab_size(), options.vocab_size);

        // Exactly the alphabet and the special tokens, no merges
        let options = TokenizerOptions::default().vocab_size(514);
        let tokenizer = Tokenizer::from_merges_text(TEST_MERGES, options).unwrap();
        assert_eq!(tokenizer.vocab_size(), 514);
        assert_eq!(tokenizer.end_token_id(), 513);

        for size in [100, 258, 513] {
            let options = TokenizerOptions::default().vocab_size(size);
            let err = Tokenizer::from_merges_text(TEST_MERGES, options).unwrap_err();
            assert!(matches!(
                err,
                TokenizerError::VocabError(VocabError::VocabSizeTooSmall(s)) if s == size
            ));
        }
    }

    #[test]
    fn test_tokenizer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tokenizer>();
    }
}
