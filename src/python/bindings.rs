//! Python bindings for the cliptok tokenizer.
//!
//! # Example
//!
//! ```python
//! from cliptok import Tokenizer
//!
//! tokenizer = Tokenizer.from_file("bpe_simple_vocab_16e6.txt")
//!
//! tokens = tokenizer.encode("a photo of a cat")
//! window = tokenizer.encode_for_clip("a photo of a cat")  # 77 ids
//! text = tokenizer.decode(tokens)
//! ```

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::core::clip::CLIP_CONTEXT_LENGTH;
use crate::core::{ByteMode, Tokenizer, TokenizerError, TokenizerOptions, VocabError};

fn to_py_err(err: TokenizerError) -> PyErr {
    match err {
        TokenizerError::VocabError(VocabError::IoError(e)) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn parse_byte_mode(name: &str) -> PyResult<ByteMode> {
    match name {
        "utf8" => Ok(ByteMode::Utf8),
        "code_unit" => Ok(ByteMode::CodeUnit),
        _ => Err(PyValueError::new_err(format!(
            "Unknown byte mode: {}. Supported: utf8, code_unit",
            name
        ))),
    }
}

/// Python wrapper for the Rust Tokenizer.
#[pyclass(name = "Tokenizer")]
pub struct PyTokenizer {
    inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    /// Create a tokenizer from a CLIP merge-list file.
    ///
    /// Args:
    ///     path: Path to the merge list (header line first)
    ///     vocab_size: Total vocabulary size, bounds the merges read (default: 49408)
    ///     byte_mode: "utf8" (default) or "code_unit"
    #[staticmethod]
    #[pyo3(signature = (path, vocab_size=None, byte_mode="utf8"))]
    fn from_file(path: &str, vocab_size: Option<usize>, byte_mode: &str) -> PyResult<Self> {
        let options = options(vocab_size, byte_mode)?;
        let inner = Tokenizer::from_file(path, options).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Create a tokenizer from merge-list text.
    ///
    /// Args:
    ///     merges: Merge-list contents (header line first)
    ///     vocab_size: Total vocabulary size, bounds the merges read (default: 49408)
    ///     byte_mode: "utf8" (default) or "code_unit"
    #[staticmethod]
    #[pyo3(signature = (merges, vocab_size=None, byte_mode="utf8"))]
    fn from_merges(merges: &str, vocab_size: Option<usize>, byte_mode: &str) -> PyResult<Self> {
        let options = options(vocab_size, byte_mode)?;
        let inner = Tokenizer::from_merges_text(merges, options).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Encode text to token IDs.
    fn encode(&self, text: &str) -> PyResult<Vec<u32>> {
        self.inner.encode(text).map_err(to_py_err)
    }

    /// Encode text into a fixed window of start id, tokens, end id and padding.
    ///
    /// Raises:
    ///     ValueError: If window_size is not a positive multiple of 77
    #[pyo3(signature = (text, window_size=CLIP_CONTEXT_LENGTH))]
    fn encode_for_clip(&self, text: &str, window_size: usize) -> PyResult<Vec<u32>> {
        self.inner
            .encode_for_fixed_window(text, window_size)
            .map_err(to_py_err)
    }

    /// Batch encode multiple texts in parallel.
    fn encode_batch(&self, texts: Vec<String>) -> PyResult<Vec<Vec<u32>>> {
        self.inner.encode_batch(&texts).map_err(to_py_err)
    }

    /// Decode token IDs to a string; word ends become spaces.
    ///
    /// Raises:
    ///     ValueError: On unknown ids or invalid UTF-8
    fn decode(&self, tokens: Vec<u32>) -> PyResult<String> {
        self.inner.decode(&tokens).map_err(to_py_err)
    }

    /// Decode token IDs to a string, skipping unknown ids and replacing invalid UTF-8.
    fn decode_lossy(&self, tokens: Vec<u32>) -> String {
        self.inner.decode_lossy(&tokens)
    }

    /// Number of tokens the text encodes to; 0 for None or "".
    #[pyo3(signature = (text=None))]
    fn parse_length(&self, text: Option<&str>) -> PyResult<usize> {
        self.inner.parse_length(text).map_err(to_py_err)
    }

    /// Get the vocabulary size (including special tokens).
    #[getter]
    fn vocab_size(&self) -> usize {
        self.inner.vocab_size()
    }

    #[getter]
    fn start_token_id(&self) -> u32 {
        self.inner.start_token_id()
    }

    #[getter]
    fn end_token_id(&self) -> u32 {
        self.inner.end_token_id()
    }

    /// Clear the merge cache.
    fn clear_cache(&self) {
        self.inner.clear_cache();
    }

    /// Get the number of entries in the merge cache.
    #[getter]
    fn cache_len(&self) -> usize {
        self.inner.cache_len()
    }

    fn __repr__(&self) -> String {
        format!("Tokenizer(vocab_size={})", self.inner.vocab_size())
    }
}

fn options(vocab_size: Option<usize>, byte_mode: &str) -> PyResult<TokenizerOptions> {
    let mut options = TokenizerOptions::default().byte_mode(parse_byte_mode(byte_mode)?);
    if let Some(size) = vocab_size {
        options = options.vocab_size(size);
    }
    Ok(options)
}
