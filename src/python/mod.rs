mod bindings;

use crate::core::clip::{CLIP_CONTEXT_LENGTH, CLIP_VOCAB_SIZE, END_OF_TEXT_ID, START_OF_TEXT_ID};
use crate::core::CLIP_PATTERN;
pub use bindings::PyTokenizer;

use pyo3::prelude::*;

/// cliptok - CLIP byte-level BPE tokenizer with Python bindings
///
/// - Unicode-aware pretokenization with HTML-entity and whitespace cleaning
/// - Memoized rank-guided BPE merges
/// - Fixed 77-token windows for the CLIP text encoder
/// - Rayon parallelism for batch encoding
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTokenizer>()?;
    m.add("CLIP_PATTERN", CLIP_PATTERN)?;
    m.add("CLIP_VOCAB_SIZE", CLIP_VOCAB_SIZE)?;
    m.add("CLIP_CONTEXT_LENGTH", CLIP_CONTEXT_LENGTH)?;
    m.add("START_OF_TEXT_ID", START_OF_TEXT_ID)?;
    m.add("END_OF_TEXT_ID", END_OF_TEXT_ID)?;
    Ok(())
}
