//! ByteLevel symbol mapping for CLIP-style BPE.
//!
//! BPE merges operate on printable symbols, but input text can contain any byte
//! value. This module provides a bijective mapping between raw bytes (0-255) and
//! single printable Unicode characters.
//!
//! # Mapping Strategy
//!
//! Printable ASCII and Latin-1 characters map to themselves, while the remaining
//! bytes get mapped to characters starting at U+0100 in ascending byte order:
//!
//! - Bytes 33-126 (`!` to `~`): Map to themselves
//! - Bytes 161-172 (`¡` to `¬`): Map to themselves
//! - Bytes 174-255 (`®` to `ÿ`): Map to themselves
//! - Other bytes (0-32, 127-160, 173): Map to U+0100 onwards
//!
//! This is the same alphabet used by GPT-2 and CLIP.
//!
//! # Example
//!
//! ```
//! use cliptok::ByteSymbolMap;
//!
//! let map = ByteSymbolMap::new();
//! // Space (0x20 = 32) maps to 'Ġ' (U+0120)
//! assert_eq!(map.encode(b" "), "Ġ");
//! assert_eq!(map.decode("Ġhi"), Some(b" hi".to_vec()));
//! ```

use rustc_hash::FxHashMap;

/// Bytes that keep their own code point as symbol, in ascending order.
fn direct_bytes() -> impl Iterator<Item = u8> {
    (33u8..=126).chain(161u8..=172).chain(174u8..=255)
}

/// Bijection between byte values and their printable symbols.
///
/// Built once per tokenizer and never mutated afterwards, so it can be shared
/// read-only between threads.
#[derive(Debug, Clone)]
pub struct ByteSymbolMap {
    byte_to_char: [char; 256],
    char_to_byte: FxHashMap<char, u8>,
    alphabet: Vec<char>,
}

impl ByteSymbolMap {
    /// Build the byte/symbol tables.
    pub fn new() -> Self {
        let mut byte_to_char = ['\0'; 256];
        let mut is_direct = [false; 256];
        let mut alphabet = Vec::with_capacity(256);

        for b in direct_bytes() {
            byte_to_char[b as usize] = char::from(b);
            is_direct[b as usize] = true;
            alphabet.push(char::from(b));
        }

        // Every code point in U+0100..U+0144 is a valid scalar value
        let mut next = 0x100u32;
        for b in 0u8..=255 {
            if is_direct[b as usize] {
                continue;
            }
            let ch = char::from_u32(next).unwrap_or(char::REPLACEMENT_CHARACTER);
            byte_to_char[b as usize] = ch;
            alphabet.push(ch);
            next += 1;
        }

        let char_to_byte = byte_to_char
            .iter()
            .enumerate()
            .map(|(byte, &ch)| (ch, byte as u8))
            .collect();

        Self {
            byte_to_char,
            char_to_byte,
            alphabet,
        }
    }

    /// Get the symbol for a specific byte value.
    #[inline]
    pub fn symbol(&self, byte: u8) -> char {
        self.byte_to_char[byte as usize]
    }

    /// Get the byte value for a symbol, if it belongs to the alphabet.
    #[inline]
    pub fn byte(&self, ch: char) -> Option<u8> {
        self.char_to_byte.get(&ch).copied()
    }

    /// Encode a byte slice as a string of symbols, one char per byte.
    #[inline]
    pub fn encode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.symbol(b)).collect()
    }

    /// Decode a symbol string back to raw bytes.
    ///
    /// Returns `None` if the string contains a character outside the alphabet.
    #[inline]
    pub fn decode(&self, text: &str) -> Option<Vec<u8>> {
        text.chars().map(|ch| self.byte(ch)).collect()
    }

    /// The 256 symbols in base-vocabulary order.
    ///
    /// Direct-mapped bytes come first (ascending), followed by the remapped
    /// bytes (ascending). The pretrained CLIP vocabulary starts with exactly
    /// this sequence.
    pub fn alphabet(&self) -> impl ExactSizeIterator<Item = char> + '_ {
        self.alphabet.iter().copied()
    }
}

impl Default for ByteSymbolMap {
    fn default() -> Self {
        Self::new()
    }
}
