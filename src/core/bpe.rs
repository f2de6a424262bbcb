//! Rank-guided byte-pair merging of a single pretoken.
//!
//! The pretoken is split into one symbol per character and the last symbol gets
//! the word-final marker. Then, repeatedly, the adjacent pair with the lowest
//! merge rank is found and every non-overlapping occurrence of it is merged in
//! one left-to-right pass. Merging stops when a single symbol remains or when
//! no adjacent pair has a rank.

use super::vocab::{MergeRanks, WORD_END};

/// Merge a symbol string into its final BPE symbols.
///
/// `word` must already be mapped to byte symbols. Memoization is left to the
/// caller; this function always does the full computation.
pub fn bpe_merge(word: &str, ranks: &MergeRanks) -> Vec<String> {
    let mut symbols: Vec<String> = word.chars().map(String::from).collect();
    match symbols.last_mut() {
        Some(last) => last.push_str(WORD_END),
        None => return symbols,
    }

    while symbols.len() > 1 {
        let Some((first, second)) = lowest_ranked_pair(&symbols, ranks) else {
            break;
        };
        symbols = merge_pair(symbols, &first, &second);
    }

    symbols
}

/// Find the adjacent pair with the lowest rank, if any pair is ranked.
fn lowest_ranked_pair(symbols: &[String], ranks: &MergeRanks) -> Option<(String, String)> {
    symbols
        .windows(2)
        .filter_map(|w| ranks.rank(&w[0], &w[1]).map(|r| (r, w)))
        .min_by_key(|&(r, _)| r)
        .map(|(_, w)| (w[0].clone(), w[1].clone()))
}

/// Replace every non-overlapping `(first, second)` occurrence, left to right.
fn merge_pair(symbols: Vec<String>, first: &str, second: &str) -> Vec<String> {
    let mut merged = Vec::with_capacity(symbols.len());
    let mut iter = symbols.into_iter().peekable();

    while let Some(symbol) = iter.next() {
        if symbol == first && iter.peek().is_some_and(|next| next == second) {
            iter.next();
            merged.push(symbol + second);
        } else {
            merged.push(symbol);
        }
    }

    merged
}
