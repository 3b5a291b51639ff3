//! Per-category preprocessing strategies.
//!
//! The cleaning/chunking steps are selected through a small lookup keyed by
//! [`DataCategory`] instead of a handler class hierarchy: each entry holds
//! plain function pointers, and dispatch is one `match`.

use transcript_prep::{chunk_text, clean_text};

use crate::record::DataCategory;

/// Preprocessing strategy for one data category.
#[derive(Clone, Copy)]
pub struct PrepStrategy {
    /// Normalizes raw text before chunking.
    pub clean: fn(&str) -> String,
    /// Splits cleaned text into chunks (size, overlap).
    pub chunk: fn(&str, usize, usize) -> Vec<String>,
}

/// Returns the preprocessing strategy for `category`.
///
/// Queries are embedded ad hoc and never split, so their strategy passes
/// the cleaned text through as a single chunk.
pub fn strategy_for(category: DataCategory) -> PrepStrategy {
    match category {
        DataCategory::EarningsCalls => PrepStrategy {
            clean: clean_text,
            chunk: chunk_text,
        },
        DataCategory::Queries => PrepStrategy {
            clean: clean_text,
            chunk: passthrough,
        },
    }
}

fn passthrough(text: &str, _chunk_size: usize, _chunk_overlap: usize) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earnings_calls_are_chunked() {
        let s = strategy_for(DataCategory::EarningsCalls);
        let cleaned = (s.clean)("First sentence here. Second sentence here.");
        let chunks = (s.chunk)(&cleaned, 25, 0);
        assert!(chunks.len() > 1);
    }

    #[test]
    fn queries_pass_through_whole() {
        let s = strategy_for(DataCategory::Queries);
        let chunks = (s.chunk)("What was revenue guidance?", 10, 0);
        assert_eq!(chunks, vec!["What was revenue guidance?".to_string()]);
    }
}
