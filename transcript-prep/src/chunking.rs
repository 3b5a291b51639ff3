//! Sentence-aware chunking with overlap.
//!
//! Transcript text is split on paragraph boundaries first, then sentence
//! boundaries, and sentences are greedily packed into chunks of bounded
//! size. When a chunk closes, a trailing suffix of its sentences (bounded
//! by the overlap budget) seeds the next chunk so adjacent chunks share
//! context.

use tracing::debug;

/// Splits `text` into chunks of at most `chunk_size` characters with
/// `chunk_overlap` characters of trailing-sentence overlap.
///
/// Boundary rules:
/// - paragraphs are separated by blank lines and never merge mid-sentence
/// - a sentence ends at `.`, `!` or `?` followed by whitespace
/// - a single sentence longer than `chunk_size` becomes its own chunk
/// - an empty trailing buffer is discarded; a non-empty one is the final chunk
///
/// Chunk text joins its sentences with single spaces.
pub fn chunk_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_size = 0usize;

    for paragraph in text.split("\n\n") {
        for sentence in split_sentences(paragraph.trim()) {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }

            let sentence_size = sentence.len();

            if current_size + sentence_size > chunk_size {
                if !current.is_empty() {
                    chunks.push(current.join(" "));

                    // Keep trailing sentences within the overlap budget,
                    // preserving their order.
                    let mut overlap_size = 0usize;
                    let mut overlap: Vec<String> = Vec::new();
                    for s in current.iter().rev() {
                        if overlap_size + s.len() <= chunk_overlap {
                            overlap_size += s.len();
                            overlap.insert(0, s.clone());
                        } else {
                            break;
                        }
                    }
                    current = overlap;
                    current_size = overlap_size;
                } else {
                    // A single sentence exceeding chunk_size is emitted verbatim.
                    chunks.push(sentence.to_string());
                    continue;
                }
            }

            current.push(sentence.to_string());
            current_size += sentence_size;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    debug!(
        chunks = chunks.len(),
        chunk_size, chunk_overlap, "chunked text"
    );
    chunks
}

/// Splits a paragraph at terminal punctuation (`.`/`!`/`?`) followed by
/// whitespace. The trailing segment (with or without punctuation) is kept.
fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut prev_terminal = false;

    for (i, c) in paragraph.char_indices() {
        if prev_terminal && c.is_whitespace() {
            out.push(&paragraph[start..i]);
            start = i;
        }
        prev_terminal = matches!(c, '.' | '!' | '?');
    }

    if start < paragraph.len() {
        out.push(&paragraph[start..]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_sentences() {
        let text = "Revenue grew 12% in Q3. Margins expanded. Guidance was raised.\n\nThe CFO discussed capital allocation. Buybacks continue.";
        let chunks = chunk_text(text, 60, 20);

        let merged = chunks.join(" ");
        for sentence in [
            "Revenue grew 12% in Q3.",
            "Margins expanded.",
            "Guidance was raised.",
            "The CFO discussed capital allocation.",
            "Buybacks continue.",
        ] {
            assert!(merged.contains(sentence), "missing: {sentence}");
        }
    }

    #[test]
    fn respects_chunk_size_for_normal_sentences() {
        let text = "One short sentence. Another short one. A third short one. And a fourth one here.";
        for chunk in chunk_text(text, 45, 0) {
            assert!(chunk.len() <= 45, "oversize chunk: {chunk:?}");
        }
    }

    #[test]
    fn oversize_sentence_is_its_own_chunk() {
        let long = "x".repeat(120) + ".";
        let text = format!("Short intro here. {long} Short outro.");
        let chunks = chunk_text(&text, 50, 0);
        assert!(chunks.iter().any(|c| c.contains(&"x".repeat(120))));
    }

    #[test]
    fn overlap_repeats_trailing_sentence() {
        let text = "First sentence goes here. Second sentence goes here. Third sentence goes here.";
        let chunks = chunk_text(text, 55, 30);
        assert!(chunks.len() >= 2);
        // The sentence closing chunk N reappears at the start of chunk N+1.
        let first_tail = chunks[0].rsplit(". ").next().unwrap();
        assert!(chunks[1].starts_with(first_tail.trim_end_matches('.')));
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_text("", 100, 10).is_empty());
        assert!(chunk_text("   \n\n  ", 100, 10).is_empty());
    }

    #[test]
    fn identical_input_is_deterministic() {
        let text = "Alpha beta gamma. Delta epsilon zeta. Eta theta iota.";
        assert_eq!(chunk_text(text, 30, 10), chunk_text(text, 30, 10));
    }
}
