//! Pure text transforms for earnings-call transcripts.
//!
//! This crate owns the preprocessing operations that sit between raw
//! transcript text and the vector index:
//! - cleaning/normalization of extracted text
//! - sentence-aware chunking with overlap
//! - keyword tagging against the fixed financial vocabulary
//!
//! Everything here is synchronous and side-effect free; embedding and
//! persistence live in `vector-store`.

pub mod chunking;
pub mod cleaning;
pub mod keywords;
pub mod tagging;

pub use chunking::chunk_text;
pub use cleaning::{clean_text, parse_pdf_date};
pub use keywords::financial_keywords;
pub use tagging::tag_text;
