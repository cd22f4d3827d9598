//! Transcript text parsing.
//!
//! - [`tokenizer`] splits the raw transcript into headed messages
//! - [`media`] finds attachment markers
//! - [`links`] finds URLs and location markers
//! - [`markup`] applies extracted spans and renders HTML display text

pub mod links;
pub mod markup;
pub mod media;
pub mod tokenizer;

// Re-export commonly used items
pub use links::{GeoMatch, LinkExtractor, LinkScan};
pub use markup::{Span, apply_spans, escape_html, render_html};
pub use media::{MediaExtractor, MediaMarker, MediaScan};
pub use tokenizer::{RawMessage, parse_header, tokenize};
