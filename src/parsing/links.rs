//! URL and location detection.
//!
//! Runs on the residual body: the captions when attachment markers were
//! found, the whole body otherwise. Links become anchors in the display text.
//! A location marker
//!
//! ```text
//! Ort: Office <geo:52.52,13.405?z=15>
//! ```
//!
//! turns the whole message into its place label.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::MarkerKeywords;
use crate::error::{ChatweaveError, Result};
use crate::message::GeoPoint;
use crate::parsing::markup::Span;

/// Scheme-qualified or `www.` URLs ending in a top-level domain, with an
/// optional path.
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(?:https?|ftp)://|www\.)[a-zA-Z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+\.[a-zA-Z]{2,}(?:/\S*)?",
    )
    .expect("url pattern is valid")
});

const COORDINATE: &str = r"-?\d+(?:\.\d+)?";

/// A location marker found in a body.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMatch {
    /// Byte range of the place label, trimmed.
    pub label: Range<usize>,
    /// Byte range of the whole match, keyword and marker included.
    pub marker: Range<usize>,
    pub point: GeoPoint,
}

/// Links and location found in one residual body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkScan {
    /// Link spans; the replacement is the anchor target.
    pub links: Vec<Span<String>>,
    pub geo: Option<GeoMatch>,
}

impl LinkScan {
    pub fn has_link(&self) -> bool {
        !self.links.is_empty()
    }

    /// The part of the body that becomes display text: the place label when a
    /// location was found, the whole body otherwise. Surrounding whitespace is
    /// excluded.
    pub fn visible_range(&self, text: &str) -> Range<usize> {
        self.geo
            .as_ref()
            .map_or_else(|| trimmed_range(text, 0..text.len()), |geo| geo.label.clone())
    }
}

/// Finds URLs and location markers.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    geo: Regex,
}

impl LinkExtractor {
    /// Builds an extractor; `keywords.location` are accepted as an optional
    /// prefix before the place label.
    pub fn new(keywords: &MarkerKeywords) -> Result<Self> {
        let mut words: Vec<&str> = keywords
            .location
            .iter()
            .map(String::as_str)
            .filter(|w| !w.is_empty())
            .collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let prefix = if words.is_empty() {
            String::new()
        } else {
            let alternation = words
                .into_iter()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("|");
            format!(r"(?:\b(?:{alternation})(?::\s*|\s+))?")
        };

        let pattern = format!(
            r"{prefix}(.*?)\s*<geo:({COORDINATE}),({COORDINATE})(?:[;?][^>]*)?>"
        );
        let geo = Regex::new(&pattern)
            .map_err(|e| ChatweaveError::invalid_config(format!("location keywords: {e}")))?;

        Ok(Self { geo })
    }

    /// Finds all URLs in `text`, in order.
    pub fn find_links(&self, text: &str) -> Vec<Span<String>> {
        URL.find_iter(text)
            .map(|m| Span::new(m.start(), m.end(), link_target(m.as_str())))
            .collect()
    }

    /// Finds the first location marker in `text`.
    pub fn find_geo(&self, text: &str) -> Option<GeoMatch> {
        let caps = self.geo.captures(text)?;
        let whole = caps.get(0)?;
        let label = caps.get(1)?;
        let latitude: f64 = caps.get(2)?.as_str().parse().ok()?;
        let longitude: f64 = caps.get(3)?.as_str().parse().ok()?;

        Some(GeoMatch {
            label: trimmed_range(text, label.range()),
            marker: whole.range(),
            point: GeoPoint::new(latitude, longitude),
        })
    }

    /// Scans `text` for links and a location.
    pub fn scan(&self, text: &str) -> LinkScan {
        LinkScan {
            links: self.find_links(text),
            geo: self.find_geo(text),
        }
    }
}

/// Anchor target for a matched URL; scheme-less `www.` forms get `//`.
pub fn link_target(url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        format!("//{url}")
    }
}

fn trimmed_range(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let start = range.start + (slice.len() - slice.trim_start().len());
    let end = range.end - (slice.len() - slice.trim_end().len());
    if start > end { start..start } else { start..end }
}
