//! Span-based text rewriting and HTML rendering.
//!
//! Extractors never edit a body in place. They report [`Span`]s over the text
//! they scanned, and a single pass applies them in order. Because replacement
//! text is never scanned again, output of one extractor cannot be matched by
//! another.

use std::ops::Range;

/// A replacement for `source[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<T> {
    pub start: usize,
    pub end: usize,
    pub replacement: T,
}

impl<T> Span<T> {
    pub fn new(start: usize, end: usize, replacement: T) -> Self {
        Self {
            start,
            end,
            replacement,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the span lies entirely inside `range`.
    pub fn within(&self, range: &Range<usize>) -> bool {
        self.start >= range.start && self.end <= range.end
    }
}

/// Applies text replacements in one pass.
///
/// `spans` must be sorted by `start`. A span that overlaps an already applied
/// one, or that reaches past the end of `source`, is skipped.
pub fn apply_spans(source: &str, spans: &[Span<String>]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor || span.end > source.len() || span.start > span.end {
            continue;
        }
        out.push_str(&source[cursor..span.start]);
        out.push_str(&span.replacement);
        cursor = span.end;
    }

    out.push_str(&source[cursor..]);
    out
}

/// Escapes text for use in HTML content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text, false);
    out
}

fn push_escaped(out: &mut String, text: &str, line_breaks: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' if line_breaks => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
}

/// Renders `text[range]` as display HTML.
///
/// Plain text is escaped and `\n` becomes `<br>`. Each link span that lies
/// fully inside `range` becomes an anchor whose `replacement` is the target;
/// the visible text stays the matched source text. `links` must be sorted.
pub fn render_html(text: &str, range: Range<usize>, links: &[Span<String>]) -> String {
    let mut out = String::with_capacity(range.len() + 16);
    let mut cursor = range.start;

    for link in links.iter().filter(|link| link.within(&range)) {
        if link.start < cursor {
            continue;
        }
        push_escaped(&mut out, &text[cursor..link.start], true);
        out.push_str("<a href=\"");
        push_escaped(&mut out, &link.replacement, false);
        out.push_str("\" target=\"_blank\">");
        push_escaped(&mut out, &text[link.range()], true);
        out.push_str("</a>");
        cursor = link.end;
    }

    push_escaped(&mut out, &text[cursor..range.end], true);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_spans_in_order() {
        let source = "aaa XXX bbb YYY ccc";
        let spans = vec![
            Span::new(4, 7, "x".to_string()),
            Span::new(12, 15, "y".to_string()),
        ];
        assert_eq!(apply_spans(source, &spans), "aaa x bbb y ccc");
    }

    #[test]
    fn test_apply_spans_skips_overlap() {
        let source = "0123456789";
        let spans = vec![
            Span::new(2, 6, "A".to_string()),
            Span::new(4, 8, "B".to_string()),
        ];
        assert_eq!(apply_spans(source, &spans), "01A6789");
    }

    #[test]
    fn test_replacement_not_rescanned() {
        // Replacing with text that contains the pattern twice is harmless.
        let source = "cat";
        let spans = vec![Span::new(0, 3, "cat cat".to_string())];
        assert_eq!(apply_spans(source, &spans), "cat cat");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("a\nb"), "a\nb");
    }

    #[test]
    fn test_render_plain_text() {
        let text = "1 < 2\nnext line";
        assert_eq!(render_html(text, 0..text.len(), &[]), "1 &lt; 2<br>next line");
    }

    #[test]
    fn test_render_link() {
        let text = "see www.example.com now";
        let links = vec![Span::new(4, 19, "//www.example.com".to_string())];
        assert_eq!(
            render_html(text, 0..text.len(), &links),
            r#"see <a href="//www.example.com" target="_blank">www.example.com</a> now"#
        );
    }

    #[test]
    fn test_render_escapes_link_target() {
        let text = "https://x.org/?a=1&b=2";
        let links = vec![Span::new(0, text.len(), text.to_string())];
        let html = render_html(text, 0..text.len(), &links);
        assert!(html.contains(r#"href="https://x.org/?a=1&amp;b=2""#));
        assert!(html.contains(">https://x.org/?a=1&amp;b=2</a>"));
    }

    #[test]
    fn test_render_subrange_drops_outside_links() {
        let text = "Home www.a.com <geo:1,2>";
        let links = vec![Span::new(5, 14, "//www.a.com".to_string())];
        assert_eq!(render_html(text, 0..4, &links), "Home");
        assert!(render_html(text, 0..14, &links).contains("<a href"));
    }
}
