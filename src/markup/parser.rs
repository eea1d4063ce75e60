//! Inline markup scanning.
//!
//! Lines are scanned left to right. At each position the scanner tries to
//! open a token in priority order (bold, strikethrough, underline, italic);
//! a successful match becomes one styled segment, anything else is consumed
//! as plain text one character at a time. The scan never fails.

use std::ops::Range;

use super::types::{FormattedText, MarkupLine, Segment, StyleKind};

/// Parse a review body into lines of styled segments.
///
/// # Example
///
/// ```
/// use halfnote::markup::{FormattedText, StyleKind};
///
/// let doc = FormattedText::parse("plain **bold**");
/// let segments = doc.lines()[0].segments();
/// assert_eq!(segments[1].text(), "bold");
/// assert!(segments[1].styles().contains(StyleKind::Bold));
/// ```
impl FormattedText {
    pub fn parse(source: &str) -> Self {
        parse(source)
    }
}

/// Parse `source` eagerly.
pub fn parse(source: &str) -> FormattedText {
    FormattedText::from_lines(parse_lines(source).collect())
}

/// Parse `source` lazily, one line per item.
///
/// Empty input yields no lines.
pub fn parse_lines(source: &str) -> MarkupLines<'_> {
    MarkupLines {
        inner: (!source.is_empty()).then(|| source.split('\n')),
    }
}

/// Lazy iterator returned by [`parse_lines`].
#[derive(Debug, Clone)]
pub struct MarkupLines<'a> {
    inner: Option<std::str::Split<'a, char>>,
}

impl Iterator for MarkupLines<'_> {
    type Item = MarkupLine;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next().map(parse_line)
    }
}

/// Parse a single line (without its trailing newline).
pub fn parse_line(line: &str) -> MarkupLine {
    if line.trim().is_empty() {
        return MarkupLine::Break {
            raw: line.to_string(),
        };
    }
    MarkupLine::Text {
        segments: LineScanner::new(line).scan(),
    }
}

/// A token matched at the cursor.
struct Token {
    kind: StyleKind,
    content: Range<usize>,
    end: usize,
}

struct LineScanner<'a> {
    line: &'a str,
    bytes: &'a [u8],
    /// Start of the last `**`, `~~`, `__` pair on the line.
    last_pair: [Option<usize>; 3],
}

impl<'a> LineScanner<'a> {
    fn new(line: &'a str) -> Self {
        let bytes = line.as_bytes();
        let last_pair = [b'*', b'~', b'_'].map(|delim| {
            bytes
                .windows(2)
                .rposition(|w| w[0] == delim && w[1] == delim)
        });
        Self {
            line,
            bytes,
            last_pair,
        }
    }

    fn scan(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        let mut plain_start = 0;
        let mut cursor = 0;

        while cursor < self.bytes.len() {
            if let Some(token) = self.match_at(cursor) {
                push_plain(&mut segments, &self.line[plain_start..cursor]);
                segments.push(Segment::styled(&self.line[token.content], token.kind));
                cursor = token.end;
                plain_start = cursor;
                continue;
            }
            cursor += self.line[cursor..].chars().next().map_or(1, char::len_utf8);
        }
        push_plain(&mut segments, &self.line[plain_start..]);
        segments
    }

    fn match_at(&self, at: usize) -> Option<Token> {
        StyleKind::PARSE_ORDER.into_iter().find_map(|kind| match kind {
            StyleKind::Italic => self.match_italic(at),
            StyleKind::Bold => self.match_pair(at, kind, b'*', 0),
            StyleKind::Strikethrough => self.match_pair(at, kind, b'~', 1),
            StyleKind::Underline => self.match_pair(at, kind, b'_', 2),
        })
    }

    /// Double-character delimiter, closed by the first later pair.
    ///
    /// An opening run of three (`***x***`) carries its extra delimiter into
    /// the content, so the close shifts by one to balance it. Content before
    /// the first pair can start with at most one delimiter character.
    fn match_pair(&self, at: usize, kind: StyleKind, delim: u8, slot: usize) -> Option<Token> {
        if !self.is_pair(at, delim) {
            return None;
        }
        let content_start = at + 2;
        if self.last_pair[slot].is_none_or(|last| last < content_start) {
            return None;
        }
        let mut close = content_start
            + self.bytes[content_start..]
                .windows(2)
                .position(|w| w[0] == delim && w[1] == delim)?;
        if close > content_start
            && self.bytes[content_start] == delim
            && self.bytes.get(close + 2) == Some(&delim)
        {
            close += 1;
        }
        Some(Token {
            kind,
            content: content_start..close,
            end: close + 2,
        })
    }

    /// Single `*` that is not part of a `**` run, closed by the next `*`
    /// under the same rule. Content cannot be empty or contain `*`.
    fn match_italic(&self, at: usize) -> Option<Token> {
        if self.bytes[at] != b'*' || self.star_before(at) {
            return None;
        }
        let content_start = at + 1;
        if self.bytes.get(content_start).is_none_or(|&b| b == b'*') {
            return None;
        }
        let close = content_start
            + self.bytes[content_start..]
                .iter()
                .position(|&b| b == b'*')?;
        if self.bytes.get(close + 1) == Some(&b'*') {
            return None;
        }
        Some(Token {
            kind: StyleKind::Italic,
            content: content_start..close,
            end: close + 1,
        })
    }

    fn is_pair(&self, at: usize, delim: u8) -> bool {
        self.bytes.get(at) == Some(&delim) && self.bytes.get(at + 1) == Some(&delim)
    }

    fn star_before(&self, at: usize) -> bool {
        at > 0 && self.bytes[at - 1] == b'*'
    }
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(last) if last.is_plain() => last.push_text(text),
        _ => segments.push(Segment::plain(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::StyleSet;

    fn line_segments(source: &str) -> Vec<(String, StyleSet)> {
        let doc = parse(source);
        assert_eq!(doc.line_count(), 1, "expected a single line for {source:?}");
        doc.lines()[0]
            .segments()
            .iter()
            .map(|s| (s.text().to_string(), s.styles()))
            .collect()
    }

    fn plain(text: &str) -> (String, StyleSet) {
        (text.to_string(), StyleSet::plain())
    }

    fn styled(text: &str, kind: StyleKind) -> (String, StyleSet) {
        (text.to_string(), StyleSet::only(kind))
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.to_markup(), "");
    }

    #[test]
    fn test_parse_plain_line() {
        assert_eq!(line_segments("just words"), vec![plain("just words")]);
    }

    #[test]
    fn test_parse_bold() {
        assert_eq!(line_segments("**bold**"), vec![styled("bold", StyleKind::Bold)]);
    }

    #[test]
    fn test_parse_each_style() {
        assert_eq!(line_segments("*it*"), vec![styled("it", StyleKind::Italic)]);
        assert_eq!(
            line_segments("__under__"),
            vec![styled("under", StyleKind::Underline)]
        );
        assert_eq!(
            line_segments("~~gone~~"),
            vec![styled("gone", StyleKind::Strikethrough)]
        );
    }

    #[test]
    fn test_parse_multi_style_line() {
        assert_eq!(
            line_segments("plain **bold** and *italic*"),
            vec![
                plain("plain "),
                styled("bold", StyleKind::Bold),
                plain(" and "),
                styled("italic", StyleKind::Italic),
            ]
        );
    }

    #[test]
    fn test_triple_star_resolves_to_bold() {
        assert_eq!(line_segments("***x***"), vec![styled("*x*", StyleKind::Bold)]);
    }

    #[test]
    fn test_dangling_bold_is_plain() {
        assert_eq!(line_segments("**open"), vec![plain("**open")]);
    }

    #[test]
    fn test_dangling_opener_does_not_swallow_later_tokens() {
        assert_eq!(
            line_segments("~~open and *fine*"),
            vec![plain("~~open and "), styled("fine", StyleKind::Italic)]
        );
    }

    #[test]
    fn test_lone_star_is_plain() {
        assert_eq!(line_segments("5 * 3 = 15"), vec![plain("5 * 3 = 15")]);
    }

    #[test]
    fn test_shortest_close_wins() {
        assert_eq!(
            line_segments("**a** b **c**"),
            vec![
                styled("a", StyleKind::Bold),
                plain(" b "),
                styled("c", StyleKind::Bold),
            ]
        );
    }

    #[test]
    fn test_adjacent_pairs_stay_separate() {
        for kind in [StyleKind::Bold, StyleKind::Strikethrough, StyleKind::Underline] {
            let d = kind.delimiter();
            let source = format!("{d}a{d}{d}b{d}");
            assert_eq!(
                line_segments(&source),
                vec![styled("a", kind), styled("b", kind)],
                "{source}"
            );
        }
    }

    #[test]
    fn test_close_does_not_absorb_trailing_delimiter() {
        assert_eq!(
            line_segments("**a***"),
            vec![styled("a", StyleKind::Bold), plain("*")]
        );
    }

    #[test]
    fn test_empty_marker_after_span_is_its_own_segment() {
        assert_eq!(
            line_segments("**a******"),
            vec![styled("a", StyleKind::Bold), styled("", StyleKind::Bold)]
        );
    }

    #[test]
    fn test_empty_bold_marker_is_recognized() {
        assert_eq!(line_segments("hi ****"), vec![plain("hi "), styled("", StyleKind::Bold)]);
    }

    #[test]
    fn test_empty_italic_marker_is_plain() {
        assert_eq!(line_segments("hello**"), vec![plain("hello**")]);
    }

    #[test]
    fn test_italic_closed_by_double_star_fails() {
        assert_eq!(line_segments("*a** b"), vec![plain("*a** b")]);
    }

    #[test]
    fn test_italic_not_opened_after_star() {
        assert_eq!(line_segments("x**y*"), vec![plain("x**y*")]);
    }

    #[test]
    fn test_inner_markup_is_not_reparsed() {
        assert_eq!(
            line_segments("**a *b* c**"),
            vec![styled("a *b* c", StyleKind::Bold)]
        );
    }

    #[test]
    fn test_bold_wins_over_strikethrough_inside() {
        assert_eq!(
            line_segments("~~a **b** c~~"),
            vec![styled("a **b** c", StyleKind::Strikethrough)]
        );
    }

    #[test]
    fn test_single_underscore_is_plain() {
        assert_eq!(line_segments("snake_case_name"), vec![plain("snake_case_name")]);
    }

    #[test]
    fn test_unicode_content() {
        assert_eq!(
            line_segments("ça **déjà vu** 🎵"),
            vec![
                plain("ça "),
                styled("déjà vu", StyleKind::Bold),
                plain(" 🎵"),
            ]
        );
    }

    #[test]
    fn test_lines_split_on_newline() {
        let doc = parse("**one**\ntwo");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.lines()[0].segments()[0].text(), "one");
        assert_eq!(doc.lines()[1].segments()[0].text(), "two");
    }

    #[test]
    fn test_blank_lines_become_breaks() {
        let doc = parse("a\n\n  \nb");
        assert_eq!(doc.line_count(), 4);
        assert!(doc.lines()[1].is_break());
        assert!(doc.lines()[2].is_break());
        assert_eq!(doc.to_markup(), "a\n\n  \nb");
    }

    #[test]
    fn test_tokens_do_not_span_lines() {
        let doc = parse("**a\nb**");
        assert_eq!(doc.plain_text(), "**a\nb**");
        assert!(doc.segments().all(Segment::is_plain));
    }

    #[test]
    fn test_only_delimiters() {
        for source in ["*", "**", "***", "~", "~~~", "_", "___", "*~_"] {
            let doc = parse(source);
            assert_eq!(doc.to_markup(), source);
        }
    }

    #[test]
    fn test_parse_lines_is_lazy_and_restartable() {
        let source = "a\n*b*\nc";
        let first: Vec<_> = parse_lines(source).collect();
        let second: Vec<_> = parse_lines(source).collect();
        assert_eq!(first, second);
        assert_eq!(parse_lines(source).nth(1).unwrap().plain_text(), "b");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "***x*** ~~a~~ __b__ *c* **d";
        assert_eq!(parse(source), parse(source));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn markup_roundtrip_reproduces_source(source in "[a*~_ \n\u{e9}]{0,40}") {
                let doc = parse(&source);
                prop_assert_eq!(doc.to_markup(), source);
            }

            #[test]
            fn reparse_is_stable(source in "[ab*~_ \n]{0,40}") {
                let doc = parse(&source);
                prop_assert_eq!(parse(&doc.to_markup()), doc);
            }

            #[test]
            fn marker_after_span_parses_as_second_span(
                word in "[a-z]{1,6}",
                typed in "[a-z]{0,6}",
                kind in prop::sample::select(vec![
                    StyleKind::Bold,
                    StyleKind::Strikethrough,
                    StyleKind::Underline,
                ]),
            ) {
                let d = kind.delimiter();
                let text = format!("{d}{word}{d}");
                let edit = crate::markup::toggle_markup(&text, text.len(), text.len(), kind);
                let mut typed_text = edit.text.clone();
                typed_text.insert_str(edit.caret, &typed);
                prop_assert_eq!(
                    line_segments(&typed_text),
                    vec![styled(&word, kind), styled(&typed, kind)]
                );
            }

            #[test]
            fn formatted_segments_carry_one_style(source in "[ab*~_ ]{0,40}") {
                for segment in parse(&source).segments() {
                    prop_assert!(segment.styles().kinds().count() <= 1);
                }
            }
        }
    }
}
