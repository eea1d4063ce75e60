//! Core markup types.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// One of the four inline styles a review can carry.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl StyleKind {
    /// Toolbar order: B, I, U, S.
    pub const ALL: [Self; 4] = [Self::Bold, Self::Italic, Self::Underline, Self::Strikethrough];

    /// The order in which the parser tries to open a token at the cursor.
    pub const PARSE_ORDER: [Self; 4] = [
        Self::Bold,
        Self::Strikethrough,
        Self::Underline,
        Self::Italic,
    ];

    /// Delimiter used on both sides of a formatted run.
    pub const fn delimiter(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "*",
            Self::Underline => "__",
            Self::Strikethrough => "~~",
        }
    }

    /// Lowercase name, as used on the command line and in JSON output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
        }
    }

    /// Single-letter toolbar label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Underline => "U",
            Self::Strikethrough => "S",
        }
    }

    /// Toolbar tooltip showing the syntax.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Bold => "Bold (**text**)",
            Self::Italic => "Italic (*text*)",
            Self::Underline => "Underline (__text__)",
            Self::Strikethrough => "Strikethrough (~~text~~)",
        }
    }
}

/// A set of inline styles.
///
/// Parsed segments carry at most one style; the set form is what the
/// toolbar reports for the caret position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl StyleSet {
    /// The empty set.
    pub const fn plain() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
        }
    }

    /// A set containing exactly `kind`.
    pub const fn only(kind: StyleKind) -> Self {
        let mut set = Self::plain();
        set.insert(kind);
        set
    }

    pub const fn insert(&mut self, kind: StyleKind) {
        match kind {
            StyleKind::Bold => self.bold = true,
            StyleKind::Italic => self.italic = true,
            StyleKind::Underline => self.underline = true,
            StyleKind::Strikethrough => self.strikethrough = true,
        }
    }

    pub const fn contains(&self, kind: StyleKind) -> bool {
        match kind {
            StyleKind::Bold => self.bold,
            StyleKind::Italic => self.italic,
            StyleKind::Underline => self.underline,
            StyleKind::Strikethrough => self.strikethrough,
        }
    }

    /// Returns true if no style is set.
    pub const fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline || self.strikethrough)
    }

    /// Styles in the set, in toolbar order.
    pub fn kinds(self) -> impl Iterator<Item = StyleKind> {
        StyleKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<StyleKind> for StyleSet {
    fn from_iter<T: IntoIterator<Item = StyleKind>>(iter: T) -> Self {
        let mut set = Self::plain();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl Serialize for StyleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for kind in self.kinds() {
            seq.serialize_element(&kind)?;
        }
        seq.end()
    }
}

/// A run of text with the styles active over it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Segment {
    text: String,
    styles: StyleSet,
}

impl Segment {
    pub const fn new(text: String, styles: StyleSet) -> Self {
        Self { text, styles }
    }

    /// An unstyled segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text.into(), StyleSet::plain())
    }

    /// A segment carrying exactly one style.
    pub fn styled(text: impl Into<String>, kind: StyleKind) -> Self {
        Self::new(text.into(), StyleSet::only(kind))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn styles(&self) -> StyleSet {
        self.styles
    }

    pub const fn is_plain(&self) -> bool {
        self.styles.is_plain()
    }

    /// Append the delimited source form of this segment to `out`.
    pub fn write_markup(&self, out: &mut String) {
        let kinds: Vec<StyleKind> = self.styles.kinds().collect();
        for kind in &kinds {
            out.push_str(kind.delimiter());
        }
        out.push_str(&self.text);
        for kind in kinds.iter().rev() {
            out.push_str(kind.delimiter());
        }
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// One source line after parsing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MarkupLine {
    /// Whitespace-only line, displayed as a blank line.
    ///
    /// `raw` holds the original whitespace.
    Break { raw: String },
    /// A line of plain and formatted segments.
    Text { segments: Vec<Segment> },
}

impl MarkupLine {
    /// Segments of the line; empty for a break.
    pub fn segments(&self) -> &[Segment] {
        match self {
            Self::Break { .. } => &[],
            Self::Text { segments } => segments,
        }
    }

    pub const fn is_break(&self) -> bool {
        matches!(self, Self::Break { .. })
    }

    /// Displayed text of the line, without delimiters.
    pub fn plain_text(&self) -> String {
        self.segments().iter().map(Segment::text).collect()
    }

    /// Delimited source form of the line.
    pub fn to_markup(&self) -> String {
        match self {
            Self::Break { raw } => raw.clone(),
            Self::Text { segments } => {
                let mut out = String::new();
                for segment in segments {
                    segment.write_markup(&mut out);
                }
                out
            }
        }
    }
}

/// A parsed review or comment body.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FormattedText {
    lines: Vec<MarkupLine>,
}

impl FormattedText {
    pub const fn from_lines(lines: Vec<MarkupLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[MarkupLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All segments of the document in reading order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.lines.iter().flat_map(MarkupLine::segments)
    }

    /// Displayed text with line breaks, without any delimiters.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(MarkupLine::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Re-serialize to delimited text.
    ///
    /// For a document produced by the parser this is exactly the source.
    pub fn to_markup(&self) -> String {
        self.lines
            .iter()
            .map(MarkupLine::to_markup)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
