//! # Markup Parser
//!
//! Converts chord-annotation markup into a [`SongDocument`].
//!
//! ## Grammar (line oriented)
//! ```text
//! {title: Amazing Grace}          directive: {key: value}
//! [G]Amazing [C]grace how [G]sweet  lyric line with chord markers
//!                                  blank line (whitespace only)
//! ```
//!
//! Malformed input degrades gracefully wherever possible:
//! - an unclosed `[` is kept as lyric text
//! - bracket text that is not a chord is kept verbatim
//! - unknown directives are kept as metadata
//!
//! The only error is a `{` that is never closed on its line.

use crate::ast::{Directive, Line, Segment, SongDocument};
use crate::chord::parse_chord;
use crate::error::ChordSheetError;

/// Parse markup text into a song document.
///
/// # Example
/// ```rust
/// use chordsheet::{parse, Line};
///
/// let doc = parse("{title: Amazing Grace}\n[G]Amazing [C]grace")?;
/// assert_eq!(doc.title(), Some("Amazing Grace"));
/// assert_eq!(doc.lines().len(), 2);
/// assert!(matches!(doc.lines()[1], Line::Lyric(ref segments) if segments.len() == 2));
/// # Ok::<(), chordsheet::ChordSheetError>(())
/// ```
///
/// # Errors
/// Returns [`ChordSheetError::ParseError`] for an unterminated `{` directive.
pub fn parse(source: &str) -> Result<SongDocument, ChordSheetError> {
    let doc = Parser::new(source).parse_document()?;
    log::debug!("Parsed {} lines", doc.lines().len());
    Ok(doc)
}

/// Parser for chord-annotation markup
pub struct Parser<'a> {
    source: &'a str,
    lines: Vec<Line>,
    /// Source line number of each entry in `lines`
    rows: Vec<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Parse every source line. Empty input has no lines at all.
    pub fn parse_document(mut self) -> Result<SongDocument, ChordSheetError> {
        let source = self.source;
        if !source.is_empty() {
            for (index, text) in source.split('\n').enumerate() {
                let text = text.strip_suffix('\r').unwrap_or(text);
                self.parse_line(text, index + 1)?;
            }
        }

        Ok(SongDocument::with_rows(self.lines, self.rows))
    }

    fn push(&mut self, line: Line, line_number: usize) {
        self.lines.push(line);
        self.rows.push(line_number);
    }

    /// Parse one source line. An inline directive splits it into several
    /// lines that share its line number.
    fn parse_line(&mut self, text: &str, line_number: usize) -> Result<(), ChordSheetError> {
        if text.trim().is_empty() {
            self.push(Line::Blank, line_number);
            return Ok(());
        }

        let mut rest = text;
        let mut offset = 0;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                return Err(ChordSheetError::ParseError {
                    line: line_number,
                    column: text[..offset + open].chars().count() + 1,
                    message: format!("Unterminated directive '{}'", &rest[open..]),
                });
            };

            self.push_lyrics(&rest[..open], line_number);
            self.push(Line::Directive(parse_directive(&rest[open..=close])), line_number);

            offset += close + 1;
            rest = &rest[close + 1..];
        }

        self.push_lyrics(rest, line_number);
        Ok(())
    }

    fn push_lyrics(&mut self, text: &str, line_number: usize) {
        if !text.trim().is_empty() {
            self.push(Line::Lyric(parse_segments(text)), line_number);
        }
    }
}

/// Parse a `{key: value}` block (braces included)
fn parse_directive(raw: &str) -> Directive {
    let inner = &raw[1..raw.len() - 1];
    let (key, value) = inner.split_once(':').unwrap_or((inner, ""));
    let key = key.trim().to_lowercase();

    let key = match key.as_str() {
        "t" => "title".to_string(),
        "st" => "subtitle".to_string(),
        "c" => "comment".to_string(),
        "ci" => "comment_italic".to_string(),
        "cb" => "comment_box".to_string(),
        _ => key,
    };

    Directive {
        key,
        value: value.trim().to_string(),
        raw: raw.to_string(),
    }
}

/// Split a lyric line into segments. Each `[chord]` marker starts a new
/// segment that owns the lyric text up to the next marker.
fn parse_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chord = None;
    let mut lyrics = String::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            // Unclosed bracket: the rest of the line is lyrics
            break;
        };

        lyrics.push_str(&rest[..open]);
        if chord.is_some() || !lyrics.is_empty() {
            segments.push(Segment::new(chord.take(), std::mem::take(&mut lyrics)));
        }

        chord = Some(parse_chord(&rest[open + 1..close]));
        rest = &rest[close + 1..];
    }

    lyrics.push_str(rest);
    if chord.is_some() || !lyrics.is_empty() {
        segments.push(Segment::new(chord, lyrics));
    }

    segments
}
