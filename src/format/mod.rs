//! # Format Module
//!
//! Render a [`SongDocument`] as text.
//!
//! ## Modes
//! - [`FormatMode::Markup`] - back to the `{key: value}` / `[Chord]lyrics` dialect
//! - [`FormatMode::DisplayAbove`] - chords on their own line, aligned above the lyrics
//! - [`FormatMode::DisplayInline`] - each chord right after the lyric it annotates
//! - [`FormatMode::DisplayHidden`] - lyrics only
//!
//! ## Display Rules
//! - A blank line renders as one empty output line (unless
//!   [`FormatOptions::render_blank_lines`] is off)
//! - Comment directives (`{c: Chorus}`) render as a single line with a
//!   comment prefix (`# Chorus`)
//! - Other directives (title, key, ...) are not rendered
//!
//! Every mode spells chords with the document's [`Spelling`](crate::Spelling),
//! so a transposed document and its original stay consistent.
//!
//! ## Example
//! ```rust
//! use chordsheet::{format, parse, FormatMode};
//!
//! let doc = parse("{c: Verse 1}\n[G]Amazing [C]grace")?;
//!
//! assert_eq!(format(&doc, FormatMode::DisplayAbove), "# Verse 1\nG       C\nAmazing grace");
//! assert_eq!(format(&doc, FormatMode::DisplayInline), "# Verse 1\nAmazing (G) grace (C)");
//! assert_eq!(format(&doc, FormatMode::DisplayHidden), "# Verse 1\nAmazing grace");
//! # Ok::<(), chordsheet::ChordSheetError>(())
//! ```

mod display;
mod markup;


use crate::ast::SongDocument;

pub use display::format_display;
pub use markup::format_markup;

/// Output mode of the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatMode {
    /// Chord-annotation markup
    Markup,
    /// Chords on a line above the lyrics
    #[default]
    DisplayAbove,
    /// Chords after the lyric segment they annotate
    DisplayInline,
    /// No chords
    DisplayHidden,
}

impl FormatMode {
    /// Parse a mode name (case-insensitive): `markup`, `above`, `inline`
    /// (or `right`), `hidden`, with or without a `display-` prefix.
    pub fn from_str(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase();
        let name = lowered.strip_prefix("display-").unwrap_or(&lowered);
        match name {
            "markup" | "chordpro" => Some(FormatMode::Markup),
            "above" => Some(FormatMode::DisplayAbove),
            "inline" | "right" => Some(FormatMode::DisplayInline),
            "hidden" => Some(FormatMode::DisplayHidden),
            _ => None,
        }
    }
}

/// Formatter settings
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    pub mode: FormatMode,
    /// Emit an empty line for each blank line (display modes only)
    pub render_blank_lines: bool,
    /// Prefix of rendered comment lines (display modes only)
    pub comment_prefix: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            mode: FormatMode::default(),
            render_blank_lines: true,
            comment_prefix: "# ".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn new(mode: FormatMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// Render a document in the given mode with default options.
///
/// Never fails; an empty document renders as an empty string.
pub fn format(doc: &SongDocument, mode: FormatMode) -> String {
    format_with(doc, &FormatOptions::new(mode))
}

/// Render a document with explicit options
pub fn format_with(doc: &SongDocument, options: &FormatOptions) -> String {
    match options.mode {
        FormatMode::Markup => format_markup(doc),
        FormatMode::DisplayAbove | FormatMode::DisplayInline | FormatMode::DisplayHidden => {
            format_display(doc, options)
        }
    }
}
