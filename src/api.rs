//! # Public API
//!
//! Entry points for callers that hold song markup as text: the whole
//! parse → transpose → format pipeline in one call.
//!
//! - [`render()`] - Render markup in a display mode, transposed
//! - [`render_with_config()`] - Render with a [`RenderConfig`]
//! - [`transpose_markup()`] - Transpose markup and return markup
//! - [`detect_key()`] - Key declared by a song's `{key: ...}` directive
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordsheet::{render, FormatMode};
//!
//! let source = "{title: Amazing Grace}\n{key: G}\n[G]Amazing [C]grace";
//!
//! match render(source, 2, FormatMode::DisplayAbove) {
//!     Ok(text) => assert_eq!(text, "A       D\nAmazing grace"),
//!     // Show "preview unavailable" and keep editing
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use crate::{format, parse, transpose, ChordSheetError, FormatMode, RenderConfig};

/// Keys offered for transposition
pub const KEYS: [&str; 24] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    "Cm", "C#m", "Dm", "D#m", "Em", "Fm", "F#m", "Gm", "G#m", "Am", "A#m", "Bm",
];

/// Parse, transpose and format markup.
///
/// # Errors
/// Returns [`ChordSheetError::ParseError`] if the markup cannot be parsed.
pub fn render(source: &str, semitones: i32, mode: FormatMode) -> Result<String, ChordSheetError> {
    let doc = parse(source)?;
    if semitones == 0 {
        return Ok(format(&doc, mode));
    }
    Ok(format(&transpose(&doc, semitones), mode))
}

/// Parse markup and render it with a configuration.
pub fn render_with_config(source: &str, config: &RenderConfig) -> Result<String, ChordSheetError> {
    let doc = parse(source)?;
    Ok(config.render(&doc))
}

/// Transpose markup, returning markup.
///
/// # Example
/// ```rust
/// use chordsheet::transpose_markup;
///
/// let shifted = transpose_markup("{key: D}\n[D]Oh [A/C#]Lord", -2)?;
/// assert_eq!(shifted, "{key: D}\n[C]Oh [G/B]Lord");
/// # Ok::<(), chordsheet::ChordSheetError>(())
/// ```
pub fn transpose_markup(source: &str, semitones: i32) -> Result<String, ChordSheetError> {
    render(source, semitones, FormatMode::Markup)
}

/// Key declared by the song's `{key: ...}` directive, as written.
pub fn detect_key(source: &str) -> Result<Option<String>, ChordSheetError> {
    let doc = parse(source)?;
    Ok(doc.metadata("key").map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;

    #[test]
    fn test_keys_parse() {
        for key in KEYS {
            let parsed = Key::from_str(key).unwrap();
            assert_eq!(parsed.name(), key);
        }
    }

    #[test]
    fn test_render_error_is_reported() {
        let result = render("{title: Unfinished", 0, FormatMode::DisplayAbove);
        assert!(matches!(result, Err(ChordSheetError::ParseError { line: 1, .. })));
    }

    #[test]
    fn test_detect_key() {
        assert_eq!(detect_key("{Key: Eb}\n[Eb]la").unwrap().as_deref(), Some("Eb"));
        assert_eq!(detect_key("[G]la").unwrap(), None);
    }

    #[test]
    fn test_transpose_markup_keeps_line_structure() {
        let shifted = transpose_markup("{key: G}\n[G]la {c: softly} [C]lo", 2).unwrap();
        assert_eq!(shifted, "{key: G}\n[A]la {c: softly} [D]lo");
    }

    #[test]
    fn test_lower_case_key_sets_spelling() {
        let shifted = transpose_markup("{key: f}\n[F]la [G]lo", 5).unwrap();
        assert_eq!(shifted, "{key: f}\n[Bb]la [C]lo");
    }
}
