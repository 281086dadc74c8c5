//! Chord symbol parsing and rendering
//!
//! Parses bracket text (`C`, `Am7`, `F#m7b5`, `D/F#`) into a [`ChordSymbol`]
//! and renders it back with a chosen [`Spelling`].

use crate::ast::{ChordSymbol, PitchClass, Spelling, WrittenSpelling};

/// Lower-case words a chord quality may start with (`m7`, `maj7`, `sus4`, ...)
const QUALITY_WORDS: [&str; 7] = ["m", "dim", "aug", "sus", "add", "no", "alt"];

/// Parse chord text into a chord symbol.
///
/// Never fails: text that is not a chord comes back as a verbatim chord
/// (`root == None`) holding the whole text.
///
/// # Structure
/// - **Root**: `A`-`G`, optionally followed by `#` or `b`
/// - **Suffix**: everything up to an optional `/`
/// - **Bass**: a bare note after the `/`. When the text after the slash is
///   not a bare note (`C6/9`), the slash stays part of the suffix.
///
/// # Examples
/// ```
/// use chordsheet::chord::parse_chord;
/// use chordsheet::PitchClass;
///
/// let chord = parse_chord("Bbm7/F");
/// assert_eq!(chord.root, Some(PitchClass::new(10)));
/// assert_eq!(chord.suffix, "m7");
/// assert_eq!(chord.bass, Some(PitchClass::new(5)));
///
/// let text = parse_chord("instrumental break");
/// assert!(text.is_verbatim());
/// assert_eq!(text.suffix, "instrumental break");
/// ```
pub fn parse_chord(text: &str) -> ChordSymbol {
    let Some((root, root_written, len)) = PitchClass::parse_prefix(text) else {
        return ChordSymbol::verbatim(text);
    };
    let rest = &text[len..];

    if !is_chord_quality(rest) {
        log::trace!("Keeping '{}' as verbatim text", text);
        return ChordSymbol::verbatim(text);
    }

    let (suffix, bass) = match rest.split_once('/') {
        Some((quality, bass_text)) => match PitchClass::parse_note(bass_text) {
            Some(bass) => (quality, Some(bass)),
            None => (rest, None),
        },
        None => (rest, None),
    };

    ChordSymbol {
        root: Some(root),
        suffix: suffix.to_string(),
        bass: bass.map(|(pitch, _)| pitch),
        written: WrittenSpelling {
            root: root_written,
            bass: bass.and_then(|(_, written)| written),
        },
    }
}

/// Whether the text after a root reads like a chord quality rather than a
/// word (`[Bridge]`, `[Chorus]`, `[A capella]`).
fn is_chord_quality(rest: &str) -> bool {
    if rest.chars().any(char::is_whitespace) {
        return false;
    }
    let word: String = rest.chars().take_while(char::is_ascii_lowercase).collect();
    word.is_empty() || QUALITY_WORDS.iter().any(|quality| word.starts_with(quality))
}

/// Render a chord symbol.
///
/// Notes that carry the accidental they were written with keep it; the
/// others are spelled with `spelling`. Verbatim chords render as their text.
pub fn render_chord(chord: &ChordSymbol, spelling: Spelling) -> String {
    render_chord_with(chord, spelling, true)
}

/// Render a chord symbol, spelling every note with `spelling` unless
/// `keep_written` is set and the note has a written accidental.
pub fn render_chord_with(chord: &ChordSymbol, spelling: Spelling, keep_written: bool) -> String {
    let Some(root) = chord.root else {
        return chord.suffix.clone();
    };
    let spell = |written: Option<Spelling>| match written {
        Some(written) if keep_written => written,
        _ => spelling,
    };

    let mut text = String::from(root.name(spell(chord.written.root)));
    text.push_str(&chord.suffix);
    if let Some(bass) = chord.bass {
        text.push('/');
        text.push_str(bass.name(spell(chord.written.bass)));
    }
    text
}

impl ChordSymbol {
    /// See [`parse_chord`]
    pub fn parse(text: &str) -> Self {
        parse_chord(text)
    }

    /// See [`render_chord`]
    pub fn render(&self, spelling: Spelling) -> String {
        render_chord(self, spelling)
    }

    /// See [`render_chord_with`]
    pub fn render_with(&self, spelling: Spelling, keep_written: bool) -> String {
        render_chord_with(self, spelling, keep_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_parsing() {
        let g = parse_chord("G");
        assert_eq!(g.root, Some(PitchClass::new(7)));
        assert_eq!(g.suffix, "");
        assert_eq!(g.bass, None);

        let am7 = parse_chord("Am7");
        assert_eq!(am7.root, Some(PitchClass::new(9)));
        assert_eq!(am7.suffix, "m7");

        let dsus4 = parse_chord("Dsus4");
        assert_eq!(dsus4.suffix, "sus4");

        let slash = parse_chord("D/F#");
        assert_eq!(slash.root, Some(PitchClass::new(2)));
        assert_eq!(slash.bass, Some(PitchClass::new(6)));

        let half_dim = parse_chord("F#m7b5");
        assert_eq!(half_dim.root, Some(PitchClass::new(6)));
        assert_eq!(half_dim.suffix, "m7b5");
    }

    #[test]
    fn test_slash_that_is_not_a_bass_note() {
        let chord = parse_chord("C6/9");
        assert_eq!(chord.root, Some(PitchClass::C));
        assert_eq!(chord.suffix, "6/9");
        assert_eq!(chord.bass, None);
        assert_eq!(render_chord(&chord, Spelling::Sharp), "C6/9");
    }

    #[test]
    fn test_words_stay_verbatim() {
        for text in ["instrumental break", "Bridge", "Chorus", "A capella", "x2", "", "N.C."] {
            let chord = parse_chord(text);
            assert!(chord.is_verbatim(), "'{}' should be verbatim", text);
            assert_eq!(chord.suffix, text);
            assert_eq!(render_chord(&chord, Spelling::Flat), text);
        }
    }

    #[test]
    fn test_render_keeps_written_accidentals() {
        assert_eq!(render_chord(&parse_chord("Db"), Spelling::Sharp), "Db");
        assert_eq!(render_chord(&parse_chord("C#m"), Spelling::Flat), "C#m");
        assert_eq!(render_chord(&parse_chord("Ab/Eb"), Spelling::Sharp), "Ab/Eb");
    }

    #[test]
    fn test_render_ignoring_written_accidentals() {
        let chord = parse_chord("Db/Ab");
        assert_eq!(render_chord_with(&chord, Spelling::Sharp, false), "C#/G#");
        assert_eq!(render_chord_with(&chord, Spelling::Sharp, true), "Db/Ab");
        assert_eq!(render_chord_with(&parse_chord("Bridge"), Spelling::Flat, false), "Bridge");
    }

    #[test]
    fn test_render_spelling() {
        let chord = ChordSymbol::new(PitchClass::new(10), "7", Some(PitchClass::new(3)));
        assert_eq!(render_chord(&chord, Spelling::Sharp), "A#7/D#");
        assert_eq!(render_chord(&chord, Spelling::Flat), "Bb7/Eb");
    }
}
