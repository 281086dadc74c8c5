//! # Song Document Types
//!
//! This module defines the structured form of a chord-annotated song.
//!
//! ## Type Hierarchy
//! ```text
//! SongDocument
//!   ├── metadata: BTreeMap<key, value> (first value wins)
//!   ├── transposition: i32 (accumulated offset, -11..=11)
//!   └── Vec<Line>
//!         ├── Lyric(Vec<Segment>)
//!         │     └── Segment
//!         │           ├── chord: Option<ChordSymbol>
//!         │           │     ├── root: Option<PitchClass> (None = verbatim text)
//!         │           │     ├── suffix: String ("m7", "sus4", ...)
//!         │           │     └── bass: Option<PitchClass>
//!         │           └── lyrics: String
//!         ├── Directive { key, value, raw }
//!         └── Blank
//! ```
//!
//! ## Key Concepts
//!
//! ### Pitch classes
//! Pitches are stored as one of 12 classes (0 = C). The letter name used to
//! display a class is not stored; it is chosen at render time from a
//! [`Spelling`], which the document derives from its key.
//!
//! ### Spelling
//! Keys on the flat side of the circle of fifths (F, Bb, Eb, Ab, Db, Gb and
//! Dm, Gm, Cm, Fm, Bbm, Ebm) spell chords with flats. Everything else, and
//! any document without a key, uses sharps. Chords keep the accidental they
//! were written with whenever the document's transposition offset is zero,
//! including after shifting away and back again.
//!
//! ## Related Modules
//! - `chord` - Parses and renders chord text
//! - `parser` - Builds a `SongDocument` from markup
//! - `transpose` - Produces shifted copies of a `SongDocument`
//! - `format` - Renders a `SongDocument` to text

use serde::Serialize;
use std::collections::BTreeMap;

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Letter-name preference for the five black-key pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharp,
    Flat,
}

/// One of the 12 pitch classes, 0 = C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const B: PitchClass = PitchClass(11);

    /// Build a pitch class from any integer (taken modulo 12)
    pub fn new(value: i32) -> Self {
        Self(value.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones % 12)
    }

    /// Letter name of this pitch class, e.g. `C#` or `Db`
    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharp => SHARP_NAMES[self.0 as usize],
            Spelling::Flat => FLAT_NAMES[self.0 as usize],
        }
    }

    /// Parse the longest note name at the start of `s`.
    ///
    /// Returns the pitch class, the accidental it was written with (if any)
    /// and the number of bytes consumed.
    pub fn parse_prefix(s: &str) -> Option<(PitchClass, Option<Spelling>, usize)> {
        let mut chars = s.chars();
        let base: i32 = match chars.next()? {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        match chars.next() {
            Some(c @ ('#' | '♯')) => Some((Self::new(base + 1), Some(Spelling::Sharp), 1 + c.len_utf8())),
            Some(c @ ('b' | '♭')) => Some((Self::new(base - 1), Some(Spelling::Flat), 1 + c.len_utf8())),
            _ => Some((Self::new(base), None, 1)),
        }
    }

    /// Parse a string that is exactly one note name ("G", "F#", "Bb")
    pub fn parse_note(s: &str) -> Option<(PitchClass, Option<Spelling>)> {
        let (pitch, written, len) = Self::parse_prefix(s)?;
        if len == s.len() {
            Some((pitch, written))
        } else {
            None
        }
    }
}

/// Mode of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// Musical key, used to pick chord spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Key {
    pub tonic: PitchClass,
    pub mode: Mode,
    pub spelling: Spelling,
}

impl Key {
    /// Build a key, spelling it the conventional way for its tonic
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        Self {
            tonic,
            mode,
            spelling: conventional_spelling(tonic, mode),
        }
    }

    /// Parse a key string like "G", "Bb", "F#m", "Ebmin" or "A minor".
    /// A tonic written with an accidental keeps that accidental's spelling.
    /// The tonic letter may be lower case (`g`, `bb`).
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let first = chars.next()?;
        let trimmed: String = first.to_uppercase().chain(chars).collect();
        let (tonic, written, len) = PitchClass::parse_prefix(&trimmed)?;
        let rest = trimmed[len..].trim();

        let mode = match rest {
            "" | "M" => Mode::Major,
            "m" | "-" => Mode::Minor,
            _ => match rest.to_lowercase().as_str() {
                "maj" | "major" | "dur" => Mode::Major,
                "min" | "minor" | "moll" => Mode::Minor,
                _ => return None,
            },
        };

        Some(Self {
            tonic,
            mode,
            spelling: written.unwrap_or_else(|| conventional_spelling(tonic, mode)),
        })
    }

    /// Position on the circle of fifths: positive = sharps, negative = flats
    pub fn fifths(&self) -> i8 {
        let sharps = sharps_count(self.tonic, self.mode);
        match self.spelling {
            Spelling::Flat if sharps > 0 => sharps as i8 - 12,
            _ => sharps as i8,
        }
    }

    pub fn prefers_flats(&self) -> bool {
        self.spelling == Spelling::Flat
    }

    /// Shift the tonic. A zero shift keeps the written spelling; any other
    /// shift spells the new tonic conventionally.
    pub fn transpose(&self, semitones: i32) -> Self {
        if semitones.rem_euclid(12) == 0 {
            return *self;
        }
        Self::new(self.tonic.transpose(semitones), self.mode)
    }

    /// Display name such as "Bb" or "F#m"
    pub fn name(&self) -> String {
        let tonic = self.tonic.name(self.spelling);
        match self.mode {
            Mode::Major => tonic.to_string(),
            Mode::Minor => format!("{}m", tonic),
        }
    }
}

/// Number of sharps in the sharp-side signature of this key (0..=11)
fn sharps_count(tonic: PitchClass, mode: Mode) -> u8 {
    // Minor keys share the signature of their relative major
    let major = match mode {
        Mode::Major => tonic,
        Mode::Minor => tonic.transpose(3),
    };
    (major.value() as u16 * 7 % 12) as u8
}

fn conventional_spelling(tonic: PitchClass, mode: Mode) -> Spelling {
    let sharps = sharps_count(tonic, mode);
    if sharps < 6 {
        Spelling::Sharp
    } else if sharps > 6 {
        Spelling::Flat
    } else {
        // F# major vs Eb minor
        match mode {
            Mode::Major => Spelling::Sharp,
            Mode::Minor => Spelling::Flat,
        }
    }
}

/// Accidentals a chord was written with. They travel with the chord through
/// every shift but only apply while the document's offset is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct WrittenSpelling {
    pub root: Option<Spelling>,
    pub bass: Option<Spelling>,
}

/// A chord symbol such as `Am7`, `C/G` or verbatim bracket text
///
/// A chord with `root == None` is text that did not parse as a chord; its
/// whole text lives in `suffix` and it is never transposed.
#[derive(Debug, Clone, Serialize)]
pub struct ChordSymbol {
    pub root: Option<PitchClass>,
    pub suffix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bass: Option<PitchClass>,
    #[serde(skip)]
    pub(crate) written: WrittenSpelling,
}

impl PartialEq for ChordSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.suffix == other.suffix && self.bass == other.bass
    }
}

impl Eq for ChordSymbol {}

impl ChordSymbol {
    pub fn new(root: PitchClass, suffix: impl Into<String>, bass: Option<PitchClass>) -> Self {
        Self {
            root: Some(root),
            suffix: suffix.into(),
            bass,
            written: WrittenSpelling::default(),
        }
    }

    /// Bracket text kept as-is
    pub fn verbatim(text: impl Into<String>) -> Self {
        Self {
            root: None,
            suffix: text.into(),
            bass: None,
            written: WrittenSpelling::default(),
        }
    }

    pub fn is_verbatim(&self) -> bool {
        self.root.is_none()
    }

    /// Minor quality: suffix starts with `m` but not `maj`
    pub fn is_minor(&self) -> bool {
        self.suffix.starts_with('m') && !self.suffix.starts_with("maj")
    }
}

/// One chord/lyric pairing within a lyric line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<ChordSymbol>,
    pub lyrics: String,
}

impl Segment {
    pub fn new(chord: Option<ChordSymbol>, lyrics: impl Into<String>) -> Self {
        Self {
            chord,
            lyrics: lyrics.into(),
        }
    }
}

/// A `{key: value}` directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// Lower-cased key with short aliases expanded (`t` -> `title`, `c` -> `comment`)
    pub key: String,
    pub value: String,
    /// Source text of the directive, re-emitted unchanged by the markup formatter
    pub raw: String,
}

impl Directive {
    pub fn is_comment(&self) -> bool {
        matches!(
            self.key.as_str(),
            "comment" | "comment_italic" | "comment_box"
        )
    }
}

/// A line of a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Line {
    Lyric(Vec<Segment>),
    Directive(Directive),
    Blank,
}

impl Line {
    /// Concatenated lyric text of a lyric line
    pub fn lyric_text(&self) -> Option<String> {
        match self {
            Line::Lyric(segments) => Some(segments.iter().map(|s| s.lyrics.as_str()).collect()),
            _ => None,
        }
    }
}

/// A parsed song. Transposition produces a new document, never mutates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongDocument {
    lines: Vec<Line>,
    metadata: BTreeMap<String, String>,
    transposition: i32,
    /// Source line each line came from; an inline directive shares its row
    /// with the lyrics around it
    #[serde(skip)]
    rows: Vec<usize>,
}

impl SongDocument {
    /// Build a document from lines, collecting directive metadata.
    /// Every line is taken to be its own source line.
    pub fn new(lines: Vec<Line>) -> Self {
        let rows = (0..lines.len()).collect();
        Self::with_rows(lines, rows)
    }

    pub(crate) fn with_rows(lines: Vec<Line>, rows: Vec<usize>) -> Self {
        let mut metadata = BTreeMap::new();
        for line in &lines {
            if let Line::Directive(directive) = line {
                if !directive.is_comment() {
                    metadata
                        .entry(directive.key.clone())
                        .or_insert_with(|| directive.value.clone());
                }
            }
        }
        Self {
            lines,
            metadata,
            transposition: 0,
            rows,
        }
    }

    pub(crate) fn with_lines(&self, lines: Vec<Line>, transposition: i32) -> Self {
        Self {
            lines,
            metadata: self.metadata.clone(),
            transposition,
            rows: self.rows.clone(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Semitone offset from the parsed original, in -11..=11
    pub fn transposition(&self) -> i32 {
        self.transposition
    }

    pub fn metadata_entries(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Case-insensitive metadata lookup
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata("title")
    }

    /// Key declared by a `{key: ...}` directive, as originally written
    pub fn key(&self) -> Option<Key> {
        self.metadata("key").and_then(Key::from_str)
    }

    /// Key of the original parse: the declared key, or one inferred from
    /// the first chord with a root
    pub fn detected_key(&self) -> Option<Key> {
        self.key().or_else(|| {
            let chord = self.chords().find(|c| !c.is_verbatim())?;
            let root = chord.root?;
            let mode = if chord.is_minor() { Mode::Minor } else { Mode::Major };
            let key = match chord.written.root {
                Some(spelling) => Key { tonic: root, mode, spelling },
                None => Key::new(root, mode),
            };
            Some(key.transpose(-self.transposition))
        })
    }

    /// Key the document sounds in after transposition
    pub fn current_key(&self) -> Option<Key> {
        self.detected_key().map(|key| key.transpose(self.transposition))
    }

    /// Spelling used for chords without a written accidental: the declared
    /// key's preference, shifted with the document, or sharps.
    pub fn spelling(&self) -> Spelling {
        self.key()
            .map(|key| key.transpose(self.transposition).spelling)
            .unwrap_or_default()
    }

    /// Render a chord of this document: written accidentals while the offset
    /// is zero, the document's spelling otherwise
    pub fn render_chord(&self, chord: &ChordSymbol) -> String {
        chord.render_with(self.spelling(), self.transposition == 0)
    }

    /// Every chord in source order
    pub fn chords(&self) -> impl Iterator<Item = &ChordSymbol> {
        self.lines.iter().flat_map(|line| match line {
            Line::Lyric(segments) => segments.iter().filter_map(|s| s.chord.as_ref()).collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    }

    /// Plain lyric text of every lyric line
    pub fn lyrics(&self) -> Vec<String> {
        self.lines.iter().filter_map(Line::lyric_text).collect()
    }

    /// Lines grouped by the source line they were parsed from
    pub fn source_lines(&self) -> Vec<&[Line]> {
        let mut groups = Vec::new();
        let mut start = 0;
        for end in 1..=self.lines.len() {
            if end == self.lines.len() || self.rows[end] != self.rows[start] {
                groups.push(&self.lines[start..end]);
                start = end;
            }
        }
        groups
    }

    /// Runs of lines separated by blank lines (verses, choruses)
    pub fn sections(&self) -> Vec<&[Line]> {
        self.lines
            .split(|line| matches!(line, Line::Blank))
            .filter(|section| !section.is_empty())
            .collect()
    }
}
