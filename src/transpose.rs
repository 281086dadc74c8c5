use crate::ast::{ChordSymbol, Key, Line, Segment, SongDocument};
use crate::chord::parse_chord;

/// Reduce a semitone count to -11..=11, keeping its sign for display ("+3", "-2")
pub fn normalize_semitones(semitones: i32) -> i32 {
    semitones % 12
}

/// Label for a transpose amount: "+3", "-2" or "0"
pub fn transpose_label(semitones: i32) -> String {
    let normalized = normalize_semitones(semitones);
    if normalized > 0 {
        format!("+{}", normalized)
    } else {
        normalized.to_string()
    }
}

/// Shift a chord's root and bass. Suffixes are never touched, and verbatim
/// chords come back unchanged. The written accidentals stay on the shifted
/// chord so that shifting back restores them.
pub fn transpose_chord_symbol(chord: &ChordSymbol, semitones: i32) -> ChordSymbol {
    let Some(root) = chord.root else {
        return chord.clone();
    };

    ChordSymbol {
        root: Some(root.transpose(semitones)),
        suffix: chord.suffix.clone(),
        bass: chord.bass.map(|bass| bass.transpose(semitones)),
        written: chord.written,
    }
}

/// Transpose a single chord written as text, e.g. `"F#m7"` up 1 -> `"Gm7"`.
///
/// Sharps are used for the result unless the chord itself was written with
/// a flat. Text that is not a chord is returned unchanged.
pub fn transpose_chord(chord: &str, semitones: i32) -> String {
    let parsed = parse_chord(chord);
    let spelling = parsed.written.root.unwrap_or_default();
    let unshifted = normalize_semitones(semitones) == 0;
    transpose_chord_symbol(&parsed, semitones).render_with(spelling, unshifted)
}

/// Semitones to shift from one key to another, in -5..=6.
/// Returns `None` if either key cannot be parsed.
pub fn transpose_interval(from_key: &str, to_key: &str) -> Option<i32> {
    let from = Key::from_str(from_key)?;
    let to = Key::from_str(to_key)?;
    let up = (to.tonic.value() as i32 - from.tonic.value() as i32).rem_euclid(12);
    Some(if up > 6 { up - 12 } else { up })
}

fn transpose_segment(segment: &Segment, semitones: i32) -> Segment {
    Segment {
        chord: segment
            .chord
            .as_ref()
            .map(|chord| transpose_chord_symbol(chord, semitones)),
        lyrics: segment.lyrics.clone(),
    }
}

/// Transpose every chord of a document by `semitones`.
///
/// Returns a new document; the input is untouched, so callers can always
/// transpose again from the original parse. Offsets accumulate on the
/// returned document and drive its current key and chord spelling.
///
/// # Example
/// ```rust
/// use chordsheet::{format, parse, transpose, FormatMode};
///
/// let doc = parse("{key: G}\n[G]Amazing [C]grace")?;
/// let up = transpose(&doc, 3);
/// assert_eq!(format(&up, FormatMode::Markup), "{key: G}\n[Bb]Amazing [Eb]grace");
/// assert_eq!(up.current_key().map(|k| k.name()), Some("Bb".to_string()));
/// # Ok::<(), chordsheet::ChordSheetError>(())
/// ```
pub fn transpose(doc: &SongDocument, semitones: i32) -> SongDocument {
    let semitones = normalize_semitones(semitones);
    let transposition = normalize_semitones(doc.transposition() + semitones);

    let lines: Vec<Line> = doc
        .lines()
        .iter()
        .map(|line| match line {
            Line::Lyric(segments) => Line::Lyric(
                segments
                    .iter()
                    .map(|segment| transpose_segment(segment, semitones))
                    .collect(),
            ),
            other => other.clone(),
        })
        .collect();

    log::debug!(
        "Transposed {} lines by {} (offset now {})",
        lines.len(),
        transpose_label(semitones),
        transposition
    );

    doc.with_lines(lines, transposition)
}

/// Key label after shifting `key` by `semitones`, spelled conventionally
pub fn transpose_key_name(key: &str, semitones: i32) -> Option<String> {
    Key::from_str(key).map(|key| key.transpose(semitones).name())
}
