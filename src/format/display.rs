use super::{FormatMode, FormatOptions};
use crate::ast::{Line, Segment, SongDocument};

/// Render a document for display (chords above, inline or hidden).
///
/// Called with [`FormatMode::Markup`] this falls back to lyrics only; use
/// [`format_markup`](super::format_markup) for markup.
pub fn format_display(doc: &SongDocument, options: &FormatOptions) -> String {
    let mut output: Vec<String> = Vec::new();

    for line in doc.lines() {
        match line {
            Line::Lyric(segments) => match options.mode {
                FormatMode::DisplayAbove => output.extend(chords_above(doc, segments)),
                FormatMode::DisplayInline => output.push(chords_inline(doc, segments)),
                FormatMode::DisplayHidden | FormatMode::Markup => {
                    output.extend(lyrics_only(segments));
                }
            },
            Line::Directive(directive) if directive.is_comment() => {
                output.push(format!("{}{}", options.comment_prefix, directive.value));
            }
            Line::Directive(_) => {}
            Line::Blank => {
                if options.render_blank_lines {
                    output.push(String::new());
                }
            }
        }
    }

    output.join("\n")
}

fn chord_text(doc: &SongDocument, segment: &Segment) -> String {
    segment
        .chord
        .as_ref()
        .map(|chord| doc.render_chord(chord))
        .unwrap_or_default()
}

fn pad(text: &mut String, width: usize) {
    let len = text.chars().count();
    if len < width {
        text.extend(std::iter::repeat(' ').take(width - len));
    }
}

/// Chord line above the lyric line. Each chord starts over the first
/// character of its segment; lyrics are widened when a chord is longer.
fn chords_above(doc: &SongDocument, segments: &[Segment]) -> Vec<String> {
    if segments.iter().all(|s| s.chord.is_none()) {
        return lyrics_only(segments);
    }

    let mut chord_line = String::new();
    let mut lyric_line = String::new();

    for (index, segment) in segments.iter().enumerate() {
        let chord = chord_text(doc, segment);
        let is_last = index + 1 == segments.len();
        let lyric_width = segment.lyrics.chars().count();
        let width = if chord.is_empty() || is_last {
            lyric_width
        } else {
            lyric_width.max(chord.chars().count() + 1)
        };

        // Both lines have the same length at the start of every segment
        let end = lyric_line.chars().count() + width;

        chord_line.push_str(&chord);
        pad(&mut chord_line, end);

        lyric_line.push_str(&segment.lyrics);
        pad(&mut lyric_line, end);
    }

    let chord_line = chord_line.trim_end().to_string();
    let lyric_line = lyric_line.trim_end().to_string();

    if lyric_line.trim().is_empty() {
        vec![chord_line]
    } else {
        vec![chord_line, lyric_line]
    }
}

/// Lyrics with each chord in parentheses right after its segment
fn chords_inline(doc: &SongDocument, segments: &[Segment]) -> String {
    let mut line = String::new();

    for segment in segments {
        let chord = chord_text(doc, segment);
        if chord.is_empty() {
            line.push_str(&segment.lyrics);
            continue;
        }

        let words = segment.lyrics.trim_end();
        let trailing = &segment.lyrics[words.len()..];
        line.push_str(words);
        if !words.is_empty() {
            line.push(' ');
        }
        line.push('(');
        line.push_str(&chord);
        line.push(')');
        line.push_str(if trailing.is_empty() && words.is_empty() { " " } else { trailing });
    }

    line.trim_end().to_string()
}

/// Lyric text only; lines holding nothing but chords disappear
fn lyrics_only(segments: &[Segment]) -> Vec<String> {
    let lyrics: String = segments.iter().map(|s| s.lyrics.as_str()).collect();
    if lyrics.trim().is_empty() {
        Vec::new()
    } else {
        vec![lyrics.trim_end().to_string()]
    }
}
