use crate::ast::{Line, SongDocument};

/// Render a document back to chord-annotation markup.
///
/// Directives are re-emitted exactly as written, and a directive written in
/// the middle of a lyric line stays on that line. Chords are rendered with
/// the document's spelling, so `format_markup(&parse(text)?)` reproduces
/// canonically spaced `text`.
pub fn format_markup(doc: &SongDocument) -> String {
    doc.source_lines()
        .iter()
        .map(|row| row.iter().map(|line| markup_line(doc, line)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn markup_line(doc: &SongDocument, line: &Line) -> String {
    match line {
        Line::Lyric(segments) => {
            let mut text = String::new();
            for segment in segments {
                if let Some(chord) = &segment.chord {
                    text.push('[');
                    text.push_str(&doc.render_chord(chord));
                    text.push(']');
                }
                text.push_str(&segment.lyrics);
            }
            text
        }
        Line::Directive(directive) => directive.raw.clone(),
        Line::Blank => String::new(),
    }
}
