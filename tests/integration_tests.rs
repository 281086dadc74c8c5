//! Integration tests for chordsheet
//!
//! Tests the full parse → transpose → format pipeline on whole songs.

use chordsheet::{
    detect_key, format, parse, render, render_with_config, transpose, transpose_markup,
    ChordSheetError, FormatMode, Line, RenderConfig,
};

const HYMN: &str = r#"{title: Jezus zwyciężył}
{key: D}
{c: Zwrotka 1}
[D]Jezus zwy[A]ciężył, [Bm]śmierć pokonał [G]Pan
[D]alleluja, [A/C#]alle[Bm]luja

{c: Refren}
[G]Chwała [A]Tobie, [D]Panie
[instrumental]
"#;

#[test]
fn test_hymn_round_trip() {
    let doc = parse(HYMN).unwrap();
    assert_eq!(format(&doc, FormatMode::Markup), HYMN);
    assert_eq!(doc.title(), Some("Jezus zwyciężył"));
    assert_eq!(doc.sections().len(), 2);
}

#[test]
fn test_hymn_transposed_down_to_c() {
    let shifted = transpose_markup(HYMN, -2).unwrap();
    assert!(shifted.contains("[C]Jezus zwy[G]ciężył, [Am]śmierć pokonał [F]Pan"));
    assert!(shifted.contains("[C]alleluja, [G/B]alle[Am]luja"));
    assert!(shifted.contains("[instrumental]"));
    assert!(shifted.contains("{key: D}"));
}

#[test]
fn test_hymn_transposed_to_flat_key() {
    let doc = parse(HYMN).unwrap();
    let shifted = transpose(&doc, 1);
    assert_eq!(shifted.current_key().map(|k| k.name()).as_deref(), Some("Eb"));

    let text = format(&shifted, FormatMode::Markup);
    assert!(text.contains("[Eb]Jezus zwy[Bb]ciężył, [Cm]śmierć pokonał [Ab]Pan"));
    assert!(text.contains("[Bb/D]alle"));
}

#[test]
fn test_hymn_display_above() {
    let text = render(HYMN, 0, FormatMode::DisplayAbove).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Zwrotka 1");
    assert_eq!(lines[1], "D        A       Bm             G");
    assert_eq!(lines[2], "Jezus zwyciężył, śmierć pokonał Pan");
    assert!(text.contains("\n\n# Refren\n"));
    // Chord-only line keeps its verbatim text
    assert!(text.ends_with("instrumental\n"));
}

#[test]
fn test_hymn_display_hidden() {
    let text = render(HYMN, 5, FormatMode::DisplayHidden).unwrap();
    assert_eq!(
        text,
        "# Zwrotka 1\nJezus zwyciężył, śmierć pokonał Pan\nalleluja, alleluja\n\n# Refren\nChwała Tobie, Panie\n"
    );
}

#[test]
fn test_reset_transposes_from_original() {
    let doc = parse(HYMN).unwrap();
    let up = transpose(&doc, 3);
    let reset = transpose(&doc, 0);
    assert_eq!(format(&reset, FormatMode::Markup), HYMN);
    assert_ne!(format(&up, FormatMode::Markup), HYMN);
}

#[test]
fn test_parse_error_surfaces() {
    let err = render("[G]la\n{c: unfinished", 0, FormatMode::DisplayAbove).unwrap_err();
    assert!(matches!(err, ChordSheetError::ParseError { line: 2, column: 1, .. }));
    assert!(err.to_string().starts_with("Parse error at line 2, column 1"));
}

#[test]
fn test_render_with_config() {
    let config = RenderConfig::from_yaml("mode: inline\nto-key: E\nrender-blank-lines: false").unwrap();
    let text = render_with_config(HYMN, &config).unwrap();
    assert!(text.contains("Jezus zwy (E)ciężył, (B) śmierć pokonał (C#m) Pan (A)"), "{}", text);
    assert!(!text.contains("\n\n"));
}

#[test]
fn test_detect_key() {
    assert_eq!(detect_key(HYMN).unwrap().as_deref(), Some("D"));
}

#[test]
fn test_json_export() {
    let doc = parse("{key: G}\n[Am7]la\n\n[instrumental]").unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["metadata"]["key"], "G");
    assert_eq!(json["lines"][0]["type"], "directive");
    assert_eq!(json["lines"][1]["data"][0]["chord"]["root"], 9);
    assert_eq!(json["lines"][1]["data"][0]["chord"]["suffix"], "m7");
    assert_eq!(json["lines"][2]["type"], "blank");
    assert!(json["lines"][3]["data"][0]["chord"]["root"].is_null());
}

#[test]
fn test_lines_are_tagged_variants() {
    let doc = parse("{title: T}\n\n[G]la").unwrap();
    let kinds: Vec<&str> = doc
        .lines()
        .iter()
        .map(|line| match line {
            Line::Lyric(_) => "lyric",
            Line::Directive(_) => "directive",
            Line::Blank => "blank",
        })
        .collect();
    assert_eq!(kinds, vec!["directive", "blank", "lyric"]);
}
