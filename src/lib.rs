//! # chordsheet
//!
//! Parse chord-annotated song markup, transpose it and render it as text.
//!
//! ```text
//! markup text ──parse──▶ SongDocument ──transpose──▶ SongDocument ──format──▶ text
//! ```
//!
//! ```rust
//! use chordsheet::{format, parse, transpose, FormatMode};
//!
//! let doc = parse("{title: Amazing Grace}\n{key: G}\n[G]Amazing [C]grace how [G]sweet")?;
//! let up = transpose(&doc, 2);
//!
//! assert_eq!(
//!     format(&up, FormatMode::Markup),
//!     "{title: Amazing Grace}\n{key: G}\n[A]Amazing [D]grace how [A]sweet"
//! );
//! # Ok::<(), chordsheet::ChordSheetError>(())
//! ```

pub mod api;
pub mod ast;
pub mod chord;
pub mod config;
pub mod error;
pub mod format;
pub mod parser;
pub mod transpose;

pub use api::{detect_key, render, render_with_config, transpose_markup, KEYS};
pub use ast::*;
pub use config::RenderConfig;
pub use error::*;
pub use format::{format, format_with, FormatMode, FormatOptions};
pub use parser::parse;
pub use transpose::{
    normalize_semitones, transpose, transpose_chord, transpose_interval, transpose_key_name,
    transpose_label,
};
