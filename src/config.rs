//! # Render Configuration
//!
//! YAML settings for rendering songs, e.g. a `chordsheet.yaml` next to a
//! songbook:
//!
//! ```yaml
//! mode: above
//! transpose: -2
//! render-blank-lines: false
//! comment-prefix: "> "
//! ```
//!
//! `to-key` may be given instead of `transpose`; the shift is then worked
//! out per song from the song's own key.

use crate::ast::{Key, SongDocument};
use crate::error::ChordSheetError;
use crate::format::{format_with, FormatMode, FormatOptions};
use crate::transpose::{transpose, transpose_interval};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawRenderConfig {
    pub mode: Option<String>,
    pub transpose: Option<i32>,
    pub to_key: Option<String>,
    pub render_blank_lines: Option<bool>,
    pub comment_prefix: Option<String>,
}

/// Validated render configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderConfig {
    pub format: FormatOptions,
    pub transpose: i32,
    pub to_key: Option<String>,
}

impl RenderConfig {
    /// Parse and validate YAML configuration. Empty input gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ChordSheetError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawRenderConfig = serde_yaml::from_str(content)
            .map_err(|e| ChordSheetError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Read configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChordSheetError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChordSheetError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    fn from_raw(raw: RawRenderConfig) -> Result<Self, ChordSheetError> {
        let mut format = FormatOptions::default();

        if let Some(mode) = &raw.mode {
            format.mode = FormatMode::from_str(mode).ok_or_else(|| {
                ChordSheetError::ConfigError(format!("Unknown display mode: {}", mode))
            })?;
        }
        if let Some(render_blank_lines) = raw.render_blank_lines {
            format.render_blank_lines = render_blank_lines;
        }
        if let Some(prefix) = raw.comment_prefix {
            format.comment_prefix = prefix;
        }

        if let Some(key) = &raw.to_key {
            if Key::from_str(key).is_none() {
                return Err(ChordSheetError::ConfigError(format!("Invalid key: {}", key)));
            }
            if raw.transpose.is_some() {
                return Err(ChordSheetError::ConfigError(
                    "transpose and to-key cannot both be set".to_string(),
                ));
            }
        }

        Ok(Self {
            format,
            transpose: raw.transpose.unwrap_or(0),
            to_key: raw.to_key,
        })
    }

    /// Semitones to shift `doc` by. With `to-key` set this is the interval
    /// from the song's key; songs without a detectable key are not shifted.
    pub fn semitones_for(&self, doc: &SongDocument) -> i32 {
        let Some(target) = &self.to_key else {
            return self.transpose;
        };

        match doc.detected_key() {
            Some(key) => transpose_interval(&key.name(), target).unwrap_or(0),
            None => {
                log::warn!("Song has no key; ignoring to-key {}", target);
                0
            }
        }
    }

    /// Transpose and format a document with this configuration
    pub fn render(&self, doc: &SongDocument) -> String {
        let semitones = self.semitones_for(doc);
        if semitones == 0 {
            format_with(doc, &self.format)
        } else {
            format_with(&transpose(doc, semitones), &self.format)
        }
    }
}
