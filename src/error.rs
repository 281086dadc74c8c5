//! # Error Types
//!
//! This module defines the error types for the chord sheet library.
//!
//! Only two things can go wrong: the markup has a structural problem the
//! parser cannot recover from, or a render configuration is invalid.
//! Unrecognized chord text, unknown directives and empty input are all
//! defined behavior and never produce an error.
//!
//! ## Error Types
//! - `ParseError` - Unterminated directive blocks, with line and column information
//! - `ConfigError` - Invalid YAML render configuration
//!
//! ## Usage
//! ```rust
//! use chordsheet::{parse, ChordSheetError};
//!
//! match parse("{title: Amazing Grace") {
//!     Ok(doc) => println!("{} lines", doc.lines().len()),
//!     Err(ChordSheetError::ParseError { line, column, message }) => {
//!         eprintln!("Preview unavailable ({}:{}): {}", line, column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordSheetError {
    /// Parse error with location information.
    ///
    /// Occurs when a `{` directive block is never closed on its line.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::ParseError {
    ///     line: 2,
    ///     column: 1,
    ///     message: "Unterminated directive '{key: G'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 2, column 1: Unterminated directive '{key: G'");
    /// ```
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Invalid render configuration.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::ConfigError("Unknown display mode: sideways".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: Unknown display mode: sideways");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
