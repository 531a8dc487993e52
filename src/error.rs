//! # Error Types
//!
//! This module defines all error types for the fretwise library.
//!
//! The note-mapping operations themselves never fail loudly: an unknown
//! position, an unrepresentable transposition or an unnamed chord is reported
//! as `None` or an empty list. `FretwiseError` covers the places where the
//! caller hands us text to interpret (pitch names, chord symbols, tunings,
//! settings files) and needs to know what was wrong with it.
//!
//! ## Usage
//! ```rust
//! use fretwise::{FretwiseError, Pitch};
//!
//! match "H4".parse::<Pitch>() {
//!     Ok(pitch) => println!("parsed {}", pitch),
//!     Err(FretwiseError::InvalidPitch(text)) => eprintln!("not a pitch: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FretwiseError {
    /// Text that does not match `<A-G>[#|b]<octave>`.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretwiseError;
    /// let err = FretwiseError::InvalidPitch("H4".to_string());
    /// assert_eq!(err.to_string(), "Invalid pitch: 'H4'");
    /// ```
    #[error("Invalid pitch: '{0}'")]
    InvalidPitch(String),

    /// A tuning that is not exactly six parseable open-string pitches.
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    /// A chord symbol with an unknown root or quality suffix.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretwiseError;
    /// let err = FretwiseError::InvalidChord("Csus13".to_string());
    /// assert_eq!(err.to_string(), "Invalid chord symbol: 'Csus13'");
    /// ```
    #[error("Invalid chord symbol: '{0}'")]
    InvalidChord(String),

    /// An instrument id that is not registered.
    #[error("Unknown instrument: '{0}'")]
    UnknownInstrument(String),

    /// Settings that could not be parsed or hold out-of-range values.
    #[error("Invalid settings: {0}")]
    ConfigError(String),

    /// Malformed chord voicing data.
    #[error("Invalid voicing data: {0}")]
    VoicingData(String),

    /// A file could not be read or written.
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },
}
