//! # Text API
//!
//! String-in, string-out entry points for callers that pass pitches around
//! as text (UI labels, JavaScript bindings, the command line).
//!
//! None of these functions fail. Invalid input yields an empty string, an
//! empty list or `None`, and callers decide whether to render anything.
//!
//! | Function | Invalid input |
//! |---|---|
//! | [`note_at_position()`] | `""` |
//! | [`positions_for_pitch()`] | `[]` |
//! | [`transpose_guitar_to_written()`] | `None` |
//! | [`transpose_written_to_guitar()`] | `None` (also below the guitar's range) |
//! | [`detect_chord()`] | `None` (also for unnamed clusters) |
//!
//! ## Example
//! ```rust
//! use fretwise::api;
//!
//! assert_eq!(api::note_at_position(0, 12), "E5");
//! assert_eq!(api::transpose_written_to_guitar("E5").as_deref(), Some("E4"));
//! assert_eq!(api::detect_chord(&["C4", "E4", "G4", "Bb4"]).as_deref(), Some("C7"));
//! ```

use crate::chord::{detect_chord_from_classes, MIN_CHORD_TONES};
use crate::fretboard::{FretPosition, Fretboard};
use crate::pitch::{parse_pitch, Pitch, PitchClass};
use crate::transpose::{sounding_to_written, written_to_sounding};

/// Pitch at `(string_index, fret)` in standard tuning, or `""` when either
/// coordinate is out of range.
pub fn note_at_position(string_index: i64, fret: i64) -> String {
    let (Ok(string_index), Ok(fret)) = (usize::try_from(string_index), u32::try_from(fret)) else {
        return String::new();
    };
    Fretboard::standard()
        .note_at_position(string_index, fret)
        .map(|pitch| pitch.to_string())
        .unwrap_or_default()
}

/// Positions (frets 0-15, standard tuning) sounding exactly `target`.
pub fn positions_for_pitch(target: &str) -> Vec<FretPosition> {
    match parse_pitch(target) {
        Some(pitch) => Fretboard::standard().positions_for_pitch(&pitch),
        None => Vec::new(),
    }
}

/// Guitar sounding pitch to written pitch.
pub fn transpose_guitar_to_written(note: &str) -> Option<String> {
    let sounding = parse_pitch(note)?;
    Some(sounding_to_written(&sounding).to_string())
}

/// Guitar written pitch to sounding pitch.
pub fn transpose_written_to_guitar(note: &str) -> Option<String> {
    let written = parse_pitch(note)?;
    written_to_sounding(&written).map(|pitch| pitch.to_string())
}

/// Chord name for `notes`.
///
/// Notes may carry octaves (`C4`) or not (`C`); octaves are ignored either
/// way. Any unparseable note makes the whole set unnameable.
pub fn detect_chord<S: AsRef<str>>(notes: &[S]) -> Option<String> {
    if notes.len() < MIN_CHORD_TONES {
        return None;
    }

    let mut classes: Vec<PitchClass> = Vec::with_capacity(notes.len());
    for note in notes {
        let class = note_class(note.as_ref())?;
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    detect_chord_from_classes(&classes).map(|chord| chord.to_string())
}

fn note_class(note: &str) -> Option<PitchClass> {
    match note.parse::<Pitch>() {
        Ok(pitch) => Some(pitch.pitch_class()),
        Err(_) => note.parse::<PitchClass>().ok(),
    }
}
