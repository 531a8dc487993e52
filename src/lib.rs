//! Note mapping for guitar-centred music-theory tools: pitch arithmetic,
//! fretboard lookup, written/sounding transposition and chord naming.
//!
//! Every operation is a pure function of its arguments. The typed API
//! ([`Pitch`], [`Fretboard`], [`Chord`]) reports "no answer" as `None` or an
//! empty list; [`api`] offers the same operations over plain text.

pub mod api;
pub mod chord;
pub mod config;
pub mod error;
pub mod fretboard;
pub mod labels;
pub mod pitch;
pub mod transpose;
pub mod voicing;

pub use chord::{detect_chord, Chord, ChordQuality};
pub use config::{Settings, Theme};
pub use error::*;
pub use fretboard::{FretPosition, Fretboard, Tuning};
pub use labels::{note_label, NotationSystem};
pub use pitch::{Accidental, Letter, Pitch, PitchClass};
pub use transpose::{sounding_to_written, written_to_sounding, Instrument, Transposition};
pub use voicing::{
    chord_voicing, finger_label, is_known_chord, voicing_for_notes, ChordVoicing, VoicingLibrary,
};
