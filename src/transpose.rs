use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::FretwiseError;
use crate::pitch::Pitch;

/// Relationship between what an instrument sounds and how it is notated.
///
/// Guitar music is written one octave above where it sounds, and the lowest
/// sounding octave the guitar reaches is 2 (open low E is E2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transposition {
    /// Octaves added when going from sounding to written pitch.
    pub octave_shift: i32,
    /// Sounding pitches below this octave are outside the instrument's range.
    pub lowest_sounding_octave: i32,
}

impl Transposition {
    pub const GUITAR: Transposition = Transposition {
        octave_shift: 1,
        lowest_sounding_octave: 2,
    };

    /// Written exactly as sounding, from octave 0 up.
    pub const CONCERT: Transposition = Transposition {
        octave_shift: 0,
        lowest_sounding_octave: 0,
    };

    /// Sounding pitch to staff pitch. No upper bound is enforced.
    pub fn sounding_to_written(&self, sounding: &Pitch) -> Pitch {
        sounding.shift_octaves(self.octave_shift)
    }

    /// Staff pitch to sounding pitch, or `None` when the result would fall
    /// below the instrument's lowest octave.
    pub fn written_to_sounding(&self, written: &Pitch) -> Option<Pitch> {
        let sounding = written.shift_octaves(-self.octave_shift);
        if sounding.octave < self.lowest_sounding_octave {
            debug!(
                "{} written sounds as {}, below octave {}",
                written, sounding, self.lowest_sounding_octave
            );
            return None;
        }
        Some(sounding)
    }
}

/// Instruments the practice tools can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    #[default]
    Guitar,
    Piano,
    Flute,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Guitar, Instrument::Piano, Instrument::Flute];

    pub fn transposition(self) -> Transposition {
        match self {
            Instrument::Guitar => Transposition::GUITAR,
            Instrument::Piano | Instrument::Flute => Transposition::CONCERT,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Instrument::Guitar => "guitar",
            Instrument::Piano => "piano",
            Instrument::Flute => "flute",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Instrument {
    type Err = FretwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|instrument| instrument.id() == s.trim())
            .ok_or_else(|| FretwiseError::UnknownInstrument(s.to_string()))
    }
}

/// Guitar sounding pitch to written pitch (one octave up).
pub fn sounding_to_written(sounding: &Pitch) -> Pitch {
    Transposition::GUITAR.sounding_to_written(sounding)
}

/// Guitar written pitch to sounding pitch (one octave down), `None` below E2's octave.
pub fn written_to_sounding(written: &Pitch) -> Option<Pitch> {
    Transposition::GUITAR.written_to_sounding(written)
}
