//! # Pitch Model
//!
//! Semitone arithmetic over named pitches in scientific pitch notation.
//!
//! ## Textual Form
//! `<Letter><Accidental?><Octave>`: a letter `A`-`G`, an optional `#` or `b`,
//! then an integer octave (`C#4`, `Eb3`, `A-1`). Octave 4 holds middle C.
//!
//! ## Semitones
//! Letters map onto the chromatic scale with C = 0:
//!
//! ```text
//! C=0  D=2  E=4  F=5  G=7  A=9  B=11
//! ```
//!
//! An accidental moves that index by one, so `Cb` sits at -1 and `B#` at 12.
//! The absolute semitone of a pitch is `octave * 12 + semitone`, which is the
//! value every comparison and transposition works from.
//!
//! ## Spelling
//! Pitches built from semitone arithmetic are always spelled with sharps
//! (`C#`, never `Db`). Parsed pitches keep the spelling they were written
//! with; use [`Pitch::to_sharp_spelling`] to fold them.
//!
//! ## Example
//! ```rust
//! use fretwise::Pitch;
//!
//! let pitch: Pitch = "Eb3".parse()?;
//! assert_eq!(pitch.to_string(), "Eb3");
//! assert_eq!(pitch.to_sharp_spelling().to_string(), "D#3");
//! assert_eq!(pitch.midi_number(), Some(51));
//! # Ok::<(), fretwise::FretwiseError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FretwiseError;

/// Sharp spellings of the twelve pitch classes, indexed from C.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Largest octave magnitude accepted when parsing. Keeps semitone
/// arithmetic, octave shifts and fret offsets well inside `i32`.
pub const MAX_OCTAVE: i32 = 1_000_000;

const SHARP_SPELLINGS: [(Letter, Accidental); 12] = [
    (Letter::C, Accidental::Natural),
    (Letter::C, Accidental::Sharp),
    (Letter::D, Accidental::Natural),
    (Letter::D, Accidental::Sharp),
    (Letter::E, Accidental::Natural),
    (Letter::F, Accidental::Natural),
    (Letter::F, Accidental::Sharp),
    (Letter::G, Accidental::Natural),
    (Letter::G, Accidental::Sharp),
    (Letter::A, Accidental::Natural),
    (Letter::A, Accidental::Sharp),
    (Letter::B, Accidental::Natural),
];

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Chromatic index of the natural note (C = 0).
    pub fn semitone(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// Accidentals: none, sharp (`#`) or flat (`b`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }
}

/// A pitch class (0-11, C = 0) with enharmonic spellings folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class from any semitone count, wrapping into 0-11.
    pub fn new(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Interval in semitones (0-11) from `root` up to `self`.
    pub fn interval_from(self, root: PitchClass) -> u8 {
        (self.0 + 12 - root.0) % 12
    }

    /// The sharp spelling of this class (`C#`, never `Db`).
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PitchClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = FretwiseError;

    /// Parse an octave-less note name such as `C`, `F#` or `Bb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (letter, accidental, rest) = split_note_name(s)
            .ok_or_else(|| FretwiseError::InvalidPitch(s.to_string()))?;
        if !rest.is_empty() {
            return Err(FretwiseError::InvalidPitch(s.to_string()));
        }
        Ok(PitchClass::new(letter.semitone() + accidental.offset()))
    }
}

/// A named pitch with octave, e.g. `C#4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: i32,
}

impl Pitch {
    pub fn new(letter: Letter, accidental: Accidental, octave: i32) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Chromatic index of letter plus accidental, before octave wrapping.
    ///
    /// Ranges from -1 (`Cb`) to 12 (`B#`).
    pub fn semitone(&self) -> i32 {
        self.letter.semitone() + self.accidental.offset()
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::new(self.semitone())
    }

    /// Semitones above C0.
    pub fn absolute_semitone(&self) -> i32 {
        self.octave * 12 + self.semitone()
    }

    /// Spell an absolute semitone count (semitones above C0) with sharps.
    pub fn from_absolute_semitone(semitone: i32) -> Self {
        let (letter, accidental) = SHARP_SPELLINGS[semitone.rem_euclid(12) as usize];
        Self::new(letter, accidental, semitone.div_euclid(12))
    }

    /// The same sounding pitch spelled with sharps only.
    ///
    /// Folding may cross an octave boundary: `Cb4` becomes `B3` and `B#3`
    /// becomes `C4`.
    pub fn to_sharp_spelling(&self) -> Self {
        Self::from_absolute_semitone(self.absolute_semitone())
    }

    /// Shift by whole octaves, keeping the spelling.
    pub fn shift_octaves(&self, octaves: i32) -> Self {
        Self {
            octave: self.octave + octaves,
            ..*self
        }
    }

    /// Shift by semitones; the result is spelled with sharps.
    pub fn transpose(&self, semitones: i32) -> Self {
        Self::from_absolute_semitone(self.absolute_semitone() + semitones)
    }

    /// [`Pitch::transpose`], or `None` if the result leaves the `i32` range.
    pub fn checked_transpose(&self, semitones: i32) -> Option<Self> {
        self.absolute_semitone()
            .checked_add(semitones)
            .map(Self::from_absolute_semitone)
    }

    /// MIDI note number (C4 = 60), or `None` outside 0-127.
    pub fn midi_number(&self) -> Option<u8> {
        u8::try_from(self.absolute_semitone() + 12)
            .ok()
            .filter(|n| *n <= 127)
    }

    /// Equal-tempered frequency in Hz with A4 = 440.
    pub fn frequency(&self) -> f64 {
        let from_a4 = self.absolute_semitone() - 57;
        440.0 * 2f64.powf(from_a4 as f64 / 12.0)
    }

    /// Same pitch class and octave, ignoring spelling (`Db4` vs `C#4`).
    pub fn is_enharmonic(&self, other: &Pitch) -> bool {
        self.absolute_semitone() == other.absolute_semitone()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.letter.as_char(),
            self.accidental.symbol(),
            self.octave
        )
    }
}

impl FromStr for Pitch {
    type Err = FretwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FretwiseError::InvalidPitch(s.to_string());
        let (letter, accidental, rest) = split_note_name(s).ok_or_else(invalid)?;

        let digits = rest.strip_prefix('-').unwrap_or(rest);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let octave: i32 = rest.parse().map_err(|_| invalid())?;
        if !(-MAX_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(invalid());
        }

        Ok(Pitch::new(letter, accidental, octave))
    }
}

impl Serialize for Pitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pitch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Split `<Letter><Accidental?>` off the front of `s`, returning the remainder.
fn split_note_name(s: &str) -> Option<(Letter, Accidental, &str)> {
    let mut chars = s.chars();
    let letter = Letter::from_char(chars.next()?)?;
    let rest = &s[1..];
    match rest.chars().next().and_then(Accidental::from_char) {
        Some(accidental) => Some((letter, accidental, &rest[1..])),
        None => Some((letter, Accidental::Natural, rest)),
    }
}

/// Parse a pitch, treating anything unparseable as absent.
pub fn parse_pitch(s: &str) -> Option<Pitch> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for text in ["C4", "C#4", "Eb3", "B0", "A-1", "G10"] {
            let pitch: Pitch = text.parse().unwrap();
            assert_eq!(pitch.to_string(), text);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "H4", "c4", "C", "C#", "C##4", "Cx4", "C4.5", "4C", "C-", " C4", "C4 "] {
            assert!(text.parse::<Pitch>().is_err(), "{:?} should not parse", text);
        }
    }

    #[test]
    fn test_semitones() {
        let c4: Pitch = "C4".parse().unwrap();
        assert_eq!(c4.absolute_semitone(), 48);
        assert_eq!(c4.midi_number(), Some(60));

        let cb4: Pitch = "Cb4".parse().unwrap();
        assert_eq!(cb4.semitone(), -1);
        assert_eq!(cb4.pitch_class().value(), 11);
        assert_eq!(cb4.to_sharp_spelling().to_string(), "B3");

        let bs3: Pitch = "B#3".parse().unwrap();
        assert_eq!(bs3.to_sharp_spelling().to_string(), "C4");
    }

    #[test]
    fn test_from_absolute_semitone_spells_sharps() {
        assert_eq!(Pitch::from_absolute_semitone(49).to_string(), "C#4");
        assert_eq!(Pitch::from_absolute_semitone(58).to_string(), "A#4");
        assert_eq!(Pitch::from_absolute_semitone(-1).to_string(), "B-1");
    }

    #[test]
    fn test_transpose() {
        let e2: Pitch = "E2".parse().unwrap();
        assert_eq!(e2.transpose(1).to_string(), "F2");
        assert_eq!(e2.transpose(8).to_string(), "C3");
        assert_eq!(e2.shift_octaves(1).to_string(), "E3");
    }

    #[test]
    fn test_frequency() {
        let a4: Pitch = "A4".parse().unwrap();
        assert!((a4.frequency() - 440.0).abs() < 1e-9);
        let a3: Pitch = "A3".parse().unwrap();
        assert!((a3.frequency() - 220.0).abs() < 1e-9);
        let e2: Pitch = "E2".parse().unwrap();
        assert!((e2.frequency() - 82.4069).abs() < 1e-3);
    }

    #[test]
    fn test_midi_range() {
        assert_eq!("C-1".parse::<Pitch>().unwrap().midi_number(), Some(0));
        assert_eq!("G9".parse::<Pitch>().unwrap().midi_number(), Some(127));
        assert_eq!("G#9".parse::<Pitch>().unwrap().midi_number(), None);
        assert_eq!("B-2".parse::<Pitch>().unwrap().midi_number(), None);
    }

    #[test]
    fn test_octave_out_of_range() {
        assert!("C999999999".parse::<Pitch>().is_err());
        assert!("C2147483647".parse::<Pitch>().is_err());
        assert!("C-2147483648".parse::<Pitch>().is_err());
        let highest: Pitch = format!("B{}", MAX_OCTAVE).parse().unwrap();
        assert_eq!(highest.midi_number(), None);
        assert_eq!(highest.shift_octaves(1).octave, MAX_OCTAVE + 1);
        assert_eq!(highest.checked_transpose(i32::MAX), None);
    }

    #[test]
    fn test_pitch_class() {
        assert_eq!("Db".parse::<PitchClass>().unwrap().name(), "C#");
        assert_eq!("E#".parse::<PitchClass>().unwrap().name(), "F");
        assert!("Db4".parse::<PitchClass>().is_err());
        assert_eq!(PitchClass::new(4).interval_from(PitchClass::new(9)), 7);
    }

    #[test]
    fn test_enharmonic() {
        let db4: Pitch = "Db4".parse().unwrap();
        let cs4: Pitch = "C#4".parse().unwrap();
        assert!(db4.is_enharmonic(&cs4));
        assert_ne!(db4, cs4);
    }
}
