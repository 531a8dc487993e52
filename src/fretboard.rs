//! # Fretboard Mapping
//!
//! Converts between guitar fretboard coordinates and pitches.
//!
//! ## Coordinates
//! A [`FretPosition`] is a `(string, fret)` pair. String 0 is the highest
//! sounding string (high E in standard tuning) and string 5 the lowest; fret 0
//! is the open string. Each position sounds exactly one pitch, while the same
//! pitch can usually be found on several strings.
//!
//! ## Forward Mapping
//! The pitch at a position is the open string's absolute semitone plus the
//! fret number, respelled with sharps:
//!
//! ```text
//! string 5 (E2) fret 3  ->  E2 + 3 semitones  ->  G2
//! string 0 (E4) fret 12 ->  E4 + 12 semitones ->  E5
//! ```
//!
//! ## Inverse Mapping
//! [`Fretboard::positions_for_pitch`] scans every string and fret up to
//! `max_fret` (15 by default) and returns the positions whose pitch matches,
//! ordered string-major then fret-minor.
//!
//! ## Example
//! ```rust
//! use fretwise::{Fretboard, FretPosition, Pitch};
//!
//! let board = Fretboard::standard();
//! assert_eq!(board.note_at_position(5, 3).map(|p| p.to_string()), Some("G2".to_string()));
//!
//! let e4: Pitch = "E4".parse()?;
//! assert!(board.positions_for_pitch(&e4).contains(&FretPosition::new(1, 5)));
//! # Ok::<(), fretwise::FretwiseError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FretwiseError;
use crate::pitch::{Pitch, PitchClass};

/// Number of strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Highest fret scanned by the inverse lookup unless configured otherwise.
pub const DEFAULT_MAX_FRET: u32 = 15;

/// Standard tuning, highest string first.
pub const STANDARD_TUNING: [&str; STRING_COUNT] = ["E4", "B3", "G3", "D3", "A2", "E2"];

/// A `(string, fret)` coordinate on the fretboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FretPosition {
    pub string_index: usize,
    pub fret: u32,
}

impl FretPosition {
    pub fn new(string_index: usize, fret: u32) -> Self {
        Self { string_index, fret }
    }
}

impl fmt::Display for FretPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.string_index, self.fret)
    }
}

/// Open-string pitches, index 0 = highest string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pitch>", into = "Vec<Pitch>")]
pub struct Tuning {
    strings: [Pitch; STRING_COUNT],
}

impl Tuning {
    pub fn standard() -> Self {
        use crate::pitch::{Accidental::Natural, Letter};
        Self::new([
            Pitch::new(Letter::E, Natural, 4),
            Pitch::new(Letter::B, Natural, 3),
            Pitch::new(Letter::G, Natural, 3),
            Pitch::new(Letter::D, Natural, 3),
            Pitch::new(Letter::A, Natural, 2),
            Pitch::new(Letter::E, Natural, 2),
        ])
    }

    pub fn new(strings: [Pitch; STRING_COUNT]) -> Self {
        Self { strings }
    }

    /// Parse a tuning from pitch names, highest string first.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, FretwiseError> {
        let pitches = names
            .iter()
            .map(|name| name.as_ref().parse::<Pitch>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FretwiseError::InvalidTuning(e.to_string()))?;
        Self::try_from(pitches)
    }

    pub fn open_string(&self, string_index: usize) -> Option<Pitch> {
        self.strings.get(string_index).copied()
    }

    pub fn strings(&self) -> &[Pitch; STRING_COUNT] {
        &self.strings
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Pitch>> for Tuning {
    type Error = FretwiseError;

    fn try_from(pitches: Vec<Pitch>) -> Result<Self, Self::Error> {
        let count = pitches.len();
        let strings: [Pitch; STRING_COUNT] = pitches.try_into().map_err(|_| {
            FretwiseError::InvalidTuning(format!(
                "expected {} strings, got {}",
                STRING_COUNT, count
            ))
        })?;
        Ok(Self { strings })
    }
}

impl From<Tuning> for Vec<Pitch> {
    fn from(tuning: Tuning) -> Self {
        tuning.strings.to_vec()
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.strings.iter().map(|p| p.to_string()).collect();
        f.write_str(&names.join(" "))
    }
}

/// A tuned fretboard with a fixed scan range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    tuning: Tuning,
    max_fret: u32,
}

impl Fretboard {
    pub fn new(tuning: Tuning, max_fret: u32) -> Self {
        Self { tuning, max_fret }
    }

    /// Standard tuning, frets 0-15.
    pub fn standard() -> Self {
        Self::new(Tuning::standard(), DEFAULT_MAX_FRET)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn max_fret(&self) -> u32 {
        self.max_fret
    }

    /// The pitch sounded at `(string_index, fret)`, spelled with sharps.
    ///
    /// Returns `None` when the string index is outside 0-5. Frets are not
    /// capped at `max_fret`; that bound only limits the inverse scan.
    pub fn note_at_position(&self, string_index: usize, fret: u32) -> Option<Pitch> {
        let open = self.tuning.open_string(string_index)?;
        open.checked_transpose(i32::try_from(fret).ok()?)
    }

    pub fn note_at(&self, position: FretPosition) -> Option<Pitch> {
        self.note_at_position(position.string_index, position.fret)
    }

    /// Every position whose pitch is written exactly as `target`.
    ///
    /// Fretboard pitches are sharp-spelled, so a flat-spelled target such as
    /// `Eb4` matches nothing; fold it with [`Pitch::to_sharp_spelling`] first
    /// to search by sound.
    pub fn positions_for_pitch(&self, target: &Pitch) -> Vec<FretPosition> {
        self.scan(|pitch| pitch == *target)
    }

    /// Every position sounding `class` in any octave.
    pub fn positions_for_pitch_class(&self, class: PitchClass) -> Vec<FretPosition> {
        self.scan(|pitch| pitch.pitch_class() == class)
    }

    /// All positions in scan order.
    pub fn positions(&self) -> impl Iterator<Item = FretPosition> + '_ {
        (0..STRING_COUNT).flat_map(move |string_index| {
            (0..=self.max_fret).map(move |fret| FretPosition::new(string_index, fret))
        })
    }

    /// Lowest and highest pitch reachable within the scan range.
    pub fn range(&self) -> (Pitch, Pitch) {
        let semitones = self.tuning.strings().iter().map(Pitch::absolute_semitone);
        let low = semitones.clone().min().unwrap_or_default();
        let span = i32::try_from(self.max_fret).unwrap_or(i32::MAX);
        let high = semitones.max().unwrap_or_default().saturating_add(span);
        (
            Pitch::from_absolute_semitone(low),
            Pitch::from_absolute_semitone(high),
        )
    }

    fn scan<F>(&self, matches: F) -> Vec<FretPosition>
    where
        F: Fn(Pitch) -> bool,
    {
        self.positions()
            .filter(|position| self.note_at(*position).map_or(false, &matches))
            .collect()
    }
}

impl Default for Fretboard {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    #[test]
    fn test_open_strings() {
        let board = Fretboard::standard();
        let open: Vec<String> = (0..STRING_COUNT)
            .map(|s| board.note_at_position(s, 0).unwrap().to_string())
            .collect();
        assert_eq!(open, STANDARD_TUNING);
    }

    #[test]
    fn test_note_at_position_spells_sharps() {
        let board = Fretboard::standard();
        assert_eq!(board.note_at_position(5, 2).unwrap().to_string(), "F#2");
        assert_eq!(board.note_at_position(2, 3).unwrap().to_string(), "A#3");
    }

    #[test]
    fn test_note_at_position_out_of_range() {
        let board = Fretboard::standard();
        assert_eq!(board.note_at_position(6, 0), None);
        assert_eq!(board.note_at_position(usize::MAX, 0), None);
    }

    #[test]
    fn test_positions_for_c3() {
        let board = Fretboard::standard();
        let positions = board.positions_for_pitch(&pitch("C3"));
        assert_eq!(positions, vec![FretPosition::new(4, 3), FretPosition::new(5, 8)]);
    }

    #[test]
    fn test_positions_are_string_major() {
        let board = Fretboard::standard();
        let positions = board.positions_for_pitch(&pitch("E4"));
        assert_eq!(
            positions,
            vec![
                FretPosition::new(0, 0),
                FretPosition::new(1, 5),
                FretPosition::new(2, 9),
                FretPosition::new(3, 14),
            ]
        );
    }

    #[test]
    fn test_flat_target_matches_nothing() {
        let board = Fretboard::standard();
        assert!(board.positions_for_pitch(&pitch("Eb4")).is_empty());
        assert!(!board
            .positions_for_pitch(&pitch("Eb4").to_sharp_spelling())
            .is_empty());
    }

    #[test]
    fn test_positions_for_pitch_class() {
        let board = Fretboard::new(Tuning::standard(), 12);
        let positions = board.positions_for_pitch_class(PitchClass::new(4));
        assert!(positions.contains(&FretPosition::new(0, 0)));
        assert!(positions.contains(&FretPosition::new(0, 12)));
        assert!(positions.contains(&FretPosition::new(3, 2)));
        assert!(positions
            .iter()
            .all(|p| board.note_at(*p).unwrap().pitch_class() == PitchClass::new(4)));
    }

    #[test]
    fn test_range() {
        let (low, high) = Fretboard::standard().range();
        assert_eq!(low.to_string(), "E2");
        assert_eq!(high.to_string(), "G5");
    }

    #[test]
    fn test_tuning_requires_six_strings() {
        assert!(matches!(
            Tuning::from_names(&["E4", "B3"]),
            Err(FretwiseError::InvalidTuning(_))
        ));
        assert!(Tuning::from_names(&["E4", "B3", "G3", "D3", "A2", "X2"]).is_err());
    }

    #[test]
    fn test_drop_d_tuning() {
        let tuning = Tuning::from_names(&["E4", "B3", "G3", "D3", "A2", "D2"]).unwrap();
        let board = Fretboard::new(tuning, DEFAULT_MAX_FRET);
        assert_eq!(board.note_at_position(5, 2).unwrap().to_string(), "E2");
        assert_eq!(board.tuning().to_string(), "E4 B3 G3 D3 A2 D2");
    }
}
