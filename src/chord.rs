//! # Chord Detection
//!
//! Names chords from sets of simultaneous pitches, and parses chord symbols
//! back into pitch classes.
//!
//! ## Detection
//! 1. Reduce every pitch to its pitch class and drop duplicates, keeping the
//!    order in which each class first appears.
//! 2. Try each class in that order as the root, measuring every other class
//!    as an interval (0-11) above it.
//! 3. The first root whose interval set equals one of the templates below
//!    names the chord. Matching is exact: same members, same size.
//!
//! ```text
//! major   {0,4,7}     ""        7th      {0,4,7,10}  "7"
//! minor   {0,3,7}     "m"       maj7     {0,4,7,11}  "maj7"
//! dim     {0,3,6}     "dim"     m7       {0,3,7,10}  "m7"
//! aug     {0,4,8}     "aug"     m7b5     {0,3,6,10}  "m7b5"
//!                               dim7     {0,3,6,9}   "dim7"
//! ```
//!
//! Roots are tried in input order, not pitch order, so symmetric chords
//! (augmented triads, diminished sevenths) are named after whichever of
//! their notes comes first.
//!
//! ## Example
//! ```rust
//! use fretwise::{detect_chord, Pitch};
//!
//! let notes: Vec<Pitch> = ["A4", "C5", "E5"].iter().map(|s| s.parse().unwrap()).collect();
//! assert_eq!(detect_chord(&notes).map(|c| c.to_string()), Some("Am".to_string()));
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Serialize, Serializer};

use crate::error::FretwiseError;
use crate::pitch::{Pitch, PitchClass};

/// Fewest distinct pitch classes that can form a named chord.
pub const MIN_CHORD_TONES: usize = 3;

/// MIDI note number used as the base octave for accompaniment voicings (C3).
const VOICING_BASE_MIDI: u8 = 48;

/// Chord qualities in template-matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
    Major7,
    Minor7,
    HalfDiminished7,
    Diminished7,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 9] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::HalfDiminished7,
        ChordQuality::Diminished7,
    ];

    /// Semitone intervals above the root, ascending.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
        }
    }

    /// Suffix appended to the root name; empty for major.
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Diminished7 => "dim7",
        }
    }

    /// Parse a suffix, accepting the common lead-sheet aliases.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let quality = match suffix {
            "" | "maj" | "M" => ChordQuality::Major,
            "m" | "min" | "-" => ChordQuality::Minor,
            "dim" | "°" => ChordQuality::Diminished,
            "aug" | "+" => ChordQuality::Augmented,
            "7" => ChordQuality::Dominant7,
            "maj7" | "M7" => ChordQuality::Major7,
            "m7" | "min7" | "-7" => ChordQuality::Minor7,
            "m7b5" | "ø" | "ø7" => ChordQuality::HalfDiminished7,
            "dim7" | "°7" => ChordQuality::Diminished7,
            _ => return None,
        };
        Some(quality)
    }

    fn mask(self) -> u16 {
        interval_mask(self.intervals().iter().copied())
    }

    fn matching(mask: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|quality| quality.mask() == mask)
    }
}

/// A chord named by its root pitch class and quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

impl Chord {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self { root, quality }
    }

    /// Chord tones as pitch classes, root first.
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.quality
            .intervals()
            .iter()
            .map(|interval| PitchClass::new(i32::from(self.root.value() + interval)))
            .collect()
    }

    /// Close-position MIDI voicing rooted in the C3 octave.
    ///
    /// # Example
    /// ```
    /// use fretwise::Chord;
    ///
    /// let g7: Chord = "G7".parse()?;
    /// assert_eq!(g7.midi_voicing(), vec![55, 59, 62, 65]);
    /// # Ok::<(), fretwise::FretwiseError>(())
    /// ```
    pub fn midi_voicing(&self) -> Vec<u8> {
        let root = VOICING_BASE_MIDI + self.root.value();
        self.quality
            .intervals()
            .iter()
            .map(|interval| root + interval)
            .collect()
    }

    /// Whether `pitches` reduce to exactly this chord's pitch classes.
    pub fn matches(&self, pitches: &[Pitch]) -> bool {
        let classes = distinct_pitch_classes(pitches);
        classes.len() == self.quality.intervals().len()
            && interval_mask(classes.iter().map(|class| class.interval_from(self.root)))
                == self.quality.mask()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())
    }
}

impl FromStr for Chord {
    type Err = FretwiseError;

    /// Parse a chord symbol such as `C`, `F#m`, `Bbmaj7` or `Dm7b5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FretwiseError::InvalidChord(s.to_string());
        let symbol = s.trim();

        let root_len = match symbol.as_bytes() {
            [first, b'#' | b'b', ..] if first.is_ascii() => 2,
            [first, ..] if first.is_ascii() => 1,
            _ => return Err(invalid()),
        };
        let (root_name, suffix) = symbol.split_at(root_len);

        let root = root_name.parse::<PitchClass>().map_err(|_| invalid())?;
        let quality = ChordQuality::from_suffix(suffix).ok_or_else(invalid)?;
        Ok(Chord::new(root, quality))
    }
}

impl Serialize for Chord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Name the chord formed by `pitches`, if any.
///
/// Returns `None` for fewer than three distinct pitch classes, or when no
/// root/template pair matches exactly.
pub fn detect_chord(pitches: &[Pitch]) -> Option<Chord> {
    if pitches.len() < MIN_CHORD_TONES {
        return None;
    }

    detect_chord_from_classes(&distinct_pitch_classes(pitches))
}

/// Name the chord formed by distinct pitch classes, trying roots in order.
pub fn detect_chord_from_classes(classes: &[PitchClass]) -> Option<Chord> {
    if classes.len() < MIN_CHORD_TONES {
        trace!("only {} distinct pitch classes, no chord", classes.len());
        return None;
    }

    for &root in classes {
        let mask = interval_mask(classes.iter().map(|class| class.interval_from(root)));
        if let Some(quality) = ChordQuality::matching(mask) {
            let chord = Chord::new(root, quality);
            debug!("detected {} from {} pitch classes", chord, classes.len());
            return Some(chord);
        }
    }

    trace!("no chord template matches {:?}", classes);
    None
}

/// Pitch classes of `pitches` with duplicates removed, in first-seen order.
pub fn distinct_pitch_classes(pitches: &[Pitch]) -> Vec<PitchClass> {
    let mut classes: Vec<PitchClass> = Vec::with_capacity(pitches.len());
    for class in pitches.iter().map(Pitch::pitch_class) {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    classes
}

/// Interval set as a 12-bit mask, bit `n` set for interval `n`.
fn interval_mask<I: IntoIterator<Item = u8>>(intervals: I) -> u16 {
    intervals
        .into_iter()
        .fold(0u16, |mask, interval| mask | 1 << (interval % 12))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(names: &[&str]) -> Vec<Pitch> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    fn detect(names: &[&str]) -> Option<String> {
        detect_chord(&pitches(names)).map(|c| c.to_string())
    }

    #[test]
    fn test_triads() {
        assert_eq!(detect(&["C4", "E4", "G4"]), Some("C".to_string()));
        assert_eq!(detect(&["A4", "C5", "E5"]), Some("Am".to_string()));
        assert_eq!(detect(&["B3", "D4", "F4"]), Some("Bdim".to_string()));
        assert_eq!(detect(&["C4", "E4", "G#4"]), Some("Caug".to_string()));
    }

    #[test]
    fn test_sevenths() {
        assert_eq!(detect(&["C4", "E4", "G4", "Bb4"]), Some("C7".to_string()));
        assert_eq!(detect(&["C4", "E4", "G4", "B4"]), Some("Cmaj7".to_string()));
        assert_eq!(detect(&["D4", "F4", "A4", "C5"]), Some("Dm7".to_string()));
        assert_eq!(detect(&["B3", "D4", "F4", "A4"]), Some("Bm7b5".to_string()));
        assert_eq!(detect(&["B3", "D4", "F4", "Ab4"]), Some("Bdim7".to_string()));
    }

    #[test]
    fn test_inversions_find_root() {
        // first inversion C major: E G C
        assert_eq!(detect(&["E4", "G4", "C5"]), Some("C".to_string()));
        // second inversion A minor: E A C
        assert_eq!(detect(&["E3", "A3", "C4"]), Some("Am".to_string()));
    }

    #[test]
    fn test_roots_spelled_with_sharps() {
        assert_eq!(detect(&["Bb3", "D4", "F4"]), Some("A#".to_string()));
        assert_eq!(detect(&["Eb4", "Gb4", "Bb4"]), Some("D#m".to_string()));
    }

    #[test]
    fn test_doubled_notes_are_ignored() {
        // open E major shape: E2 B2 E3 G#3 B3 E4
        assert_eq!(
            detect(&["E2", "B2", "E3", "G#3", "B3", "E4"]),
            Some("E".to_string())
        );
    }

    #[test]
    fn test_enharmonic_spellings_fold_together() {
        // Db5 is the same class as C#4
        assert_eq!(detect(&["C#4", "Db5", "F4", "G#4"]), Some("C#".to_string()));
        // B# and C collapse, leaving only two classes
        assert_eq!(detect(&["C4", "B#3", "E4", "Fb4"]), None);
    }

    #[test]
    fn test_too_few_pitch_classes() {
        assert_eq!(detect(&[]), None);
        assert_eq!(detect(&["C4", "D4"]), None);
        assert_eq!(detect(&["C4", "C5", "E4"]), None);
    }

    #[test]
    fn test_unrecognised_clusters() {
        assert_eq!(detect(&["C4", "C#4", "D4"]), None);
        // sus4 is not in the template table
        assert_eq!(detect(&["C4", "F4", "G4"]), None);
        // extra tone breaks exact matching
        assert_eq!(detect(&["C4", "E4", "G4", "A4", "D5"]), None);
    }

    #[test]
    fn test_symmetric_chords_follow_input_order() {
        assert_eq!(detect(&["C4", "E4", "G#4"]), Some("Caug".to_string()));
        assert_eq!(detect(&["E4", "G#4", "C5"]), Some("Eaug".to_string()));
        assert_eq!(detect(&["G#3", "C4", "E4"]), Some("G#aug".to_string()));
    }

    #[test]
    fn test_parse_chord_symbols() {
        let cases = [
            ("C", "C"),
            ("Dm", "Dm"),
            ("F#", "F#"),
            ("Bbm", "A#m"),
            ("Cmaj7", "Cmaj7"),
            ("CM7", "Cmaj7"),
            ("A-7", "Am7"),
            ("Bm7b5", "Bm7b5"),
            ("C°", "Cdim"),
            ("E+", "Eaug"),
        ];
        for (symbol, expected) in cases {
            let chord: Chord = symbol.parse().unwrap();
            assert_eq!(chord.to_string(), expected, "parsing {}", symbol);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for symbol in ["", "H", "Csus4", "C9", "c", "°"] {
            assert!(symbol.parse::<Chord>().is_err(), "{} should not parse", symbol);
        }
    }

    #[test]
    fn test_midi_voicing() {
        assert_eq!("C".parse::<Chord>().unwrap().midi_voicing(), vec![48, 52, 55]);
        assert_eq!("Dm".parse::<Chord>().unwrap().midi_voicing(), vec![50, 53, 57]);
        assert_eq!("F#".parse::<Chord>().unwrap().midi_voicing(), vec![54, 58, 61]);
        assert_eq!("Bbm".parse::<Chord>().unwrap().midi_voicing(), vec![58, 61, 65]);
    }

    #[test]
    fn test_pitch_classes_and_matches() {
        let am7: Chord = "Am7".parse().unwrap();
        let names: Vec<&str> = am7.pitch_classes().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["A", "C", "E", "G"]);
        assert!(am7.matches(&pitches(&["C4", "E4", "G4", "A4"])));
        assert!(!am7.matches(&pitches(&["A4", "C5", "E5"])));
    }
}
