//! # Chord Voicings
//!
//! A bundled library of guitar chord shapes, looked up by chord name or by
//! the notes a player is holding.
//!
//! ## Data
//! The shapes live in `data/chord_voicings.yaml` and are compiled into the
//! binary. Each entry carries:
//! - `shape` - six characters, low E string first, `x` for a muted string
//!   (`x32010` is open C)
//! - `fingers` - finger assignments; strings are numbered 1 (high E) to
//!   6 (low E), fingers 1 (index) to 4 (pinky)
//! - `barres` - optional barres, spanning strings 6 to 1 unless narrowed
//! - `notes` - the pitch classes the chord is built from
//!
//! ## Example
//! ```rust
//! use fretwise::{voicing_for_notes, Pitch, VoicingLibrary};
//!
//! let c = VoicingLibrary::builtin().get("C").unwrap();
//! assert_eq!(c.shape, "x32010");
//!
//! let notes: Vec<Pitch> = ["A3", "C4", "E4"].iter().map(|s| s.parse().unwrap()).collect();
//! assert_eq!(voicing_for_notes(&notes).map(|v| v.name.as_str()), Some("Am"));
//! ```

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::chord::detect_chord;
use crate::error::FretwiseError;
use crate::fretboard::{Fretboard, STRING_COUNT};
use crate::pitch::{Pitch, PitchClass};

const BUNDLED_VOICINGS: &str = include_str!("../data/chord_voicings.yaml");

static BUILTIN: Lazy<VoicingLibrary> = Lazy::new(|| {
    VoicingLibrary::from_yaml(BUNDLED_VOICINGS).expect("bundled chord voicings are valid")
});

/// What one string does in a chord shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringFret {
    Muted,
    Fret(u8),
}

impl StringFret {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'x' | 'X' => Some(StringFret::Muted),
            _ => c
                .to_digit(10)
                .map(|d| StringFret::Fret(d as u8)),
        }
    }
}

impl fmt::Display for StringFret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringFret::Muted => f.write_str("x"),
            StringFret::Fret(n) => write!(f, "{}", n),
        }
    }
}

/// A fretted note and the finger that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerPosition {
    /// 1 = high E, 6 = low E
    pub string: u8,
    pub fret: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finger: Option<u8>,
}

/// One finger laid across several strings at the same fret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barre {
    pub fret: u8,
    #[serde(default = "Barre::lowest_string")]
    pub from: u8,
    #[serde(default = "Barre::highest_string")]
    pub to: u8,
}

impl Barre {
    fn lowest_string() -> u8 {
        STRING_COUNT as u8
    }

    fn highest_string() -> u8 {
        1
    }
}

/// Raw voicing entry for YAML deserialization
#[derive(Deserialize, Debug)]
struct RawVoicing {
    name: String,
    shape: String,
    #[serde(default)]
    fingers: Vec<FingerPosition>,
    #[serde(default)]
    barres: Vec<Barre>,
    #[serde(default)]
    notes: Vec<String>,
}

/// A named guitar chord shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordVoicing {
    pub name: String,
    pub shape: String,
    /// Per-string frets, low E (string 6) first, as in `shape`.
    pub frets: [StringFret; STRING_COUNT],
    pub fingers: Vec<FingerPosition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub barres: Vec<Barre>,
    pub notes: Vec<PitchClass>,
}

impl ChordVoicing {
    /// Fret for a string numbered 1 (high E) to 6 (low E).
    pub fn fret_for_string(&self, string: u8) -> Option<StringFret> {
        let string = usize::from(string);
        if !(1..=STRING_COUNT).contains(&string) {
            return None;
        }
        self.frets.get(STRING_COUNT - string).copied()
    }

    /// Pitches the shape sounds on `fretboard`, low string first. Muted
    /// strings are skipped.
    pub fn sounding_pitches(&self, fretboard: &Fretboard) -> Vec<Pitch> {
        self.frets
            .iter()
            .enumerate()
            .filter_map(|(i, fret)| match fret {
                StringFret::Muted => None,
                StringFret::Fret(n) => fretboard.note_at_position(STRING_COUNT - 1 - i, u32::from(*n)),
            })
            .collect()
    }

    fn from_raw(raw: RawVoicing) -> Result<Self, FretwiseError> {
        let invalid = |message: String| {
            FretwiseError::VoicingData(format!("{}: {}", raw.name, message))
        };

        let frets: Vec<StringFret> = raw
            .shape
            .chars()
            .map(StringFret::from_char)
            .collect::<Option<_>>()
            .ok_or_else(|| invalid(format!("bad shape '{}'", raw.shape)))?;
        let frets: [StringFret; STRING_COUNT] = frets
            .try_into()
            .map_err(|_| invalid(format!("shape '{}' must cover 6 strings", raw.shape)))?;

        for finger in &raw.fingers {
            if !(1..=STRING_COUNT as u8).contains(&finger.string) {
                return Err(invalid(format!("no string {}", finger.string)));
            }
            if let Some(n) = finger.finger {
                if !(1..=4).contains(&n) {
                    return Err(invalid(format!("no finger {}", n)));
                }
            }
        }
        for barre in &raw.barres {
            let strings = 1..=STRING_COUNT as u8;
            if !strings.contains(&barre.from) || !strings.contains(&barre.to) {
                return Err(invalid(format!("barre spans strings {}-{}", barre.from, barre.to)));
            }
        }

        let notes = raw
            .notes
            .iter()
            .map(|note| note.parse::<PitchClass>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            name: raw.name,
            shape: raw.shape,
            frets,
            fingers: raw.fingers,
            barres: raw.barres,
            notes,
        })
    }
}

/// Chord voicings in declaration order.
#[derive(Debug, Clone, Default)]
pub struct VoicingLibrary {
    voicings: Vec<ChordVoicing>,
}

impl VoicingLibrary {
    /// Load voicings from a YAML list.
    pub fn from_yaml(content: &str) -> Result<Self, FretwiseError> {
        let raw: Vec<RawVoicing> = serde_yaml::from_str(content)
            .map_err(|e| FretwiseError::VoicingData(e.to_string()))?;

        let voicings = raw
            .into_iter()
            .map(ChordVoicing::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("loaded {} chord voicings", voicings.len());
        Ok(Self { voicings })
    }

    /// The library compiled into the crate.
    pub fn builtin() -> &'static VoicingLibrary {
        &BUILTIN
    }

    pub fn get(&self, name: &str) -> Option<&ChordVoicing> {
        self.voicings.iter().find(|v| v.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.voicings.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChordVoicing> {
        self.voicings.iter()
    }

    pub fn len(&self) -> usize {
        self.voicings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voicings.is_empty()
    }

    /// Detect the chord in `notes` and return its shape, if one is bundled.
    pub fn voicing_for_notes(&self, notes: &[Pitch]) -> Option<&ChordVoicing> {
        let chord = detect_chord(notes)?;
        self.get(&chord.to_string())
    }
}

/// Look up a bundled voicing by chord name.
pub fn chord_voicing(name: &str) -> Option<&'static ChordVoicing> {
    VoicingLibrary::builtin().get(name)
}

/// Detect the chord in `notes` and return its bundled voicing, if any.
pub fn voicing_for_notes(notes: &[Pitch]) -> Option<&'static ChordVoicing> {
    VoicingLibrary::builtin().voicing_for_notes(notes)
}

/// Whether `notes` form a nameable chord (voicing or not).
pub fn is_known_chord(notes: &[Pitch]) -> bool {
    detect_chord(notes).is_some()
}

/// Display letter for a finger number: I(ndex), M(iddle), R(ing), P(inky).
pub fn finger_label(finger: u8) -> Option<&'static str> {
    match finger {
        1 => Some("I"),
        2 => Some("M"),
        3 => Some("R"),
        4 => Some("P"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::detect_chord_from_classes;

    fn pitches(names: &[&str]) -> Vec<Pitch> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    #[test]
    fn test_builtin_loads() {
        let library = VoicingLibrary::builtin();
        assert_eq!(library.len(), 28);
        assert_eq!(&library.names()[..5], &["C", "G", "D", "A", "E"]);
    }

    #[test]
    fn test_declared_notes_name_their_chord() {
        for voicing in VoicingLibrary::builtin().iter() {
            let chord = detect_chord_from_classes(&voicing.notes);
            assert_eq!(
                chord.map(|c| c.to_string()).as_deref(),
                Some(voicing.name.as_str()),
                "notes of {}",
                voicing.name
            );
        }
    }

    #[test]
    fn test_open_shapes_sound_their_chord() {
        let board = Fretboard::standard();
        for name in ["C", "G", "Am", "E7", "Fmaj7", "B", "Caug", "Eaug", "Ddim"] {
            let voicing = chord_voicing(name).unwrap();
            let chord = detect_chord(&voicing.sounding_pitches(&board));
            assert_eq!(chord.map(|c| c.to_string()).as_deref(), Some(name));
        }
    }

    #[test]
    fn test_sounding_pitches_skip_muted_strings() {
        let c = chord_voicing("C").unwrap();
        let sounding: Vec<String> = c
            .sounding_pitches(&Fretboard::standard())
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(sounding, vec!["C3", "E3", "G3", "C4", "E4"]);
    }

    #[test]
    fn test_fret_for_string() {
        let c = chord_voicing("C").unwrap();
        assert_eq!(c.fret_for_string(6), Some(StringFret::Muted));
        assert_eq!(c.fret_for_string(5), Some(StringFret::Fret(3)));
        assert_eq!(c.fret_for_string(1), Some(StringFret::Fret(0)));
        assert_eq!(c.fret_for_string(0), None);
        assert_eq!(c.fret_for_string(7), None);
    }

    #[test]
    fn test_barre_defaults() {
        let f = chord_voicing("F").unwrap();
        assert_eq!(f.barres, vec![Barre { fret: 1, from: 6, to: 1 }]);
        let cm = chord_voicing("Cm").unwrap();
        assert_eq!(cm.barres, vec![Barre { fret: 3, from: 5, to: 1 }]);
        assert!(chord_voicing("C").unwrap().barres.is_empty());
    }

    #[test]
    fn test_voicing_for_notes() {
        assert_eq!(
            voicing_for_notes(&pitches(&["G3", "B3", "D4", "F4"])).map(|v| v.shape.as_str()),
            Some("320001")
        );
        // detected, but no bundled shape
        assert!(voicing_for_notes(&pitches(&["F#3", "A#3", "C#4"])).is_none());
        assert!(is_known_chord(&pitches(&["F#3", "A#3", "C#4"])));
        assert!(!is_known_chord(&pitches(&["C4", "D4", "E4"])));
    }

    #[test]
    fn test_finger_labels() {
        let labels: Vec<_> = (1..=4).filter_map(finger_label).collect();
        assert_eq!(labels, vec!["I", "M", "R", "P"]);
        assert_eq!(finger_label(0), None);
        assert_eq!(finger_label(5), None);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let short = "- name: X\n  shape: x3201\n";
        assert!(matches!(
            VoicingLibrary::from_yaml(short),
            Err(FretwiseError::VoicingData(_))
        ));
        let bad_char = "- name: X\n  shape: x3201q\n";
        assert!(VoicingLibrary::from_yaml(bad_char).is_err());
        let bad_finger = "- name: X\n  shape: x32010\n  fingers:\n    - { string: 5, fret: 3, finger: 5 }\n";
        assert!(VoicingLibrary::from_yaml(bad_finger).is_err());
        let bad_note = "- name: X\n  shape: x32010\n  notes: [H]\n";
        assert!(VoicingLibrary::from_yaml(bad_note).is_err());
    }
}
