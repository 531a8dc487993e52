use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FretwiseError;
use crate::pitch::Letter;

/// How note names are shown to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationSystem {
    /// Letter names: C D E F G A B
    #[default]
    Latin,
    /// Fixed-do syllables: Do Re Mi Fa Sol La Si
    Solfege,
}

impl NotationSystem {
    pub fn toggled(self) -> Self {
        match self {
            NotationSystem::Latin => NotationSystem::Solfege,
            NotationSystem::Solfege => NotationSystem::Latin,
        }
    }
}

impl fmt::Display for NotationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationSystem::Latin => f.write_str("latin"),
            NotationSystem::Solfege => f.write_str("solfege"),
        }
    }
}

impl FromStr for NotationSystem {
    type Err = FretwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "latin" => Ok(NotationSystem::Latin),
            "solfege" => Ok(NotationSystem::Solfege),
            other => Err(FretwiseError::ConfigError(format!(
                "notation system must be 'latin' or 'solfege', got '{}'",
                other
            ))),
        }
    }
}

fn solfege_syllable(letter: Letter) -> &'static str {
    match letter {
        Letter::C => "Do",
        Letter::D => "Re",
        Letter::E => "Mi",
        Letter::F => "Fa",
        Letter::G => "Sol",
        Letter::A => "La",
        Letter::B => "Si",
    }
}

/// Render a note name (`C`, `F#3`, `Db4`) in `system`.
///
/// Accidentals and octave numbers are kept as written. Text that does not
/// look like a note name is returned unchanged.
///
/// # Example
/// ```
/// use fretwise::{note_label, NotationSystem};
///
/// assert_eq!(note_label("F#3", NotationSystem::Solfege), "Fa#3");
/// assert_eq!(note_label("F#3", NotationSystem::Latin), "F#3");
/// ```
pub fn note_label(note: &str, system: NotationSystem) -> String {
    if system == NotationSystem::Latin || note.is_empty() {
        return note.to_string();
    }

    let mut chars = note.chars();
    let letter = match chars
        .next()
        .and_then(|c| Letter::from_char(c.to_ascii_uppercase()))
    {
        Some(letter) => letter,
        None => return note.to_string(),
    };

    let rest = chars.as_str();
    let (accidental, octave) = match rest.strip_prefix(&['#', 'b'][..]) {
        Some(octave) => (&rest[..1], octave),
        None => ("", rest),
    };

    let digits = octave.strip_prefix('-').unwrap_or(octave);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return note.to_string();
    }

    format!("{}{}{}", solfege_syllable(letter), accidental, octave)
}
