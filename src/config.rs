//! # Settings
//!
//! The learner's preferences, persisted as a flat YAML document.
//!
//! ## Format
//! ```yaml
//! notation-system: solfege   # latin | solfege
//! theme: dark                # light | dark | system
//! bpm: 96                    # clamped to 40-240
//! instrument: guitar         # guitar | piano | flute
//! tuning: [E4, B3, G3, D3, A2, D2]
//! max-fret: 12
//! ```
//!
//! Every key is optional; missing keys take their defaults. Unknown keys are
//! rejected so typos do not silently fall back to defaults.
//!
//! ## Example
//! ```rust
//! use fretwise::{NotationSystem, Settings};
//!
//! let settings = Settings::from_yaml("notation-system: solfege\nbpm: 300\n")?;
//! assert_eq!(settings.notation_system, NotationSystem::Solfege);
//! assert_eq!(settings.bpm, 240);
//! # Ok::<(), fretwise::FretwiseError>(())
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::FretwiseError;
use crate::fretboard::{Fretboard, Tuning, DEFAULT_MAX_FRET};
use crate::labels::NotationSystem;
use crate::transpose::Instrument;

pub const MIN_BPM: u16 = 40;
pub const MAX_BPM: u16 = 240;
pub const DEFAULT_BPM: u16 = 120;

/// Highest fret accepted for `max-fret`.
pub const FRET_LIMIT: u32 = 24;

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Light and dark swap; `System` resolves to light first.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark | Theme::System => Theme::Light,
        }
    }
}

/// Raw settings for YAML (de)serialization
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    notation_system: Option<NotationSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bpm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instrument: Option<Instrument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tuning: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_fret: Option<u32>,
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub notation_system: NotationSystem,
    pub theme: Theme,
    pub bpm: u16,
    pub instrument: Instrument,
    pub tuning: Tuning,
    pub max_fret: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notation_system: NotationSystem::default(),
            theme: Theme::default(),
            bpm: DEFAULT_BPM,
            instrument: Instrument::default(),
            tuning: Tuning::standard(),
            max_fret: DEFAULT_MAX_FRET,
        }
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Self, FretwiseError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawSettings = serde_yaml::from_str(content)
            .map_err(|e| FretwiseError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn load(path: &Path) -> Result<Self, FretwiseError> {
        let content = fs::read_to_string(path).map_err(|e| FretwiseError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings = Self::from_yaml(&content)?;
        debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Full key-value snapshot, every key present.
    pub fn to_yaml(&self) -> Result<String, FretwiseError> {
        let raw = RawSettings {
            notation_system: Some(self.notation_system),
            theme: Some(self.theme),
            bpm: Some(i64::from(self.bpm)),
            instrument: Some(self.instrument),
            tuning: Some(self.tuning.strings().iter().map(|p| p.to_string()).collect()),
            max_fret: Some(self.max_fret),
        };
        serde_yaml::to_string(&raw).map_err(|e| FretwiseError::ConfigError(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), FretwiseError> {
        fs::write(path, self.to_yaml()?).map_err(|e| FretwiseError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Fretboard with the configured tuning and scan range.
    pub fn fretboard(&self) -> Fretboard {
        Fretboard::new(self.tuning.clone(), self.max_fret)
    }

    pub fn set_bpm(&mut self, bpm: i64) {
        self.bpm = clamp_bpm(bpm);
    }

    pub fn adjust_bpm(&mut self, delta: i64) {
        self.set_bpm(i64::from(self.bpm) + delta);
    }

    pub fn toggle_notation_system(&mut self) {
        self.notation_system = self.notation_system.toggled();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    fn from_raw(raw: RawSettings) -> Result<Self, FretwiseError> {
        let defaults = Self::default();

        let tuning = match raw.tuning {
            Some(names) => Tuning::from_names(&names)?,
            None => defaults.tuning,
        };

        let max_fret = raw.max_fret.unwrap_or(defaults.max_fret);
        if max_fret == 0 || max_fret > FRET_LIMIT {
            return Err(FretwiseError::ConfigError(format!(
                "max-fret must be between 1 and {}, got {}",
                FRET_LIMIT, max_fret
            )));
        }

        Ok(Self {
            notation_system: raw.notation_system.unwrap_or(defaults.notation_system),
            theme: raw.theme.unwrap_or(defaults.theme),
            bpm: raw.bpm.map(clamp_bpm).unwrap_or(defaults.bpm),
            instrument: raw.instrument.unwrap_or(defaults.instrument),
            tuning,
            max_fret,
        })
    }
}

fn clamp_bpm(bpm: i64) -> u16 {
    bpm.clamp(i64::from(MIN_BPM), i64::from(MAX_BPM)) as u16
}
