use fretwise::{api, NotationSystem, Settings};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct BindingError {
    message: String,
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    let error = BindingError {
        message: e.to_string(),
    };
    JsValue::from_str(&serde_json::to_string(&error).unwrap_or_else(|_| error.message))
}

/// Pitch at a fretboard position, or "" when out of range
#[wasm_bindgen(js_name = noteAtPosition)]
pub fn note_at_position(string_index: i32, fret: i32) -> String {
    api::note_at_position(i64::from(string_index), i64::from(fret))
}

/// Positions sounding a pitch, as a JSON array of {stringIndex, fret}
#[wasm_bindgen(js_name = positionsForPitch)]
pub fn positions_for_pitch(target: &str) -> String {
    serde_json::to_string(&api::positions_for_pitch(target)).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen(js_name = transposeGuitarToWritten)]
pub fn transpose_guitar_to_written(note: &str) -> Option<String> {
    api::transpose_guitar_to_written(note)
}

#[wasm_bindgen(js_name = transposeWrittenToGuitar)]
pub fn transpose_written_to_guitar(note: &str) -> Option<String> {
    api::transpose_written_to_guitar(note)
}

/// Chord name for a JSON array of notes, e.g. `["C4","E4","G4"]`
#[wasm_bindgen(js_name = detectChord)]
pub fn detect_chord(notes_json: &str) -> Option<String> {
    let notes: Vec<String> = serde_json::from_str(notes_json).ok()?;
    api::detect_chord(&notes)
}

/// Bundled guitar voicing for a chord name, as JSON
#[wasm_bindgen(js_name = chordVoicing)]
pub fn chord_voicing(name: &str) -> Option<String> {
    fretwise::chord_voicing(name).and_then(|voicing| serde_json::to_string(voicing).ok())
}

#[wasm_bindgen(js_name = noteLabel)]
pub fn note_label(note: &str, system: &str) -> Result<String, JsValue> {
    let system: NotationSystem = system.parse().map_err(to_js_error)?;
    Ok(fretwise::note_label(note, system))
}

/// Validate persisted settings and return the full snapshot
#[wasm_bindgen(js_name = normalizeSettings)]
pub fn normalize_settings(yaml: &str) -> Result<String, JsValue> {
    Settings::from_yaml(yaml)
        .and_then(|settings| settings.to_yaml())
        .map_err(to_js_error)
}
