use std::env;
use std::path::Path;
use std::process;

use fretwise::{chord_voicing, detect_chord, finger_label, note_label, Chord, Pitch, Settings};

const USAGE: &str = "Usage: fretwise [--config <settings.yaml>] <command>

Commands:
  at <string> <fret>     pitch sounded at a fretboard position
  positions <pitch>      every position sounding a pitch
  written <pitch>        sounding pitch to written pitch
  sounding <pitch>       written pitch to sounding pitch
  chord <pitch>...       name the chord formed by the pitches
  voicing <chord>        bundled guitar shape for a chord
  label <pitch>          pitch name in the configured notation system";

fn main() {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    // Parse flags
    let mut config_path = env::var("FRETWISE_CONFIG").ok();
    if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            fail(USAGE);
        }
        config_path = Some(args[1].clone());
        args.drain(..2);
    }

    let settings = match config_path {
        Some(path) => Settings::load(Path::new(&path)).unwrap_or_else(|e| fail(&e.to_string())),
        None => Settings::default(),
    };

    let Some((command, rest)) = args.split_first() else {
        fail(USAGE);
    };

    match run(command, rest, &settings) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(message) => fail(&message),
    }
}

fn run(command: &str, args: &[String], settings: &Settings) -> Result<Vec<String>, String> {
    let fretboard = settings.fretboard();
    let transposition = settings.instrument.transposition();

    match (command, args) {
        ("at", [string, fret]) => {
            let string: usize = string
                .parse()
                .map_err(|_| format!("Invalid string index '{}'", string))?;
            let fret: u32 = fret.parse().map_err(|_| format!("Invalid fret '{}'", fret))?;
            fretboard
                .note_at_position(string, fret)
                .map(|pitch| vec![pitch.to_string()])
                .ok_or_else(|| format!("No string {} on this fretboard", string))
        }
        ("positions", [pitch]) => {
            let pitch = parse(pitch)?;
            Ok(fretboard
                .positions_for_pitch(&pitch)
                .iter()
                .map(|position| position.to_string())
                .collect())
        }
        ("written", [pitch]) => {
            let pitch = parse(pitch)?;
            Ok(vec![transposition.sounding_to_written(&pitch).to_string()])
        }
        ("sounding", [pitch]) => {
            let pitch = parse(pitch)?;
            transposition
                .written_to_sounding(&pitch)
                .map(|sounding| vec![sounding.to_string()])
                .ok_or_else(|| format!("{} is below the {}'s range", pitch, settings.instrument))
        }
        ("chord", pitches) if !pitches.is_empty() => {
            let pitches = pitches
                .iter()
                .map(String::as_str)
                .map(parse)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(vec![detect_chord(&pitches)
                .map(|chord| chord.to_string())
                .unwrap_or_else(|| "no chord".to_string())])
        }
        ("voicing", [name]) => {
            let chord: Chord = name.parse().map_err(|e: fretwise::FretwiseError| e.to_string())?;
            let voicing = chord_voicing(&chord.to_string())
                .or_else(|| chord_voicing(name))
                .ok_or_else(|| format!("No bundled voicing for {}", chord))?;
            let mut lines = vec![format!("{} {}", voicing.name, voicing.shape)];
            for finger in &voicing.fingers {
                let label = finger.finger.and_then(finger_label).unwrap_or("-");
                lines.push(format!("  string {} fret {} {}", finger.string, finger.fret, label));
            }
            for barre in &voicing.barres {
                lines.push(format!(
                    "  barre fret {} strings {}-{}",
                    barre.fret, barre.from, barre.to
                ));
            }
            Ok(lines)
        }
        ("label", [pitch]) => Ok(vec![note_label(pitch, settings.notation_system)]),
        _ => Err(USAGE.to_string()),
    }
}

fn parse(text: &str) -> Result<Pitch, String> {
    text.parse::<Pitch>().map_err(|e| e.to_string())
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}
