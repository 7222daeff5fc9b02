//! Direction-file loading
//!
//! A challenge path is stored as plain text, one step per line in the form
//! `<keyword> <length>`, with the keyword drawn from `up`, `down`, `forward`,
//! `back`, `right`, `left` and the length a floating-point magnitude along
//! that axis. Malformed lines and unknown keywords are skipped with a
//! warning; they never abort a load, the path just comes out shorter.

use anyhow::{Context, Result};
use glam::Vec3;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Unit axis for a direction keyword.
fn direction_axis(keyword: &str) -> Option<Vec3> {
    match keyword {
        "up" => Some(Vec3::Y),
        "down" => Some(Vec3::NEG_Y),
        "forward" => Some(Vec3::Z),
        "back" => Some(Vec3::NEG_Z),
        "right" => Some(Vec3::X),
        "left" => Some(Vec3::NEG_X),
        _ => None,
    }
}

/// On-disk location for a numbered challenge.
///
/// Negative numbers select practice paths, non-negative numbers study tasks.
pub fn challenge_file(num: i32) -> PathBuf {
    if num < 0 {
        PathBuf::from(format!("data/challenges/demo{}.txt", -num))
    } else {
        PathBuf::from(format!("data/challenges/task{num}.txt"))
    }
}

/// Load an ordered direction list from a challenge file.
///
/// Fails only when the file cannot be read; bad lines are skipped.
pub fn load_directions<P: AsRef<Path>>(path: P) -> Result<Vec<Vec3>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read challenge file {path:?}"))?;

    let directions = parse_directions(&text);
    info!("Loaded {} steps from {:?}", directions.len(), path);
    Ok(directions)
}

/// Parse direction steps from challenge-file text.
pub fn parse_directions(text: &str) -> Vec<Vec3> {
    let mut directions = Vec::new();

    for line in text.lines() {
        let mut parts = line.split_whitespace();
        let (Some(keyword), Some(raw_length)) = (parts.next(), parts.next()) else {
            warn!("Invalid line format in challenge file: '{line}'");
            continue;
        };
        let Ok(length) = raw_length.parse::<f32>() else {
            warn!("Invalid line format in challenge file: '{line}'");
            continue;
        };

        match direction_axis(keyword) {
            Some(axis) => directions.push(axis * length),
            None => warn!("Unknown direction keyword '{keyword}' in challenge file"),
        }
    }

    directions
}
