//! List command implementation
//!
//! Prints the sound catalogue: every kind (and gunshot grade) with its
//! canonical rate, length and default seed.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use firefight_audio::{Grade, SoundKind, SoundRequest};
use serde::Serialize;

use super::json_output;

/// One row of the catalogue.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogueEntry {
    pub kind: SoundKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    pub sample_rate: u32,
    /// Fixed length in seconds; absent for sounds whose length depends on the seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    pub looped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_seed: Option<u32>,
}

/// Builds the catalogue in display order.
pub fn catalogue() -> Vec<CatalogueEntry> {
    let mut entries = Vec::new();
    for kind in SoundKind::ALL {
        let grades: Vec<Option<Grade>> = if kind.takes_grade() {
            Grade::ALL.into_iter().map(Some).collect()
        } else {
            vec![None]
        };
        for grade in grades {
            let mut request = SoundRequest::new(kind);
            if let Some(grade) = grade {
                request = request.with_grade(grade);
            }
            entries.push(CatalogueEntry {
                kind,
                grade,
                sample_rate: kind.canonical_sample_rate(),
                duration_seconds: kind.canonical_duration(grade.unwrap_or(Grade::Player)),
                looped: kind.is_loop(),
                default_seed: request.resolved_seed(),
            });
        }
    }
    entries
}

/// Run the list command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let entries = catalogue();
    if json_output {
        return json_output::report(Ok(entries));
    }

    println!("{}", "Sound catalogue:".cyan().bold());
    for entry in &entries {
        let name = match entry.grade {
            Some(grade) => format!("{}/{}", entry.kind, grade),
            None => entry.kind.to_string(),
        };
        let length = match entry.duration_seconds {
            Some(seconds) => format!("{:.2}s", seconds),
            None => "varies".to_string(),
        };
        let seed = entry
            .default_seed
            .map(|s| format!("seed {}", s))
            .unwrap_or_default();
        println!(
            "  {:<28} {:>6} Hz  {:>7}  {:<5} {}",
            name.bold(),
            entry.sample_rate,
            length,
            if entry.looped { "loop" } else { "" },
            seed.dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalogue_expands_gunshot_grades() {
        let entries = catalogue();
        assert_eq!(entries.len(), 8);

        let grades: Vec<Option<Grade>> = entries
            .iter()
            .filter(|e| e.kind == SoundKind::Gunshot)
            .map(|e| e.grade)
            .collect();
        assert_eq!(
            grades,
            vec![
                Some(Grade::Player),
                Some(Grade::EnemyStandard),
                Some(Grade::EnemySuper)
            ]
        );
    }

    #[test]
    fn test_catalogue_canonical_values() {
        let entries = catalogue();
        let find = |kind: SoundKind| {
            entries
                .iter()
                .find(|e| e.kind == kind)
                .cloned()
                .expect("kind listed")
        };

        let groan = find(SoundKind::Groan);
        assert_eq!(groan.sample_rate, 22050);
        assert_eq!(groan.duration_seconds, None);

        let music = find(SoundKind::Music);
        assert_eq!(music.duration_seconds, Some(32.0));
        assert!(music.looped);
        assert_eq!(music.default_seed, Some(777));

        let heartbeat = find(SoundKind::Heartbeat);
        assert_eq!(heartbeat.default_seed, None);
        assert_eq!(heartbeat.duration_seconds, Some(4.0));
    }
}
