//! CLI argument definitions for the `firefight` command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// Firefight - procedural gunshots, loops and ambience
#[derive(Parser)]
#[command(name = "firefight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log synthesis and cache activity (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render one sound to a WAV file
    Render {
        /// Sound kind (gunshot, shell_casing, groan, heartbeat, breathing, music)
        #[arg(short, long)]
        kind: String,

        /// Gunshot grade (player, enemy_standard, enemy_super)
        #[arg(short, long)]
        grade: Option<String>,

        /// Seed or actor id
        #[arg(short, long)]
        seed: Option<u32>,

        /// Length in seconds (groan and music only)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Heartbeat tempo in beats per minute
        #[arg(long)]
        bpm: Option<f64>,

        /// Sample rate override in Hz
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render every entry of a JSON batch file
    Batch {
        /// Path to the batch file
        #[arg(short, long)]
        file: String,

        /// Output root directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List every sound with its canonical rate, length and seed
    List {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Analyze a WAV file and print level and hash metrics
    Analyze {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "firefight",
            "render",
            "--kind",
            "gunshot",
            "--grade",
            "enemy_super",
            "--seed",
            "7",
            "-o",
            "shot.wav",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                kind,
                grade,
                seed,
                duration,
                output,
                json,
                ..
            } => {
                assert_eq!(kind, "gunshot");
                assert_eq!(grade.as_deref(), Some("enemy_super"));
                assert_eq!(seed, Some(7));
                assert_eq!(duration, None);
                assert_eq!(output, "shot.wav");
                assert!(!json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_render_requires_output() {
        assert!(Cli::try_parse_from(["firefight", "render", "--kind", "music"]).is_err());
    }

    #[test]
    fn test_cli_parses_batch_with_global_verbose() {
        let cli = Cli::try_parse_from([
            "firefight",
            "batch",
            "--file",
            "sounds.json",
            "--out-root",
            "build/audio",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Batch {
                file,
                out_root,
                json,
            } => {
                assert_eq!(file, "sounds.json");
                assert_eq!(out_root.as_deref(), Some("build/audio"));
                assert!(!json);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_cli_parses_list_and_analyze() {
        let cli = Cli::try_parse_from(["firefight", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::List { json: true }));

        let cli = Cli::try_parse_from(["firefight", "analyze", "-i", "heart.wav"]).unwrap();
        match cli.command {
            Commands::Analyze { input, json } => {
                assert_eq!(input, "heart.wav");
                assert!(!json);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_cli_rejects_non_numeric_seed() {
        assert!(Cli::try_parse_from([
            "firefight", "render", "--kind", "groan", "--seed", "abc", "-o", "g.wav",
        ])
        .is_err());
    }
}
