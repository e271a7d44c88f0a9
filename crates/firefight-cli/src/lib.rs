//! Firefight CLI library.
//!
//! Command implementations behind the `firefight` binary: rendering sounds to
//! WAV files, rendering batch files, listing the catalogue and analyzing WAVs.

pub mod commands;
