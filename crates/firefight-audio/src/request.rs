//! Sound requests and cache identity.
//!
//! A [`SoundRequest`] names one sound the game wants: its kind, an optional
//! grade for gunshots, and the optional knobs that change the rendered
//! samples. Missing fields resolve to the canonical values, so a request
//! that omits a seed and one that spells out the default seed map to the
//! same [`SoundKey`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};
use crate::synthesis::gunshot::{Grade, PLAYER_SEED};
use crate::synthesis::{
    breathing, check_duration, groan, heartbeat, music, shell_casing, DEFAULT_SAMPLE_RATE,
};

/// Family of sound a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundKind {
    Gunshot,
    ShellCasing,
    Groan,
    Heartbeat,
    Breathing,
    Music,
}

impl SoundKind {
    /// All kinds in catalogue order.
    pub const ALL: [SoundKind; 6] = [
        SoundKind::Gunshot,
        SoundKind::ShellCasing,
        SoundKind::Groan,
        SoundKind::Heartbeat,
        SoundKind::Breathing,
        SoundKind::Music,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Gunshot => "gunshot",
            SoundKind::ShellCasing => "shell_casing",
            SoundKind::Groan => "groan",
            SoundKind::Heartbeat => "heartbeat",
            SoundKind::Breathing => "breathing",
            SoundKind::Music => "music",
        }
    }

    /// Whether the kind is rendered per grade.
    pub fn takes_grade(&self) -> bool {
        matches!(self, SoundKind::Gunshot)
    }

    /// Whether the kind is meant to be played looped.
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            SoundKind::Heartbeat | SoundKind::Breathing | SoundKind::Music
        )
    }

    /// Rate the kind renders at without an override.
    pub fn canonical_sample_rate(&self) -> u32 {
        match self {
            SoundKind::Groan => groan::SAMPLE_RATE,
            _ => DEFAULT_SAMPLE_RATE,
        }
    }

    /// Length in seconds of the default render, if it is fixed.
    ///
    /// Groan lengths depend on the seed, so they have none.
    pub fn canonical_duration(&self, grade: Grade) -> Option<f64> {
        match self {
            SoundKind::Gunshot => Some(grade.duration()),
            SoundKind::ShellCasing => Some(shell_casing::DURATION),
            SoundKind::Groan => None,
            SoundKind::Heartbeat => Some(heartbeat::LOOP_SECONDS),
            SoundKind::Breathing => Some(breathing::LOOP_SECONDS),
            SoundKind::Music => Some(music::DEFAULT_DURATION),
        }
    }
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundKind {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AudioError::UnknownSoundKind {
                name: s.to_string(),
            })
    }
}

/// One sound the game wants rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundRequest {
    pub kind: SoundKind,
    /// Gunshot grade; defaults to the player's rifle. Ignored by other kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    /// Seed or actor id. Ignored by the heartbeat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Length override in seconds for the groan and the music bed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hint: Option<f64>,
    /// Heartbeat tempo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
}

impl SoundRequest {
    /// A request for `kind` with every knob at its default.
    pub fn new(kind: SoundKind) -> Self {
        Self {
            kind,
            grade: None,
            seed: None,
            duration_hint: None,
            bpm: None,
        }
    }

    /// A gunshot request for an actor's rifle.
    pub fn gunshot(grade: Grade, actor_id: u32) -> Self {
        Self::new(SoundKind::Gunshot)
            .with_grade(grade)
            .with_seed(actor_id)
    }

    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_hint = Some(seconds);
        self
    }

    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = Some(bpm);
        self
    }

    /// Checks the knobs before anything is rendered.
    ///
    /// A zero duration is allowed and renders an empty buffer; durations
    /// above [`crate::synthesis::MAX_DURATION_SECONDS`] are rejected.
    pub fn validate(&self) -> AudioResult<()> {
        if let Some(duration) = self.duration_hint {
            check_duration(duration)?;
        }
        if let Some(bpm) = self.bpm {
            if !bpm.is_finite() || bpm <= 0.0 {
                return Err(AudioError::invalid_param(
                    "bpm",
                    format!("must be a positive number, got {}", bpm),
                ));
            }
        }
        Ok(())
    }

    /// Grade actually rendered, `None` for kinds without grades.
    pub fn resolved_grade(&self) -> Option<Grade> {
        self.kind
            .takes_grade()
            .then(|| self.grade.unwrap_or(Grade::Player))
    }

    /// Seed actually fed to the synthesizer, `None` for the heartbeat.
    ///
    /// Gunshot seeds are actor ids, so the super grade's offset is applied here.
    pub fn resolved_seed(&self) -> Option<u32> {
        match self.kind {
            SoundKind::Gunshot => {
                let grade = self.grade.unwrap_or(Grade::Player);
                Some(grade.actor_seed(self.seed.unwrap_or(PLAYER_SEED)))
            }
            SoundKind::ShellCasing => Some(self.seed.unwrap_or(shell_casing::DEFAULT_SEED)),
            SoundKind::Groan => Some(self.seed.unwrap_or(groan::DEFAULT_SEED)),
            SoundKind::Heartbeat => None,
            SoundKind::Breathing => Some(self.seed.unwrap_or(breathing::DEFAULT_SEED)),
            SoundKind::Music => Some(self.seed.unwrap_or(music::DEFAULT_SEED)),
        }
    }

    /// Duration override that applies to this kind.
    pub fn resolved_duration(&self) -> Option<f64> {
        match self.kind {
            SoundKind::Music => Some(self.duration_hint.unwrap_or(music::DEFAULT_DURATION)),
            SoundKind::Groan => self.duration_hint,
            _ => None,
        }
    }

    /// Tempo that applies to this kind.
    pub fn resolved_bpm(&self) -> Option<f64> {
        match self.kind {
            SoundKind::Heartbeat => Some(self.bpm.unwrap_or(heartbeat::DEFAULT_BPM)),
            _ => None,
        }
    }

    /// Identity of the rendered samples.
    pub fn key(&self) -> SoundKey {
        SoundKey {
            kind: self.kind,
            grade: self.resolved_grade(),
            seed: self.resolved_seed(),
            duration_bits: self.resolved_duration().map(f64::to_bits),
            bpm_bits: self.resolved_bpm().map(f64::to_bits),
        }
    }
}

impl fmt::Display for SoundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Cache identity of a rendered sound.
///
/// Only the fields that change the samples of the key's kind are set.
/// Floats are stored as bit patterns so the key can be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundKey {
    pub kind: SoundKind,
    pub grade: Option<Grade>,
    pub seed: Option<u32>,
    duration_bits: Option<u64>,
    bpm_bits: Option<u64>,
}

impl SoundKey {
    /// Duration override in seconds, if the kind takes one.
    pub fn duration(&self) -> Option<f64> {
        self.duration_bits.map(f64::from_bits)
    }

    /// Heartbeat tempo, if the kind takes one.
    pub fn bpm(&self) -> Option<f64> {
        self.bpm_bits.map(f64::from_bits)
    }
}

impl fmt::Display for SoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(grade) = self.grade {
            write!(f, "/{}", grade)?;
        }
        if let Some(seed) = self.seed {
            write!(f, " seed={}", seed)?;
        }
        if let Some(duration) = self.duration() {
            write!(f, " duration={}s", duration)?;
        }
        if let Some(bpm) = self.bpm() {
            write!(f, " bpm={}", bpm)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::MAX_DURATION_SECONDS;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_names() {
        for kind in SoundKind::ALL {
            assert_eq!(kind.as_str().parse::<SoundKind>().ok(), Some(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "rocket".parse::<SoundKind>().unwrap_err();
        assert!(matches!(err, AudioError::UnknownSoundKind { ref name } if name == "rocket"));
    }

    #[test]
    fn test_unknown_kind_in_json() {
        let result: Result<SoundRequest, _> = serde_json::from_str(r#"{"kind": "rocket"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_json() {
        let request: SoundRequest =
            serde_json::from_str(r#"{"kind": "gunshot", "grade": "enemy_super", "seed": 7}"#)
                .expect("parses");
        assert_eq!(request, SoundRequest::gunshot(Grade::EnemySuper, 7));

        let json = serde_json::to_string(&SoundRequest::new(SoundKind::Music)).expect("serializes");
        assert_eq!(json, r#"{"kind":"music"}"#);
    }

    #[test]
    fn test_validate() {
        assert!(SoundRequest::new(SoundKind::Music).with_duration(0.0).validate().is_ok());
        assert!(matches!(
            SoundRequest::new(SoundKind::Music).with_duration(-1.0).validate(),
            Err(AudioError::InvalidDuration { .. })
        ));
        assert!(SoundRequest::new(SoundKind::Groan)
            .with_duration(f64::INFINITY)
            .validate()
            .is_err());
        assert!(SoundRequest::new(SoundKind::Heartbeat).with_bpm(0.0).validate().is_err());
        assert!(SoundRequest::new(SoundKind::Heartbeat).with_bpm(72.0).validate().is_ok());
    }

    #[test]
    fn test_validate_caps_duration() {
        let at_cap = SoundRequest::new(SoundKind::Music).with_duration(MAX_DURATION_SECONDS);
        assert!(at_cap.validate().is_ok());
        for kind in [SoundKind::Music, SoundKind::Groan] {
            assert!(matches!(
                SoundRequest::new(kind).with_duration(1e13).validate(),
                Err(AudioError::InvalidDuration { duration }) if duration == 1e13
            ));
        }
    }

    #[test]
    fn test_default_seeds() {
        let seed = |kind| SoundRequest::new(kind).resolved_seed();
        assert_eq!(seed(SoundKind::Gunshot), Some(42));
        assert_eq!(seed(SoundKind::ShellCasing), Some(99));
        assert_eq!(seed(SoundKind::Breathing), Some(333));
        assert_eq!(seed(SoundKind::Music), Some(777));
        assert_eq!(seed(SoundKind::Heartbeat), None);
    }

    #[test]
    fn test_super_seed_offset() {
        assert_eq!(
            SoundRequest::gunshot(Grade::EnemySuper, 5).resolved_seed(),
            Some(1004)
        );
        assert_eq!(
            SoundRequest::gunshot(Grade::EnemyStandard, 5).resolved_seed(),
            Some(5)
        );
    }

    #[test]
    fn test_key_normalizes_defaults() {
        let implicit = SoundRequest::new(SoundKind::Gunshot);
        let explicit = SoundRequest::gunshot(Grade::Player, PLAYER_SEED);
        assert_eq!(implicit.key(), explicit.key());

        let music = SoundRequest::new(SoundKind::Music);
        assert_eq!(music.key(), music.clone().with_duration(32.0).with_seed(777).key());
    }

    #[test]
    fn test_key_ignores_irrelevant_fields() {
        let plain = SoundRequest::new(SoundKind::Heartbeat);
        let noisy = plain.clone().with_seed(9).with_grade(Grade::EnemySuper).with_duration(3.0);
        assert_eq!(plain.key(), noisy.key());
        assert_eq!(plain.key().bpm(), Some(100.0));
    }

    #[test]
    fn test_key_separates_grades() {
        let standard = SoundRequest::gunshot(Grade::EnemyStandard, 1).key();
        let superior = SoundRequest::gunshot(Grade::EnemySuper, 1).key();
        assert_ne!(standard, superior);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(
            SoundRequest::gunshot(Grade::EnemyStandard, 3).key().to_string(),
            "gunshot/enemy_standard seed=3"
        );
        assert_eq!(
            SoundRequest::new(SoundKind::Heartbeat).with_bpm(63.0).key().to_string(),
            "heartbeat bpm=63"
        );
    }
}
