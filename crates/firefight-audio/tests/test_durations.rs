//! Buffer lengths at canonical rates.

use firefight_audio::buffer::num_samples;
use firefight_audio::{generate, Grade, SoundKind, SoundRequest, SynthConfig};
use pretty_assertions::assert_eq;

fn len_of(request: SoundRequest) -> usize {
    generate(&request, &SynthConfig::default())
        .expect("request renders")
        .len()
}

#[test]
fn test_gunshot_lengths() {
    assert_eq!(len_of(SoundRequest::gunshot(Grade::Player, 42)), 79_380);
    assert_eq!(len_of(SoundRequest::gunshot(Grade::EnemyStandard, 3)), 44_100);
    assert_eq!(len_of(SoundRequest::gunshot(Grade::EnemySuper, 3)), 88_200);
}

#[test]
fn test_loop_lengths() {
    assert_eq!(len_of(SoundRequest::new(SoundKind::ShellCasing)), 11_025);
    assert_eq!(len_of(SoundRequest::new(SoundKind::Heartbeat)), 176_400);
    assert_eq!(
        len_of(SoundRequest::new(SoundKind::Heartbeat).with_bpm(140.0)),
        176_400
    );
    assert_eq!(len_of(SoundRequest::new(SoundKind::Breathing)), 176_400);
    assert_eq!(
        len_of(SoundRequest::new(SoundKind::Music).with_duration(2.5)),
        110_250
    );
}

#[test]
fn test_canonical_durations_match_renders() {
    for kind in SoundKind::ALL {
        if kind == SoundKind::Music {
            continue;
        }
        let request = SoundRequest::new(kind);
        let Some(expected) = kind.canonical_duration(Grade::Player) else {
            continue;
        };
        let rate = kind.canonical_sample_rate();
        assert_eq!(len_of(request), num_samples(rate, expected), "{}", kind);
    }
}

#[test]
fn test_groan_length_follows_drawn_voice() {
    use firefight_audio::synthesis::groan::{GroanParams, SAMPLE_RATE};

    for seed in 0..8 {
        let params = GroanParams::from_seed(seed);
        assert!((0.5..1.5).contains(&params.duration));
        let request = SoundRequest::new(SoundKind::Groan).with_seed(seed);
        let len = len_of(request) as i64;
        let expected = num_samples(SAMPLE_RATE, params.duration) as i64;
        assert!((len - expected).abs() <= 1);
    }
}

#[test]
fn test_sample_rate_override_scales_length() {
    let request = SoundRequest::gunshot(Grade::Player, 42);
    let buffer = generate(&request, &SynthConfig::with_sample_rate(22050)).expect("renders");
    assert_eq!(buffer.len(), 39_690);
    assert_eq!(buffer.sample_rate(), 22050);
}
