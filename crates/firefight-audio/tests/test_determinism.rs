//! Determinism, range and distinctness across every synthesizer.

use firefight_audio::{generate, Grade, SampleBuffer, SoundKind, SoundRequest, SynthConfig};
use pretty_assertions::assert_eq;

fn render(request: &SoundRequest) -> SampleBuffer {
    generate(request, &SynthConfig::default()).expect("request renders")
}

fn catalogue() -> Vec<SoundRequest> {
    let mut requests: Vec<SoundRequest> = Grade::ALL
        .into_iter()
        .map(|grade| SoundRequest::gunshot(grade, 17))
        .collect();
    requests.push(SoundRequest::new(SoundKind::ShellCasing));
    requests.push(SoundRequest::new(SoundKind::Groan).with_seed(5));
    requests.push(SoundRequest::new(SoundKind::Heartbeat));
    requests.push(SoundRequest::new(SoundKind::Breathing));
    requests.push(SoundRequest::new(SoundKind::Music).with_duration(4.0));
    requests
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_request_same_samples() {
    for request in catalogue() {
        let a = render(&request);
        let b = render(&request);
        assert_eq!(a.len(), b.len(), "{}", request);
        assert!(a == b, "{} is not reproducible", request);
    }
}

#[test]
fn test_wav_bytes_are_reproducible() {
    let request = SoundRequest::gunshot(Grade::Player, 42);
    let a = firefight_audio::WavResult::from_buffer(&render(&request));
    let b = firefight_audio::WavResult::from_buffer(&render(&request));
    assert_eq!(a.pcm_hash, b.pcm_hash);
    assert!(a.wav_data == b.wav_data);
}

// ============================================================================
// Range
// ============================================================================

#[test]
fn test_every_sample_in_range() {
    for request in catalogue() {
        let buffer = render(&request);
        assert_eq!(buffer.channels(), 1);
        assert!(
            buffer
                .as_slice()
                .iter()
                .all(|s| s.is_finite() && (-1.0..=1.0).contains(s)),
            "{} left [-1, 1]",
            request
        );
        assert!(buffer.peak() > 0.0, "{} is silent", request);
    }
}

// ============================================================================
// Distinctness
// ============================================================================

#[test]
fn test_grades_differ_for_same_seed() {
    let config = SynthConfig::default();
    let standard =
        firefight_audio::synthesis::gunshot::synthesize(Grade::EnemyStandard, 7, &config)
            .expect("renders");
    let superior = firefight_audio::synthesis::gunshot::synthesize(Grade::EnemySuper, 7, &config)
        .expect("renders");
    assert!(standard != superior);
    assert!(superior.len() > standard.len());
}

#[test]
fn test_seeds_differ() {
    let a = render(&SoundRequest::gunshot(Grade::EnemyStandard, 1));
    let b = render(&SoundRequest::gunshot(Grade::EnemyStandard, 2));
    assert!(a != b);

    let g1 = render(&SoundRequest::new(SoundKind::Groan).with_seed(1));
    let g2 = render(&SoundRequest::new(SoundKind::Groan).with_seed(2));
    assert!(g1 != g2);
}

#[test]
fn test_super_and_standard_actor_do_not_collide() {
    // A super soldier with id 1 must not reuse the standard rifle seeded 1000.
    let superior = SoundRequest::gunshot(Grade::EnemySuper, 1);
    let standard = SoundRequest::gunshot(Grade::EnemyStandard, 1);
    assert_eq!(superior.resolved_seed(), Some(1000));
    assert_eq!(standard.resolved_seed(), Some(1));
}
