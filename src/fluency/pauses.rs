//! Silence detection over short-time RMS energy.

use crate::audio::AudioClip;
use crate::error::ScoringError;
use crate::types::Pause;
use log::debug;

/// Finds silent stretches long enough to count as pauses.
///
/// Energy is measured over centred frames (zero-padded at the clip edges),
/// one frame per hop. A run of silent frames becomes a pause when speech
/// resumes after it; silence that runs to the end of the clip is not a pause.
#[derive(Debug, Clone)]
pub struct PauseDetector {
    /// RMS level below which a frame is silent
    silence_threshold: f32,

    /// Shortest silent run reported, in seconds
    min_pause_secs: f64,

    frame_ms: f64,
    hop_ms: f64,
}

impl PauseDetector {
    pub fn new(silence_threshold: f32, min_pause_secs: f64, frame_ms: f64, hop_ms: f64) -> Self {
        Self {
            silence_threshold,
            min_pause_secs,
            frame_ms,
            hop_ms,
        }
    }

    pub fn detect(&self, clip: &AudioClip) -> Result<Vec<Pause>, ScoringError> {
        let energy = self.frame_energy(clip)?;
        let hop_secs = self.hop_len(clip.sample_rate_hz) as f64 / clip.sample_rate_hz as f64;

        let mut pauses = Vec::new();
        let mut pause_start: Option<f64> = None;

        for (i, rms) in energy.iter().enumerate() {
            let t = i as f64 * hop_secs;
            let silent = *rms < self.silence_threshold;
            match (silent, pause_start) {
                (true, None) => pause_start = Some(t),
                (false, Some(start)) => {
                    let duration = t - start;
                    if duration >= self.min_pause_secs {
                        pauses.push(Pause {
                            start,
                            end: t,
                            duration,
                        });
                    }
                    pause_start = None;
                }
                _ => {}
            }
        }

        debug!(
            "{} pauses over {} frames ({}ms hop)",
            pauses.len(),
            energy.len(),
            self.hop_ms
        );
        Ok(pauses)
    }

    /// RMS energy per frame, `1 + len / hop` frames.
    pub fn frame_energy(&self, clip: &AudioClip) -> Result<Vec<f32>, ScoringError> {
        if clip.sample_rate_hz == 0 {
            return Err(ScoringError::processing("pause detection", "sample rate is zero"));
        }
        if clip.samples.is_empty() {
            return Err(ScoringError::processing("pause detection", "clip has no samples"));
        }
        if clip.samples.iter().any(|s| !s.is_finite()) {
            return Err(ScoringError::processing(
                "pause detection",
                "clip contains non-finite samples",
            ));
        }

        let frame_len = self.frame_len(clip.sample_rate_hz);
        let hop_len = self.hop_len(clip.sample_rate_hz);
        if frame_len == 0 || hop_len == 0 {
            return Err(ScoringError::processing(
                "pause detection",
                format!(
                    "{}Hz is too low for {}ms frames with a {}ms hop",
                    clip.sample_rate_hz, self.frame_ms, self.hop_ms
                ),
            ));
        }

        let samples = &clip.samples;
        let half = frame_len / 2;
        let n_frames = 1 + samples.len() / hop_len;

        (0..n_frames)
            .map(|i| -> Result<f32, ScoringError> {
                let centre = i * hop_len;
                let lo = centre.saturating_sub(half);
                let hi = centre
                    .checked_add(frame_len)
                    .map(|end| (end - half).min(samples.len()))
                    .ok_or_else(|| {
                        ScoringError::processing(
                            "pause detection",
                            format!("{}ms frames overflow at {}Hz", self.frame_ms, clip.sample_rate_hz),
                        )
                    })?;
                let sum_sq: f32 = if lo < hi {
                    samples[lo..hi].iter().map(|s| s * s).sum()
                } else {
                    0.0
                };
                Ok((sum_sq / frame_len as f32).sqrt())
            })
            .collect()
    }

    fn frame_len(&self, sample_rate_hz: u32) -> usize {
        (self.frame_ms * sample_rate_hz as f64 / 1000.0) as usize
    }

    fn hop_len(&self, sample_rate_hz: u32) -> usize {
        (self.hop_ms * sample_rate_hz as f64 / 1000.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const RATE: u32 = 16_000;

    fn detector() -> PauseDetector {
        PauseDetector::new(0.01, 0.3, 25.0, 10.0)
    }

    fn tone(secs: f64) -> Vec<f32> {
        let n = (secs * RATE as f64) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / RATE as f32;
                0.5 * (2.0 * std::f32::consts::PI * 220.0 * t).sin()
            })
            .collect()
    }

    fn silence(secs: f64) -> Vec<f32> {
        vec![0.0; (secs * RATE as f64) as usize]
    }

    fn clip(parts: &[Vec<f32>]) -> AudioClip {
        AudioClip::new(parts.concat(), RATE)
    }

    #[test]
    fn continuous_speech_has_no_pauses() {
        let pauses = detector().detect(&clip(&[tone(2.0)])).unwrap();
        assert!(pauses.is_empty());
    }

    #[test]
    fn long_gap_is_a_pause() {
        let pauses = detector()
            .detect(&clip(&[tone(1.0), silence(0.5), tone(1.0)]))
            .unwrap();
        assert_eq!(pauses.len(), 1);
        let p = pauses[0];
        assert!(p.start > 1.0 && p.start < 1.05, "start {}", p.start);
        assert!(p.end > 1.45 && p.end <= 1.5, "end {}", p.end);
        assert!(p.duration >= 0.3);
        assert!((p.end - p.start - p.duration).abs() < 1e-9);
    }

    #[test]
    fn short_gap_is_ignored() {
        let pauses = detector()
            .detect(&clip(&[tone(1.0), silence(0.2), tone(1.0)]))
            .unwrap();
        assert!(pauses.is_empty());
    }

    #[test]
    fn each_gap_counts_once() {
        let pauses = detector()
            .detect(&clip(&[
                tone(0.5),
                silence(0.4),
                tone(0.5),
                silence(0.6),
                tone(0.5),
            ]))
            .unwrap();
        assert_eq!(pauses.len(), 2);
        assert!(pauses[0].end <= pauses[1].start);
    }

    #[test]
    fn leading_silence_counts_but_trailing_does_not() {
        let pauses = detector()
            .detect(&clip(&[silence(0.5), tone(1.0), silence(1.0)]))
            .unwrap();
        assert_eq!(pauses.len(), 1);
        assert_eq!(pauses[0].start, 0.0);
    }

    #[test]
    fn frame_count_follows_hop() {
        // 1s at 16kHz with a 160-sample hop
        let energy = detector().frame_energy(&clip(&[tone(1.0)])).unwrap();
        assert_eq!(energy.len(), 101);
        assert!(energy.iter().all(|e| *e > 0.01));
    }

    #[test]
    fn unusable_clips_are_processing_errors() {
        let d = detector();
        assert_matches!(
            d.detect(&AudioClip::new(vec![], RATE)),
            Err(ScoringError::Processing { .. })
        );
        assert_matches!(
            d.detect(&AudioClip::new(vec![0.1; 100], 0)),
            Err(ScoringError::Processing { .. })
        );
        assert_matches!(
            d.detect(&AudioClip::new(vec![0.1, f32::NAN], RATE)),
            Err(ScoringError::Processing { .. })
        );
        // 25ms at 20Hz rounds down to a zero-length frame
        assert_matches!(
            d.detect(&AudioClip::new(vec![0.1; 100], 20)),
            Err(ScoringError::Processing { .. })
        );
    }

    #[test]
    fn oversized_frames_are_processing_errors() {
        let d = PauseDetector::new(0.01, 0.3, 1e300, 10.0);
        assert_matches!(
            d.frame_energy(&clip(&[tone(1.0)])),
            Err(ScoringError::Processing { stage: "pause detection", .. })
        );
    }
}
