use crate::error::ScoringError;
use hound::{SampleFormat, WavReader};
use log::debug;
use std::path::Path;

/// Mono PCM audio with samples on a [-1, 1] scale.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub sample_rate_hz: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate_hz: u32) -> Self {
        Self {
            samples,
            sample_rate_hz,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate_hz == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate_hz as f64
    }

    /// Load a WAV file, averaging channels down to mono.
    pub fn from_wav<P: AsRef<Path>>(path: P) -> Result<Self, ScoringError> {
        let mut reader =
            WavReader::open(path.as_ref()).map_err(|e| ScoringError::audio("open wav", e))?;
        let spec = reader.spec();
        debug!("loading {:?}, spec: {:?}", path.as_ref(), spec);

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| ScoringError::audio("read float samples", e))?,
            SampleFormat::Int => {
                let scale = match spec.bits_per_sample {
                    8 => i8::MAX as f32,
                    16 => i16::MAX as f32,
                    24 => 8_388_607.0,
                    32 => i32::MAX as f32,
                    bits => {
                        debug!("unsupported bit depth: {bits}");
                        return Err(ScoringError::audio(
                            "read int samples",
                            hound::Error::Unsupported,
                        ));
                    }
                };
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|sample| sample as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| ScoringError::audio("read int samples", e))?
            }
        };

        let channels = usize::from(spec.channels.max(1));
        let samples = if channels == 1 {
            interleaved
        } else {
            interleaved
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
                .collect()
        };

        debug!("loaded {} mono samples at {}Hz", samples.len(), spec.sample_rate);
        Ok(Self::new(samples, spec.sample_rate))
    }
}
