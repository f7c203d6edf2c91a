use crate::error::ScoringError;
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which word aligner the pronunciation scorer uses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlignerKind {
    #[default]
    Positional,
    EditDistance,
}

/// Longest analysis frame; the hop may not exceed the frame.
pub const MAX_FRAME_MS: f64 = 1000.0;

/// Tunable thresholds for the scoring engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// RMS energy below which a frame counts as silent, on a [-1, 1] amplitude scale.
    pub silence_threshold: f32,
    pub min_pause_secs: f64,
    pub frame_ms: f64,
    pub hop_ms: f64,
    /// Word similarity strictly below this marks the word as mispronounced.
    pub mispronounced_below: f64,
    pub optimal_rate_min_wpm: f64,
    pub optimal_rate_max_wpm: f64,
    pub slow_rate_wpm: f64,
    pub fast_rate_wpm: f64,
    pub pause_hint_count: usize,
    pub aligner: AlignerKind,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            silence_threshold: 0.01,
            min_pause_secs: 0.3,
            frame_ms: 25.0,
            hop_ms: 10.0,
            mispronounced_below: 70.0,
            optimal_rate_min_wpm: 120.0,
            optimal_rate_max_wpm: 180.0,
            slow_rate_wpm: 100.0,
            fast_rate_wpm: 200.0,
            pause_hint_count: 3,
            aligner: AlignerKind::Positional,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(self.silence_threshold.is_finite()
            && self.silence_threshold > 0.0
            && self.silence_threshold <= 1.0)
        {
            return Err(ScoringError::invalid_setting(
                "silence_threshold",
                format!("{} is not in (0, 1]", self.silence_threshold),
            ));
        }
        positive("min_pause_secs", self.min_pause_secs)?;
        positive("frame_ms", self.frame_ms)?;
        positive("hop_ms", self.hop_ms)?;
        if self.frame_ms > MAX_FRAME_MS {
            return Err(ScoringError::invalid_setting(
                "frame_ms",
                format!("{}ms exceeds the {MAX_FRAME_MS}ms limit", self.frame_ms),
            ));
        }
        if self.hop_ms > self.frame_ms {
            return Err(ScoringError::invalid_setting(
                "hop_ms",
                format!("hop {}ms exceeds frame {}ms", self.hop_ms, self.frame_ms),
            ));
        }
        if !(0.0..=100.0).contains(&self.mispronounced_below) {
            return Err(ScoringError::invalid_setting(
                "mispronounced_below",
                format!("{} is not in [0, 100]", self.mispronounced_below),
            ));
        }
        positive("optimal_rate_min_wpm", self.optimal_rate_min_wpm)?;
        positive("optimal_rate_max_wpm", self.optimal_rate_max_wpm)?;
        if self.optimal_rate_min_wpm > self.optimal_rate_max_wpm {
            return Err(ScoringError::invalid_setting(
                "optimal_rate_min_wpm",
                "optimal rate window is inverted",
            ));
        }
        positive("slow_rate_wpm", self.slow_rate_wpm)?;
        positive("fast_rate_wpm", self.fast_rate_wpm)?;
        if self.slow_rate_wpm >= self.fast_rate_wpm {
            return Err(ScoringError::invalid_setting(
                "slow_rate_wpm",
                "slow hint threshold must be below the fast hint threshold",
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ScoringError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScoringError::invalid_setting(
            field,
            format!("{value} must be a positive number"),
        ))
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<ScoringConfig, ScoringError>;
    fn save(&self, cfg: &ScoringConfig) -> Result<(), ScoringError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "recite") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("recite_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// A missing file yields the defaults; a file that exists but does not parse is an error.
    fn load(&self) -> Result<ScoringConfig, ScoringError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", self.path.display());
                return Ok(ScoringConfig::default());
            }
            Err(e) => return Err(ScoringError::io("read config", e)),
        };
        serde_json::from_slice::<ScoringConfig>(&bytes)
            .map_err(|e| ScoringError::json("parse config", e))
    }

    fn save(&self, cfg: &ScoringConfig) -> Result<(), ScoringError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScoringError::io("create config dir", e))?;
        }
        let data =
            serde_json::to_vec_pretty(cfg).map_err(|e| ScoringError::json("encode config", e))?;
        fs::write(&self.path, data).map_err(|e| ScoringError::io("write config", e))
    }
}
