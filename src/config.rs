//! Session configuration.
//!
//! Loaded once at session start: defaults, then an optional TOML file
//! named by `REPKERNEL_CONFIG`, then environment overrides, then
//! validation. An unknown profile or exercise key aborts setup; nothing
//! else does.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::exercise::ExerciseKind;
use crate::session::MonitorSession;
use crate::thresholds::ThresholdProfile;

const DEFAULT_PROFILE: &str = "beginner";
const DEFAULT_EXERCISE: &str = "squats";
const DEFAULT_FRAME_WIDTH: u32 = 640;
const DEFAULT_FRAME_HEIGHT: u32 = 480;

#[derive(Debug, Deserialize, Default)]
struct SessionConfigFile {
    profile: Option<String>,
    exercise: Option<String>,
    target_reps: Option<u32>,
    frame: Option<FrameConfigFile>,
    inactive_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct FrameConfigFile {
    width: Option<u32>,
    height: Option<u32>,
}

/// Resolved session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub profile_key: String,
    pub exercise: ExerciseKind,
    /// Optional fixed rep target; when absent the kiosk derives one
    /// from the body profile via `exercise::assign`.
    pub target_reps: Option<u32>,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Overrides the profile's inactivity timeout when set.
    pub inactive_override: Option<Duration>,
}

impl SessionConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("REPKERNEL_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: SessionConfigFile) -> Result<Self> {
        let profile_key = file
            .profile
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let exercise: ExerciseKind = file
            .exercise
            .as_deref()
            .unwrap_or(DEFAULT_EXERCISE)
            .parse()?;
        let frame_width = file
            .frame
            .as_ref()
            .and_then(|frame| frame.width)
            .unwrap_or(DEFAULT_FRAME_WIDTH);
        let frame_height = file
            .frame
            .as_ref()
            .and_then(|frame| frame.height)
            .unwrap_or(DEFAULT_FRAME_HEIGHT);
        Ok(Self {
            profile_key,
            exercise,
            target_reps: file.target_reps,
            frame_width,
            frame_height,
            inactive_override: file.inactive_secs.map(Duration::from_secs),
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(profile) = std::env::var("REPKERNEL_PROFILE") {
            if !profile.trim().is_empty() {
                self.profile_key = profile;
            }
        }
        if let Ok(exercise) = std::env::var("REPKERNEL_EXERCISE") {
            if !exercise.trim().is_empty() {
                self.exercise = exercise.parse()?;
            }
        }
        if let Ok(reps) = std::env::var("REPKERNEL_TARGET_REPS") {
            let reps: u32 = reps
                .parse()
                .map_err(|_| anyhow!("REPKERNEL_TARGET_REPS must be a positive integer"))?;
            self.target_reps = Some(reps);
        }
        if let Ok(secs) = std::env::var("REPKERNEL_INACTIVE_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                anyhow!("REPKERNEL_INACTIVE_SECS must be an integer number of seconds")
            })?;
            self.inactive_override = Some(Duration::from_secs(secs));
        }
        if let Ok(width) = std::env::var("REPKERNEL_FRAME_WIDTH") {
            self.frame_width = width
                .parse()
                .map_err(|_| anyhow!("REPKERNEL_FRAME_WIDTH must be a positive integer"))?;
        }
        if let Ok(height) = std::env::var("REPKERNEL_FRAME_HEIGHT") {
            self.frame_height = height
                .parse()
                .map_err(|_| anyhow!("REPKERNEL_FRAME_HEIGHT must be a positive integer"))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        // Resolving the profile is the fail-fast check for unknown keys.
        ThresholdProfile::for_key(&self.profile_key)?;

        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(anyhow!("frame dimensions must be greater than zero"));
        }
        if self.target_reps == Some(0) {
            return Err(anyhow!("target_reps must be greater than zero"));
        }
        if self.inactive_override == Some(Duration::ZERO) {
            return Err(anyhow!("inactive_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Resolve the threshold profile, applying the inactivity override.
    pub fn thresholds(&self) -> Result<ThresholdProfile> {
        let mut profile = ThresholdProfile::for_key(&self.profile_key)?;
        if let Some(inactive) = self.inactive_override {
            profile.inactive_thresh = inactive;
        }
        Ok(profile)
    }

    /// Build the monitor session for the configured exercise.
    pub fn build_session(&self) -> Result<MonitorSession> {
        let profile = self.thresholds()?;
        Ok(match self.exercise {
            ExerciseKind::Squats => {
                MonitorSession::squat(profile, self.frame_width, self.frame_height)
            }
            ExerciseKind::PushUps => {
                MonitorSession::push_up(profile, self.frame_width, self.frame_height)
            }
        })
    }
}

fn read_config_file(path: &Path) -> Result<SessionConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = toml::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
