//! Threshold profiles.
//!
//! A profile is the named set of angle/time bounds selected once per
//! session and immutable afterwards. Two canonical profiles exist,
//! `beginner` and `pro`, differing only in numeric strictness.

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Inclusive angle range in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct AngleBand {
    pub min: i32,
    pub max: i32,
}

impl AngleBand {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(self, angle: i32) -> bool {
        (self.min..=self.max).contains(&angle)
    }
}

/// Numeric bounds for posture classification and session policy.
#[derive(Clone, Debug)]
pub struct ThresholdProfile {
    /// Knee-vertical bands mapping to the Normal/Transition/Pass states.
    pub knee_normal: AngleBand,
    pub knee_trans: AngleBand,
    pub knee_pass: AngleBand,
    /// Hip-vertical bounds: below `[0]` leaning forward, above `[1]`
    /// leaning back.
    pub hip_thresh: [i32; 2],
    /// Knee correction bounds: `(thresh[0], thresh[1])` is the advisory
    /// "lower your hips" band, above `thresh[2]` the squat is too deep.
    pub knee_thresh: [i32; 3],
    /// Ankle-vertical bound above which the knee is past the toe.
    pub ankle_thresh: i32,
    /// Shoulder-to-shoulder angle about the nose beyond which the camera
    /// is considered misaligned.
    pub offset_thresh: i32,
    /// Time without a posture-state change before counters reset.
    pub inactive_thresh: Duration,
    /// Frames a feedback flag persists after its last trigger.
    pub cnt_frame_thresh: u32,
    /// Elbow angle at or above which the arm counts as extended
    /// (push-up top position).
    pub arm_extended_min: i32,
    /// Elbow angle at or below which the push-up is at its lowest.
    pub arm_flexed_max: i32,
    /// Shoulder-hip-knee angle below which the push-up body line is
    /// broken (hips sagging or piked).
    pub body_line_min: i32,
    /// Wrist-to-shoulder distance as a fraction of torso length at or
    /// below which the push-up bottom is confirmed.
    pub wrist_shoulder_ratio: f32,
}

impl ThresholdProfile {
    pub fn beginner() -> Self {
        Self {
            knee_normal: AngleBand::new(0, 32),
            knee_trans: AngleBand::new(35, 65),
            knee_pass: AngleBand::new(70, 95),
            hip_thresh: [10, 50],
            knee_thresh: [50, 70, 95],
            ankle_thresh: 45,
            offset_thresh: 35,
            inactive_thresh: Duration::from_secs(15),
            cnt_frame_thresh: 50,
            arm_extended_min: 160,
            arm_flexed_max: 90,
            body_line_min: 160,
            wrist_shoulder_ratio: 0.6,
        }
    }

    pub fn pro() -> Self {
        Self {
            knee_pass: AngleBand::new(80, 95),
            hip_thresh: [15, 50],
            knee_thresh: [50, 80, 95],
            ankle_thresh: 30,
            arm_extended_min: 165,
            arm_flexed_max: 85,
            body_line_min: 165,
            wrist_shoulder_ratio: 0.55,
            ..Self::beginner()
        }
    }

    /// Resolve a profile by key. Unknown keys fail fast; this is the
    /// only condition that aborts session setup.
    pub fn for_key(key: &str) -> Result<Self> {
        match key {
            "beginner" => Ok(Self::beginner()),
            "pro" => Ok(Self::pro()),
            other => Err(anyhow!("unknown threshold profile '{}'", other)),
        }
    }
}
