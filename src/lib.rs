//! Repetition Kernel
//!
//! This crate implements the scoring core of the fitness kiosk: the
//! repetition-counting and posture-evaluation state machine for squats
//! and push-ups.
//!
//! # Architecture
//!
//! The kernel is a call-per-frame, single-threaded pipeline. The caller
//! owns the camera loop, the pose estimator, rendering and audio; the
//! kernel consumes one `LandmarkFrame` (or its absence) plus a monotonic
//! timestamp per frame and returns counts, feedback flags and at most
//! one sound cue. It performs no I/O and reads no clocks of its own.
//!
//! # Module Structure
//!
//! - `geometry`: pure angle/distance helpers
//! - `landmarks`: the closed joint set and per-frame landmark types
//! - `thresholds`: named profiles of angle/time bounds (beginner, pro)
//! - `evaluate`: per-frame posture classification and side selection
//! - `session`: monitor sessions, rep machine, feedback flags, cues
//! - `exercise`: exercise assignment from estimated body traits
//! - `config`: file/env session configuration

pub mod config;
pub mod evaluate;
pub mod exercise;
pub mod geometry;
pub mod landmarks;
pub mod session;
pub mod thresholds;

pub use config::SessionConfig;
pub use evaluate::{Alignment, PostureState, SideSelector};
pub use exercise::{assign, AgeBand, BodyProfile, Complexion, Exercise, ExerciseKind, Gender};
pub use geometry::{angle, euclidean_distance, vertical_angle, Point};
pub use landmarks::{BodyPoints, Joint, LandmarkFrame, NormalizedLandmark, Side, SidePoints};
pub use session::{
    FeedbackFlag, MonitorSession, ProcessOutcome, PushUpStrategy, RepMachine, RepStrategy,
    SoundCue, SquatStrategy,
};
pub use thresholds::{AngleBand, ThresholdProfile};
