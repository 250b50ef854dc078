//! Monitor sessions.
//!
//! A `MonitorSession` binds one rep-counting strategy (squat or push-up)
//! to a threshold profile and the shared counter/clock/flag machinery.
//! The caller drives it once per captured frame from its own loop; the
//! session performs no I/O and never reads a clock itself, so the whole
//! pipeline is deterministic and unit-testable.

mod flags;
mod machine;
mod pushup;
mod squat;

pub use flags::{FeedbackFlag, FlagSet};
pub use machine::RepMachine;
pub use pushup::PushUpStrategy;
pub use squat::SquatStrategy;

use std::time::Duration;

use crate::landmarks::{BodyPoints, LandmarkFrame};
use crate::thresholds::ThresholdProfile;

/// Audio cue keys for the external player, at most one per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Counted,
    Incorrect,
    ResetCounters,
}

impl SoundCue {
    pub fn key(self) -> &'static str {
        match self {
            SoundCue::Counted => "counted",
            SoundCue::Incorrect => "incorrect",
            SoundCue::ResetCounters => "reset_counters",
        }
    }
}

/// Per-frame result of a strategy pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStatus {
    pub misaligned: bool,
    pub sound_cue: Option<SoundCue>,
}

/// One exercise variant's per-frame evaluation, driving the shared
/// machinery owned by the session.
///
/// Implementations must not perform I/O or read clocks; time arrives as
/// the caller-supplied `now` and everything else is landmark geometry.
pub trait RepStrategy: Send {
    /// Strategy identifier (used for logging).
    fn name(&self) -> &'static str;

    /// Evaluate one detected frame.
    fn frame(
        &mut self,
        body: &BodyPoints,
        now: Duration,
        profile: &ThresholdProfile,
        machine: &mut RepMachine,
        flags: &mut FlagSet,
    ) -> FrameStatus;
}

/// What `process` hands back to the caller every frame.
#[derive(Clone, Debug)]
pub struct ProcessOutcome {
    pub good_reps: u32,
    pub improper_reps: u32,
    /// Currently displayed correction flags.
    pub feedback: Vec<FeedbackFlag>,
    /// At most one audio cue per frame.
    pub sound_cue: Option<SoundCue>,
    /// True while the camera-alignment check fails; the caller should
    /// display the alignment prompt and counts are frozen.
    pub misaligned: bool,
}

/// One exercise attempt: strategy + profile + counters/clocks/flags.
///
/// State is private to the session; one session per attempt, driven from
/// a single thread.
pub struct MonitorSession {
    profile: ThresholdProfile,
    strategy: Box<dyn RepStrategy>,
    machine: RepMachine,
    flags: FlagSet,
    frame_width: u32,
    frame_height: u32,
}

impl MonitorSession {
    pub fn with_strategy(
        profile: ThresholdProfile,
        strategy: Box<dyn RepStrategy>,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        let flags = FlagSet::new(profile.cnt_frame_thresh);
        Self {
            profile,
            strategy,
            machine: RepMachine::new(),
            flags,
            frame_width,
            frame_height,
        }
    }

    pub fn squat(profile: ThresholdProfile, frame_width: u32, frame_height: u32) -> Self {
        Self::with_strategy(
            profile,
            Box::new(SquatStrategy::new()),
            frame_width,
            frame_height,
        )
    }

    pub fn push_up(profile: ThresholdProfile, frame_width: u32, frame_height: u32) -> Self {
        Self::with_strategy(
            profile,
            Box::new(PushUpStrategy::new()),
            frame_width,
            frame_height,
        )
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn good_reps(&self) -> u32 {
        self.machine.good_reps()
    }

    pub fn improper_reps(&self) -> u32 {
        self.machine.improper_reps()
    }

    /// Consume one frame of landmarks (or their absence) at the given
    /// monotonic timestamp.
    ///
    /// Never fails: erratic input degrades into posture states and
    /// inactivity accrual, not errors, so the caller's frame loop cannot
    /// stall.
    pub fn process(&mut self, landmarks: Option<&LandmarkFrame>, now: Duration) -> ProcessOutcome {
        let status = match landmarks {
            Some(frame) => {
                let body = frame.denormalize(self.frame_width, self.frame_height);
                self.strategy.frame(
                    &body,
                    now,
                    &self.profile,
                    &mut self.machine,
                    &mut self.flags,
                )
            }
            None => {
                // No person in frame: transient feedback drops, the
                // inactivity clock keeps running.
                self.flags.clear_all();
                FrameStatus {
                    misaligned: false,
                    sound_cue: self.machine.observe_absent(now, &self.profile),
                }
            }
        };

        if status.sound_cue == Some(SoundCue::ResetCounters) {
            log::debug!(
                "{}: counters reset after {:?} of inactivity",
                self.strategy.name(),
                self.profile.inactive_thresh
            );
        }

        ProcessOutcome {
            good_reps: self.machine.good_reps(),
            improper_reps: self.machine.improper_reps(),
            feedback: self.flags.active_flags(),
            sound_cue: status.sound_cue,
            misaligned: status.misaligned,
        }
    }
}
