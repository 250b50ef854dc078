//! Squat monitor strategy: the full three-state knee-angle grammar.

use std::time::Duration;

use crate::evaluate::{
    check_alignment, classify_knee, side_angles, Alignment, PostureState, SideSelector,
};
use crate::landmarks::BodyPoints;
use crate::session::flags::{FeedbackFlag, FlagSet};
use crate::session::machine::RepMachine;
use crate::session::{FrameStatus, RepStrategy};
use crate::thresholds::ThresholdProfile;

/// Evaluates squats from the side view: knee-vertical angle drives the
/// Normal/Transition/Pass grammar, hip and ankle angles drive the
/// correction flags, and the shoulder-nose geometry gates on camera
/// alignment.
#[derive(Debug, Default)]
pub struct SquatStrategy {
    selector: SideSelector,
}

impl SquatStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepStrategy for SquatStrategy {
    fn name(&self) -> &'static str {
        "squat"
    }

    fn frame(
        &mut self,
        body: &BodyPoints,
        now: Duration,
        profile: &ThresholdProfile,
        machine: &mut RepMachine,
        flags: &mut FlagSet,
    ) -> FrameStatus {
        if let Alignment::Misaligned { .. } = check_alignment(body, profile) {
            // No posture evaluation while the camera is off-axis; the
            // misalignment clock may still reset the counters.
            let sound_cue = machine.observe_misaligned(now, profile);
            return FrameStatus {
                misaligned: true,
                sound_cue,
            };
        }
        machine.clear_front_clock(now);

        let side = self.selector.select(body);
        let points = body.side(side);
        let (state, angles) = match side_angles(points) {
            Some(angles) => (classify_knee(angles.knee, profile), Some(angles)),
            None => (PostureState::Undetermined, None),
        };
        machine.update_sequence(state);

        // Correction flags apply mid-cycle; the Normal closure frame is
        // excluded so an erect torso is not read as a fault.
        if state != PostureState::Normal {
            if let Some(angles) = angles {
                if angles.hip > profile.hip_thresh[1] {
                    flags.trigger(FeedbackFlag::LeanBack);
                } else if angles.hip < profile.hip_thresh[0] && machine.transition_recorded() {
                    flags.trigger(FeedbackFlag::LeanForward);
                }

                let in_pre_pass_band = angles.knee > profile.knee_thresh[0]
                    && angles.knee < profile.knee_thresh[1];
                if in_pre_pass_band
                    && machine.transition_recorded()
                    && !machine.pass_recorded()
                {
                    flags.trigger(FeedbackFlag::LowerHips);
                } else if angles.knee > profile.knee_thresh[2] {
                    flags.trigger(FeedbackFlag::SquatTooDeep);
                    machine.mark_incorrect();
                }

                if angles.ankle > profile.ankle_thresh {
                    flags.trigger(FeedbackFlag::KneeOverToe);
                    machine.mark_incorrect();
                }
            }
        }

        // The advisory drops as soon as the pass depth is reached or
        // the body is erect again.
        if machine.pass_recorded() || state == PostureState::Normal {
            flags.clear(FeedbackFlag::LowerHips);
        }

        let sound_cue = machine.finish_frame(state, now, profile);
        flags.tick();
        FrameStatus {
            misaligned: false,
            sound_cue,
        }
    }
}
