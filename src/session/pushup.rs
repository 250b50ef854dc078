//! Push-up monitor strategy.
//!
//! Simpler than the squat grammar: the top/bottom phases come from the
//! elbow extension angle, with the wrist-to-shoulder proximity check
//! confirming the bottom position. The phases map onto the shared
//! Normal/Transition/Pass grammar so the cycle, counter and inactivity
//! machinery is identical to the squat variant.

use std::time::Duration;

use crate::evaluate::{PostureState, SideSelector};
use crate::geometry::{angle, euclidean_distance};
use crate::landmarks::{BodyPoints, SidePoints};
use crate::session::flags::{FeedbackFlag, FlagSet};
use crate::session::machine::RepMachine;
use crate::session::{FrameStatus, RepStrategy};
use crate::thresholds::ThresholdProfile;

/// Evaluates push-ups from the side view. There is no frontal
/// misalignment gate: a push-up is unmeasurable from the front to begin
/// with, and the inactivity clock covers a bad camera angle.
#[derive(Debug, Default)]
pub struct PushUpStrategy {
    selector: SideSelector,
}

impl PushUpStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Map arm extension to the shared grammar: extended arm = Normal (top),
/// confirmed bottom = Pass, anything in between = Transition.
fn arm_state(points: &SidePoints, profile: &ThresholdProfile) -> PostureState {
    let Some(elbow) = angle(points.shoulder, points.wrist, points.elbow) else {
        return PostureState::Undetermined;
    };

    if elbow >= profile.arm_extended_min {
        return PostureState::Normal;
    }
    if elbow <= profile.arm_flexed_max && bottom_confirmed(points, profile) {
        return PostureState::Pass;
    }
    PostureState::Transition
}

/// The bottom position requires the wrist close to the shoulder,
/// measured against torso length to stay scale-invariant.
fn bottom_confirmed(points: &SidePoints, profile: &ThresholdProfile) -> bool {
    let torso = euclidean_distance(points.shoulder, points.hip);
    if torso <= f32::EPSILON {
        return false;
    }
    let reach = euclidean_distance(points.wrist, points.shoulder);
    reach / torso <= profile.wrist_shoulder_ratio
}

impl RepStrategy for PushUpStrategy {
    fn name(&self) -> &'static str {
        "push_up"
    }

    fn frame(
        &mut self,
        body: &BodyPoints,
        now: Duration,
        profile: &ThresholdProfile,
        machine: &mut RepMachine,
        flags: &mut FlagSet,
    ) -> FrameStatus {
        let side = self.selector.select(body);
        let points = body.side(side);

        let state = arm_state(points, profile);
        machine.update_sequence(state);

        if state != PostureState::Normal {
            if let Some(line) = angle(points.shoulder, points.knee, points.hip) {
                if line < profile.body_line_min {
                    flags.trigger(FeedbackFlag::BodyOutOfLine);
                    machine.mark_incorrect();
                }
            }
        }

        let sound_cue = machine.finish_frame(state, now, profile);
        flags.tick();
        FrameStatus {
            misaligned: false,
            sound_cue,
        }
    }
}
