//! Rep-counting state machine.
//!
//! Consumes the per-frame posture state plus a caller-supplied monotonic
//! timestamp and maintains the cycle sequence, the session counters and
//! the two inactivity clocks. A valid repetition is the sequence
//! Transition then Pass, closed by a return to Normal.

use std::time::Duration;

use crate::evaluate::PostureState;
use crate::session::SoundCue;
use crate::thresholds::ThresholdProfile;

/// State machine for one monitor session.
///
/// The sequence only ever takes the shapes `[]`, `[Transition]` or
/// `[Transition, Pass]`: a Transition is recorded once per cycle and a
/// Pass only after a Transition, so one descent cannot be counted twice.
#[derive(Clone, Debug)]
pub struct RepMachine {
    seq: Vec<PostureState>,
    incorrect_cycle: bool,
    good: u32,
    improper: u32,
    prev_state: Option<PostureState>,
    /// Accumulated time without a posture-state change.
    inactive: Duration,
    inactive_mark: Option<Duration>,
    /// Accumulated time spent misaligned (frontal view).
    front_inactive: Duration,
    front_mark: Option<Duration>,
}

impl RepMachine {
    pub fn new() -> Self {
        Self {
            seq: Vec::with_capacity(2),
            incorrect_cycle: false,
            good: 0,
            improper: 0,
            prev_state: None,
            inactive: Duration::ZERO,
            inactive_mark: None,
            front_inactive: Duration::ZERO,
            front_mark: None,
        }
    }

    pub fn good_reps(&self) -> u32 {
        self.good
    }

    pub fn improper_reps(&self) -> u32 {
        self.improper
    }

    /// True once a Transition has been recorded in the current cycle.
    pub fn transition_recorded(&self) -> bool {
        self.seq.contains(&PostureState::Transition)
    }

    /// True once a Pass has been recorded in the current cycle.
    pub fn pass_recorded(&self) -> bool {
        self.seq.contains(&PostureState::Pass)
    }

    /// Mark the current cycle incorrect. Cleared when the cycle closes.
    pub fn mark_incorrect(&mut self) {
        self.incorrect_cycle = true;
    }

    /// Record the frame's posture state in the cycle sequence.
    /// Normal and Undetermined never enter the sequence.
    pub fn update_sequence(&mut self, state: PostureState) {
        match state {
            PostureState::Transition if !self.transition_recorded() => {
                self.seq.push(state);
            }
            PostureState::Pass if self.transition_recorded() && !self.pass_recorded() => {
                self.seq.push(state);
            }
            _ => {}
        }
    }

    /// Close the cycle if the state is Normal, then account inactivity.
    /// Emits at most one cue; an inactivity reset takes precedence.
    pub fn finish_frame(
        &mut self,
        state: PostureState,
        now: Duration,
        profile: &ThresholdProfile,
    ) -> Option<SoundCue> {
        let mut cue = None;

        if state == PostureState::Normal {
            let clean_cycle =
                self.seq == [PostureState::Transition, PostureState::Pass];
            let aborted_descent = self.seq == [PostureState::Transition];

            if clean_cycle && !self.incorrect_cycle {
                self.good += 1;
                cue = Some(SoundCue::Counted);
            } else if aborted_descent || self.incorrect_cycle {
                self.improper += 1;
                cue = Some(SoundCue::Incorrect);
            }
            self.seq.clear();
            self.incorrect_cycle = false;
        }

        if self.prev_state == Some(state) {
            if self.accrue_inactive(now, profile) {
                cue = Some(SoundCue::ResetCounters);
            }
        } else {
            self.restart_inactive_clock(now);
        }
        self.prev_state = Some(state);
        cue
    }

    /// Account a frame with no landmark detection: the inactivity clock
    /// keeps accruing, all other transient state is dropped.
    pub fn observe_absent(
        &mut self,
        now: Duration,
        profile: &ThresholdProfile,
    ) -> Option<SoundCue> {
        let cue = self
            .accrue_inactive(now, profile)
            .then_some(SoundCue::ResetCounters);
        self.prev_state = None;
        self.incorrect_cycle = false;
        self.front_inactive = Duration::ZERO;
        self.front_mark = Some(now);
        cue
    }

    /// Account a misaligned frame. Misalignment has its own clock with
    /// the same threshold: a long-misaligned camera must also reset the
    /// counters rather than keep stale counts.
    pub fn observe_misaligned(
        &mut self,
        now: Duration,
        profile: &ThresholdProfile,
    ) -> Option<SoundCue> {
        let mark = *self.front_mark.get_or_insert(now);
        self.front_inactive += now.saturating_sub(mark);
        self.front_mark = Some(now);

        let mut cue = None;
        if self.front_inactive >= profile.inactive_thresh {
            self.good = 0;
            self.improper = 0;
            self.front_inactive = Duration::ZERO;
            cue = Some(SoundCue::ResetCounters);
        }

        // The side-view clock restarts while the camera is off-axis.
        self.restart_inactive_clock(now);
        self.prev_state = None;
        cue
    }

    /// Restart the misalignment clock once the camera is aligned again.
    pub fn clear_front_clock(&mut self, now: Duration) {
        self.front_inactive = Duration::ZERO;
        self.front_mark = Some(now);
    }

    /// Returns true when the inactivity threshold was crossed and the
    /// counters were reset.
    fn accrue_inactive(&mut self, now: Duration, profile: &ThresholdProfile) -> bool {
        let mark = *self.inactive_mark.get_or_insert(now);
        self.inactive += now.saturating_sub(mark);
        self.inactive_mark = Some(now);

        if self.inactive >= profile.inactive_thresh {
            self.good = 0;
            self.improper = 0;
            self.inactive = Duration::ZERO;
            return true;
        }
        false
    }

    fn restart_inactive_clock(&mut self, now: Duration) {
        self.inactive = Duration::ZERO;
        self.inactive_mark = Some(now);
    }
}

impl Default for RepMachine {
    fn default() -> Self {
        Self::new()
    }
}
