//! Correction feedback flags with frame persistence.
//!
//! A trigger activates a flag; the flag stays displayed for
//! `cnt_frame_thresh` frames after its most recent trigger so feedback
//! does not flicker with noisy landmarks.

/// Named posture faults and advisories surfaced to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackFlag {
    /// Hip-vertical angle above the upper hip bound.
    LeanBack,
    /// Hip-vertical angle below the lower hip bound mid-cycle.
    LeanForward,
    /// Advisory: knee is in the pre-pass band, descend further.
    LowerHips,
    /// Knee-vertical angle beyond the pass band; marks the cycle
    /// incorrect.
    SquatTooDeep,
    /// Ankle-vertical angle beyond tolerance; marks the cycle incorrect.
    KneeOverToe,
    /// Push-up body line broken (hips sagging or piked); marks the
    /// cycle incorrect.
    BodyOutOfLine,
}

impl FeedbackFlag {
    pub const ALL: [FeedbackFlag; 6] = [
        FeedbackFlag::LeanBack,
        FeedbackFlag::LeanForward,
        FeedbackFlag::LowerHips,
        FeedbackFlag::SquatTooDeep,
        FeedbackFlag::KneeOverToe,
        FeedbackFlag::BodyOutOfLine,
    ];

    /// Overlay message for the rendering collaborator.
    pub fn message(self) -> &'static str {
        match self {
            FeedbackFlag::LeanBack => "leaning back",
            FeedbackFlag::LeanForward => "leaning forward",
            FeedbackFlag::LowerHips => "lower your hips",
            FeedbackFlag::SquatTooDeep => "squat too deep",
            FeedbackFlag::KneeOverToe => "knee past toe",
            FeedbackFlag::BodyOutOfLine => "keep your body straight",
        }
    }

    fn index(self) -> usize {
        match self {
            FeedbackFlag::LeanBack => 0,
            FeedbackFlag::LeanForward => 1,
            FeedbackFlag::LowerHips => 2,
            FeedbackFlag::SquatTooDeep => 3,
            FeedbackFlag::KneeOverToe => 4,
            FeedbackFlag::BodyOutOfLine => 5,
        }
    }
}

/// Fixed-size flag set, one persistence counter per fault.
#[derive(Clone, Debug)]
pub struct FlagSet {
    active: [bool; FeedbackFlag::ALL.len()],
    counters: [u32; FeedbackFlag::ALL.len()],
    persist_frames: u32,
}

impl FlagSet {
    pub fn new(persist_frames: u32) -> Self {
        Self {
            active: [false; FeedbackFlag::ALL.len()],
            counters: [0; FeedbackFlag::ALL.len()],
            persist_frames,
        }
    }

    /// Raise a flag, restarting its persistence window.
    pub fn trigger(&mut self, flag: FeedbackFlag) {
        let i = flag.index();
        self.active[i] = true;
        self.counters[i] = 0;
    }

    /// Advance persistence counters by one frame; flags whose counter
    /// exceeds the threshold without a re-trigger are cleared.
    pub fn tick(&mut self) {
        for i in 0..FeedbackFlag::ALL.len() {
            if self.active[i] {
                self.counters[i] += 1;
                if self.counters[i] > self.persist_frames {
                    self.active[i] = false;
                    self.counters[i] = 0;
                }
            }
        }
    }

    /// Drop one flag immediately (used for the advisory `LowerHips`
    /// once the pass depth is reached).
    pub fn clear(&mut self, flag: FeedbackFlag) {
        let i = flag.index();
        self.active[i] = false;
        self.counters[i] = 0;
    }

    /// Drop all flags (no-detection frames).
    pub fn clear_all(&mut self) {
        self.active = [false; FeedbackFlag::ALL.len()];
        self.counters = [0; FeedbackFlag::ALL.len()];
    }

    pub fn is_active(&self, flag: FeedbackFlag) -> bool {
        self.active[flag.index()]
    }

    /// Currently displayed flags, in declaration order.
    pub fn active_flags(&self) -> Vec<FeedbackFlag> {
        FeedbackFlag::ALL
            .into_iter()
            .filter(|flag| self.active[flag.index()])
            .collect()
    }
}
