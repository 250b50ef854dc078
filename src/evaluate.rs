//! Per-frame posture classification.
//!
//! Everything here is pure: given the denormalized joints and a
//! threshold profile, compute discrete posture states, joint angles and
//! the camera-alignment condition. The stateful rep-counting machinery
//! lives in `session`; the only state in this module is the one-field
//! side-selection memory used for deterministic tie-breaking.

use crate::geometry::{angle, vertical_angle, Point};
use crate::landmarks::{BodyPoints, Side, SidePoints};
use crate::thresholds::ThresholdProfile;

/// Discrete posture classification for one frame.
///
/// `Undetermined` means the measured angle fell outside every profile
/// band (or the geometry was degenerate); the state machine treats it
/// as "no state change", never as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostureState {
    Normal,
    Transition,
    Pass,
    Undetermined,
}

/// Camera alignment condition for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Aligned,
    Misaligned { offset_angle: i32 },
}

/// Shoulder-to-shoulder angle about the nose against the profile's
/// offset tolerance. Degenerate geometry counts as misaligned: angles
/// cannot be trusted either way.
pub fn check_alignment(body: &BodyPoints, profile: &ThresholdProfile) -> Alignment {
    match angle(body.left.shoulder, body.right.shoulder, body.nose) {
        Some(offset) if offset <= profile.offset_thresh => Alignment::Aligned,
        Some(offset) => Alignment::Misaligned {
            offset_angle: offset,
        },
        None => Alignment::Misaligned {
            offset_angle: i32::MAX,
        },
    }
}

/// Map a knee-vertical angle to a posture state via the three disjoint
/// profile bands.
pub fn classify_knee(knee_vertical: i32, profile: &ThresholdProfile) -> PostureState {
    if profile.knee_normal.contains(knee_vertical) {
        PostureState::Normal
    } else if profile.knee_trans.contains(knee_vertical) {
        PostureState::Transition
    } else if profile.knee_pass.contains(knee_vertical) {
        PostureState::Pass
    } else {
        PostureState::Undetermined
    }
}

/// Vertical angles of the hip, knee and ankle segments for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideAngles {
    pub hip: i32,
    pub knee: i32,
    pub ankle: i32,
}

/// Compute hip/knee/ankle vertical angles for the tracked side.
/// `None` when any segment is degenerate.
pub fn side_angles(points: &SidePoints) -> Option<SideAngles> {
    let hip = vertical_angle(points.hip, points.shoulder)?;
    let knee = vertical_angle(points.knee, points.hip)?;
    let ankle = vertical_angle(points.ankle, points.knee)?;
    Some(SideAngles { hip, knee, ankle })
}

/// Drops smaller than this fraction of the larger drop count as a tie.
const SIDE_TIE_EPSILON: f32 = 1.0;

/// Picks the tracked side each frame: the side with the larger
/// shoulder-to-foot vertical drop is assumed more visible to the camera.
///
/// Remembers the previous pick so that symmetric landmarks do not make
/// the tracked side oscillate frame to frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct SideSelector {
    tracked: Option<Side>,
}

impl SideSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, body: &BodyPoints) -> Side {
        let left_drop = vertical_drop(body.left.shoulder, body.left.foot);
        let right_drop = vertical_drop(body.right.shoulder, body.right.foot);

        let side = if (left_drop - right_drop).abs() <= SIDE_TIE_EPSILON {
            // Tie: keep the previously tracked side.
            self.tracked.unwrap_or(Side::Left)
        } else if left_drop > right_drop {
            Side::Left
        } else {
            Side::Right
        };
        self.tracked = Some(side);
        side
    }
}

fn vertical_drop(shoulder: Point, foot: Point) -> f32 {
    (foot.y - shoulder.y).abs()
}
