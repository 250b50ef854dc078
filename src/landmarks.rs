//! Body landmark types.
//!
//! A `LandmarkFrame` is the per-frame output of the external pose
//! estimator: normalized coordinates for a closed set of joints. It is
//! created and dropped every frame; nothing in the kernel holds on to
//! landmark data across frames.

use serde::Deserialize;

use crate::geometry::Point;

/// Tracked side of the body. Side selection happens every frame; the
/// side facing the camera (larger shoulder-to-foot drop) wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// The closed set of joints the kernel consumes.
///
/// Indices follow the MediaPipe pose model (nose 0, shoulders 11/12,
/// elbows 13/14, wrists 15/16, hips 23/24, knees 25/26, ankles 27/28,
/// feet 31/32).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Joint {
    Nose,
    Shoulder(Side),
    Elbow(Side),
    Wrist(Side),
    Hip(Side),
    Knee(Side),
    Ankle(Side),
    Foot(Side),
}

impl Joint {
    pub fn pose_index(self) -> usize {
        use Side::{Left, Right};
        match self {
            Joint::Nose => 0,
            Joint::Shoulder(Left) => 11,
            Joint::Shoulder(Right) => 12,
            Joint::Elbow(Left) => 13,
            Joint::Elbow(Right) => 14,
            Joint::Wrist(Left) => 15,
            Joint::Wrist(Right) => 16,
            Joint::Hip(Left) => 23,
            Joint::Hip(Right) => 24,
            Joint::Knee(Left) => 25,
            Joint::Knee(Right) => 26,
            Joint::Ankle(Left) => 27,
            Joint::Ankle(Right) => 28,
            Joint::Foot(Left) => 31,
            Joint::Foot(Right) => 32,
        }
    }
}

/// A single landmark in normalized image coordinates (both axes 0..=1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
}

impl NormalizedLandmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn denormalize(self, width: u32, height: u32) -> Point {
        Point::new(self.x * width as f32, self.y * height as f32)
    }
}

/// One frame of pose landmarks from the external estimator.
///
/// Derives `Deserialize` so recorded traces can be replayed from JSONL
/// in tests and the demo binary.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct LandmarkFrame {
    pub nose: NormalizedLandmark,
    pub left_shoulder: NormalizedLandmark,
    pub left_elbow: NormalizedLandmark,
    pub left_wrist: NormalizedLandmark,
    pub left_hip: NormalizedLandmark,
    pub left_knee: NormalizedLandmark,
    pub left_ankle: NormalizedLandmark,
    pub left_foot: NormalizedLandmark,
    pub right_shoulder: NormalizedLandmark,
    pub right_elbow: NormalizedLandmark,
    pub right_wrist: NormalizedLandmark,
    pub right_hip: NormalizedLandmark,
    pub right_knee: NormalizedLandmark,
    pub right_ankle: NormalizedLandmark,
    pub right_foot: NormalizedLandmark,
}

impl LandmarkFrame {
    /// Build a frame from a raw pose-model landmark array, picking out
    /// the joints the kernel consumes by their model index. Returns
    /// `None` when the array is too short to cover the joint set.
    pub fn from_pose_array(landmarks: &[NormalizedLandmark]) -> Option<Self> {
        use Side::{Left, Right};
        let at = |joint: Joint| landmarks.get(joint.pose_index()).copied();
        Some(Self {
            nose: at(Joint::Nose)?,
            left_shoulder: at(Joint::Shoulder(Left))?,
            left_elbow: at(Joint::Elbow(Left))?,
            left_wrist: at(Joint::Wrist(Left))?,
            left_hip: at(Joint::Hip(Left))?,
            left_knee: at(Joint::Knee(Left))?,
            left_ankle: at(Joint::Ankle(Left))?,
            left_foot: at(Joint::Foot(Left))?,
            right_shoulder: at(Joint::Shoulder(Right))?,
            right_elbow: at(Joint::Elbow(Right))?,
            right_wrist: at(Joint::Wrist(Right))?,
            right_hip: at(Joint::Hip(Right))?,
            right_knee: at(Joint::Knee(Right))?,
            right_ankle: at(Joint::Ankle(Right))?,
            right_foot: at(Joint::Foot(Right))?,
        })
    }

    /// Denormalize against the frame dimensions into pixel-space points.
    pub fn denormalize(&self, width: u32, height: u32) -> BodyPoints {
        let d = |lm: NormalizedLandmark| lm.denormalize(width, height);
        BodyPoints {
            nose: d(self.nose),
            left: SidePoints {
                shoulder: d(self.left_shoulder),
                elbow: d(self.left_elbow),
                wrist: d(self.left_wrist),
                hip: d(self.left_hip),
                knee: d(self.left_knee),
                ankle: d(self.left_ankle),
                foot: d(self.left_foot),
            },
            right: SidePoints {
                shoulder: d(self.right_shoulder),
                elbow: d(self.right_elbow),
                wrist: d(self.right_wrist),
                hip: d(self.right_hip),
                knee: d(self.right_knee),
                ankle: d(self.right_ankle),
                foot: d(self.right_foot),
            },
        }
    }
}

/// Pixel-space joints for one side of the body.
#[derive(Clone, Copy, Debug, Default)]
pub struct SidePoints {
    pub shoulder: Point,
    pub elbow: Point,
    pub wrist: Point,
    pub hip: Point,
    pub knee: Point,
    pub ankle: Point,
    pub foot: Point,
}

/// All pixel-space joints for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyPoints {
    pub nose: Point,
    pub left: SidePoints,
    pub right: SidePoints,
}

impl BodyPoints {
    pub fn side(&self, side: Side) -> &SidePoints {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_indices_match_mediapipe() {
        assert_eq!(Joint::Nose.pose_index(), 0);
        assert_eq!(Joint::Shoulder(Side::Left).pose_index(), 11);
        assert_eq!(Joint::Knee(Side::Right).pose_index(), 26);
        assert_eq!(Joint::Foot(Side::Right).pose_index(), 32);
    }

    #[test]
    fn from_pose_array_picks_joints_by_model_index() {
        let mut raw = vec![NormalizedLandmark::default(); 33];
        raw[0] = NormalizedLandmark::new(0.5, 0.1);
        raw[26] = NormalizedLandmark::new(0.55, 0.7);
        raw[32] = NormalizedLandmark::new(0.6, 0.95);

        let frame = LandmarkFrame::from_pose_array(&raw).expect("full array");
        assert_eq!(frame.nose, NormalizedLandmark::new(0.5, 0.1));
        assert_eq!(frame.right_knee, NormalizedLandmark::new(0.55, 0.7));
        assert_eq!(frame.right_foot, NormalizedLandmark::new(0.6, 0.95));
    }

    #[test]
    fn from_pose_array_rejects_truncated_input() {
        let raw = vec![NormalizedLandmark::default(); 20];
        assert!(LandmarkFrame::from_pose_array(&raw).is_none());
    }

    #[test]
    fn denormalize_scales_by_frame_dimensions() {
        let frame = LandmarkFrame {
            left_knee: NormalizedLandmark::new(0.5, 0.25),
            ..LandmarkFrame::default()
        };
        let body = frame.denormalize(640, 480);
        assert_eq!(body.left.knee.x, 320.0);
        assert_eq!(body.left.knee.y, 120.0);
    }

    #[test]
    fn frame_deserializes_from_json() {
        let raw = r#"{
            "nose": {"x": 0.5, "y": 0.1},
            "left_shoulder": {"x": 0.45, "y": 0.3},
            "left_elbow": {"x": 0.4, "y": 0.4},
            "left_wrist": {"x": 0.4, "y": 0.5},
            "left_hip": {"x": 0.45, "y": 0.55},
            "left_knee": {"x": 0.45, "y": 0.7},
            "left_ankle": {"x": 0.45, "y": 0.9},
            "left_foot": {"x": 0.5, "y": 0.95},
            "right_shoulder": {"x": 0.55, "y": 0.3},
            "right_elbow": {"x": 0.6, "y": 0.4},
            "right_wrist": {"x": 0.6, "y": 0.5},
            "right_hip": {"x": 0.55, "y": 0.55},
            "right_knee": {"x": 0.55, "y": 0.7},
            "right_ankle": {"x": 0.55, "y": 0.9},
            "right_foot": {"x": 0.6, "y": 0.95}
        }"#;
        let frame: LandmarkFrame = serde_json::from_str(raw).expect("parse frame");
        assert!((frame.right_ankle.y - 0.9).abs() < f32::EPSILON);
    }
}
