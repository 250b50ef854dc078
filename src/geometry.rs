//! Pure 2-D geometry helpers for joint-angle evaluation.
//!
//! All functions are deterministic and side-effect free. Degenerate input
//! (zero-length vectors) yields `None`; callers map that to an
//! undetermined posture state instead of propagating a numeric error.

/// A point in pixel space, after denormalizing landmark coordinates
/// against the frame dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Vectors shorter than this are treated as degenerate.
const MIN_MAGNITUDE: f32 = 1e-4;

/// Angle in degrees between the vectors `p1 - reference` and
/// `p2 - reference`, in `[0, 180]`.
///
/// The normalized dot product is clamped to `[-1, 1]` before the arccos
/// to guard against floating-point domain errors. Returns `None` when
/// either vector is (near) zero-length.
pub fn angle(p1: Point, p2: Point, reference: Point) -> Option<i32> {
    let v1 = (p1.x - reference.x, p1.y - reference.y);
    let v2 = (p2.x - reference.x, p2.y - reference.y);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 < MIN_MAGNITUDE || mag2 < MIN_MAGNITUDE {
        return None;
    }

    let cos_theta = ((v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_theta.acos().to_degrees().round() as i32)
}

/// Angle between the segment `origin -> joint` and the vertical axis
/// through `origin`.
///
/// The vertical reference shares the origin's x-coordinate at y = 0
/// (image coordinates grow downward, so y = 0 points straight up).
pub fn vertical_angle(origin: Point, joint: Point) -> Option<i32> {
    angle(joint, Point::new(origin.x, 0.0), origin)
}

/// Standard 2-D Euclidean distance, used for limb-extension checks.
pub fn euclidean_distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
