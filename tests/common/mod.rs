//! Synthetic landmark builders shared by the integration tests.
//!
//! Poses are constructed in pixel space for a 640x480 frame and then
//! normalized, so the session's denormalization round-trips exactly.

#![allow(dead_code)]

use rep_kernel::{LandmarkFrame, NormalizedLandmark};

pub const FRAME_WIDTH: u32 = 640;
pub const FRAME_HEIGHT: u32 = 480;

fn norm(x: f32, y: f32) -> NormalizedLandmark {
    NormalizedLandmark::new(x / FRAME_WIDTH as f32, y / FRAME_HEIGHT as f32)
}

/// Side-view squat pose with the given vertical angles (degrees) at the
/// knee, hip and ankle. Both sides are built symmetrically with a small
/// x offset, so side selection falls back to its deterministic tie rule.
pub fn squat_frame(knee_deg: f32, hip_deg: f32, ankle_deg: f32) -> LandmarkFrame {
    chain_frame(knee_deg, hip_deg, ankle_deg, 2.0)
}

/// Clean squat pose: torso lean inside the hip bounds, shin vertical.
pub fn squat_at_knee(knee_deg: f32) -> LandmarkFrame {
    squat_frame(knee_deg, 30.0, 0.0)
}

fn chain_frame(knee_deg: f32, hip_deg: f32, ankle_deg: f32, half_gap: f32) -> LandmarkFrame {
    let build = |x0: f32| {
        let ankle = (x0, 440.0);
        let (ka_sin, ka_cos) = ankle_deg.to_radians().sin_cos();
        let knee = (ankle.0 + 110.0 * ka_sin, ankle.1 - 110.0 * ka_cos);
        let (k_sin, k_cos) = knee_deg.to_radians().sin_cos();
        let hip = (knee.0 + 120.0 * k_sin, knee.1 - 120.0 * k_cos);
        let (h_sin, h_cos) = hip_deg.to_radians().sin_cos();
        let shoulder = (hip.0 + 150.0 * h_sin, hip.1 - 150.0 * h_cos);
        let elbow = (shoulder.0 + 10.0, shoulder.1 + 60.0);
        let wrist = (elbow.0 + 5.0, elbow.1 + 50.0);
        let foot = (ankle.0 + 40.0, ankle.1 + 18.0);
        (shoulder, elbow, wrist, hip, knee, ankle, foot)
    };

    let (l_sh, l_el, l_wr, l_hip, l_kn, l_an, l_ft) = build(300.0 - half_gap);
    let (r_sh, r_el, r_wr, r_hip, r_kn, r_an, r_ft) = build(300.0 + half_gap);
    let nose = ((l_sh.0 + r_sh.0) / 2.0, (l_sh.1 + r_sh.1) / 2.0 - 70.0);

    LandmarkFrame {
        nose: norm(nose.0, nose.1),
        left_shoulder: norm(l_sh.0, l_sh.1),
        left_elbow: norm(l_el.0, l_el.1),
        left_wrist: norm(l_wr.0, l_wr.1),
        left_hip: norm(l_hip.0, l_hip.1),
        left_knee: norm(l_kn.0, l_kn.1),
        left_ankle: norm(l_an.0, l_an.1),
        left_foot: norm(l_ft.0, l_ft.1),
        right_shoulder: norm(r_sh.0, r_sh.1),
        right_elbow: norm(r_el.0, r_el.1),
        right_wrist: norm(r_wr.0, r_wr.1),
        right_hip: norm(r_hip.0, r_hip.1),
        right_knee: norm(r_kn.0, r_kn.1),
        right_ankle: norm(r_an.0, r_an.1),
        right_foot: norm(r_ft.0, r_ft.1),
    }
}

/// Frontal pose: shoulders spread wide around the nose, which puts the
/// shoulder-to-shoulder offset angle far past any profile's tolerance.
pub fn misaligned_frame() -> LandmarkFrame {
    let mut frame = squat_at_knee(10.0);
    frame.nose = norm(320.0, 60.0);
    frame.left_shoulder = norm(220.0, 100.0);
    frame.right_shoulder = norm(420.0, 100.0);
    frame
}

/// Side-view push-up plank with the elbow bent to the given interior
/// angle. `hip_drop` lowers the hip below the shoulder-knee line to
/// break the body line.
pub fn pushup_frame(elbow_deg: f32, hip_drop: f32) -> LandmarkFrame {
    let build = |y0: f32| {
        let shoulder = (200.0, 200.0 + y0);
        let hip = (320.0, 210.0 + y0 + hip_drop);
        let knee = (440.0, 220.0 + y0);
        let ankle = (560.0, 230.0 + y0);
        let foot = (580.0, 235.0 + y0);
        let elbow = (shoulder.0, shoulder.1 + 60.0);
        let theta = (180.0 - elbow_deg).to_radians();
        let wrist = (
            elbow.0 + 60.0 * theta.sin(),
            elbow.1 + 60.0 * theta.cos(),
        );
        (shoulder, elbow, wrist, hip, knee, ankle, foot)
    };

    let (l_sh, l_el, l_wr, l_hip, l_kn, l_an, l_ft) = build(-2.0);
    let (r_sh, r_el, r_wr, r_hip, r_kn, r_an, r_ft) = build(2.0);

    LandmarkFrame {
        nose: norm(150.0, 190.0),
        left_shoulder: norm(l_sh.0, l_sh.1),
        left_elbow: norm(l_el.0, l_el.1),
        left_wrist: norm(l_wr.0, l_wr.1),
        left_hip: norm(l_hip.0, l_hip.1),
        left_knee: norm(l_kn.0, l_kn.1),
        left_ankle: norm(l_an.0, l_an.1),
        left_foot: norm(l_ft.0, l_ft.1),
        right_shoulder: norm(r_sh.0, r_sh.1),
        right_elbow: norm(r_el.0, r_el.1),
        right_wrist: norm(r_wr.0, r_wr.1),
        right_hip: norm(r_hip.0, r_hip.1),
        right_knee: norm(r_kn.0, r_kn.1),
        right_ankle: norm(r_an.0, r_an.1),
        right_foot: norm(r_ft.0, r_ft.1),
    }
}
