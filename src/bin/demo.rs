//! demo - synthetic end-to-end run for the Repetition Kernel
//!
//! Drives a monitor session without camera hardware: either a generated
//! squat trace (parametric knee-angle sweep) or a recorded JSONL
//! landmark trace, one entry per line. A trace line is `null` (no
//! detection), a named-field frame object, or a raw pose-model landmark
//! array as dumped by the estimator.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use rep_kernel::{LandmarkFrame, NormalizedLandmark, SessionConfig, SoundCue};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of synthetic squat repetitions to generate.
    #[arg(long, default_value_t = 5)]
    reps: u32,
    /// Frames per second of the synthetic trace.
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Replay a JSONL landmark trace instead of generating one.
    #[arg(long)]
    trace: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.fps == 0 {
        return Err(anyhow!("fps must be >= 1"));
    }

    let config = SessionConfig::load()?;
    let mut session = config.build_session()?;
    log::info!(
        "session: {} ({} profile, {}x{})",
        session.strategy_name(),
        config.profile_key,
        config.frame_width,
        config.frame_height
    );

    let frames: Vec<Option<LandmarkFrame>> = match &args.trace {
        Some(path) => read_trace(path)?,
        None => synthetic_squat_trace(args.reps, args.fps),
    };

    let frame_interval = Duration::from_secs(1) / args.fps;
    let mut cues = 0u32;
    for (index, frame) in frames.iter().enumerate() {
        let now = frame_interval * index as u32;
        let outcome = session.process(frame.as_ref(), now);

        if let Some(cue) = outcome.sound_cue {
            cues += 1;
            match cue {
                SoundCue::Counted => log::info!(
                    "rep counted (good: {}, improper: {})",
                    outcome.good_reps,
                    outcome.improper_reps
                ),
                SoundCue::Incorrect => log::warn!(
                    "improper rep (good: {}, improper: {})",
                    outcome.good_reps,
                    outcome.improper_reps
                ),
                SoundCue::ResetCounters => log::warn!("counters reset (inactivity)"),
            }
        }
        for flag in &outcome.feedback {
            log::debug!("feedback: {}", flag.message());
        }
    }

    log::info!(
        "done: {} frames, {} cues, good {} / improper {}",
        frames.len(),
        cues,
        session.good_reps(),
        session.improper_reps()
    );
    Ok(())
}

fn read_trace(path: &str) -> Result<Vec<Option<LandmarkFrame>>> {
    let file = File::open(path).with_context(|| format!("failed to open trace {path}"))?;
    let mut frames = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame =
            parse_frame(&line).with_context(|| format!("invalid frame on line {}", line_no + 1))?;
        frames.push(frame);
    }
    Ok(frames)
}

/// Accepts `null`, a named-field frame object, or a raw pose-model
/// landmark array (indexed per the model's layout).
fn parse_frame(line: &str) -> Result<Option<LandmarkFrame>> {
    if line.trim_start().starts_with('[') {
        let raw: Vec<NormalizedLandmark> = serde_json::from_str(line)?;
        let frame = LandmarkFrame::from_pose_array(&raw)
            .ok_or_else(|| anyhow!("pose array has only {} landmarks", raw.len()))?;
        return Ok(Some(frame));
    }
    Ok(serde_json::from_str(line)?)
}

/// Sweep the knee-vertical angle erect -> deep -> erect once per rep.
fn synthetic_squat_trace(reps: u32, fps: u32) -> Vec<Option<LandmarkFrame>> {
    let frames_per_rep = (fps * 2).max(8);
    let mut frames = Vec::new();
    for _ in 0..reps {
        for step in 0..frames_per_rep {
            let phase = step as f32 / frames_per_rep as f32;
            // 10 degrees erect, 85 degrees at the bottom of the squat.
            let knee = 10.0 + 75.0 * (phase * std::f32::consts::PI).sin();
            frames.push(Some(squat_pose(knee)));
        }
    }
    // Finish erect so the last cycle closes.
    frames.push(Some(squat_pose(10.0)));
    frames
}

/// Side-view squat pose at the given knee-vertical angle, torso lean
/// and shin kept inside the correction bounds.
fn squat_pose(knee_deg: f32) -> LandmarkFrame {
    const WIDTH: f32 = 640.0;
    const HEIGHT: f32 = 480.0;
    let norm = |x: f32, y: f32| NormalizedLandmark::new(x / WIDTH, y / HEIGHT);

    let build = |x0: f32| {
        let ankle = (x0, 440.0);
        let knee = (ankle.0, ankle.1 - 110.0);
        let (k_sin, k_cos) = knee_deg.to_radians().sin_cos();
        let hip = (knee.0 + 120.0 * k_sin, knee.1 - 120.0 * k_cos);
        let lean = 30.0_f32.to_radians();
        let shoulder = (hip.0 + 150.0 * lean.sin(), hip.1 - 150.0 * lean.cos());
        let elbow = (shoulder.0 + 10.0, shoulder.1 + 60.0);
        let wrist = (elbow.0 + 5.0, elbow.1 + 50.0);
        let foot = (ankle.0 + 40.0, ankle.1 + 18.0);
        (shoulder, elbow, wrist, hip, knee, ankle, foot)
    };

    let (l_sh, l_el, l_wr, l_hip, l_kn, l_an, l_ft) = build(298.0);
    let (r_sh, r_el, r_wr, r_hip, r_kn, r_an, r_ft) = build(302.0);
    let nose = ((l_sh.0 + r_sh.0) / 2.0, l_sh.1 - 70.0);

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
