mod common;

use std::time::Duration;

use rep_kernel::{
    FeedbackFlag, LandmarkFrame, MonitorSession, ProcessOutcome, SoundCue, ThresholdProfile,
};

use common::{misaligned_frame, squat_at_knee, squat_frame, FRAME_HEIGHT, FRAME_WIDTH};

const DT: Duration = Duration::from_millis(200);

fn session() -> MonitorSession {
    MonitorSession::squat(ThresholdProfile::beginner(), FRAME_WIDTH, FRAME_HEIGHT)
}

/// Feed frames at a fixed interval, returning the last outcome and
/// every emitted cue.
fn run(
    session: &mut MonitorSession,
    frames: &[Option<LandmarkFrame>],
    start: Duration,
) -> (ProcessOutcome, Vec<SoundCue>) {
    let mut cues = Vec::new();
    let mut last = None;
    for (i, frame) in frames.iter().enumerate() {
        let outcome = session.process(frame.as_ref(), start + DT * i as u32);
        cues.extend(outcome.sound_cue);
        last = Some(outcome);
    }
    (last.expect("at least one frame"), cues)
}

fn cycle(knee_bottom: f32) -> Vec<Option<LandmarkFrame>> {
    let mut frames = Vec::new();
    for knee in [10.0, 10.0, 50.0, 50.0, knee_bottom, knee_bottom, 50.0, 10.0, 10.0] {
        frames.push(Some(squat_at_knee(knee)));
    }
    frames
}

#[test]
fn clean_cycle_counts_one_good_rep() {
    let mut session = session();
    let (outcome, cues) = run(&mut session, &cycle(85.0), Duration::ZERO);
    assert_eq!(outcome.good_reps, 1);
    assert_eq!(outcome.improper_reps, 0);
    assert_eq!(cues, vec![SoundCue::Counted]);
}

#[test]
fn aborted_descent_is_improper() {
    let mut session = session();
    let frames: Vec<_> = [10.0, 50.0, 50.0, 10.0]
        .into_iter()
        .map(|knee| Some(squat_at_knee(knee)))
        .collect();
    let (outcome, cues) = run(&mut session, &frames, Duration::ZERO);
    assert_eq!(outcome.good_reps, 0);
    assert_eq!(outcome.improper_reps, 1);
    assert_eq!(cues, vec![SoundCue::Incorrect]);
}

#[test]
fn knee_over_toe_spoils_a_clean_grammar() {
    let mut session = session();
    // Pass depth reached with the shin angled past tolerance.
    let frames = vec![
        Some(squat_at_knee(10.0)),
        Some(squat_at_knee(50.0)),
        Some(squat_frame(85.0, 30.0, 50.0)),
        Some(squat_at_knee(50.0)),
        Some(squat_at_knee(10.0)),
    ];
    let (outcome, cues) = run(&mut session, &frames, Duration::ZERO);
    assert_eq!(outcome.good_reps, 0);
    assert_eq!(outcome.improper_reps, 1);
    assert_eq!(cues, vec![SoundCue::Incorrect]);
    // The fault stays displayed thanks to flag persistence.
    assert!(outcome.feedback.contains(&FeedbackFlag::KneeOverToe));
}

#[test]
fn too_deep_squat_is_improper() {
    let mut session = session();
    // Knee angle beyond the pass band midway through the cycle.
    let frames: Vec<_> = [10.0, 50.0, 85.0, 100.0, 85.0, 50.0, 10.0]
        .into_iter()
        .map(|knee| Some(squat_at_knee(knee)))
        .collect();
    let (outcome, _) = run(&mut session, &frames, Duration::ZERO);
    assert_eq!(outcome.good_reps, 0);
    assert_eq!(outcome.improper_reps, 1);
    assert!(outcome.feedback.contains(&FeedbackFlag::SquatTooDeep));
}

#[test]
fn frozen_posture_resets_counters_exactly_once() {
    let mut session = session();
    let (outcome, _) = run(&mut session, &cycle(85.0), Duration::ZERO);
    assert_eq!(outcome.good_reps, 1);

    // Hold erect for 20 seconds of frames.
    let frames: Vec<_> = (0..100).map(|_| Some(squat_at_knee(10.0))).collect();
    let (outcome, cues) = run(&mut session, &frames, Duration::from_secs(2));
    assert_eq!(outcome.good_reps, 0);
    assert_eq!(outcome.improper_reps, 0);
    let resets = cues
        .iter()
        .filter(|cue| **cue == SoundCue::ResetCounters)
        .count();
    assert_eq!(resets, 1);
}

#[test]
fn absent_detection_resets_counters() {
    let mut session = session();
    run(&mut session, &cycle(85.0), Duration::ZERO);
    assert_eq!(session.good_reps(), 1);

    let frames: Vec<Option<LandmarkFrame>> = (0..100).map(|_| None).collect();
    let (outcome, cues) = run(&mut session, &frames, Duration::from_secs(2));
    assert_eq!(outcome.good_reps, 0);
    assert!(cues.contains(&SoundCue::ResetCounters));
    assert!(outcome.feedback.is_empty());
}

#[test]
fn absent_detection_below_threshold_never_changes_counts() {
    let mut session = session();
    run(&mut session, &cycle(85.0), Duration::ZERO);

    // 10 seconds of empty frames: under the 15 second timeout.
    let frames: Vec<Option<LandmarkFrame>> = (0..50).map(|_| None).collect();
    let (outcome, cues) = run(&mut session, &frames, Duration::from_secs(2));
    assert_eq!(outcome.good_reps, 1);
    assert_eq!(outcome.improper_reps, 0);
    assert!(cues.is_empty());
}

#[test]
fn misalignment_suppresses_counting_and_recovers() {
    let mut session = session();

    // A full "cycle" of misaligned frames counts nothing.
    let frames: Vec<_> = (0..9).map(|_| Some(misaligned_frame())).collect();
    let (outcome, cues) = run(&mut session, &frames, Duration::ZERO);
    assert!(outcome.misaligned);
    assert_eq!(outcome.good_reps, 0);
    assert!(cues.is_empty());

    // Once realigned, reps count normally again.
    let (outcome, cues) = run(&mut session, &cycle(85.0), Duration::from_secs(2));
    assert!(!outcome.misaligned);
    assert_eq!(outcome.good_reps, 1);
    assert_eq!(cues, vec![SoundCue::Counted]);
}

#[test]
fn persistent_misalignment_resets_counters() {
    let mut session = session();
    run(&mut session, &cycle(85.0), Duration::ZERO);
    assert_eq!(session.good_reps(), 1);

    let frames: Vec<_> = (0..100).map(|_| Some(misaligned_frame())).collect();
    let (outcome, cues) = run(&mut session, &frames, Duration::from_secs(2));
    assert_eq!(outcome.good_reps, 0);
    let resets = cues
        .iter()
        .filter(|cue| **cue == SoundCue::ResetCounters)
        .count();
    assert_eq!(resets, 1);
}

#[test]
fn counters_accumulate_over_consecutive_cycles() {
    let mut session = session();
    let mut start = Duration::ZERO;
    for reps in 1..=3 {
        let (outcome, _) = run(&mut session, &cycle(85.0), start);
        assert_eq!(outcome.good_reps, reps);
        start += Duration::from_secs(2);
    }
}
