//! Exercise assignment.
//!
//! Turns the estimated body traits from the kiosk's classifiers into an
//! exercise with a target repetition count and a strictness tier. The
//! classifiers themselves are external; this module only consumes their
//! discrete labels.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};
use serde::Deserialize;

/// Supported exercise types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Squats,
    PushUps,
}

impl ExerciseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::Squats => "squats",
            ExerciseKind::PushUps => "push_ups",
        }
    }

    fn base_reps(self) -> u32 {
        match self {
            ExerciseKind::Squats => 10,
            ExerciseKind::PushUps => 5,
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "squats" => Ok(ExerciseKind::Squats),
            "push_ups" => Ok(ExerciseKind::PushUps),
            other => Err(anyhow!("unsupported exercise type '{}'", other)),
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age buckets as emitted by the external age classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgeBand {
    Y0to2,
    Y4to6,
    Y8to12,
    Y15to20,
    Y25to32,
    Y38to43,
    Y48to53,
    Y60to100,
}

impl AgeBand {
    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "0-2" => Ok(AgeBand::Y0to2),
            "4-6" => Ok(AgeBand::Y4to6),
            "8-12" => Ok(AgeBand::Y8to12),
            "15-20" => Ok(AgeBand::Y15to20),
            "25-32" => Ok(AgeBand::Y25to32),
            "38-43" => Ok(AgeBand::Y38to43),
            "48-53" => Ok(AgeBand::Y48to53),
            "60-100" => Ok(AgeBand::Y60to100),
            other => Err(anyhow!("unknown age band '{}'", other)),
        }
    }

    fn reps_modifier(self) -> f64 {
        match self {
            AgeBand::Y0to2 | AgeBand::Y4to6 | AgeBand::Y8to12 => 0.5,
            AgeBand::Y15to20 | AgeBand::Y25to32 => 1.0,
            AgeBand::Y38to43 | AgeBand::Y48to53 => 0.75,
            AgeBand::Y60to100 => 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Man,
    Woman,
}

/// Body complexion as emitted by the external body classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Complexion {
    Ectomorph,
    Mesomorph,
    Endomorph,
}

/// Traits estimated from camera frames by the external classifiers.
#[derive(Clone, Copy, Debug)]
pub struct BodyProfile {
    pub age: AgeBand,
    pub gender: Gender,
    pub complexion: Complexion,
}

/// An assigned exercise: what to do, how many reps, and which threshold
/// profile to score it with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exercise {
    pub kind: ExerciseKind,
    pub target_reps: u32,
    pub is_pro: bool,
}

impl Exercise {
    /// Threshold-profile key for the scoring session.
    pub fn profile_key(&self) -> &'static str {
        if self.is_pro {
            "pro"
        } else {
            "beginner"
        }
    }
}

/// Assign an exercise from estimated body traits.
///
/// Target reps scale the base count by age, gender and complexion
/// modifiers. Ectomorph and mesomorph builds get the pro profile, but
/// the eldest band never does, regardless of build.
pub fn assign(kind: ExerciseKind, body: &BodyProfile) -> Exercise {
    let age_modifier = body.age.reps_modifier();
    let gender_modifier = match body.gender {
        Gender::Man => 1.2,
        Gender::Woman => 1.0,
    };
    let (complexion_modifier, mut is_pro) = match body.complexion {
        Complexion::Ectomorph => (1.1, true),
        Complexion::Mesomorph => (1.0, true),
        Complexion::Endomorph => (0.9, false),
    };

    if body.age == AgeBand::Y60to100 {
        is_pro = false;
    }

    // f64 keeps 10 * 0.9 at exactly 9.0 before the truncation.
    let target_reps =
        (f64::from(kind.base_reps()) * age_modifier * gender_modifier * complexion_modifier) as u32;

    Exercise {
        kind,
        target_reps,
        is_pro,
    }
}
