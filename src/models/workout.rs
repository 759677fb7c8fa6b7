// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout catalog model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A suggested workout plan. Catalog data, not tied to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Workout {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub activity_type: String,
    pub difficulty: Difficulty,
    /// Target duration in minutes
    pub duration: u32,
    pub calories_estimate: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty {:?}, expected Easy, Medium or Hard",
                other
            )),
        }
    }
}

/// One step of a workout.
///
/// On the wire this is a flat object: `{"name", "sets"}` plus exactly one of
/// `reps`, `duration` or `distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    #[serde(flatten)]
    pub target: ExerciseTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
#[serde(untagged)]
pub enum ExerciseTarget {
    Reps { reps: u32 },
    /// Free text such as "30 seconds"
    Duration { duration: String },
    /// Free text such as "500m"
    Distance { distance: String },
}

impl Exercise {
    pub fn reps(name: &str, reps: u32, sets: u32) -> Self {
        Self {
            name: name.to_string(),
            sets,
            target: ExerciseTarget::Reps { reps },
        }
    }

    pub fn timed(name: &str, duration: &str, sets: u32) -> Self {
        Self {
            name: name.to_string(),
            sets,
            target: ExerciseTarget::Duration {
                duration: duration.to_string(),
            },
        }
    }

    pub fn distance(name: &str, distance: &str, sets: u32) -> Self {
        Self {
            name: name.to_string(),
            sets,
            target: ExerciseTarget::Distance {
                distance: distance.to_string(),
            },
        }
    }
}

/// Request body for adding a workout to the catalog.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewWorkout {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub activity_type: String,
    pub difficulty: Difficulty,
    #[validate(range(min = 1))]
    pub duration: u32,
    pub calories_estimate: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl NewWorkout {
    pub fn into_workout(self) -> Workout {
        Workout {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            activity_type: self.activity_type,
            difficulty: self.difficulty,
            duration: self.duration,
            calories_estimate: self.calories_estimate,
            exercises: self.exercises,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WorkoutPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub activity_type: Option<String>,
    pub difficulty: Option<Difficulty>,
    #[validate(range(min = 1))]
    pub duration: Option<u32>,
    pub calories_estimate: Option<u32>,
    pub exercises: Option<Vec<Exercise>>,
}

impl Workout {
    /// Overwrite every field except the id.
    pub fn replaced_by(&self, body: NewWorkout) -> Workout {
        Workout {
            id: self.id.clone(),
            ..body.into_workout()
        }
    }

    pub fn patched(&self, patch: WorkoutPatch) -> Workout {
        let mut workout = self.clone();
        if let Some(name) = patch.name {
            workout.name = name;
        }
        if let Some(description) = patch.description {
            workout.description = description;
        }
        if let Some(activity_type) = patch.activity_type {
            workout.activity_type = activity_type;
        }
        if let Some(difficulty) = patch.difficulty {
            workout.difficulty = difficulty;
        }
        if let Some(duration) = patch.duration {
            workout.duration = duration;
        }
        if let Some(calories_estimate) = patch.calories_estimate {
            workout.calories_estimate = calories_estimate;
        }
        if let Some(exercises) = patch.exercises {
            workout.exercises = exercises;
        }
        workout
    }
}
