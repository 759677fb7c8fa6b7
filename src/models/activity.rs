// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A logged workout session. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: String,
    /// Owner email. Not an enforced reference; may match no user.
    pub user_email: String,
    /// Activity type (Running, Yoga, HIIT, etc.)
    pub activity_type: String,
    /// Duration in minutes
    pub duration: u32,
    pub calories: u32,
    /// Distance in kilometers, for distance-based activity types
    #[serde(default)]
    pub distance: Option<f64>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

/// Request body for logging an activity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewActivity {
    #[validate(email)]
    pub user_email: String,
    #[validate(length(min = 1, max = 100))]
    pub activity_type: String,
    #[validate(range(min = 1))]
    pub duration: u32,
    #[validate(range(min = 1))]
    pub calories: u32,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

impl NewActivity {
    pub fn into_activity(self) -> Activity {
        Activity {
            id: uuid::Uuid::new_v4().to_string(),
            user_email: self.user_email,
            activity_type: self.activity_type,
            duration: self.duration,
            calories: self.calories,
            distance: self.distance,
            date: self.date,
            notes: self.notes,
        }
    }
}
