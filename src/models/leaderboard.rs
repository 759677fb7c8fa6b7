// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard entry model.

use super::{document_key, validate_document_key};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Per-user aggregate, stored at `leaderboard/{user_email}`.
///
/// Derived data: the whole collection is rebuilt by the ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct LeaderboardEntry {
    /// Same as the document id, derived from `user_email`
    #[serde(rename = "_id")]
    pub id: String,
    pub user_email: String,
    /// Team name copied from the user at recompute time
    #[serde(default)]
    pub team: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_calories: u64,
    pub total_activities: u32,
    /// Minutes
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_duration: u64,
    /// 1 = most calories
    pub rank: u32,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating an entry by hand.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLeaderboardEntry {
    #[validate(email, custom(function = "validate_document_key"))]
    pub user_email: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub total_calories: u64,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub rank: u32,
}

impl NewLeaderboardEntry {
    pub fn into_entry(self, updated_at: DateTime<Utc>) -> LeaderboardEntry {
        LeaderboardEntry {
            id: entry_id(&self.user_email),
            user_email: self.user_email,
            team: self.team,
            total_calories: self.total_calories,
            total_activities: self.total_activities,
            total_duration: self.total_duration,
            rank: self.rank,
            updated_at,
        }
    }
}

/// Document id for a user's leaderboard entry.
pub fn entry_id(user_email: &str) -> String {
    document_key(user_email)
}
