// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use super::validate_document_key;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// User profile stored in Firestore.
///
/// Stored at `users/{email}` so that email uniqueness is enforced by the
/// document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Team name (free text, not checked against the teams collection)
    #[serde(default)]
    pub team: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or replacing a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email, custom(function = "validate_document_key"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub team: Option<String>,
}

impl NewUser {
    /// Assign an id and creation timestamp.
    pub fn into_user(self, created_at: DateTime<Utc>) -> User {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            email: self.email,
            team: self.team.filter(|t| !t.is_empty()),
            created_at,
        }
    }
}

/// Partial update. An empty `team` clears the membership.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email, custom(function = "validate_document_key"))]
    pub email: Option<String>,
    #[validate(length(max = 200))]
    pub team: Option<String>,
}

impl User {
    /// Overwrite every editable field, keeping id and registration time.
    pub fn replaced_by(&self, body: NewUser) -> User {
        User {
            id: self.id.clone(),
            name: body.name,
            email: body.email,
            team: body.team.filter(|t| !t.is_empty()),
            created_at: self.created_at,
        }
    }

    pub fn patched(&self, patch: UserPatch) -> User {
        let mut user = self.clone();
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(team) = patch.team {
            user.team = Some(team).filter(|t| !t.is_empty());
        }
        user
    }
}
