// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team model.

use super::validate_document_key;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A team, stored at `teams/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Member emails. A denormalized copy of `User.team`; may drift.
    #[serde(default)]
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or replacing a team.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTeam {
    #[validate(length(min = 1, max = 200), custom(function = "validate_document_key"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl NewTeam {
    pub fn into_team(self, created_at: DateTime<Utc>) -> Team {
        Team {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            members: self.members,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TeamPatch {
    #[validate(length(min = 1, max = 200), custom(function = "validate_document_key"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub members: Option<Vec<String>>,
}

impl Team {
    /// Overwrite every editable field, keeping id and creation time.
    ///
    /// Renaming does not touch `User.team` on members.
    pub fn replaced_by(&self, body: NewTeam) -> Team {
        Team {
            id: self.id.clone(),
            name: body.name,
            description: body.description,
            members: body.members,
            created_at: self.created_at,
        }
    }

    pub fn patched(&self, patch: TeamPatch) -> Team {
        let mut team = self.clone();
        if let Some(name) = patch.name {
            team.name = name;
        }
        if let Some(description) = patch.description {
            team.description = description;
        }
        if let Some(members) = patch.members {
            team.members = members;
        }
        team
    }
}
