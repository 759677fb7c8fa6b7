// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod leaderboard;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::{Activity, NewActivity};
pub use leaderboard::{LeaderboardEntry, NewLeaderboardEntry};
pub use team::{NewTeam, Team, TeamPatch};
pub use user::{NewUser, User, UserPatch};
pub use workout::{Difficulty, Exercise, ExerciseTarget, NewWorkout, Workout, WorkoutPatch};

use validator::ValidationError;

// Firestore caps document ids at 1500 bytes.
const MAX_DOCUMENT_KEY_BYTES: usize = 1500;

/// Document id for a natural key such as an email or a team name.
pub fn document_key(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Whether Firestore accepts `key` as a document id.
///
/// Rejects `.`, `..`, reserved `__*__` ids, slashes and oversized ids.
pub fn is_valid_document_key(key: &str) -> bool {
    let reserved = key.len() >= 4 && key.starts_with("__") && key.ends_with("__");

    !key.is_empty()
        && key.len() <= MAX_DOCUMENT_KEY_BYTES
        && key != "."
        && key != ".."
        && !key.contains('/')
        && !reserved
}

/// Validator for fields whose value becomes a document id.
pub fn validate_document_key(value: &str) -> Result<(), ValidationError> {
    if is_valid_document_key(&document_key(value)) {
        Ok(())
    } else {
        Err(ValidationError::new("document_key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names_rejected() {
        for name in [".", "..", "__x__", "____", ""] {
            assert!(validate_document_key(name).is_err(), "{:?}", name);
        }
    }

    #[test]
    fn test_ordinary_names_accepted() {
        for name in ["Team DC", "a/b", "__init", "x__", "ironman@marvel.com", "..."] {
            assert!(validate_document_key(name).is_ok(), "{:?}", name);
        }
    }

    #[test]
    fn test_oversized_key_rejected() {
        // Four UTF-8 bytes, twelve once percent-encoded.
        let name = "\u{1F3C3}".repeat(200);
        assert!(document_key(&name).len() > MAX_DOCUMENT_KEY_BYTES);
        assert!(validate_document_key(&name).is_err());
    }
}
