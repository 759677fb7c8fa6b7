//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TEAMS: &str = "teams";
    pub const ACTIVITIES: &str = "activities";
    /// Derived per-user aggregates, keyed by user email
    pub const LEADERBOARD: &str = "leaderboard";
    pub const WORKOUTS: &str = "workouts";

    /// Every collection, in the order the seed program clears them.
    pub const ALL: [&str; 5] = [ACTIVITIES, LEADERBOARD, USERS, TEAMS, WORKOUTS];
}
