// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard ranking.
//!
//! Aggregates every activity per user, sorts users by total calories and
//! assigns dense ranks `1..=N`. The whole board is rebuilt on each run:
//! 1. Read all users and all activities
//! 2. Compute entries in memory
//! 3. Replace the `leaderboard` collection in one write pass

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::leaderboard::entry_id;
use crate::models::{Activity, LeaderboardEntry, User};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Errors from malformed aggregation input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RankingError {
    #[error("total {field} overflowed for {user_email}")]
    TotalOverflow {
        user_email: String,
        field: &'static str,
    },

    #[error("too many users to rank: {0}")]
    TooManyUsers(usize),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Totals {
    calories: u64,
    duration: u64,
    activities: u32,
}

impl Totals {
    fn add(&mut self, activity: &Activity) -> Result<(), RankingError> {
        let overflow = |field| RankingError::TotalOverflow {
            user_email: activity.user_email.clone(),
            field,
        };

        self.calories = self
            .calories
            .checked_add(u64::from(activity.calories))
            .ok_or_else(|| overflow("calories"))?;
        self.duration = self
            .duration
            .checked_add(u64::from(activity.duration))
            .ok_or_else(|| overflow("duration"))?;
        self.activities = self
            .activities
            .checked_add(1)
            .ok_or_else(|| overflow("activities"))?;
        Ok(())
    }
}

/// Rank `users` by the calories summed over their `activities`.
///
/// Returns exactly one entry per user, in rank order. Users without
/// activities get zero totals. Activities whose `user_email` matches no user
/// are aggregated but produce no entry. Equal totals keep the order of
/// `users`, so each tied user still gets its own consecutive rank.
pub fn compute_leaderboard(
    users: &[User],
    activities: &[Activity],
    updated_at: DateTime<Utc>,
) -> Result<Vec<LeaderboardEntry>, RankingError> {
    if u32::try_from(users.len()).is_err() {
        return Err(RankingError::TooManyUsers(users.len()));
    }

    let mut by_email: HashMap<&str, Totals> = HashMap::new();
    for activity in activities {
        by_email
            .entry(activity.user_email.as_str())
            .or_default()
            .add(activity)?;
    }

    let mut ranked: Vec<(&User, Totals)> = users
        .iter()
        .map(|user| {
            let totals = by_email
                .get(user.email.as_str())
                .copied()
                .unwrap_or_default();
            (user, totals)
        })
        .collect();

    let known: HashSet<&str> = users.iter().map(|u| u.email.as_str()).collect();
    let orphans = by_email.keys().filter(|email| !known.contains(*email)).count();
    if orphans > 0 {
        tracing::debug!(orphans, "Activities reference unknown users");
    }

    // Stable: ties stay in input order.
    ranked.sort_by(|a, b| b.1.calories.cmp(&a.1.calories));

    Ok(ranked
        .into_iter()
        .zip(1u32..)
        .map(|((user, totals), rank)| LeaderboardEntry {
            id: entry_id(&user.email),
            user_email: user.email.clone(),
            team: user.team.clone(),
            total_calories: totals.calories,
            total_activities: totals.activities,
            total_duration: totals.duration,
            rank,
            updated_at,
        })
        .collect())
}

/// Put users in registration order, breaking equal timestamps by email.
///
/// Ranking in this order makes the earlier-registered user win a calorie tie,
/// whatever order the store returned the users in.
pub fn order_for_ranking(users: &mut [User]) {
    users.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.email.cmp(&b.email))
    });
}

/// Recomputes and persists the leaderboard.
#[derive(Clone)]
pub struct LeaderboardRanker {
    db: FirestoreDb,
}

impl LeaderboardRanker {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Rebuild the whole leaderboard from current users and activities.
    ///
    /// Nothing is written if reading or ranking fails. Users are ranked in
    /// registration order, so the earlier user wins a calorie tie.
    pub async fn recompute(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        let mut users = self.db.list_users().await?;
        let activities = self.db.list_activities(None).await?;
        order_for_ranking(&mut users);

        tracing::info!(
            users = users.len(),
            activities = activities.len(),
            "Recomputing leaderboard"
        );

        let entries = compute_leaderboard(&users, &activities, Utc::now())?;
        self.db.replace_leaderboard(&entries).await?;

        tracing::info!(entries = entries.len(), "Leaderboard replaced");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn make_user(email: &str, team: Option<&str>) -> User {
        User {
            id: format!("id-{}", email),
            name: email.split('@').next().unwrap().to_string(),
            email: email.to_string(),
            team: team.map(String::from),
            created_at: ts(),
        }
    }

    fn make_activity(email: &str, calories: u32, duration: u32) -> Activity {
        Activity {
            id: format!("{}-{}-{}", email, calories, duration),
            user_email: email.to_string(),
            activity_type: "Running".to_string(),
            duration,
            calories,
            distance: Some(5.0),
            date: ts(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_aggregates_user_totals() {
        let users = vec![make_user("a@example.com", Some("Team A"))];
        let activities = vec![
            make_activity("a@example.com", 300, 30),
            make_activity("a@example.com", 250, 45),
        ];

        let board = compute_leaderboard(&users, &activities, ts()).unwrap();

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].total_calories, 550);
        assert_eq!(board[0].total_duration, 75);
        assert_eq!(board[0].total_activities, 2);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].team.as_deref(), Some("Team A"));
        assert_eq!(board[0].id, "a%40example.com");
    }

    #[test]
    fn test_zero_activity_user_ranked_last() {
        let users = vec![
            make_user("idle@example.com", None),
            make_user("busy@example.com", None),
        ];
        let activities = vec![make_activity("busy@example.com", 100, 10)];

        let board = compute_leaderboard(&users, &activities, ts()).unwrap();

        assert_eq!(board[0].user_email, "busy@example.com");
        assert_eq!(board[1].user_email, "idle@example.com");
        assert_eq!(board[1].total_calories, 0);
        assert_eq!(board[1].total_activities, 0);
        assert_eq!(board[1].total_duration, 0);
        assert_eq!(board[1].rank, 2);
        assert_eq!(board[1].team, None);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let users = vec![
            make_user("a@example.com", None),
            make_user("b@example.com", None),
            make_user("c@example.com", None),
        ];
        let activities = vec![
            make_activity("c@example.com", 100, 10),
            make_activity("b@example.com", 900, 60),
            make_activity("a@example.com", 400, 30),
            make_activity("a@example.com", 500, 30),
        ];

        let board = compute_leaderboard(&users, &activities, ts()).unwrap();
        let order: Vec<(&str, u32)> = board
            .iter()
            .map(|e| (e.user_email.as_str(), e.rank))
            .collect();

        assert_eq!(
            order,
            vec![
                ("a@example.com", 1),
                ("b@example.com", 2),
                ("c@example.com", 3)
            ]
        );
    }

    #[test]
    fn test_earlier_registration_wins_tie() {
        let mut early = make_user("zed@example.com", None);
        early.created_at = ts() - chrono::Duration::days(2);
        let mut late = make_user("amy@example.com", None);
        late.created_at = ts();

        // Listed out of registration order, as the store may return them.
        let mut users = vec![late, early];
        let activities = vec![
            make_activity("amy@example.com", 700, 30),
            make_activity("zed@example.com", 700, 30),
        ];

        order_for_ranking(&mut users);
        let board = compute_leaderboard(&users, &activities, ts()).unwrap();

        assert_eq!(board[0].user_email, "zed@example.com");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].user_email, "amy@example.com");
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn test_same_registration_time_ordered_by_email() {
        let mut users = vec![
            make_user("c@example.com", None),
            make_user("a@example.com", None),
            make_user("b@example.com", None),
        ];

        order_for_ranking(&mut users);

        let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["a@example.com", "b@example.com", "c@example.com"]);
    }

    #[test]
    fn test_orphan_activities_produce_no_entry() {
        let users = vec![make_user("a@example.com", None)];
        let activities = vec![
            make_activity("ghost@example.com", 5000, 300),
            make_activity("a@example.com", 10, 5),
        ];

        let board = compute_leaderboard(&users, &activities, ts()).unwrap();

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].user_email, "a@example.com");
        assert_eq!(board[0].total_calories, 10);
    }

    #[test]
    fn test_no_users_yields_empty_board() {
        let activities = vec![make_activity("ghost@example.com", 50, 5)];
        let board = compute_leaderboard(&[], &activities, ts()).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_recompute_is_idempotent_apart_from_timestamp() {
        let users = vec![
            make_user("a@example.com", Some("Team A")),
            make_user("b@example.com", Some("Team B")),
        ];
        let activities = vec![
            make_activity("a@example.com", 200, 20),
            make_activity("b@example.com", 200, 25),
        ];

        let first = compute_leaderboard(&users, &activities, ts()).unwrap();
        let later = ts() + chrono::Duration::hours(1);
        let mut second = compute_leaderboard(&users, &activities, later).unwrap();

        for entry in &mut second {
            assert_eq!(entry.updated_at, later);
            entry.updated_at = ts();
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_durations_fit_in_totals() {
        let users = vec![make_user("a@example.com", None)];
        let mut activities = Vec::new();
        let mut total: u64 = 0;
        while total <= u64::from(u32::MAX) * 2 {
            activities.push(make_activity("a@example.com", 1, u32::MAX));
            total += u64::from(u32::MAX);
        }

        let board = compute_leaderboard(&users, &activities, ts()).unwrap();
        assert_eq!(board[0].total_duration, total);
    }

    #[test]
    fn test_overflow_error_names_user() {
        let mut totals = Totals {
            calories: u64::MAX,
            duration: 0,
            activities: 0,
        };
        let err = totals
            .add(&make_activity("a@example.com", 1, 1))
            .unwrap_err();

        assert_eq!(
            err,
            RankingError::TotalOverflow {
                user_email: "a@example.com".to_string(),
                field: "calories",
            }
        );
    }

    proptest! {
        #[test]
        fn prop_ranks_are_permutation_and_sorted(
            user_count in 0usize..40,
            raw in proptest::collection::vec((0usize..50, 1u32..2000, 1u32..180), 0..200),
        ) {
            let users: Vec<User> = (0..user_count)
                .map(|i| make_user(&format!("u{}@example.com", i), None))
                .collect();
            // Indices past user_count become orphans.
            let activities: Vec<Activity> = raw
                .iter()
                .map(|(i, cal, dur)| make_activity(&format!("u{}@example.com", i), *cal, *dur))
                .collect();

            let board = compute_leaderboard(&users, &activities, ts()).unwrap();

            prop_assert_eq!(board.len(), user_count);
            let mut ranks: Vec<u32> = board.iter().map(|e| e.rank).collect();
            ranks.sort_unstable();
            let expected: Vec<u32> = (1..=user_count as u32).collect();
            prop_assert_eq!(ranks, expected);

            for pair in board.windows(2) {
                prop_assert!(pair[0].rank < pair[1].rank);
                prop_assert!(pair[0].total_calories >= pair[1].total_calories);
            }
        }
    }
}
