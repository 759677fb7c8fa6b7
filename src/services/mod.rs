// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod leaderboard;
pub mod seed;

pub use leaderboard::{compute_leaderboard, order_for_ranking, LeaderboardRanker, RankingError};
