// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Octofit Tracker: fitness tracking backend
//!
//! Users, teams, activities, a calorie leaderboard and a workout catalog,
//! stored in Firestore and served over a JSON API.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::LeaderboardRanker;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub ranker: LeaderboardRanker,
}

impl AppState {
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let ranker = LeaderboardRanker::new(db.clone());
        Self { config, db, ranker }
    }
}
