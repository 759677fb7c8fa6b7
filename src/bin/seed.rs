// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wipe the database and load sample teams, users, activities and workouts.
//!
//! ```sh
//! FIRESTORE_EMULATOR_HOST=localhost:8181 cargo run --bin seed
//! ```

use anyhow::Context;
use octofit_tracker::{config::Config, db::FirestoreDb, logging, services::seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env()?;
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .context("connecting to Firestore")?;

    let data = seed::sample_data(&mut rand::rng(), chrono::Utc::now());
    let summary = seed::populate(&db, &data)
        .await
        .context("populating sample data")?;

    println!(
        "Seeded {} users, {} teams, {} activities, {} leaderboard entries, {} workouts",
        summary.users, summary.teams, summary.activities, summary.leaderboard, summary.workouts
    );
    Ok(())
}
