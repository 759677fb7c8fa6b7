// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sample data for local development and demos.
//!
//! Two superhero teams, five members each, a handful of random activities
//! per member and a fixed workout catalog. Used by the `seed` binary.

use crate::db::{collections, FirestoreDb};
use crate::error::AppError;
use crate::models::{Activity, Difficulty, Exercise, Team, User, Workout};
use crate::services::leaderboard::LeaderboardRanker;
use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

pub const ACTIVITY_TYPES: [&str; 7] = [
    "Running",
    "Swimming",
    "Cycling",
    "Weight Training",
    "Yoga",
    "Boxing",
    "HIIT",
];

/// Activity types that record a distance.
pub const DISTANCE_TYPES: [&str; 3] = ["Running", "Swimming", "Cycling"];

pub const ACTIVITIES_PER_USER: usize = 5;

const TEAMS: [(&str, &str, [(&str, &str); 5]); 2] = [
    (
        "Team Marvel",
        "Earth's Mightiest Heroes fighting for fitness",
        [
            ("Tony Stark", "ironman@marvel.com"),
            ("Steve Rogers", "captain@marvel.com"),
            ("Natasha Romanoff", "blackwidow@marvel.com"),
            ("Bruce Banner", "hulk@marvel.com"),
            ("Thor Odinson", "thor@marvel.com"),
        ],
    ),
    (
        "Team DC",
        "Justice League champions of wellness",
        [
            ("Clark Kent", "superman@dc.com"),
            ("Bruce Wayne", "batman@dc.com"),
            ("Diana Prince", "wonderwoman@dc.com"),
            ("Barry Allen", "flash@dc.com"),
            ("Arthur Curry", "aquaman@dc.com"),
        ],
    ),
];

/// Everything the seed program writes, before the leaderboard is ranked.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub teams: Vec<Team>,
    pub users: Vec<User>,
    pub activities: Vec<Activity>,
    pub workouts: Vec<Workout>,
}

/// Document counts after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub teams: usize,
    pub activities: usize,
    pub leaderboard: usize,
    pub workouts: usize,
}

/// Build the sample data set.
///
/// Users are created one millisecond apart so registration order (and
/// therefore leaderboard tie-breaking) follows the listing above.
pub fn sample_data<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> SeedData {
    let mut teams = Vec::new();
    let mut users = Vec::new();

    for (team_name, description, members) in TEAMS {
        teams.push(Team {
            id: uuid::Uuid::new_v4().to_string(),
            name: team_name.to_string(),
            description: description.to_string(),
            members: members.iter().map(|(_, email)| email.to_string()).collect(),
            created_at: now,
        });

        for (name, email) in members {
            let offset = Duration::milliseconds(users.len() as i64);
            users.push(User {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                team: Some(team_name.to_string()),
                created_at: now + offset,
            });
        }
    }

    let mut activities = Vec::with_capacity(users.len() * ACTIVITIES_PER_USER);
    for user in &users {
        for _ in 0..ACTIVITIES_PER_USER {
            activities.push(random_activity(rng, user, now));
        }
    }

    SeedData {
        teams,
        users,
        activities,
        workouts: workout_catalog(),
    }
}

fn random_activity<R: Rng + ?Sized>(rng: &mut R, user: &User, now: DateTime<Utc>) -> Activity {
    let activity_type = *ACTIVITY_TYPES.choose(rng).unwrap_or(&"Running");
    let duration: u32 = rng.random_range(30..=120);
    let calories = duration * rng.random_range(5..=12_u32);
    let distance = DISTANCE_TYPES
        .contains(&activity_type)
        .then(|| (rng.random_range(3.0..=15.0_f64) * 100.0).round() / 100.0);
    let days_ago = rng.random_range(0..=30);

    Activity {
        id: uuid::Uuid::new_v4().to_string(),
        user_email: user.email.clone(),
        activity_type: activity_type.to_string(),
        duration,
        calories,
        distance,
        date: now - Duration::days(days_ago),
        notes: format!("{} crushing it with {}!", user.name, activity_type),
    }
}

fn workout(
    name: &str,
    description: &str,
    activity_type: &str,
    difficulty: Difficulty,
    duration: u32,
    calories_estimate: u32,
    exercises: Vec<Exercise>,
) -> Workout {
    Workout {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        activity_type: activity_type.to_string(),
        difficulty,
        duration,
        calories_estimate,
        exercises,
    }
}

/// The fixed workout suggestions.
pub fn workout_catalog() -> Vec<Workout> {
    vec![
        workout(
            "Iron Man Suit Training",
            "High-intensity workout to build endurance like Tony Stark",
            "HIIT",
            Difficulty::Hard,
            45,
            600,
            vec![
                Exercise::reps("Burpees", 20, 4),
                Exercise::reps("Mountain Climbers", 30, 4),
                Exercise::reps("Jump Squats", 15, 4),
            ],
        ),
        workout(
            "Captain America Shield Drill",
            "Build super soldier strength and agility",
            "Weight Training",
            Difficulty::Hard,
            60,
            500,
            vec![
                Exercise::reps("Bench Press", 10, 4),
                Exercise::reps("Pull-ups", 12, 4),
                Exercise::reps("Deadlifts", 8, 4),
            ],
        ),
        workout(
            "Black Widow Flexibility Flow",
            "Enhance flexibility and balance like Natasha",
            "Yoga",
            Difficulty::Medium,
            45,
            250,
            vec![
                Exercise::timed("Warrior Pose", "2 minutes", 3),
                Exercise::timed("Tree Pose", "1 minute", 3),
                Exercise::timed("Downward Dog", "3 minutes", 3),
            ],
        ),
        workout(
            "Flash Speed Training",
            "Speed and cardio workout inspired by the Scarlet Speedster",
            "Running",
            Difficulty::Hard,
            40,
            550,
            vec![
                Exercise::timed("Sprint Intervals", "30 seconds", 10),
                Exercise::reps("High Knees", 50, 5),
                Exercise::timed("Shuttle Runs", "1 minute", 5),
            ],
        ),
        workout(
            "Wonder Woman Warrior Training",
            "Full-body strength and power workout",
            "Weight Training",
            Difficulty::Hard,
            55,
            520,
            vec![
                Exercise::reps("Overhead Press", 10, 4),
                Exercise::reps("Lunges", 15, 4),
                Exercise::timed("Battle Ropes", "1 minute", 4),
            ],
        ),
        workout(
            "Aquaman Ocean Swim",
            "Swimming workout fit for the King of Atlantis",
            "Swimming",
            Difficulty::Medium,
            50,
            450,
            vec![
                Exercise::distance("Freestyle", "500m", 4),
                Exercise::distance("Butterfly Stroke", "200m", 3),
                Exercise::timed("Treading Water", "5 minutes", 2),
            ],
        ),
        workout(
            "Batman Combat Training",
            "Mixed martial arts and boxing workout",
            "Boxing",
            Difficulty::Hard,
            50,
            580,
            vec![
                Exercise::timed("Heavy Bag", "3 minutes", 5),
                Exercise::timed("Speed Bag", "2 minutes", 5),
                Exercise::timed("Shadow Boxing", "3 minutes", 4),
            ],
        ),
        workout(
            "Beginner Hero Foundation",
            "Start your superhero fitness journey",
            "Weight Training",
            Difficulty::Easy,
            30,
            250,
            vec![
                Exercise::reps("Bodyweight Squats", 15, 3),
                Exercise::reps("Push-ups", 10, 3),
                Exercise::timed("Planks", "30 seconds", 3),
            ],
        ),
    ]
}

/// Wipe every collection and write `data`, then rank the leaderboard.
pub async fn populate(db: &FirestoreDb, data: &SeedData) -> Result<SeedSummary, AppError> {
    for collection in collections::ALL {
        let removed = db.clear_collection(collection).await?;
        tracing::info!(collection, removed, "Cleared collection");
    }

    for team in &data.teams {
        db.create_team(team).await?;
    }
    tracing::info!(count = data.teams.len(), "Created teams");

    for user in &data.users {
        db.create_user(user).await?;
    }
    tracing::info!(count = data.users.len(), "Created users");

    db.create_activities(&data.activities).await?;
    tracing::info!(count = data.activities.len(), "Created activities");

    let board = LeaderboardRanker::new(db.clone()).recompute().await?;
    tracing::info!(count = board.len(), "Created leaderboard entries");

    for workout in &data.workouts {
        db.create_workout(workout).await?;
    }
    tracing::info!(count = data.workouts.len(), "Created workouts");

    let summary = SeedSummary {
        users: db.list_users().await?.len(),
        teams: db.list_teams().await?.len(),
        activities: db.list_activities(None).await?.len(),
        leaderboard: db.list_leaderboard().await?.len(),
        workouts: db.list_workouts().await?.len(),
    };

    tracing::info!(
        users = summary.users,
        teams = summary.teams,
        activities = summary.activities,
        leaderboard = summary.leaderboard,
        workouts = summary.workouts,
        "Database population completed"
    );

    Ok(summary)
}
