use chrono::Utc;
use criterion::{criterion_group, criterion_main, Criterion};
use octofit_tracker::models::{Activity, User};
use octofit_tracker::services::compute_leaderboard;
use std::hint::black_box;

const USERS: usize = 5_000;
const ACTIVITIES_PER_USER: usize = 10;

fn fixture() -> (Vec<User>, Vec<Activity>) {
    let now = Utc::now();
    let users: Vec<User> = (0..USERS)
        .map(|i| User {
            id: i.to_string(),
            name: format!("User {}", i),
            email: format!("user{}@example.com", i),
            team: Some(format!("Team {}", i % 20)),
            created_at: now,
        })
        .collect();

    // Deterministic spread of calories with plenty of ties.
    let activities: Vec<Activity> = (0..USERS * ACTIVITIES_PER_USER)
        .map(|i| Activity {
            id: i.to_string(),
            user_email: format!("user{}@example.com", i % USERS),
            activity_type: "Running".to_string(),
            duration: 30 + (i % 90) as u32,
            calories: 150 + ((i * 37) % 900) as u32,
            distance: None,
            date: now,
            notes: String::new(),
        })
        .collect();

    (users, activities)
}

fn benchmark_compute_leaderboard(c: &mut Criterion) {
    let (users, activities) = fixture();
    let now = Utc::now();

    c.bench_function("compute_leaderboard_5k_users", |b| {
        b.iter(|| compute_leaderboard(black_box(&users), black_box(&activities), now))
    });
}

criterion_group!(benches, benchmark_compute_leaderboard);
criterion_main!(benches);
