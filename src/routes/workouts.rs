// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout catalog routes.

use super::required;
use crate::error::{AppError, Result};
use crate::models::{Difficulty, NewWorkout, Workout, WorkoutPatch};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/by_difficulty", get(workouts_by_difficulty))
        .route("/api/workouts/by_activity_type", get(workouts_by_activity_type))
        .route(
            "/api/workouts/{id}",
            get(get_workout)
                .put(replace_workout)
                .patch(patch_workout)
                .delete(delete_workout),
        )
}

async fn list_workouts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Workout>>> {
    Ok(Json(state.db.list_workouts().await?))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewWorkout>,
) -> Result<(StatusCode, Json<Workout>)> {
    body.validate()?;

    let workout = body.into_workout();
    state.db.create_workout(&workout).await?;
    tracing::info!(name = %workout.name, difficulty = %workout.difficulty, "Workout added");

    Ok((StatusCode::CREATED, Json(workout)))
}

async fn find_workout(state: &AppState, id: &str) -> Result<Workout> {
    state
        .db
        .get_workout(id)
        .await?
        .ok_or_else(|| AppError::not_found("Workout", id))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    Ok(Json(find_workout(&state, &id).await?))
}

async fn save_workout(state: &AppState, workout: Workout) -> Result<Json<Workout>> {
    state.db.update_workout(&workout).await?;
    tracing::info!(workout_id = %workout.id, name = %workout.name, "Workout updated");
    Ok(Json(workout))
}

async fn replace_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<NewWorkout>,
) -> Result<Json<Workout>> {
    body.validate()?;

    let workout = find_workout(&state, &id).await?;
    save_workout(&state, workout.replaced_by(body)).await
}

async fn patch_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<WorkoutPatch>,
) -> Result<Json<Workout>> {
    patch.validate()?;

    let workout = find_workout(&state, &id).await?;
    save_workout(&state, workout.patched(patch)).await
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let workout = find_workout(&state, &id).await?;
    state.db.delete_workout(&workout.id).await?;
    tracing::info!(workout_id = %workout.id, "Workout deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct DifficultyQuery {
    difficulty: Option<String>,
}

async fn workouts_by_difficulty(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DifficultyQuery>,
) -> Result<Json<Vec<Workout>>> {
    let difficulty: Difficulty = required(params.difficulty, "Difficulty")?
        .parse()
        .map_err(AppError::BadRequest)?;
    Ok(Json(state.db.workouts_by_difficulty(difficulty).await?))
}

#[derive(Deserialize)]
struct ActivityTypeQuery {
    activity_type: Option<String>,
}

async fn workouts_by_activity_type(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivityTypeQuery>,
) -> Result<Json<Vec<Workout>>> {
    let activity_type = required(params.activity_type, "Activity type")?;
    Ok(Json(state.db.workouts_by_activity_type(&activity_type).await?))
}
