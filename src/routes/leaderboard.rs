// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard routes.

use super::required;
use crate::error::{AppError, Result};
use crate::models::{LeaderboardEntry, NewLeaderboardEntry};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/leaderboard", get(list_leaderboard).post(create_entry))
        .route("/api/leaderboard/by_team", get(leaderboard_by_team))
        .route("/api/leaderboard/recompute", post(recompute))
        .route("/api/leaderboard/{id}", get(get_entry).delete(delete_entry))
}

async fn list_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.db.list_leaderboard().await?))
}

/// Insert an entry by hand. It is overwritten by the next recompute.
async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewLeaderboardEntry>,
) -> Result<(StatusCode, Json<LeaderboardEntry>)> {
    body.validate()?;

    let entry = body.into_entry(chrono::Utc::now());
    state.db.create_leaderboard_entry(&entry).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn find_entry(state: &AppState, id: &str) -> Result<LeaderboardEntry> {
    state
        .db
        .get_leaderboard_entry(id)
        .await?
        .ok_or_else(|| AppError::not_found("Leaderboard entry", id))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LeaderboardEntry>> {
    Ok(Json(find_entry(&state, &id).await?))
}

/// Entries are derived, so there is no update. A deleted entry comes back
/// on the next recompute while its user exists.
async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let entry = find_entry(&state, &id).await?;
    state.db.delete_leaderboard_entry(&entry.id).await?;
    tracing::info!(user_email = %entry.user_email, "Leaderboard entry deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct TeamQuery {
    team: Option<String>,
}

async fn leaderboard_by_team(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TeamQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let team = required(params.team, "Team")?;
    Ok(Json(state.db.leaderboard_by_team(&team).await?))
}

/// Rebuild the leaderboard from all users and activities.
async fn recompute(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.ranker.recompute().await?))
}
