// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team routes.

use super::required;
use crate::error::{AppError, Result};
use crate::models::{NewTeam, Team, TeamPatch};
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
        .route("/api/teams", get(list_teams).post(create_team))
        .route("/api/teams/by_name", get(teams_by_name))
        .route(
            "/api/teams/{id}",
            get(get_team)
                .put(replace_team)
                .patch(patch_team)
                .delete(delete_team),
        )
}

async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Team>>> {
    Ok(Json(state.db.list_teams().await?))
}

async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTeam>,
) -> Result<(StatusCode, Json<Team>)> {
    body.validate()?;

    let team = body.into_team(chrono::Utc::now());
    state.db.create_team(&team).await?;
    tracing::info!(name = %team.name, members = team.members.len(), "Team created");

    Ok((StatusCode::CREATED, Json(team)))
}

async fn find_team(state: &AppState, id: &str) -> Result<Team> {
    state
        .db
        .get_team(id)
        .await?
        .ok_or_else(|| AppError::not_found("Team", id))
}

async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Team>> {
    Ok(Json(find_team(&state, &id).await?))
}

async fn save_team(state: &AppState, previous: &Team, updated: Team) -> Result<Json<Team>> {
    state.db.update_team(previous, &updated).await?;
    tracing::info!(team_id = %updated.id, name = %updated.name, "Team updated");
    Ok(Json(updated))
}

async fn replace_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<NewTeam>,
) -> Result<Json<Team>> {
    body.validate()?;

    let team = find_team(&state, &id).await?;
    save_team(&state, &team, team.replaced_by(body)).await
}

async fn patch_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<TeamPatch>,
) -> Result<Json<Team>> {
    patch.validate()?;

    let team = find_team(&state, &id).await?;
    save_team(&state, &team, team.patched(patch)).await
}

async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let team = find_team(&state, &id).await?;
    state.db.delete_team(&team).await?;
    tracing::info!(team_id = %team.id, name = %team.name, "Team deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct NameQuery {
    name: Option<String>,
}

async fn teams_by_name(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NameQuery>,
) -> Result<Json<Vec<Team>>> {
    let name = required(params.name, "Name")?;
    Ok(Json(state.db.teams_by_name(&name).await?))
}
