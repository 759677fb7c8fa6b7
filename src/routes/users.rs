// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use super::required;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User, UserPatch};
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
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/by_email", get(users_by_email))
        .route(
            "/api/users/{id}",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.db.list_users().await?))
}

/// Register a user. Emails are unique.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    body.validate()?;

    let user = body.into_user(chrono::Utc::now());
    state.db.create_user(&user).await?;
    tracing::info!(email = %user.email, team = ?user.team, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

async fn find_user(state: &AppState, id: &str) -> Result<User> {
    state
        .db
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    Ok(Json(find_user(&state, &id).await?))
}

async fn save_user(state: &AppState, previous: &User, updated: User) -> Result<Json<User>> {
    state.db.update_user(previous, &updated).await?;
    tracing::info!(user_id = %updated.id, email = %updated.email, "User updated");
    Ok(Json(updated))
}

async fn replace_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<NewUser>,
) -> Result<Json<User>> {
    body.validate()?;

    let user = find_user(&state, &id).await?;
    save_user(&state, &user, user.replaced_by(body)).await
}

async fn patch_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>> {
    patch.validate()?;

    let user = find_user(&state, &id).await?;
    save_user(&state, &user, user.patched(patch)).await
}

/// Remove a user. Their activities stay; the next recompute drops their
/// leaderboard entry.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let user = find_user(&state, &id).await?;
    state.db.delete_user(&user).await?;
    tracing::info!(user_id = %user.id, email = %user.email, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct EmailQuery {
    email: Option<String>,
}

async fn users_by_email(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EmailQuery>,
) -> Result<Json<Vec<User>>> {
    let email = required(params.email, "Email")?;
    Ok(Json(state.db.users_by_email(&email).await?))
}
