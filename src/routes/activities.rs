// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity routes.
//!
//! Activities are append-only: they can be read back by id but not edited
//! or deleted one at a time.

use super::required;
use crate::error::{AppError, Result};
use crate::models::{Activity, NewActivity};
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
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/by_user", get(activities_by_user))
        .route("/api/activities/{id}", get(get_activity))
}

async fn list_activities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.db.list_activities(None).await?))
}

/// Log an activity. The owner email is not checked against users.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewActivity>,
) -> Result<(StatusCode, Json<Activity>)> {
    body.validate()?;

    let activity = body.into_activity();
    state.db.create_activity(&activity).await?;
    tracing::info!(
        activity_id = %activity.id,
        user_email = %activity.user_email,
        activity_type = %activity.activity_type,
        calories = activity.calories,
        "Activity logged"
    );

    Ok((StatusCode::CREATED, Json(activity)))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    let activity = state
        .db
        .get_activity(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Activity", &id))?;
    Ok(Json(activity))
}

#[derive(Deserialize)]
struct UserQuery {
    user_email: Option<String>,
}

async fn activities_by_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<Activity>>> {
    let user_email = required(params.user_email, "User email")?;
    Ok(Json(state.db.list_activities(Some(&user_email)).await?))
}
