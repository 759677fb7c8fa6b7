// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filter actions reject missing parameters before touching the database.

use axum::http::StatusCode;
use tower::ServiceExt;

mod common;

async fn assert_missing_param(uri: &str, message: &str) {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(common::get(uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    let body = common::json_body(response).await;
    assert_eq!(body["error"], message, "{}", uri);
    assert_eq!(body["code"], "bad_request");
    assert!(!body.is_array());
}

#[tokio::test]
async fn test_users_by_email_requires_email() {
    assert_missing_param("/api/users/by_email", "Email parameter required").await;
}

#[tokio::test]
async fn test_teams_by_name_requires_name() {
    assert_missing_param("/api/teams/by_name", "Name parameter required").await;
}

#[tokio::test]
async fn test_activities_by_user_requires_user_email() {
    assert_missing_param("/api/activities/by_user", "User email parameter required").await;
}

#[tokio::test]
async fn test_leaderboard_by_team_requires_team() {
    assert_missing_param("/api/leaderboard/by_team", "Team parameter required").await;
}

#[tokio::test]
async fn test_workouts_by_difficulty_requires_difficulty() {
    assert_missing_param("/api/workouts/by_difficulty", "Difficulty parameter required").await;
}

#[tokio::test]
async fn test_workouts_by_activity_type_requires_activity_type() {
    assert_missing_param(
        "/api/workouts/by_activity_type",
        "Activity type parameter required",
    )
    .await;
}

#[tokio::test]
async fn test_empty_parameter_counts_as_missing() {
    assert_missing_param("/api/users/by_email?email=", "Email parameter required").await;
    assert_missing_param("/api/leaderboard/by_team?team=", "Team parameter required").await;
}

#[tokio::test]
async fn test_unknown_difficulty_rejected() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::get("/api/workouts/by_difficulty?difficulty=Extreme"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Extreme"));
}

#[tokio::test]
async fn test_valid_filter_reaches_database() {
    // The offline database fails every call, so a 500 proves the handler
    // accepted the parameter and queried storage.
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::get("/api/workouts/by_difficulty?difficulty=Hard"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::json_body(response).await;
    assert_eq!(body["code"], "database_error");
}
