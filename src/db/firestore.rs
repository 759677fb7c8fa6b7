// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (keyed by email)
//! - Teams (keyed by name)
//! - Activities and workouts (keyed by generated id)
//! - Leaderboard (keyed by user email, replaced as a whole)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{
    document_key, is_valid_document_key, Activity, Difficulty, LeaderboardEntry, Team, User,
    Workout,
};
use futures_util::{stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

const MAX_CONCURRENT_DB_OPS: usize = 50;
// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Connect to the emulator with a static unsigned token.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJvY3RvZml0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore emulator");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Generic Helpers ─────────────────────────────────────────

    async fn list_all<T>(&self, collection: &str) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(format!("Failed to list {}: {}", collection, e)))
    }

    async fn list_where_eq<T>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .filter(|q| q.field(field).eq(value))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(format!("Failed to query {}: {}", collection, e)))
    }

    /// Fetch one document by id. Ids Firestore could never store yield `None`.
    async fn get_by_id<T>(&self, collection: &str, doc_id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        if !is_valid_document_key(doc_id) {
            return Ok(None);
        }

        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the document whose `_id` field is `id`, for collections keyed by
    /// a natural key instead.
    async fn find_by_record_id<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let found: Vec<T> = self.list_where_eq(collection, "_id", id).await?;
        Ok(found.into_iter().next())
    }

    /// Document ids in a collection, read from document names so that
    /// malformed documents are still listed.
    async fn list_doc_ids(&self, collection: &str) -> Result<Vec<String>, AppError> {
        Ok(self
            .get_client()?
            .fluent()
            .select()
            .from(collection)
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .filter_map(|doc| doc.name.rsplit('/').next().map(str::to_string))
            .collect())
    }

    /// Create a document, failing with `Conflict` if the id is taken.
    async fn insert<T>(&self, collection: &str, doc_id: &str, object: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Sync + Send,
    {
        let _: T = self
            .get_client()?
            .fluent()
            .insert()
            .into(collection)
            .document_id(doc_id)
            .object(object)
            .execute()
            .await
            .map_err(|e| match e {
                firestore::errors::FirestoreError::DataConflictError(_) => AppError::Conflict(
                    format!("{} already has a document {}", collection, doc_id),
                ),
                other => AppError::Database(other.to_string()),
            })?;
        Ok(())
    }

    /// Create or overwrite a document.
    async fn upsert<T>(&self, collection: &str, doc_id: &str, object: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Sync + Send,
    {
        let _: T = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(doc_id)
            .object(object)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_doc(&self, collection: &str, doc_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(doc_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Write an edited document whose key may have changed.
    ///
    /// A new key is claimed with a create, so taking an existing key fails
    /// with `Conflict` and leaves the old document in place. The old
    /// document is removed only after the new one is stored.
    async fn rekey<T>(
        &self,
        collection: &str,
        old_key: &str,
        new_key: &str,
        object: &T,
    ) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Sync + Send,
    {
        if old_key == new_key {
            return self.upsert(collection, new_key, object).await;
        }

        self.insert(collection, new_key, object).await?;
        self.delete_doc(collection, old_key).await
    }

    /// Delete every document in a collection.
    ///
    /// Returns the number of documents deleted.
    pub async fn clear_collection(&self, collection: &str) -> Result<usize, AppError> {
        let ids = self.list_doc_ids(collection).await?;
        let count = ids.len();
        self.batch_delete(&ids, collection).await?;
        tracing::debug!(collection, count, "Collection cleared");
        Ok(count)
    }

    /// Helper to batch delete documents using transactions.
    async fn batch_delete(&self, doc_ids: &[String], collection: &str) -> Result<(), AppError> {
        let client = self.get_client()?;

        for chunk in doc_ids.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for doc_id in chunk {
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.list_all(collections::USERS).await
    }

    pub async fn users_by_email(&self, email: &str) -> Result<Vec<User>, AppError> {
        self.list_where_eq(collections::USERS, "email", email).await
    }

    /// Look a user up by `_id`.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        self.find_by_record_id(collections::USERS, id).await
    }

    /// Store a new user. Fails with `Conflict` if the email is registered.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        self.insert(collections::USERS, &document_key(&user.email), user)
            .await
    }

    /// Save an edited user. Changing the email to a registered one fails
    /// with `Conflict`.
    pub async fn update_user(&self, previous: &User, updated: &User) -> Result<(), AppError> {
        self.rekey(
            collections::USERS,
            &document_key(&previous.email),
            &document_key(&updated.email),
            updated,
        )
        .await
    }

    pub async fn delete_user(&self, user: &User) -> Result<(), AppError> {
        self.delete_doc(collections::USERS, &document_key(&user.email))
            .await
    }

    // ─── Team Operations ─────────────────────────────────────────

    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        self.list_all(collections::TEAMS).await
    }

    pub async fn teams_by_name(&self, name: &str) -> Result<Vec<Team>, AppError> {
        self.list_where_eq(collections::TEAMS, "name", name).await
    }

    /// Look a team up by `_id`.
    pub async fn get_team(&self, id: &str) -> Result<Option<Team>, AppError> {
        self.find_by_record_id(collections::TEAMS, id).await
    }

    /// Store a new team. Fails with `Conflict` if the name is taken.
    pub async fn create_team(&self, team: &Team) -> Result<(), AppError> {
        self.insert(collections::TEAMS, &document_key(&team.name), team)
            .await
    }

    /// Save an edited team. Renaming to a taken name fails with `Conflict`.
    pub async fn update_team(&self, previous: &Team, updated: &Team) -> Result<(), AppError> {
        self.rekey(
            collections::TEAMS,
            &document_key(&previous.name),
            &document_key(&updated.name),
            updated,
        )
        .await
    }

    pub async fn delete_team(&self, team: &Team) -> Result<(), AppError> {
        self.delete_doc(collections::TEAMS, &document_key(&team.name))
            .await
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// List activities, optionally only those logged under `user_email`.
    pub async fn list_activities(&self, user_email: Option<&str>) -> Result<Vec<Activity>, AppError> {
        match user_email {
            Some(email) => {
                self.list_where_eq(collections::ACTIVITIES, "user_email", email)
                    .await
            }
            None => self.list_all(collections::ACTIVITIES).await,
        }
    }

    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        self.get_by_id(collections::ACTIVITIES, id).await
    }

    pub async fn create_activity(&self, activity: &Activity) -> Result<(), AppError> {
        self.insert(collections::ACTIVITIES, &activity.id, activity)
            .await
    }

    /// Store many activities with bounded concurrency.
    pub async fn create_activities(&self, activities: &[Activity]) -> Result<(), AppError> {
        stream::iter(activities)
            .map(|activity| self.create_activity(activity))
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        Ok(())
    }

    // ─── Leaderboard Operations ──────────────────────────────────

    /// All entries, best rank first.
    pub async fn list_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::LEADERBOARD)
            .order_by([("rank", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Entries for one team, best rank first.
    pub async fn leaderboard_by_team(&self, team: &str) -> Result<Vec<LeaderboardEntry>, AppError> {
        let mut entries: Vec<LeaderboardEntry> = self
            .list_where_eq(collections::LEADERBOARD, "team", team)
            .await?;
        // Sorted here to avoid requiring a composite (team, rank) index.
        entries.sort_by_key(|e| e.rank);
        Ok(entries)
    }

    /// Entry ids are the document ids.
    pub async fn get_leaderboard_entry(
        &self,
        id: &str,
    ) -> Result<Option<LeaderboardEntry>, AppError> {
        self.get_by_id(collections::LEADERBOARD, id).await
    }

    /// Remove one entry. The next recompute writes it again if its user
    /// still exists.
    pub async fn delete_leaderboard_entry(&self, id: &str) -> Result<(), AppError> {
        self.delete_doc(collections::LEADERBOARD, id).await
    }

    /// Store a hand-made entry. Fails with `Conflict` if the user has one.
    pub async fn create_leaderboard_entry(&self, entry: &LeaderboardEntry) -> Result<(), AppError> {
        self.insert(collections::LEADERBOARD, &entry.id, entry).await
    }

    /// Replace the whole leaderboard with `entries`.
    ///
    /// Entries are upserted by user email and documents for users no longer
    /// ranked are deleted. When all writes fit in one commit this happens in
    /// a single transaction. Otherwise upserts are committed in chunks before
    /// stale documents are removed, so readers never see an empty board.
    pub async fn replace_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<(), AppError> {
        let client = self.get_client()?;

        let keep: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        let stale: Vec<String> = self
            .list_doc_ids(collections::LEADERBOARD)
            .await?
            .into_iter()
            .filter(|id| !keep.contains(id.as_str()))
            .collect();

        let total_writes = entries.len() + stale.len();
        if total_writes <= BATCH_SIZE {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for entry in entries {
                client
                    .fluent()
                    .update()
                    .in_col(collections::LEADERBOARD)
                    .document_id(&entry.id)
                    .object(entry)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!("Failed to add entry to transaction: {}", e))
                    })?;
            }
            for doc_id in &stale {
                client
                    .fluent()
                    .delete()
                    .from(collections::LEADERBOARD)
                    .document_id(doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!("Failed to add deletion to transaction: {}", e))
                    })?;
            }

            transaction
                .commit()
                .await
                .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;
        } else {
            tracing::warn!(
                entries = entries.len(),
                stale = stale.len(),
                "Leaderboard too large for one transaction, replacing in chunks"
            );

            for chunk in entries.chunks(BATCH_SIZE) {
                let mut transaction = client.begin_transaction().await.map_err(|e| {
                    AppError::Database(format!("Failed to begin transaction: {}", e))
                })?;

                for entry in chunk {
                    client
                        .fluent()
                        .update()
                        .in_col(collections::LEADERBOARD)
                        .document_id(&entry.id)
                        .object(entry)
                        .add_to_transaction(&mut transaction)
                        .map_err(|e| {
                            AppError::Database(format!(
                                "Failed to add entry to transaction: {}",
                                e
                            ))
                        })?;
                }

                transaction.commit().await.map_err(|e| {
                    AppError::Database(format!("Failed to commit leaderboard chunk: {}", e))
                })?;
            }

            self.batch_delete(&stale, collections::LEADERBOARD).await?;
        }

        tracing::debug!(
            written = entries.len(),
            removed = stale.len(),
            "Leaderboard documents replaced"
        );

        Ok(())
    }

    // ─── Workout Operations ──────────────────────────────────────

    pub async fn list_workouts(&self) -> Result<Vec<Workout>, AppError> {
        self.list_all(collections::WORKOUTS).await
    }

    pub async fn get_workout(&self, id: &str) -> Result<Option<Workout>, AppError> {
        self.get_by_id(collections::WORKOUTS, id).await
    }

    pub async fn workouts_by_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<Workout>, AppError> {
        self.list_where_eq(collections::WORKOUTS, "difficulty", difficulty.as_str())
            .await
    }

    pub async fn workouts_by_activity_type(
        &self,
        activity_type: &str,
    ) -> Result<Vec<Workout>, AppError> {
        self.list_where_eq(collections::WORKOUTS, "activity_type", activity_type)
            .await
    }

    pub async fn create_workout(&self, workout: &Workout) -> Result<(), AppError> {
        self.insert(collections::WORKOUTS, &workout.id, workout)
            .await
    }

    pub async fn update_workout(&self, workout: &Workout) -> Result<(), AppError> {
        self.upsert(collections::WORKOUTS, &workout.id, workout)
            .await
    }

    pub async fn delete_workout(&self, id: &str) -> Result<(), AppError> {
        self.delete_doc(collections::WORKOUTS, id).await
    }
}
