// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed key-value store.
//!
//! Each key is one document in the `kv_state` collection holding the
//! base64-encoded value and the time it was written.

use crate::db::{collections, StateStore};
use crate::error::AppError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

/// Stored document body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateRecord {
    /// Base64-encoded value bytes
    value: String,
    /// Last write time (RFC 3339)
    updated_at: String,
}

/// Firestore key-value store.
#[derive(Clone)]
pub struct FirestoreStore {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator rejects real credentials, so skip the default auth chain.
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

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
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

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline store for testing.
    ///
    /// All operations will return a database error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

#[async_trait]
impl StateStore for FirestoreStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        let record: Option<StateRecord> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::STATE)
            .obj()
            .one(key)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        record
            .map(|r| {
                BASE64.decode(r.value).map_err(|e| {
                    AppError::Database(format!("Corrupt state record '{}': {}", key, e))
                })
            })
            .transpose()
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), AppError> {
        let record = StateRecord {
            value: BASE64.encode(value),
            updated_at: chrono::Utc::now().to_rfc3339(),
        };

        let _: StateRecord = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::STATE)
            .document_id(key)
            .object(&record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(key, "State record written");
        Ok(())
    }
}
