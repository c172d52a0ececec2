// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for the site owner's recent activities.
//!
//! Handles:
//! - Access token refresh from a long-lived refresh token
//! - In-process access token caching
//! - Recent activity listing
//! - Rate limit detection

use crate::config::StravaCredentials;
use crate::error::AppError;
use crate::models::Activity;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Margin before token expiration when we proactively refresh (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Strava caps `per_page` at 200.
const MAX_PER_PAGE: u32 = 200;

/// Source of recent activities, most recent first.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn recent_activities(&self, limit: u32) -> Result<Vec<Activity>, AppError>;
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://www.strava.com/api/v3".to_string(),
            token_url: "https://www.strava.com/oauth/token".to_string(),
            client_id,
            client_secret,
        }
    }

    /// List the athlete's most recent activities.
    pub async fn list_activities(
        &self,
        access_token: &str,
        per_page: u32,
    ) -> Result<Vec<Activity>, AppError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("per_page", per_page.min(MAX_PER_PAGE).to_string())])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Exchange a refresh token for a fresh access token.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
                return Err(AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string()));
            }

            if status.as_u16() == 401 {
                return Err(AppError::StravaApi(
                    AppError::STRAVA_TOKEN_ERROR.to_string(),
                ));
            }

            return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub expires_at: i64,
}

/// Cached access token with expiry information.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// High-level Strava service for a single account.
///
/// The access token is cached behind a mutex so concurrent requests
/// trigger at most one refresh.
#[derive(Clone)]
pub struct StravaService {
    client: StravaClient,
    refresh_token: String,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl StravaService {
    pub fn new(credentials: StravaCredentials) -> Self {
        Self {
            client: StravaClient::new(credentials.client_id, credentials.client_secret),
            refresh_token: credentials.refresh_token,
            token: Arc::new(Mutex::new(None)),
        }
    }

    /// Get a valid access token, refreshing when missing or about to expire.
    pub async fn get_valid_access_token(&self) -> Result<String, AppError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        tracing::info!("Strava access token missing or expiring, refreshing");
        let refreshed = self.client.refresh_token(&self.refresh_token).await?;
        let expires_at = DateTime::from_timestamp(refreshed.expires_at, 0).unwrap_or(now);

        *cached = Some(CachedToken {
            access_token: refreshed.access_token.clone(),
            expires_at,
        });

        tracing::info!(expires_at = %expires_at, "Strava token refreshed and cached");
        Ok(refreshed.access_token)
    }
}

#[async_trait]
impl ActivitySource for StravaService {
    async fn recent_activities(&self, limit: u32) -> Result<Vec<Activity>, AppError> {
        let access_token = self.get_valid_access_token().await?;
        let activities = self.client.list_activities(&access_token, limit).await?;
        tracing::debug!(count = activities.len(), "Fetched recent activities");
        Ok(activities)
    }
}
