// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Homepage API: backend for a personal website
//!
//! This crate hosts a single global tic-tac-toe match played between the
//! site owner (from Slack) and visitors (from the website), and reports
//! Strava activity streaks.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{ActivitySource, GameService, Notifier};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub game_service: GameService,
    /// Host-facing chat channel, shared with the game service
    pub notifier: Arc<dyn Notifier>,
    /// `None` when Strava credentials are not configured
    pub activity_source: Option<Arc<dyn ActivitySource>>,
    /// Client for one-off outbound calls (Slack webhook)
    pub http: reqwest::Client,
}
