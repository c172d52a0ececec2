// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game service: load, validate, persist, notify.
//!
//! Handles the workflow for every move:
//! 1. Load the global game (fresh game if none is stored)
//! 2. Validate and apply the move
//! 3. Persist the updated game
//! 4. Notify the host if the game is still running
//!
//! There is no locking around the read-modify-write cycle: two concurrent
//! moves can both pass validation and the later write wins. This is an
//! accepted limitation for a single low-traffic match.

use crate::db::{keys, StateStore};
use crate::error::{AppError, Result};
use crate::models::game::position_name;
use crate::models::{Game, GameStatus, Player};
use crate::services::Notifier;
use anyhow::Context;
use std::sync::Arc;

/// What happened to the out-of-band notification for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Delivered to the notifier.
    Sent,
    /// Not attempted because the move ended the game.
    Skipped,
    /// Attempted and failed; the move itself still stands.
    Failed(String),
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Sent => "sent",
            NotificationStatus::Skipped => "skipped",
            NotificationStatus::Failed(_) => "failed",
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub game: Game,
    pub notification: NotificationStatus,
}

/// The single global tic-tac-toe match.
#[derive(Clone)]
pub struct GameService {
    store: Arc<dyn StateStore>,
    notifier: Arc<dyn Notifier>,
}

impl GameService {
    pub fn new(store: Arc<dyn StateStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Current game, created and stored on first access.
    pub async fn get_state(&self) -> Result<Game> {
        if let Some(game) = self.load().await? {
            return Ok(game);
        }

        let game = Game::new(chrono::Utc::now());
        self.save(&game).await?;
        tracing::info!("Initialized new game");
        Ok(game)
    }

    /// Apply a move for `player`. Rejected moves leave the store untouched.
    pub async fn apply_move(&self, player: Player, position: i64) -> Result<MoveOutcome> {
        let now = chrono::Utc::now();
        let mut game = self.load().await?.unwrap_or_else(|| Game::new(now));

        if let Err(e) = game.apply_move(player, position, now) {
            tracing::info!(?player, position, reason = %e, "Move rejected");
            return Err(e);
        }

        self.save(&game).await?;

        tracing::info!(
            ?player,
            position,
            status = ?game.status,
            "Move applied"
        );

        let notification = if game.status.is_terminal() {
            NotificationStatus::Skipped
        } else {
            let text = move_notification(player, position as usize);
            match self.notifier.send(&text).await {
                Ok(()) => NotificationStatus::Sent,
                Err(e) => {
                    tracing::warn!(error = %e, ?player, position, "Move notification failed");
                    NotificationStatus::Failed(e.to_string())
                }
            }
        };

        Ok(MoveOutcome { game, notification })
    }

    /// Start a new game, keeping lifetime stats.
    pub async fn reset(&self) -> Result<Game> {
        let stats = self
            .load()
            .await?
            .map(|previous| previous.stats)
            .unwrap_or_default();

        let game = Game::with_stats(stats, chrono::Utc::now());
        self.save(&game).await?;

        tracing::info!(stats = ?game.stats, "Game reset");
        Ok(game)
    }

    async fn load(&self) -> Result<Option<Game>> {
        let Some(bytes) = self.store.get(keys::CURRENT_GAME).await? else {
            return Ok(None);
        };

        let game = serde_json::from_slice(&bytes).context("Stored game is not valid JSON")?;
        Ok(Some(game))
    }

    async fn save(&self, game: &Game) -> Result<()> {
        let bytes = serde_json::to_vec(game).map_err(|e| AppError::Internal(e.into()))?;
        self.store.put(keys::CURRENT_GAME, bytes).await
    }
}

/// Chat message telling the host about a non-terminal move.
pub fn move_notification(player: Player, position: usize) -> String {
    let name = position_name(position);
    match player {
        Player::World => format!(
            "🌎 *The World just moved!*\nPosition: {} ({})\n\nYour turn! Reply with your move (0-8).",
            name, position
        ),
        Player::Host => format!("{}Waiting for The World's move...", host_played(position)),
    }
}

/// Reply to a host move that ended the game, if it did.
pub fn host_result_reply(position: usize, status: GameStatus) -> Option<String> {
    result_message(status).map(|result| format!("{}{}", host_played(position), result))
}

fn host_played(position: usize) -> String {
    format!(
        "✅ You played position {} ({})!\n\n",
        position,
        position_name(position)
    )
}

/// Chat message announcing how a game ended, if it did.
pub fn result_message(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::HostWon => Some("🏆 You won!"),
        GameStatus::WorldWon => Some("🌎 The World won this one."),
        GameStatus::Draw => Some("🤝 Game is a draw!"),
        GameStatus::Active => None,
    }
}
