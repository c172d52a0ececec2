// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tic-tac-toe game record and move rules.
//!
//! A single global match is played between the site owner (the host, `X`)
//! and website visitors (the world, `O`). The world always opens.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// The eight winning lines, checked in this order.
const WINNING_LINES: [[usize; 3]; 8] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // diagonals
    [0, 4, 8],
    [2, 4, 6],
];

const POSITION_NAMES: [&str; BOARD_SIZE] = [
    "top-left",
    "top-center",
    "top-right",
    "middle-left",
    "center",
    "middle-right",
    "bottom-left",
    "bottom-center",
    "bottom-right",
];

/// One side of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// The site owner, moving from Slack.
    Host,
    /// Website visitors.
    World,
}

impl Player {
    /// Mark this player writes on the board.
    pub fn mark(self) -> Cell {
        match self {
            Player::Host => Cell::X,
            Player::World => Cell::O,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::Host => Player::World,
            Player::World => Player::Host,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Host => write!(f, "the host"),
            Player::World => write!(f, "The World"),
        }
    }
}

/// A board cell. Serialized as `""`, `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum Cell {
    #[default]
    #[serde(rename = "")]
    Empty,
    X,
    O,
}

/// Match status. Everything but `Active` is terminal until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Active,
    HostWon,
    WorldWon,
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Active
    }
}

/// One entry of the append-only move log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct MoveRecord {
    pub player: Player,
    pub position: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub timestamp: DateTime<Utc>,
}

/// Lifetime results, carried across resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    #[serde(default)]
    pub host_wins: u32,
    #[serde(default)]
    pub world_wins: u32,
    #[serde(default)]
    pub draws: u32,
}

/// The persisted game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub board: [Cell; BOARD_SIZE],
    pub current_turn: Player,
    pub status: GameStatus,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_move_at: DateTime<Utc>,
    #[serde(default)]
    pub move_history: Vec<MoveRecord>,
    #[serde(default)]
    pub stats: GameStats,
}

impl Game {
    /// Fresh game with zeroed stats. The world moves first.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_stats(GameStats::default(), now)
    }

    /// Fresh game carrying forward existing stats.
    pub fn with_stats(stats: GameStats, now: DateTime<Utc>) -> Self {
        Self {
            board: [Cell::Empty; BOARD_SIZE],
            current_turn: Player::World,
            status: GameStatus::Active,
            last_move_at: now,
            move_history: Vec::new(),
            stats,
        }
    }

    /// Validate and apply a move, then evaluate the result.
    ///
    /// The game is left untouched when the move is rejected.
    pub fn apply_move(
        &mut self,
        player: Player,
        position: i64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let position = validate_position(position)?;

        if player != self.current_turn {
            return Err(AppError::WrongTurn(self.current_turn.to_string()));
        }
        if self.board[position] != Cell::Empty {
            return Err(AppError::CellOccupied(position));
        }
        if self.status.is_terminal() {
            return Err(AppError::GameNotActive);
        }

        self.board[position] = player.mark();
        self.move_history.push(MoveRecord {
            player,
            position,
            timestamp: now,
        });
        self.current_turn = player.opponent();
        self.last_move_at = now;

        self.status = evaluate(&self.board);
        match self.status {
            GameStatus::HostWon => self.stats.host_wins += 1,
            GameStatus::WorldWon => self.stats.world_wins += 1,
            GameStatus::Draw => self.stats.draws += 1,
            GameStatus::Active => {}
        }

        Ok(())
    }
}

/// Check a position is a cell index.
pub fn validate_position(position: i64) -> Result<usize, AppError> {
    usize::try_from(position)
        .ok()
        .filter(|&p| p < BOARD_SIZE)
        .ok_or_else(|| AppError::InvalidPosition(position.to_string()))
}

/// Evaluate a board: first complete line wins, a full board is a draw.
pub fn evaluate(board: &[Cell; BOARD_SIZE]) -> GameStatus {
    for [a, b, c] in WINNING_LINES {
        let mark = board[a];
        if mark != Cell::Empty && mark == board[b] && mark == board[c] {
            return match mark {
                Cell::X => GameStatus::HostWon,
                _ => GameStatus::WorldWon,
            };
        }
    }

    if board.iter().all(|&cell| cell != Cell::Empty) {
        GameStatus::Draw
    } else {
        GameStatus::Active
    }
}

/// Human-readable cell name, e.g. "center".
pub fn position_name(position: usize) -> &'static str {
    POSITION_NAMES.get(position).copied().unwrap_or("unknown")
}
