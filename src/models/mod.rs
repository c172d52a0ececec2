// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod game;
pub mod streak;

pub use activity::{Activity, ActivityCategory, ActivityHighlight, ActivityMap};
pub use game::{Cell, Game, GameStats, GameStatus, MoveRecord, Player};
pub use streak::StreakReport;
