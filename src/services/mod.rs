// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod game;
pub mod notifier;
pub mod slack;
pub mod strava;
pub mod streak;

pub use game::{GameService, MoveOutcome, NotificationStatus};
pub use notifier::{LogNotifier, Notifier};
pub use slack::SlackClient;
pub use strava::{ActivitySource, StravaService};
pub use streak::compute_streaks;
