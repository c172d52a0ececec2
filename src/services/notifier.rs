// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound notification port.

use crate::error::AppError;
use async_trait::async_trait;

/// Sends a short text message to the host out-of-band.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), AppError>;
}

/// Notifier used when no chat integration is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<(), AppError> {
        tracing::info!(text, "Notification (no chat integration configured)");
        Ok(())
    }
}
