// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value state storage (Firestore in production, memory for tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// Opaque key-value records (keyed by state key)
    pub const STATE: &str = "kv_state";
}

/// Well-known state keys.
pub mod keys {
    /// The single global tic-tac-toe game
    pub const CURRENT_GAME: &str = "current_game";
}

/// Byte-oriented key-value store.
///
/// Writes are plain overwrites; there is no compare-and-swap, so concurrent
/// read-modify-write cycles on the same key are last-write-wins.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), AppError>;
}
