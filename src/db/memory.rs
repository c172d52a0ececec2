// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory key-value store for local development and tests.

use crate::db::StateStore;
use crate::error::AppError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Process-local store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
