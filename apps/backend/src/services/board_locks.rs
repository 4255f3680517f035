//! Per-board advisory locks.
//!
//! A reset rewrites a board while a concurrent status or scoring read could
//! observe it half way. Reads take the shared side, writes and resets the
//! exclusive side. This only serializes callers inside one process.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

#[derive(Debug, Default)]
pub struct BoardLocks {
    locks: DashMap<String, Arc<RwLock<()>>>,
}

impl BoardLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, board: &str) -> Arc<RwLock<()>> {
        // Clone out of the map so no shard guard is held across an await.
        if let Some(lock) = self.locks.get(board) {
            return lock.value().clone();
        }
        self.locks
            .entry(board.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .value()
            .clone()
    }

    pub async fn read(&self, board: &str) -> OwnedRwLockReadGuard<()> {
        self.lock_for(board).read_owned().await
    }

    pub async fn write(&self, board: &str) -> OwnedRwLockWriteGuard<()> {
        self.lock_for(board).write_owned().await
    }

    /// Shared guards for several boards, taken in sorted order.
    pub async fn read_many(&self, boards: &[String]) -> Vec<OwnedRwLockReadGuard<()>> {
        let mut guards = Vec::with_capacity(boards.len());
        for board in sorted_unique(boards) {
            guards.push(self.read(board).await);
        }
        guards
    }

    /// Exclusive guards for several boards, taken in sorted order.
    pub async fn write_many(&self, boards: &[String]) -> Vec<OwnedRwLockWriteGuard<()>> {
        let mut guards = Vec::with_capacity(boards.len());
        for board in sorted_unique(boards) {
            guards.push(self.write(board).await);
        }
        guards
    }

    /// Number of boards a lock has been created for.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

fn sorted_unique(boards: &[String]) -> Vec<&String> {
    let mut sorted: Vec<&String> = boards.iter().collect();
    sorted.sort();
    sorted.dedup();
    sorted
}
