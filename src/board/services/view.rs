//! Process-local cache of the assembled board.

use crate::board::domain::Board;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cached board read model guarded by a generation counter.
///
/// Every invalidation bumps the generation. A reader records the generation
/// before it starts loading and may only store its result if the generation
/// is unchanged, so a board read before a mutation can never replace the
/// invalidation that mutation caused.
#[derive(Debug, Default)]
pub struct BoardViewCache {
    state: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    board: Option<Arc<Board>>,
    generation: u64,
}

impl BoardViewCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // No multi-field invariant spans a panic point.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached board, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<Board>> {
        self.lock().board.clone()
    }

    /// Returns the current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Drops the cached board and starts a new generation.
    pub fn invalidate(&self) {
        let mut state = self.lock();
        state.board = None;
        state.generation = state.generation.wrapping_add(1);
    }

    /// Stores `board` if no invalidation happened since `observed`.
    ///
    /// Returns `true` when the board was stored.
    #[must_use]
    pub fn store(&self, board: Arc<Board>, observed: u64) -> bool {
        let mut state = self.lock();
        if state.generation != observed {
            return false;
        }
        state.board = Some(board);
        true
    }
}
