// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Navigation guard for unsaved canvas edits.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct GuardState {
    dirty: bool,
    pending: Option<String>,
}

/// Shared handle; clones observe the same state.
///
/// The engine marks it dirty on canvas edits. A navigation request made while dirty is held
/// until the host either proceeds (leaving unsaved work) or resets (staying).
#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    state: Arc<Mutex<GuardState>>,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GuardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mark_dirty(&self) {
        self.lock().dirty = true;
    }

    /// Work was persisted; later navigation is free.
    pub fn mark_clean(&self) {
        self.lock().dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    /// Asks to navigate to `target`. Returns `true` when navigation may happen now.
    pub fn request(&self, target: impl Into<String>) -> bool {
        let mut state = self.lock();
        if !state.dirty {
            return true;
        }
        state.pending = Some(target.into());
        false
    }

    /// Holds `target` regardless of dirtiness.
    pub fn block(&self, target: impl Into<String>) {
        self.lock().pending = Some(target.into());
    }

    pub fn blocked(&self) -> bool {
        self.lock().pending.is_some()
    }

    pub fn pending_target(&self) -> Option<String> {
        self.lock().pending.clone()
    }

    /// Releases the held navigation, discarding the dirty mark.
    pub fn proceed(&self) -> Option<String> {
        let mut state = self.lock();
        state.dirty = false;
        state.pending.take()
    }

    /// Drops the held navigation; unsaved work stays marked.
    pub fn reset(&self) {
        self.lock().pending = None;
    }
}
