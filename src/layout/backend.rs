// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::Position;

/// Persisted position storage owned by the host.
///
/// The core never performs storage I/O; it only calls through this trait. Writers must not
/// apply resolved positions until `is_ready` reports true.
pub trait PositionBackend {
    fn get(&self, id: &str) -> Option<Position>;

    fn set(&mut self, id: &str, position: Position);

    fn delete(&mut self, id: &str);

    /// Moves `old_id`'s entry to `new_id`. An existing `new_id` entry is overwritten.
    fn rename(&mut self, old_id: &str, new_id: &str) {
        if old_id == new_id {
            return;
        }
        if let Some(position) = self.get(old_id) {
            self.delete(old_id);
            self.set(new_id, position);
        }
    }

    fn bulk_delete(&mut self, ids: &[&str]) {
        for id in ids {
            self.delete(id);
        }
    }

    fn is_ready(&self) -> bool;

    fn is_empty(&self) -> bool;
}

/// In-memory backend, used by the CLI and tests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryPositionBackend {
    entries: BTreeMap<String, Position>,
    loading: bool,
}

impl MemoryPositionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that still has its saved layout in flight.
    pub fn loading() -> Self {
        Self {
            entries: BTreeMap::new(),
            loading: true,
        }
    }

    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Position)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, p)| (k.into(), p)).collect(),
            loading: false,
        }
    }

    pub fn mark_ready(&mut self) {
        self.loading = false;
    }

    pub fn entries(&self) -> &BTreeMap<String, Position> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl PositionBackend for MemoryPositionBackend {
    fn get(&self, id: &str) -> Option<Position> {
        self.entries.get(id).copied()
    }

    fn set(&mut self, id: &str, position: Position) {
        self.entries.insert(id.to_owned(), position);
    }

    fn delete(&mut self, id: &str) {
        self.entries.remove(id);
    }

    fn rename(&mut self, old_id: &str, new_id: &str) {
        if old_id == new_id {
            return;
        }
        if let Some(position) = self.entries.remove(old_id) {
            self.entries.insert(new_id.to_owned(), position);
        }
    }

    fn is_ready(&self) -> bool {
        !self.loading
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
