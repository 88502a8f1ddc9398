// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use tracing::debug;

use super::backend::PositionBackend;
use super::placement::{grid_position, PlacementConfig};
use crate::model::{Item, Position};

/// Outcome of attaching positions to a freshly parsed item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Items that picked up a saved position.
    pub restored: usize,
    /// Items that fell back to the grid.
    pub assigned: usize,
}

/// Maps item identity to a persisted canvas coordinate.
///
/// Entries survive renames (`update_item_id`) and are purged on deletion. Items without an
/// entry fall back to the deterministic grid keyed by their index in the incoming list, so
/// the same document always lays out the same way.
///
/// Writes issued while the backend is still loading are held (`None` marks a deletion) and
/// flushed once it reports ready, so a late load never races a local edit.
#[derive(Debug, Clone)]
pub struct PositionResolver<B> {
    backend: B,
    placement: PlacementConfig,
    initial_load_complete: bool,
    held: BTreeMap<String, Option<Position>>,
}

impl<B: PositionBackend> PositionResolver<B> {
    pub fn new(backend: B, placement: PlacementConfig) -> Self {
        Self {
            backend,
            placement,
            initial_load_complete: false,
            held: BTreeMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    pub fn is_ready(&self) -> bool {
        self.backend.is_ready()
    }

    pub fn initial_load_complete(&self) -> bool {
        self.initial_load_complete
    }

    pub fn mark_initial_load_complete(&mut self) {
        if !self.initial_load_complete {
            debug!("initial position load complete");
        }
        self.initial_load_complete = true;
    }

    pub fn has_persisted_positions(&self) -> bool {
        !self.backend.is_empty()
    }

    /// Number of writes waiting for the backend to become ready.
    pub fn held_writes(&self) -> usize {
        self.held.len()
    }

    /// Applies held writes once the backend is ready. Returns how many were applied.
    pub fn flush_held(&mut self) -> usize {
        if self.held.is_empty() || !self.backend.is_ready() {
            return 0;
        }
        let held = std::mem::take(&mut self.held);
        let count = held.len();
        for (id, position) in held {
            match position {
                Some(position) => self.backend.set(&id, position),
                None => self.backend.delete(&id),
            }
        }
        debug!(count, "held position writes flushed");
        count
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        match self.held.get(id) {
            Some(held) => *held,
            None => self.backend.get(id),
        }
    }

    pub fn set_position(&mut self, id: &str, position: Position) {
        self.write(id, Some(position));
    }

    fn write(&mut self, id: &str, position: Option<Position>) {
        self.flush_held();
        if self.backend.is_ready() {
            match position {
                Some(position) => self.backend.set(id, position),
                None => self.backend.delete(id),
            }
        } else {
            self.held.insert(id.to_owned(), position);
        }
    }

    /// Attaches a position to every item: the persisted one when present, otherwise the
    /// grid slot for its index. Newly assigned positions are written back so they stay
    /// stable across later parses.
    pub fn resolve_positions(&mut self, items: Vec<Item>) -> Vec<Item> {
        self.resolve(items).0
    }

    /// Like [`Self::resolve_positions`], also reporting how many saved positions were used.
    pub fn resolve(&mut self, items: Vec<Item>) -> (Vec<Item>, Resolution) {
        let mut report = Resolution::default();
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, mut item)| {
                let position = match self.position(item.id().as_str()) {
                    Some(saved) => {
                        report.restored += 1;
                        saved
                    }
                    None => {
                        report.assigned += 1;
                        let assigned = grid_position(index, &self.placement);
                        self.set_position(item.id().as_str(), assigned);
                        assigned
                    }
                };
                item.set_position(position);
                item
            })
            .collect();
        (items, report)
    }

    /// True when every item has a persisted entry and carries exactly that position.
    pub fn matches_persisted(&self, items: &[Item]) -> bool {
        items
            .iter()
            .all(|item| self.backend.get(item.id().as_str()) == Some(item.position()))
    }

    /// Migrates the position entry. When `new_id` already has one, it is overwritten.
    pub fn update_item_id(&mut self, old_id: &str, new_id: &str) {
        if old_id == new_id {
            return;
        }
        if self.held.is_empty() && self.backend.is_ready() {
            self.backend.rename(old_id, new_id);
            return;
        }
        if let Some(position) = self.position(old_id) {
            self.write(old_id, None);
            self.write(new_id, Some(position));
        }
    }

    pub fn remove_item_position(&mut self, id: &str) {
        self.write(id, None);
    }

    pub fn remove_item_positions(&mut self, ids: &[&str]) {
        self.flush_held();
        if self.backend.is_ready() {
            self.backend.bulk_delete(ids);
        } else {
            for id in ids {
                self.held.insert((*id).to_owned(), None);
            }
        }
    }
}
