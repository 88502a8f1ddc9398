// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{debug, warn};

use crate::layout::{placement_for, PlacementConfig, PositionBackend, PositionResolver, Viewport};
use crate::model::{retarget_reference, Domain, Item, ItemDraft, ItemId, ItemPatch, Position};

/// Ordered, uniquely keyed collection of items; the only persisted structural truth.
///
/// Every operation is total. Unknown ids are ignored because the canvas may race a
/// deletion against a pending interaction.
#[derive(Debug, Clone)]
pub struct CanonicalStore<B> {
    domain: Domain,
    items: Vec<Item>,
    resolver: PositionResolver<B>,
    cascade_renames: bool,
    rev: u64,
}

impl<B: PositionBackend> CanonicalStore<B> {
    pub fn new(domain: Domain, backend: B, placement: PlacementConfig) -> Self {
        Self {
            domain,
            items: Vec::new(),
            resolver: PositionResolver::new(backend, placement),
            cascade_renames: false,
            rev: 0,
        }
    }

    /// Also rewrite incoming references when an item is renamed.
    pub fn with_cascade_renames(mut self, cascade: bool) -> Self {
        self.cascade_renames = cascade;
        self
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn resolver(&self) -> &PositionResolver<B> {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut PositionResolver<B> {
        &mut self.resolver
    }

    /// Increments on every applied mutation.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// Appends a new item and returns it with its assigned id and position.
    ///
    /// With a viewport the item is staggered around its midpoint; without one it takes the
    /// next grid slot. Existing items are never moved or reordered.
    pub fn add(&mut self, mut draft: ItemDraft, viewport: Option<&Viewport>) -> Item {
        let index = self.items.len();
        let position = placement_for(index, viewport, self.resolver.placement());
        let id = self.allocate_id(&draft.id);
        draft.id.clear();
        self.strip_foreign_fields(&mut draft);

        let item = Item::from_draft(id, draft, position);
        self.resolver.set_position(item.id().as_str(), position);
        self.items.push(item.clone());
        self.bump_rev();
        debug!(id = %item.id(), x = position.x, y = position.y, "item added");
        item
    }

    fn allocate_id(&self, requested: &str) -> ItemId {
        let requested = requested.trim();
        if let Ok(id) = ItemId::new(requested) {
            if !self.contains(id.as_str()) {
                return id;
            }
        }

        let base = if requested.is_empty() {
            self.domain.id_prefix()
        } else {
            requested
        };
        let mut n = if requested.is_empty() { 1 } else { 2 };
        loop {
            let candidate = format!("{base}_{n}");
            if !self.contains(&candidate) {
                if let Ok(id) = ItemId::new(candidate) {
                    return id;
                }
            }
            n += 1;
        }
    }

    /// Merges `patch` into the item. Returns whether anything was applied.
    ///
    /// A changed id migrates the position entry within the same call. A rename onto an id
    /// held by another item is rejected as a whole so ids stay unique.
    pub fn update(&mut self, id: &str, patch: ItemPatch) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!(id, "update ignored: unknown item");
            return false;
        };

        if !self.patch_fits_domain(&patch) {
            debug!(id, domain = %self.domain, "update rejected: field not carried by domain");
            return false;
        }

        let rename = patch.id.clone().filter(|new_id| new_id != id);
        if let Some(new_id) = &rename {
            if self.contains(new_id.as_str()) {
                warn!(id, new_id = %new_id, "update rejected: id already in use");
                return false;
            }
        }

        let explicit_position = patch.position;
        self.items[index].merge(patch);

        if let Some(new_id) = rename {
            self.items[index].set_id(new_id.clone());
            self.resolver.update_item_id(id, new_id.as_str());
            if self.cascade_renames {
                self.retarget_references(id, new_id.as_str());
            }
            debug!(old_id = id, new_id = %new_id, "item renamed");
        }

        if let Some(position) = explicit_position {
            let key = self.items[index].id().as_str().to_owned();
            self.resolver.set_position(&key, position);
        }

        self.bump_rev();
        true
    }

    fn strip_foreign_fields(&self, draft: &mut ItemDraft) {
        if !self.domain.carries_rows() && draft.rows.take().is_some() {
            debug!(domain = %self.domain, "rows dropped from new item");
        }
        if !self.domain.carries_flow() && !(draft.outcomes.is_empty() && draft.next.is_empty()) {
            debug!(domain = %self.domain, "outcomes and next dropped from new item");
            draft.outcomes.clear();
            draft.next.clear();
        }
    }

    /// Clearing a field the domain does not carry is allowed; setting one is not.
    fn patch_fits_domain(&self, patch: &ItemPatch) -> bool {
        let sets_rows = matches!(patch.rows, Some(Some(_)));
        let sets_flow = patch.outcomes.as_ref().is_some_and(|o| !o.is_empty())
            || patch.next.as_ref().is_some_and(|n| !n.is_empty());
        (self.domain.carries_rows() || !sets_rows) && (self.domain.carries_flow() || !sets_flow)
    }

    fn retarget_references(&mut self, old_id: &str, new_id: &str) {
        for item in &mut self.items {
            for attribute in item.attributes_mut() {
                if let Some(updated) = attribute
                    .reference
                    .as_deref()
                    .and_then(|r| retarget_reference(r, old_id, new_id))
                {
                    attribute.reference = Some(updated);
                }
            }
            for outcome in item.outcomes_mut() {
                if outcome.next.as_deref() == Some(old_id) {
                    outcome.next = Some(new_id.to_owned());
                }
            }
            for next in item.next_mut() {
                if *next == old_id {
                    *next = new_id.to_owned();
                }
            }
        }
    }

    /// Deletes the item and its position entry. References to it are left dangling.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!(id, "remove ignored: unknown item");
            return false;
        };
        self.items.remove(index);
        self.resolver.remove_item_position(id);
        self.bump_rev();
        true
    }

    /// Moves an item without touching any other field.
    pub fn set_position(&mut self, id: &str, position: Position) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!(id, "set_position ignored: unknown item");
            return false;
        };
        self.items[index].set_position(position);
        self.resolver.set_position(id, position);
        self.bump_rev();
        true
    }

    /// Replaces the whole collection with already-resolved items.
    pub(crate) fn replace_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.bump_rev();
    }

    pub(crate) fn item_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub(crate) fn touch(&mut self) {
        self.bump_rev();
    }
}
