// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas-originated mutations.
//!
//! Edges have no identity of their own, so connecting or deleting one on the canvas is
//! translated into a change to the referencing item's attributes, outcomes or next list.
//! Applying ops produces a coarse delta of touched item ids.

use std::collections::BTreeSet;

use tracing::debug;

use crate::layout::{PositionBackend, Viewport};
use crate::model::{
    is_reference_type, reference_target, Attribute, ItemDraft, ItemPatch, Outcome, Position,
};
use crate::projection::{EdgeRole, VisualEdge};
use crate::store::CanonicalStore;

/// Attribute type assigned to references created by drawing an edge.
pub const DEFAULT_REFERENCE_TYPE: &str = "foreign_key";

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add {
        draft: ItemDraft,
        viewport: Option<Viewport>,
    },
    Update {
        id: String,
        patch: ItemPatch,
    },
    Remove {
        id: String,
    },
    SetPosition {
        id: String,
        position: Position,
    },
    Connect {
        source: String,
        target: String,
        role: ConnectRole,
    },
    Disconnect {
        source: String,
        target: String,
        role: EdgeRole,
    },
}

impl Op {
    /// The op that undoes a projected edge.
    pub fn disconnect(edge: &VisualEdge) -> Self {
        Self::Disconnect {
            source: edge.source.clone(),
            target: edge.target.clone(),
            role: edge.role.clone(),
        }
    }
}

/// Which item field a newly drawn edge should be recorded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectRole {
    /// Set `attribute`'s ref, or add a `<target>_id` attribute when absent.
    Reference { attribute: Option<String> },
    /// Fill outcome slot `index`, or append a new outcome.
    Outcome { index: Option<usize> },
    /// Append to the `next` list.
    Next,
}

/// Item ids touched by applied ops.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub updated: Vec<String>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<String>,
    removed: BTreeSet<String>,
    updated: BTreeSet<String>,
}

impl DeltaBuilder {
    fn record_added(&mut self, id: &str) {
        self.removed.remove(id);
        self.updated.remove(id);
        self.added.insert(id.to_owned());
    }

    fn record_removed(&mut self, id: &str) {
        let was_added = self.added.remove(id);
        self.updated.remove(id);
        if !was_added {
            self.removed.insert(id.to_owned());
        }
    }

    fn record_updated(&mut self, id: &str) {
        if self.added.contains(id) || self.removed.contains(id) {
            return;
        }
        self.updated.insert(id.to_owned());
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

pub fn apply_op<B: PositionBackend>(store: &mut CanonicalStore<B>, op: Op) -> Delta {
    apply_ops(store, [op])
}

/// Applies ops in order. Ops naming unknown items are skipped.
pub fn apply_ops<B, I>(store: &mut CanonicalStore<B>, ops: I) -> Delta
where
    B: PositionBackend,
    I: IntoIterator<Item = Op>,
{
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_one(store, op, &mut delta);
    }
    delta.finish()
}

fn apply_one<B: PositionBackend>(store: &mut CanonicalStore<B>, op: Op, delta: &mut DeltaBuilder) {
    match op {
        Op::Add { draft, viewport } => {
            let item = store.add(draft, viewport.as_ref());
            delta.record_added(item.id().as_str());
        }
        Op::Update { id, patch } => {
            let new_id = patch.id.clone();
            if store.update(&id, patch) {
                match new_id.filter(|new_id| *new_id != id.as_str()) {
                    Some(new_id) => {
                        delta.record_removed(&id);
                        delta.record_added(new_id.as_str());
                    }
                    None => delta.record_updated(&id),
                }
            }
        }
        Op::Remove { id } => {
            if store.remove(&id) {
                delta.record_removed(&id);
            }
        }
        Op::SetPosition { id, position } => {
            if store.set_position(&id, position) {
                delta.record_updated(&id);
            }
        }
        Op::Connect {
            source,
            target,
            role,
        } => {
            if connect(store, &source, &target, role) {
                delta.record_updated(&source);
            }
        }
        Op::Disconnect {
            source,
            target,
            role,
        } => {
            if disconnect(store, &source, &target, &role) {
                delta.record_updated(&source);
            }
        }
    }
}

fn connect<B: PositionBackend>(
    store: &mut CanonicalStore<B>,
    source: &str,
    target: &str,
    role: ConnectRole,
) -> bool {
    if !store.contains(target) {
        debug!(source, target, "connect ignored: unknown target");
        return false;
    }
    if !matches!(role, ConnectRole::Reference { .. }) && !store.domain().carries_flow() {
        debug!(
            source,
            target,
            domain = %store.domain(),
            "connect ignored: domain has no flow edges"
        );
        return false;
    }
    let reference = store
        .get(target)
        .map(|item| {
            let key = item
                .attributes()
                .iter()
                .find(|a| a.name == "id")
                .or_else(|| item.attributes().first())
                .map_or("id", |a| a.name.as_str());
            format!("{target}.{key}")
        })
        .unwrap_or_default();

    let Some(item) = store.item_mut(source) else {
        debug!(source, target, "connect ignored: unknown source");
        return false;
    };

    match role {
        ConnectRole::Reference { attribute } => {
            let name = attribute.unwrap_or_else(|| format!("{}_id", target.to_lowercase()));
            match item.attributes_mut().iter_mut().find(|a| a.name == name) {
                Some(existing) => {
                    if !is_reference_type(&existing.type_tag) {
                        existing.type_tag = DEFAULT_REFERENCE_TYPE.to_owned();
                    }
                    existing.reference = Some(reference);
                }
                None => item
                    .attributes_mut()
                    .push(Attribute::new(name, DEFAULT_REFERENCE_TYPE).with_reference(reference)),
            }
        }
        ConnectRole::Outcome { index } => {
            let outcomes = item.outcomes_mut();
            match index.and_then(|i| outcomes.get_mut(i)) {
                Some(slot) => slot.next = Some(target.to_owned()),
                None => outcomes.push(Outcome::to(target)),
            }
        }
        ConnectRole::Next => {
            if item.next().iter().any(|n| n == target) {
                return false;
            }
            item.next_mut().push(target.to_owned());
        }
    }
    store.touch();
    true
}

fn disconnect<B: PositionBackend>(
    store: &mut CanonicalStore<B>,
    source: &str,
    target: &str,
    role: &EdgeRole,
) -> bool {
    let Some(item) = store.item_mut(source) else {
        debug!(source, target, "disconnect ignored: unknown source");
        return false;
    };

    let changed = match role {
        EdgeRole::Reference { attribute } => {
            match item.attributes_mut().iter_mut().find(|a| {
                a.name == *attribute
                    && a
                        .reference
                        .as_deref()
                        .and_then(|r| reference_target(r, |id| id == target))
                        .is_some()
            }) {
                Some(attribute) => {
                    attribute.reference = None;
                    true
                }
                None => false,
            }
        }
        EdgeRole::Outcome { index } => match item.outcomes_mut().get_mut(*index) {
            Some(slot) if slot.next.as_deref() == Some(target) => {
                slot.next = None;
                true
            }
            _ => false,
        },
        EdgeRole::Next => {
            let next = item.next_mut();
            match next.iter().position(|n| n == target) {
                Some(position) => {
                    next.remove(position);
                    true
                }
                None => false,
            }
        }
    };

    if changed {
        store.touch();
    }
    changed
}
