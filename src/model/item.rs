// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// Canvas coordinate of an item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A typed field of an item. `reference` points at another item (`Target.attr`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_tag: String,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            reference: None,
            config: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// One declared outcome of a decision-style item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Outcome {
    pub fn to(next: impl Into<String>) -> Self {
        Self {
            next: Some(next.into()),
            ..Self::default()
        }
    }
}

/// One entity or one step in the canonical store.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    kind: Option<String>,
    attributes: Vec<Attribute>,
    position: Position,
    rows: Option<u64>,
    outcomes: Vec<Outcome>,
    next: Vec<String>,
}

impl Item {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            kind: None,
            attributes: Vec::new(),
            position: Position::default(),
            rows: None,
            outcomes: Vec::new(),
            next: Vec::new(),
        }
    }

    pub(crate) fn from_draft(id: ItemId, draft: ItemDraft, position: Position) -> Self {
        Self {
            id,
            kind: draft.kind,
            attributes: draft.attributes,
            position,
            rows: draft.rows,
            outcomes: draft.outcomes,
            next: draft.next,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn rows(&self) -> Option<u64> {
        self.rows
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn outcomes_mut(&mut self) -> &mut Vec<Outcome> {
        &mut self.outcomes
    }

    pub fn next(&self) -> &[String] {
        &self.next
    }

    pub fn next_mut(&mut self) -> &mut Vec<String> {
        &mut self.next
    }

    pub fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    pub fn set_kind<T: Into<String>>(&mut self, kind: Option<T>) {
        self.kind = kind.map(Into::into);
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn set_rows(&mut self, rows: Option<u64>) {
        self.rows = rows;
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcomes.push(outcome);
        self
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next.push(next.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Merges `patch` into this item. The id is left to the caller, which must migrate
    /// the position key alongside it.
    pub(crate) fn merge(&mut self, patch: ItemPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(attributes) = patch.attributes {
            self.attributes = attributes;
        }
        if let Some(rows) = patch.rows {
            self.rows = rows;
        }
        if let Some(outcomes) = patch.outcomes {
            self.outcomes = outcomes;
        }
        if let Some(next) = patch.next {
            self.next = next;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
    }
}

/// Creation request for `CanonicalStore::add`. An empty `id` asks the store to allocate one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDraft {
    pub id: String,
    pub kind: Option<String>,
    pub attributes: Vec<Attribute>,
    pub rows: Option<u64>,
    pub outcomes: Vec<Outcome>,
    pub next: Vec<String>,
}

impl ItemDraft {
    pub fn named(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Partial update for `CanonicalStore::update`. `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemPatch {
    pub id: Option<ItemId>,
    pub kind: Option<Option<String>>,
    pub attributes: Option<Vec<Attribute>>,
    pub rows: Option<Option<u64>>,
    pub outcomes: Option<Vec<Outcome>>,
    pub next: Option<Vec<String>>,
    pub position: Option<Position>,
}

impl ItemPatch {
    pub fn rename(id: ItemId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
