// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::model::{Attribute, Domain, Item, ItemId, Outcome};

/// The document emitted for an empty store.
pub const EMPTY_DOCUMENT: &str = "";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid YAML: {0}")]
    Syntax(#[source] serde_yaml::Error),
    #[error("expected a mapping at the document root")]
    NotAMapping,
    #[error("missing top-level '{root}' key")]
    MissingRoot { root: &'static str },
    #[error("invalid '{root}' records: {source}")]
    Records {
        root: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("record {index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate id '{id}'")]
    DuplicateId { id: String },
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_yaml::Error),
}

/// Result of reading a document.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Items in document order, positions not yet resolved.
    Parsed(Vec<Item>),
    /// The document belongs to the sibling domain; not an error.
    NotApplicable,
    /// The document could not be read; callers keep their previous state.
    Malformed(DocumentError),
}

impl ParseOutcome {
    pub fn into_items(self) -> Option<Vec<Item>> {
        match self {
            Self::Parsed(items) => Some(items),
            Self::NotApplicable | Self::Malformed(_) => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EntityRecord {
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StepRecord {
    id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    next: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    outcomes: Vec<Outcome>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct EntitiesDocument {
    entities: Vec<EntityRecord>,
}

#[derive(Serialize)]
struct StepsDocument {
    steps: Vec<StepRecord>,
}

impl EntityRecord {
    fn from_item(item: &Item) -> Self {
        Self {
            name: item.id().to_string(),
            kind: item.kind().map(ToOwned::to_owned),
            rows: item.rows(),
            attributes: item.attributes().to_vec(),
        }
    }

    fn into_item(self, index: usize) -> Result<Item, DocumentError> {
        let id = ItemId::new(self.name).map_err(|_| DocumentError::EmptyId { index })?;
        let mut item = Item::new(id);
        item.set_kind(self.kind);
        item.set_rows(self.rows);
        *item.attributes_mut() = self.attributes;
        Ok(item)
    }
}

impl StepRecord {
    fn from_item(item: &Item) -> Self {
        Self {
            id: item.id().to_string(),
            kind: item.kind().map(ToOwned::to_owned),
            next: item.next().to_vec(),
            outcomes: item.outcomes().to_vec(),
            attributes: item.attributes().to_vec(),
        }
    }

    fn into_item(self, index: usize) -> Result<Item, DocumentError> {
        let id = ItemId::new(self.id).map_err(|_| DocumentError::EmptyId { index })?;
        let mut item = Item::new(id);
        item.set_kind(self.kind);
        *item.next_mut() = self.next;
        *item.outcomes_mut() = self.outcomes;
        *item.attributes_mut() = self.attributes;
        Ok(item)
    }
}

/// Writes the store as a YAML document. An empty store yields [`EMPTY_DOCUMENT`].
///
/// Positions are layout state, not structure, and are never written.
pub fn serialize_document(items: &[Item], domain: Domain) -> Result<String, DocumentError> {
    if items.is_empty() {
        return Ok(EMPTY_DOCUMENT.to_owned());
    }
    let encoded = match domain {
        Domain::Entities => serde_yaml::to_string(&EntitiesDocument {
            entities: items.iter().map(EntityRecord::from_item).collect(),
        }),
        Domain::Steps => serde_yaml::to_string(&StepsDocument {
            steps: items.iter().map(StepRecord::from_item).collect(),
        }),
    };
    encoded.map_err(DocumentError::Encode)
}

/// Reads a YAML document for `domain`.
///
/// Blank input, a `null` document and an empty record list are all the empty store. A
/// document carrying only the sibling domain's root key is [`ParseOutcome::NotApplicable`].
pub fn parse_document(text: &str, domain: Domain) -> ParseOutcome {
    if text.trim().is_empty() {
        return ParseOutcome::Parsed(Vec::new());
    }

    let root = match serde_yaml::from_str::<Value>(text) {
        Ok(root) => root,
        Err(err) => return ParseOutcome::Malformed(DocumentError::Syntax(err)),
    };

    let mapping = match root {
        Value::Null => return ParseOutcome::Parsed(Vec::new()),
        Value::Mapping(mapping) => mapping,
        _ => return ParseOutcome::Malformed(DocumentError::NotAMapping),
    };

    let root_key = domain.root_key();
    let Some(records) = mapping.get(root_key) else {
        if mapping.contains_key(domain.sibling().root_key()) {
            return ParseOutcome::NotApplicable;
        }
        return ParseOutcome::Malformed(DocumentError::MissingRoot { root: root_key });
    };

    if records.is_null() {
        return ParseOutcome::Parsed(Vec::new());
    }

    let items = match domain {
        Domain::Entities => serde_yaml::from_value::<Vec<EntityRecord>>(records.clone()).map(
            |records| {
                records
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| record.into_item(index))
                    .collect::<Vec<_>>()
            },
        ),
        Domain::Steps => serde_yaml::from_value::<Vec<StepRecord>>(records.clone()).map(
            |records| {
                records
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| record.into_item(index))
                    .collect::<Vec<_>>()
            },
        ),
    };

    match items {
        Ok(items) => match collect_unique(items) {
            Ok(items) => ParseOutcome::Parsed(items),
            Err(err) => ParseOutcome::Malformed(err),
        },
        Err(source) => ParseOutcome::Malformed(DocumentError::Records {
            root: root_key,
            source,
        }),
    }
}

fn collect_unique(
    items: Vec<Result<Item, DocumentError>>,
) -> Result<Vec<Item>, DocumentError> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        let item = item?;
        if !seen.insert(item.id().clone()) {
            return Err(DocumentError::DuplicateId {
                id: item.id().to_string(),
            });
        }
        unique.push(item);
    }
    Ok(unique)
}
