// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Projection of the canonical store onto a visual node/edge graph.
//!
//! The projection is recomputed in full on every change. Edges are never stored: they exist
//! only while both endpoints exist, and dangling references simply produce nothing.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{is_reference_type, reference_target, Domain, Item, Position};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    pub id: String,
    pub kind: String,
    pub position: Position,
    pub payload: NodePayload,
}

/// Display fields copied off the item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePayload {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    pub attributes: Vec<AttributeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
    pub outcome_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSummary {
    pub name: String,
    pub type_tag: String,
    pub is_reference: bool,
}

/// What produced an edge, so a deleted edge can be mapped back onto the item field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeRole {
    /// An attribute `ref` of a reference type.
    Reference { attribute: String },
    /// The `index`-th declared outcome.
    Outcome { index: usize },
    /// An entry of the `next` list.
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub role: EdgeRole,
}

impl VisualEdge {
    fn new(source: &str, target: &str, role: EdgeRole) -> Self {
        let id = match &role {
            EdgeRole::Outcome { index } => format!("{source}-{target}-outcome-{index}"),
            EdgeRole::Reference { .. } | EdgeRole::Next => format!("{source}-{target}"),
        };
        Self {
            id,
            source: source.to_owned(),
            target: target.to_owned(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VisualGraph {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

impl VisualGraph {
    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edges_touching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a VisualEdge> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.source == id || edge.target == id)
    }
}

/// Projects items onto nodes and edges, in store order.
pub fn project(items: &[Item], domain: Domain) -> VisualGraph {
    let ids = items
        .iter()
        .map(|item| item.id().as_str())
        .collect::<HashSet<_>>();
    let exists = |id: &str| ids.contains(id);

    let nodes = items.iter().map(|item| project_node(item, domain)).collect();

    let mut edges = Vec::new();
    for item in items {
        let source = item.id().as_str();

        for attribute in item.attributes() {
            if !is_reference_type(&attribute.type_tag) {
                continue;
            }
            let Some(target) = attribute
                .reference
                .as_deref()
                .and_then(|r| reference_target(r, exists))
            else {
                continue;
            };
            edges.push(VisualEdge::new(
                source,
                target,
                EdgeRole::Reference {
                    attribute: attribute.name.clone(),
                },
            ));
        }

        for (index, outcome) in item.outcomes().iter().enumerate() {
            if let Some(target) = outcome.next.as_deref().filter(|t| exists(*t)) {
                edges.push(VisualEdge::new(source, target, EdgeRole::Outcome { index }));
            }
        }

        for target in item.next().iter().filter(|t| exists(t.as_str())) {
            edges.push(VisualEdge::new(source, target, EdgeRole::Next));
        }
    }

    VisualGraph { nodes, edges }
}

fn project_node(item: &Item, domain: Domain) -> VisualNode {
    let kind = match domain {
        Domain::Entities => domain.node_kind().to_owned(),
        Domain::Steps => item.kind().unwrap_or(domain.node_kind()).to_owned(),
    };
    VisualNode {
        id: item.id().to_string(),
        kind,
        position: item.position(),
        payload: NodePayload {
            label: item.id().to_string(),
            type_tag: item.kind().map(ToOwned::to_owned),
            attributes: item
                .attributes()
                .iter()
                .map(|attribute| AttributeSummary {
                    name: attribute.name.clone(),
                    type_tag: attribute.type_tag.clone(),
                    is_reference: is_reference_type(&attribute.type_tag),
                })
                .collect(),
            rows: item.rows(),
            outcome_count: item.outcomes().len(),
        },
    }
}

#[cfg(test)]
mod tests;
