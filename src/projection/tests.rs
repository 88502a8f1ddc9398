// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{project, EdgeRole, VisualEdge};
use crate::model::{Attribute, Domain, Item, ItemId, Outcome, Position};

fn item(id: &str) -> Item {
    Item::new(ItemId::new(id).expect("item id"))
}

fn edge_pairs(edges: &[VisualEdge]) -> Vec<(&str, &str)> {
    edges
        .iter()
        .map(|edge| (edge.source.as_str(), edge.target.as_str()))
        .collect()
}

fn orders_and_customers() -> Vec<Item> {
    vec![
        item("Orders")
            .with_attribute(Attribute::new("id", "int"))
            .with_attribute(
                Attribute::new("customer_id", "foreign_key").with_reference("Customers.id"),
            ),
        item("Customers").with_attribute(Attribute::new("id", "int")),
    ]
}

#[test]
fn reference_attribute_yields_one_directed_edge() {
    let graph = project(&orders_and_customers(), Domain::Entities);

    assert_eq!(
        graph.edges,
        vec![VisualEdge {
            id: "Orders-Customers".to_owned(),
            source: "Orders".to_owned(),
            target: "Customers".to_owned(),
            role: EdgeRole::Reference {
                attribute: "customer_id".to_owned()
            },
        }]
    );
}

#[rstest]
#[case("int")]
#[case("string")]
#[case("")]
fn non_reference_types_never_produce_edges(#[case] type_tag: &str) {
    let items = vec![
        item("A").with_attribute(Attribute::new("b", type_tag).with_reference("B.id")),
        item("B"),
    ];
    assert!(project(&items, Domain::Entities).edges.is_empty());
}

#[test]
fn dangling_references_are_dropped_silently() {
    let items = vec![
        item("B")
            .with_attribute(Attribute::new("a_id", "fk").with_reference("A.id"))
            .with_next("A")
            .with_outcome(Outcome::to("A")),
    ];

    let graph = project(&items, Domain::Steps);
    assert!(graph.edges.is_empty());
    assert_eq!(graph.nodes.len(), 1);
}

#[test]
fn outcome_edges_carry_their_slot_index() {
    let items = vec![
        item("check")
            .with_kind("decide")
            .with_outcome(Outcome::to("approve"))
            .with_outcome(Outcome::default())
            .with_outcome(Outcome::to("reject")),
        item("approve"),
        item("reject"),
    ];

    let graph = project(&items, Domain::Steps);

    let roles = graph.edges.iter().map(|e| (&e.id, &e.role)).collect::<Vec<_>>();
    assert_eq!(
        roles,
        vec![
            (&"check-approve-outcome-0".to_owned(), &EdgeRole::Outcome { index: 0 }),
            (&"check-reject-outcome-2".to_owned(), &EdgeRole::Outcome { index: 2 }),
        ]
    );
    assert_eq!(graph.node("check").expect("node").kind, "decide");
    assert_eq!(graph.node("approve").expect("node").kind, "step");
}

#[test]
fn next_pointers_yield_one_edge_each_including_duplicates() {
    let items = vec![item("a").with_next("b").with_next("c").with_next("b"), item("b"), item("c")];

    let graph = project(&items, Domain::Steps);

    assert_eq!(edge_pairs(&graph.edges), vec![("a", "b"), ("a", "c"), ("a", "b")]);
    assert!(graph.edges.iter().all(|e| e.role == EdgeRole::Next));
}

#[test]
fn projection_is_deterministic_and_follows_store_order() {
    let items = vec![
        item("z").with_position(Position::new(1.0, 2.0)).with_next("a"),
        item("a").with_next("z"),
        item("m"),
    ];

    let first = project(&items, Domain::Steps);
    let second = project(&items, Domain::Steps);

    assert_eq!(first, second);
    let ids = first.nodes.iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["z", "a", "m"]);
    assert_eq!(first.nodes[0].position, Position::new(1.0, 2.0));
}

#[test]
fn removing_an_item_removes_exactly_its_edges() {
    let mut items = vec![
        item("a").with_next("b"),
        item("b").with_next("c"),
        item("c").with_next("a"),
        item("d").with_next("c"),
    ];
    let before = project(&items, Domain::Steps);
    assert_eq!(before.edges.len(), 4);

    items.retain(|i| i.id() != "b");
    let after = project(&items, Domain::Steps);

    let expected = before
        .edges
        .iter()
        .filter(|e| e.source != "b" && e.target != "b")
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(after.edges, expected);
    assert_eq!(before.edges_touching("b").count(), 2);
}

#[test]
fn node_payload_summarizes_attributes() {
    let items = orders_and_customers();
    let graph = project(&items, Domain::Entities);
    let orders = graph.node("Orders").expect("orders");

    assert_eq!(orders.kind, "entity");
    assert_eq!(orders.payload.attributes.len(), 2);
    assert!(!orders.payload.attributes[0].is_reference);
    assert!(orders.payload.attributes[1].is_reference);
}

#[test]
fn graph_serializes_with_tagged_roles() {
    let graph = project(&orders_and_customers(), Domain::Entities);
    let json = serde_json::to_value(&graph).expect("json");
    assert_eq!(json["edges"][0]["role"]["kind"], "reference");
    assert_eq!(json["edges"][0]["role"]["attribute"], "customer_id");
    assert_eq!(json["nodes"][1]["position"]["x"], 0.0);
}
