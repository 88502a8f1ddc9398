// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;
use serde_json::json;

use super::{
    has_structural_change, parse_document, serialize_document, DocumentError, ParseOutcome,
    EMPTY_DOCUMENT,
};
use crate::model::{Attribute, Domain, Item, ItemId, Outcome, Position};

fn item(id: &str) -> Item {
    Item::new(ItemId::new(id).expect("item id"))
}

fn parsed(text: &str, domain: Domain) -> Vec<Item> {
    match parse_document(text, domain) {
        ParseOutcome::Parsed(items) => items,
        other => panic!("expected parsed items, got {other:?}"),
    }
}

fn entity_store() -> Vec<Item> {
    vec![
        item("Customers")
            .with_kind("table")
            .with_rows(100)
            .with_attribute(Attribute::new("id", "int"))
            .with_position(Position::new(50.0, 100.0)),
        item("Orders")
            .with_attribute(Attribute::new("id", "int"))
            .with_attribute(
                Attribute::new("customer_id", "foreign_key")
                    .with_reference("Customers.id")
                    .with_config(json!({"distribution": "uniform"})),
            )
            .with_position(Position::new(350.0, 100.0)),
    ]
}

fn step_store() -> Vec<Item> {
    vec![
        item("arrive").with_kind("create").with_next("check"),
        item("check")
            .with_kind("decide")
            .with_outcome(Outcome {
                probability: Some(0.7),
                label: Some("ok".into()),
                ..Outcome::to("serve")
            })
            .with_outcome(Outcome::to("leave")),
        item("serve")
            .with_kind("process")
            .with_attribute(Attribute::new("duration", "float").with_config(json!(4.5))),
        item("leave").with_kind("release"),
    ]
}

#[test]
fn empty_store_serializes_to_sentinel_and_back() {
    let text = serialize_document(&[], Domain::Entities).expect("serialize");
    assert_eq!(text, EMPTY_DOCUMENT);
    assert!(parsed(&text, Domain::Entities).is_empty());
}

#[rstest]
#[case("")]
#[case("   \n\t")]
#[case("~")]
#[case("entities: []")]
#[case("entities:")]
fn blank_and_empty_documents_parse_to_no_items(#[case] text: &str) {
    assert!(parsed(text, Domain::Entities).is_empty());
}

#[rstest]
#[case(Domain::Entities)]
#[case(Domain::Steps)]
fn round_trip_is_idempotent(#[case] domain: Domain) {
    let store = match domain {
        Domain::Entities => entity_store(),
        Domain::Steps => step_store(),
    };

    let first = serialize_document(&store, domain).expect("serialize");
    let reparsed = parsed(&first, domain);
    let second = serialize_document(&reparsed, domain).expect("serialize again");

    assert_eq!(first, second);
    assert!(!has_structural_change(&store, &reparsed));
}

#[test]
fn positions_are_not_written() {
    let text = serialize_document(&entity_store(), Domain::Entities).expect("serialize");
    assert!(!text.contains("position"));
    assert!(text.starts_with("entities:"));
}

#[test]
fn parses_entity_document() {
    let text = r#"
entities:
  - name: Orders
    type: table
    rows: 1000
    attributes:
      - name: id
        type: int
      - name: customer_id
        type: foreign_key
        ref: Customers.id
        config:
          nullable: false
  - name: Customers
"#;
    let items = parsed(text, Domain::Entities);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id(), "Orders");
    assert_eq!(items[0].kind(), Some("table"));
    assert_eq!(items[0].rows(), Some(1000));
    assert_eq!(items[0].attributes()[1].reference.as_deref(), Some("Customers.id"));
    assert_eq!(items[0].attributes()[1].config, Some(json!({"nullable": false})));
    assert!(items[1].attributes().is_empty());
}

#[test]
fn parses_step_document() {
    let text = r#"
steps:
  - id: start
    type: create
    next: [work]
  - id: work
    outcomes:
      - next: done
        probability: 0.9
      - label: retry
"#;
    let items = parsed(text, Domain::Steps);

    assert_eq!(items[0].next(), ["work".to_owned()]);
    assert_eq!(items[1].outcomes().len(), 2);
    assert_eq!(items[1].outcomes()[0].probability, Some(0.9));
    assert_eq!(items[1].outcomes()[1].next, None);
}

#[rstest]
#[case("steps:\n  - id: a\n", Domain::Entities)]
#[case("entities:\n  - name: a\n", Domain::Steps)]
fn sibling_documents_are_not_applicable(#[case] text: &str, #[case] domain: Domain) {
    assert!(matches!(parse_document(text, domain), ParseOutcome::NotApplicable));
}

#[test]
fn malformed_yaml_is_reported_not_raised() {
    let outcome = parse_document("entities: [\n  - name: a", Domain::Entities);
    assert!(matches!(outcome, ParseOutcome::Malformed(DocumentError::Syntax(_))));
}

#[rstest]
#[case("- a\n- b\n")]
#[case("just a string")]
fn non_mapping_roots_are_malformed(#[case] text: &str) {
    assert!(matches!(
        parse_document(text, Domain::Entities),
        ParseOutcome::Malformed(DocumentError::NotAMapping)
    ));
}

#[test]
fn unrelated_mapping_is_missing_root() {
    assert!(matches!(
        parse_document("tables: []", Domain::Entities),
        ParseOutcome::Malformed(DocumentError::MissingRoot { root: "entities" })
    ));
}

#[test]
fn wrong_record_shape_is_malformed() {
    let outcome = parse_document("entities:\n  - rows: 3\n", Domain::Entities);
    assert!(matches!(outcome, ParseOutcome::Malformed(DocumentError::Records { .. })));
}

#[test]
fn duplicate_and_empty_ids_are_malformed() {
    let dup = parse_document("steps:\n  - id: a\n  - id: a\n", Domain::Steps);
    assert!(matches!(dup, ParseOutcome::Malformed(DocumentError::DuplicateId { ref id }) if id == "a"));

    let empty = parse_document("steps:\n  - id: ok\n  - id: ''\n", Domain::Steps);
    assert!(matches!(empty, ParseOutcome::Malformed(DocumentError::EmptyId { index: 1 })));
}

#[test]
fn whitespace_only_edits_are_not_structural() {
    let compact = "entities:\n- name: A\n  attributes:\n  - {name: id, type: int}\n";
    let spaced = "entities:\n\n  - name: A\n    attributes:\n      - name: id\n        type: int\n\n";

    let a = parsed(compact, Domain::Entities);
    let b = parsed(spaced, Domain::Entities);
    assert!(!has_structural_change(&a, &b));
}
