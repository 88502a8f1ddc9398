// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use graphsync::format::has_structural_change;
use graphsync::{
    parse_document, project, serialize_document, Attribute, CanonicalStore, Domain, ItemDraft,
    ItemId, ItemPatch, MemoryPositionBackend, PlacementConfig, Position, PositionBackend,
    SyncConfig, SyncEngine, Viewport,
};

type Store = CanonicalStore<MemoryPositionBackend>;

fn store(domain: Domain) -> Store {
    CanonicalStore::new(domain, MemoryPositionBackend::new(), PlacementConfig::default())
}

fn entity(id: &str) -> ItemDraft {
    ItemDraft {
        attributes: vec![Attribute::new("id", "int")],
        ..ItemDraft::named(id)
    }
}

fn with_ref(id: &str, target: &str) -> ItemDraft {
    ItemDraft {
        attributes: vec![
            Attribute::new("id", "int"),
            Attribute::new(format!("{}_id", target.to_lowercase()), "foreign_key")
                .with_reference(format!("{target}.id")),
        ],
        ..ItemDraft::named(id)
    }
}

fn edge_pairs(store: &Store) -> Vec<(String, String)> {
    project(store.items(), store.domain())
        .edges
        .into_iter()
        .map(|edge| (edge.source, edge.target))
        .collect()
}

#[test]
fn round_trip_is_stable_for_a_built_store() {
    let mut s = store(Domain::Entities);
    s.add(entity("Customers"), None);
    s.add(with_ref("Orders", "Customers"), None);
    s.add(with_ref("Invoices", "Orders"), Some(&Viewport::new(1200.0, 800.0)));

    let first = serialize_document(s.items(), Domain::Entities).expect("serialize");
    let parsed = parse_document(&first, Domain::Entities)
        .into_items()
        .expect("parse");
    let second = serialize_document(&parsed, Domain::Entities).expect("serialize");

    assert_eq!(first, second);
    assert!(!has_structural_change(s.items(), &parsed));
}

#[test]
fn projection_is_deterministic() {
    let mut s = store(Domain::Entities);
    s.add(entity("Customers"), None);
    s.add(with_ref("Orders", "Customers"), None);

    assert_eq!(project(s.items(), Domain::Entities), project(s.items(), Domain::Entities));
}

#[test]
fn add_never_moves_existing_items() {
    let mut s = store(Domain::Steps);
    let viewport = Viewport::new(640.0, 480.0);
    let mut seen = Vec::<(String, Position)>::new();
    for n in 0..10 {
        let hint = (n % 2 == 0).then_some(&viewport);
        s.add(ItemDraft::default(), hint);
        for (id, position) in &seen {
            assert_eq!(s.get(id.as_str()).map(|item| item.position()), Some(*position));
        }
        let last = s.items().last().expect("added");
        seen.push((last.id().to_string(), last.position()));
    }
}

#[test]
fn deletion_is_local() {
    let mut s = store(Domain::Entities);
    s.add(entity("Customers"), None);
    s.add(with_ref("Orders", "Customers"), None);
    s.add(with_ref("Invoices", "Orders"), None);
    s.add(with_ref("Refunds", "Customers"), None);

    let before = s.resolver().backend().entries().clone();
    assert!(s.remove("Orders"));

    let after = s.resolver().backend().entries();
    assert_eq!(after.len(), before.len() - 1);
    assert!(!after.contains_key("Orders"));
    for (id, position) in after {
        assert_eq!(before.get(id), Some(position));
    }
    assert_eq!(edge_pairs(&s), [("Refunds".to_owned(), "Customers".to_owned())]);
}

#[test]
fn rename_migrates_position_and_edges_follow_existing_target() {
    let mut s = store(Domain::Entities);
    s.add(entity("Customers"), None);
    s.add(with_ref("Orders", "Customers"), None);
    let saved = s.resolver().position("Customers").expect("position");

    s.update("Customers", ItemPatch::rename(ItemId::new("Clients").expect("id")));
    assert_eq!(s.resolver().position("Clients"), Some(saved));
    assert_eq!(s.resolver().position("Customers"), None);
    assert!(edge_pairs(&s).is_empty());

    // Another item now takes the old name; the dangling reference resolves to it.
    s.add(entity("Customers"), None);
    assert_eq!(edge_pairs(&s), [("Orders".to_owned(), "Customers".to_owned())]);
}

#[test]
fn dangling_reference_yields_no_edges() {
    let mut s = store(Domain::Entities);
    s.add(entity("A"), None);
    s.add(with_ref("B", "A"), None);
    assert_eq!(edge_pairs(&s).len(), 1);

    s.remove("A");
    assert!(edge_pairs(&s).is_empty());
}

#[test]
fn empty_store_round_trips_through_sentinel() {
    let text = serialize_document(&[], Domain::Steps).expect("serialize");
    assert_eq!(text, "");
    assert_eq!(parse_document(&text, Domain::Steps).into_items(), Some(Vec::new()));
}

#[test]
fn engine_reattaches_saved_layout_after_load() {
    let backend = MemoryPositionBackend::with_entries([
        ("Customers", Position::new(400.0, 40.0)),
        ("Orders", Position::new(80.0, 420.0)),
    ]);
    let mut engine = SyncEngine::from_config(&SyncConfig::default(), backend, Vec::<String>::new());

    let doc = "entities:\n  - name: Orders\n  - name: Customers\n  - name: Items\n";
    engine.handle_document_change(doc);

    let graph = engine.graph();
    assert_eq!(graph.node("Customers").map(|n| n.position), Some(Position::new(400.0, 40.0)));
    assert_eq!(graph.node("Orders").map(|n| n.position), Some(Position::new(80.0, 420.0)));
    assert_eq!(graph.node("Items").map(|n| n.position), Some(Position::new(650.0, 100.0)));
    assert_eq!(engine.backend_mut().get("Items"), Some(Position::new(650.0, 100.0)));
    assert!(engine.store().resolver().initial_load_complete());
}
