// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Graphsync: keeps a visual canvas and a YAML document consistent with one canonical
//! store of items (database entities or simulation steps).
//!
//! The store is the only structural truth. The visual graph ([`projection`]) and the document
//! ([`format`]) are both derived from it; [`sync::SyncEngine`] wires mutations, inbound
//! document edits, position persistence and outbound emission together.

pub mod config;
pub mod format;
pub mod layout;
pub mod model;
pub mod ops;
pub mod projection;
pub mod store;
pub mod sync;

pub use config::{ConfigError, SyncConfig};
pub use format::{parse_document, serialize_document, DocumentError, ParseOutcome};
pub use layout::{MemoryPositionBackend, PlacementConfig, PositionBackend, Viewport};
pub use model::{Attribute, Domain, Item, ItemDraft, ItemId, ItemPatch, Outcome, Position};
pub use ops::{ConnectRole, Delta, Op};
pub use projection::{project, EdgeRole, VisualEdge, VisualGraph, VisualNode};
pub use store::CanonicalStore;
pub use sync::{DocumentChange, DocumentSink, NavigationGuard, SyncEngine, SyncStrategy};
