// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas/document synchronization.
//!
//! [`SyncEngine`] owns the canonical store and keeps the visual graph and the generated
//! document derived from it. Canvas mutations go through the engine's item methods or
//! [`Op`]s; edited document text comes back through [`SyncEngine::handle_document_change`]
//! and only replaces the store when it differs structurally.

pub mod arbiter;
pub mod guard;
pub mod scheduler;

use std::time::Duration;

use tracing::{debug, info, warn};

pub use arbiter::{Arbiter, ArbiterState, ChangeOrigin, EmitDecision, SyncStrategy};
pub use guard::NavigationGuard;
pub use scheduler::{CooldownScheduler, ManualScheduler, TokioScheduler};

use crate::config::SyncConfig;
use crate::format::{
    has_structural_change, parse_document, serialize_document, ParseOutcome, EMPTY_DOCUMENT,
};
use crate::layout::{PositionBackend, Viewport};
use crate::model::{Item, ItemDraft, ItemPatch, Position};
use crate::ops::{apply_ops, Delta, Op};
use crate::projection::{project, VisualGraph};
use crate::store::CanonicalStore;

/// Receives every generated document.
pub trait DocumentSink {
    fn publish(&mut self, document: &str);
}

impl DocumentSink for Vec<String> {
    fn publish(&mut self, document: &str) {
        self.push(document.to_owned());
    }
}

/// What happened to an inbound document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChange {
    /// The store was replaced.
    Applied,
    /// Parsed fine but structurally identical; layout untouched.
    Unchanged,
    /// Positions are still loading; the text is held for [`SyncEngine::positions_ready`].
    Deferred,
    /// The document belongs to the other domain.
    NotApplicable,
    /// Could not be parsed; the store is untouched.
    Malformed,
}

pub struct SyncEngine<B, S> {
    store: CanonicalStore<B>,
    sink: S,
    arbiter: Arbiter,
    scheduler: Option<Box<dyn CooldownScheduler + Send>>,
    cooldown: Duration,
    guard: Option<NavigationGuard>,
    held_document: Option<String>,
    graph: VisualGraph,
    document: String,
}

impl<B: PositionBackend, S: DocumentSink> SyncEngine<B, S> {
    pub fn new(store: CanonicalStore<B>, sink: S, strategy: SyncStrategy) -> Self {
        let graph = project(store.items(), store.domain());
        Self {
            store,
            sink,
            arbiter: Arbiter::new(strategy),
            scheduler: None,
            cooldown: Duration::from_millis(crate::config::DEFAULT_COOLDOWN_MS),
            guard: None,
            held_document: None,
            graph,
            document: EMPTY_DOCUMENT.to_owned(),
        }
    }

    pub fn from_config(config: &SyncConfig, backend: B, sink: S) -> Self {
        let store = CanonicalStore::new(config.domain, backend, config.placement)
            .with_cascade_renames(config.cascade_renames);
        Self::new(store, sink, config.strategy).with_cooldown(config.cooldown())
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Box<dyn CooldownScheduler + Send>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_navigation_guard(mut self, guard: NavigationGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn store(&self) -> &CanonicalStore<B> {
        &self.store
    }

    /// Direct access for the host, e.g. to flip the position backend to ready.
    pub fn backend_mut(&mut self) -> &mut B {
        self.store.resolver_mut().backend_mut()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }

    pub fn graph(&self) -> &VisualGraph {
        &self.graph
    }

    /// The last generated document.
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn has_held_document(&self) -> bool {
        self.held_document.is_some()
    }

    pub fn add_item(&mut self, draft: ItemDraft, viewport: Option<&Viewport>) -> Item {
        let item = self.store.add(draft, viewport);
        self.after_mutation(ChangeOrigin::Canvas);
        item
    }

    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> bool {
        let changed = self.store.update(id, patch);
        if changed {
            self.after_mutation(ChangeOrigin::Canvas);
        }
        changed
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let changed = self.store.remove(id);
        if changed {
            self.after_mutation(ChangeOrigin::Canvas);
        }
        changed
    }

    pub fn set_position(&mut self, id: &str, position: Position) -> bool {
        let changed = self.store.set_position(id, position);
        if changed {
            self.after_mutation(ChangeOrigin::Canvas);
        }
        changed
    }

    pub fn apply_op(&mut self, op: Op) -> Delta {
        self.apply_ops([op])
    }

    /// Applies canvas ops as one mutation: one projection, at most one emission.
    pub fn apply_ops<I: IntoIterator<Item = Op>>(&mut self, ops: I) -> Delta {
        let delta = apply_ops(&mut self.store, ops);
        if !delta.is_empty() {
            self.after_mutation(ChangeOrigin::Canvas);
        }
        delta
    }

    /// Takes edited document text from the host.
    ///
    /// Never fails: unreadable or foreign documents leave every piece of state as it was.
    pub fn handle_document_change(&mut self, text: &str) -> DocumentChange {
        if !self.store.resolver().is_ready() {
            debug!("document held until positions are ready");
            self.held_document = Some(text.to_owned());
            return DocumentChange::Deferred;
        }
        self.store.resolver_mut().flush_held();

        let items = match parse_document(text, self.store.domain()) {
            ParseOutcome::Parsed(items) => items,
            ParseOutcome::NotApplicable => {
                debug!(domain = %self.store.domain(), "document ignored: other domain");
                return DocumentChange::NotApplicable;
            }
            ParseOutcome::Malformed(err) => {
                warn!(error = %err, "document ignored: malformed");
                return DocumentChange::Malformed;
            }
        };

        if !has_structural_change(self.store.items(), &items) {
            if !self.store.resolver().initial_load_complete()
                && self.store.resolver().matches_persisted(self.store.items())
            {
                self.store.resolver_mut().mark_initial_load_complete();
            }
            return DocumentChange::Unchanged;
        }

        let had_persisted = self.store.resolver().has_persisted_positions();
        let (resolved, resolution) = self.store.resolver_mut().resolve(items);
        let honored_saved_layout =
            resolution.restored > 0 && self.store.resolver().matches_persisted(&resolved);
        let load_settled = !had_persisted || honored_saved_layout;
        if !self.store.resolver().initial_load_complete() && load_settled {
            self.store.resolver_mut().mark_initial_load_complete();
        }
        info!(items = resolved.len(), "document applied");
        self.store.replace_items(resolved);
        self.after_mutation(ChangeOrigin::Document);
        DocumentChange::Applied
    }

    /// Flushes position writes made while the backend was loading, then replays the latest
    /// document received in that time.
    pub fn positions_ready(&mut self) -> Option<DocumentChange> {
        if !self.store.resolver().is_ready() {
            return None;
        }
        self.store.resolver_mut().flush_held();
        let text = self.held_document.take()?;
        Some(self.handle_document_change(&text))
    }

    /// Feeds back a fired cooldown timer. Returns whether the marker was cleared.
    pub fn cooldown_elapsed(&mut self, generation: u64) -> bool {
        self.arbiter.cooldown_elapsed(generation)
    }

    fn after_mutation(&mut self, origin: ChangeOrigin) {
        self.graph = project(self.store.items(), self.store.domain());
        if origin == ChangeOrigin::Canvas {
            if let Some(guard) = &self.guard {
                guard.mark_dirty();
            }
        }

        match self.arbiter.on_mutation(origin) {
            EmitDecision::Emit { schedule } => {
                self.emit();
                if let Some(generation) = schedule {
                    self.arbiter.emitted();
                    self.arm_cooldown(generation);
                }
            }
            EmitDecision::Suppress { schedule } => {
                self.refresh_document();
                if let Some(generation) = schedule {
                    self.arm_cooldown(generation);
                }
            }
        }
    }

    /// Without a scheduler nothing could ever fire, so the marker is cleared right away.
    fn arm_cooldown(&mut self, generation: u64) {
        match self.scheduler.as_mut() {
            Some(scheduler) => scheduler.schedule(generation, self.cooldown),
            None => {
                self.arbiter.cooldown_elapsed(generation);
            }
        }
    }

    fn emit(&mut self) {
        if self.refresh_document() {
            self.sink.publish(&self.document);
        }
    }

    fn refresh_document(&mut self) -> bool {
        match serialize_document(self.store.items(), self.store.domain()) {
            Ok(document) => {
                self.document = document;
                true
            }
            Err(err) => {
                warn!(error = %err, "document not generated");
                false
            }
        }
    }
}
