// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Outbound-emission arbitration.
//!
//! Unidirectional: every mutation emits, inbound documents go through the structural diff.
//! Bidirectional: canvas mutations emit once and open a cooldown. Document-originated
//! mutations never echo a document back; one landing inside an open cooldown restarts it.
//! Cooldowns are keyed by a generation counter, so a timer scheduled before the latest
//! mutation can never clear the marker.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStrategy {
    #[default]
    Unidirectional,
    Bidirectional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArbiterState {
    #[default]
    Idle,
    PendingEmit,
    Cooldown,
}

/// Where a store mutation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    Canvas,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitDecision {
    /// Emit now. `schedule` carries the generation a cooldown timer must report back.
    Emit { schedule: Option<u64> },
    /// Do not emit. `schedule` is set when the mutation landed inside an open cooldown,
    /// which restarts it under a new generation.
    Suppress { schedule: Option<u64> },
}

#[derive(Debug, Clone, Default)]
pub struct Arbiter {
    strategy: SyncStrategy,
    state: ArbiterState,
    generation: u64,
}

impl Arbiter {
    pub fn new(strategy: SyncStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn strategy(&self) -> SyncStrategy {
        self.strategy
    }

    pub fn state(&self) -> ArbiterState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the internal-update marker is set.
    pub fn is_marked(&self) -> bool {
        self.state != ArbiterState::Idle
    }

    /// Records a mutation and decides whether a document is emitted for it.
    pub fn on_mutation(&mut self, origin: ChangeOrigin) -> EmitDecision {
        match (self.strategy, origin) {
            (SyncStrategy::Unidirectional, _) => EmitDecision::Emit { schedule: None },
            (SyncStrategy::Bidirectional, ChangeOrigin::Canvas) => {
                self.generation = self.generation.wrapping_add(1);
                self.state = ArbiterState::PendingEmit;
                EmitDecision::Emit {
                    schedule: Some(self.generation),
                }
            }
            (SyncStrategy::Bidirectional, ChangeOrigin::Document) => {
                if !self.is_marked() {
                    return EmitDecision::Suppress { schedule: None };
                }
                self.generation = self.generation.wrapping_add(1);
                self.state = ArbiterState::Cooldown;
                debug!(generation = self.generation, "emission suppressed, cooldown restarted");
                EmitDecision::Suppress {
                    schedule: Some(self.generation),
                }
            }
        }
    }

    /// Called once the document for the pending generation has been handed out.
    pub fn emitted(&mut self) {
        if self.state == ArbiterState::PendingEmit {
            self.state = ArbiterState::Cooldown;
        }
    }

    /// A cooldown timer fired. Returns whether the marker was cleared.
    pub fn cooldown_elapsed(&mut self, generation: u64) -> bool {
        if self.state != ArbiterState::Cooldown || generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "stale cooldown ignored"
            );
            return false;
        }
        self.state = ArbiterState::Idle;
        true
    }
}
