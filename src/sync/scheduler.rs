// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Arms the cooldown timer for one generation.
///
/// Scheduling replaces any armed timer: a superseded timer must not fire.
pub trait CooldownScheduler {
    fn schedule(&mut self, generation: u64, after: Duration);
    fn cancel(&mut self);
}

/// Records the armed generation and lets the caller fire it by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    armed: Arc<Mutex<Option<(u64, Duration)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<(u64, Duration)> {
        *self.armed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes the armed generation, as if its timer had just elapsed.
    pub fn fire(&self) -> Option<u64> {
        self.armed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .map(|(generation, _)| generation)
    }
}

impl CooldownScheduler for ManualScheduler {
    fn schedule(&mut self, generation: u64, after: Duration) {
        *self.armed.lock().unwrap_or_else(PoisonError::into_inner) = Some((generation, after));
    }

    fn cancel(&mut self) {
        self.armed.lock().unwrap_or_else(PoisonError::into_inner).take();
    }
}

/// Sleeps on the tokio runtime and reports elapsed generations on a channel.
#[derive(Debug)]
pub struct TokioScheduler {
    runtime: Handle,
    tx: UnboundedSender<u64>,
    task: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> (Self, UnboundedReceiver<u64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                runtime,
                tx,
                task: None,
            },
            rx,
        )
    }
}

impl CooldownScheduler for TokioScheduler {
    fn schedule(&mut self, generation: u64, after: Duration) {
        self.cancel();
        let tx = self.tx.clone();
        self.task = Some(self.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(generation);
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
