// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Item placement and position persistence.
//!
//! Placement heuristics assign coordinates to unseen items; the resolver keeps saved
//! coordinates attached to item identity across renames, inserts and deletes.

pub mod backend;
pub mod placement;
pub mod resolver;

pub use backend::{MemoryPositionBackend, PositionBackend};
pub use placement::{
    grid_position, placement_for, viewport_position, PlacementConfig, Viewport, GRID_COLUMNS,
};
pub use resolver::{PositionResolver, Resolution};
