// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::model::Position;

/// Items per grid row, shared by the fallback grid and the viewport stagger.
pub const GRID_COLUMNS: usize = 3;

/// Visible canvas bounds supplied with a creation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn midpoint(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Constants for initial item placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub grid_origin_x: f64,
    pub grid_origin_y: f64,
    pub grid_step_x: f64,
    pub grid_step_y: f64,
    pub stagger: f64,
    pub min_coord: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid_origin_x: 50.0,
            grid_origin_y: 100.0,
            grid_step_x: 300.0,
            grid_step_y: 200.0,
            stagger: 50.0,
            min_coord: 50.0,
        }
    }
}

/// Deterministic fallback grid: three columns, filled row by row.
pub fn grid_position(index: usize, config: &PlacementConfig) -> Position {
    let column = (index % GRID_COLUMNS) as f64;
    let row = (index / GRID_COLUMNS) as f64;
    Position::new(
        config.grid_origin_x + column * config.grid_step_x,
        config.grid_origin_y + row * config.grid_step_y,
    )
}

/// Places an item around the viewport midpoint, staggered so consecutive inserts do not
/// overlap, and clamped so it never lands above or left of `min_coord`.
pub fn viewport_position(index: usize, viewport: &Viewport, config: &PlacementConfig) -> Position {
    let center = viewport.midpoint();
    let column_offset = (index % GRID_COLUMNS) as f64 - 1.0;
    let row_offset = (index / GRID_COLUMNS) as f64;
    Position::new(
        (center.x + column_offset * config.stagger).max(config.min_coord),
        (center.y + row_offset * config.stagger).max(config.min_coord),
    )
}

pub fn placement_for(
    index: usize,
    viewport: Option<&Viewport>,
    config: &PlacementConfig,
) -> Position {
    match viewport {
        Some(viewport) => viewport_position(index, viewport, config),
        None => grid_position(index, config),
    }
}
