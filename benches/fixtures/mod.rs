// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use graphsync::model::{Attribute, Item, ItemId, Outcome};

fn item(id: String) -> Item {
    Item::new(ItemId::new(id).expect("fixture id"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub items: usize,
    pub attributes: usize,
    pub refs_per_item: usize,
}

impl Params {
    pub const fn new(items: usize, attributes: usize, refs_per_item: usize) -> Self {
        Self {
            items,
            attributes,
            refs_per_item,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    Large,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::Large => "large",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            Self::Small => Params::new(12, 4, 1),
            Self::MediumDense => Params::new(80, 8, 3),
            Self::Large => Params::new(400, 6, 2),
        }
    }
}

/// Entities where item `i` references up to `refs_per_item` earlier items.
/// Every seventh reference points at a missing table.
pub fn entities(params: Params) -> Vec<Item> {
    (0..params.items)
        .map(|i| {
            let mut entity = item(format!("Table{i:04}")).with_rows((i as u64 + 1) * 10);
            entity = entity.with_attribute(Attribute::new("id", "int"));
            for a in 1..params.attributes {
                entity = entity.with_attribute(Attribute::new(format!("col_{a}"), "string"));
            }
            for r in 0..params.refs_per_item.min(i) {
                let target = if (i + r) % 7 == 0 {
                    format!("Missing{r}")
                } else {
                    format!("Table{:04}", i - r - 1)
                };
                entity = entity.with_attribute(
                    Attribute::new(format!("ref_{r}"), "foreign_key")
                        .with_reference(format!("{target}.id")),
                );
            }
            entity
        })
        .collect()
}

/// A step chain where every third step branches two ways.
pub fn steps(params: Params) -> Vec<Item> {
    (0..params.items)
        .map(|i| {
            let mut step = item(format!("step{i:04}")).with_kind("process");
            let next = format!("step{:04}", i + 1);
            let skip = format!("step{:04}", i + 2);
            if i % 3 == 0 {
                step = step
                    .with_kind("decide")
                    .with_outcome(Outcome {
                        probability: Some(0.5),
                        ..Outcome::to(next)
                    })
                    .with_outcome(Outcome {
                        probability: Some(0.5),
                        ..Outcome::to(skip)
                    });
            } else {
                step = step.with_next(next);
            }
            step
        })
        .collect()
}
