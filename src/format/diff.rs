// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural comparison of item collections, positions excluded.

use crate::model::{Attribute, Item, Outcome};

/// Field-by-field equality ignoring `position`.
pub fn same_structure(a: &Item, b: &Item) -> bool {
    a.id() == b.id()
        && a.kind() == b.kind()
        && a.rows() == b.rows()
        && a.next() == b.next()
        && slices_match(a.attributes(), b.attributes(), same_attribute)
        && slices_match(a.outcomes(), b.outcomes(), same_outcome)
}

/// True when `parsed` differs from `current` in count, order or any structural field.
pub fn has_structural_change(current: &[Item], parsed: &[Item]) -> bool {
    !slices_match(current, parsed, same_structure)
}

fn slices_match<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| eq(x, y))
}

fn same_attribute(a: &Attribute, b: &Attribute) -> bool {
    a.name == b.name && a.type_tag == b.type_tag && a.reference == b.reference && a.config == b.config
}

fn same_outcome(a: &Outcome, b: &Outcome) -> bool {
    a.next == b.next && a.label == b.label && a.probability == b.probability
}
