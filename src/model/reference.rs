// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `Target.attribute` reference strings.

/// Attribute type tags whose `ref` produces an edge.
pub const REFERENCE_TYPES: &[&str] =
    &["foreign_key", "fk", "reference", "ref", "lookup", "belongs_to", "parent"];

pub fn is_reference_type(type_tag: &str) -> bool {
    REFERENCE_TYPES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(type_tag.trim()))
}

/// Finds the item a reference points at.
///
/// A reference that names an existing item verbatim wins (ids may contain dots);
/// otherwise the part before the last `.` is the target.
pub fn reference_target<'a>(reference: &'a str, exists: impl Fn(&str) -> bool) -> Option<&'a str> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    if exists(reference) {
        return Some(reference);
    }
    let (target, _attribute) = reference.rsplit_once('.')?;
    exists(target).then_some(target)
}

/// Rewrites a reference to `old_id` (bare or `old_id.attr`) so it names `new_id`.
pub fn retarget_reference(reference: &str, old_id: &str, new_id: &str) -> Option<String> {
    if reference == old_id {
        return Some(new_id.to_owned());
    }
    let attribute = reference.strip_prefix(old_id)?.strip_prefix('.')?;
    Some(format!("{new_id}.{attribute}"))
}
