// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document parsing/export.
//!
//! The textual form of a store is a YAML document keyed by domain (`entities:` or `steps:`).

pub mod diff;
pub mod yaml;

pub use diff::{has_structural_change, same_structure};
pub use yaml::{parse_document, serialize_document, DocumentError, ParseOutcome, EMPTY_DOCUMENT};

#[cfg(test)]
mod tests;
