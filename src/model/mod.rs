// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Items (entities or steps) carry typed attributes, outcomes and next pointers; the
//! identity key doubles as the position key and the reference target.

pub mod domain;
pub mod ids;
pub mod item;
pub mod reference;

pub use domain::{Domain, ParseDomainError};
pub use ids::{IdError, ItemId};
pub use item::{Attribute, Item, ItemDraft, ItemPatch, Outcome, Position};
pub use reference::{is_reference_type, reference_target, retarget_reference, REFERENCE_TYPES};
