// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The canonical item store.
//!
//! The document and the visual graph are both recomputed from this store; nothing else
//! holds structural state.

pub mod canonical;

pub use canonical::CanonicalStore;
