// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Graphsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Graphsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The document family a store synchronizes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Database entities (tables with typed attributes).
    #[default]
    Entities,
    /// Simulation steps (process/decision flow).
    Steps,
}

impl Domain {
    /// Top-level document key holding this domain's records.
    pub fn root_key(self) -> &'static str {
        match self {
            Self::Entities => "entities",
            Self::Steps => "steps",
        }
    }

    /// The domain whose documents may reach this instance but are not ours to parse.
    pub fn sibling(self) -> Self {
        match self {
            Self::Entities => Self::Steps,
            Self::Steps => Self::Entities,
        }
    }

    /// Entity records carry a row count; step records do not.
    pub fn carries_rows(self) -> bool {
        matches!(self, Self::Entities)
    }

    /// Step records carry outcomes and next pointers; entity records do not.
    pub fn carries_flow(self) -> bool {
        matches!(self, Self::Steps)
    }

    pub(crate) fn id_prefix(self) -> &'static str {
        match self {
            Self::Entities => "entity",
            Self::Steps => "step",
        }
    }

    pub(crate) fn node_kind(self) -> &'static str {
        match self {
            Self::Entities => "entity",
            Self::Steps => "step",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain '{0}' (expected 'entities' or 'steps')")]
pub struct ParseDomainError(String);

impl FromStr for Domain {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entities" | "entity" => Ok(Self::Entities),
            "steps" | "step" => Ok(Self::Steps),
            other => Err(ParseDomainError(other.to_owned())),
        }
    }
}
