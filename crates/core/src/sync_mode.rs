// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sync mode: which configured providers source and receive reconciled state.

/// Selects which providers act as sources and which as write-only targets
/// for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Every healthy provider is both source and target.
    #[default]
    Bidirectional,
    /// Only the first configured provider sources; others are write-only
    /// targets. The first provider is never written to.
    AToBOnly,
    /// The first configured provider is authoritative: only its state is
    /// sourced and propagated. It is never written to by the engine.
    Mirror,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Bidirectional => "bidirectional",
            SyncMode::AToBOnly => "a-to-b-only",
            SyncMode::Mirror => "mirror",
        }
    }
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bidirectional" => Ok(SyncMode::Bidirectional),
            "a-to-b-only" => Ok(SyncMode::AToBOnly),
            "mirror" => Ok(SyncMode::Mirror),
            other => Err(format!("unknown sync mode: {other}")),
        }
    }
}

impl serde::Serialize for SyncMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for SyncMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "sync_mode_tests.rs"]
mod tests;
