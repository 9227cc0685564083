//! Exit tables: canonical edges expanded with every accepted synonym.

use std::collections::BTreeMap;

use crate::direction::{CardinalDirection, normalize_direction};

/// Lookup table from direction key (canonical or synonym) to target room.
///
/// Built once per room by [`build_exits`]; every synonym key points at the
/// same target as its canonical key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ExitTable {
    entries: BTreeMap<String, String>,
}

impl ExitTable {
    /// Looks up a raw key. Keys are stored lowercase, so lookup is case-insensitive.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Target reached by moving in `direction`, if the room has that exit.
    pub fn target(&self, direction: CardinalDirection) -> Option<&str> {
        self.entries.get(direction.as_str()).map(String::as_str)
    }

    /// Canonical edges in [`CardinalDirection::ALL`] order.
    pub fn canonical(&self) -> impl Iterator<Item = (CardinalDirection, &str)> + '_ {
        CardinalDirection::ALL
            .into_iter()
            .filter_map(|direction| self.target(direction).map(|target| (direction, target)))
    }

    /// Canonical directions that lead somewhere.
    pub fn directions(&self) -> Vec<CardinalDirection> {
        self.canonical().map(|(direction, _)| direction).collect()
    }

    /// First canonical direction leading to `target`.
    pub fn direction_to(&self, target: &str) -> Option<CardinalDirection> {
        self.canonical()
            .find(|(_, to)| *to == target)
            .map(|(direction, _)| direction)
    }

    /// Resolves a raw token through the direction normalizer and then the table.
    pub fn resolve(&self, token: &str) -> Option<(CardinalDirection, &str)> {
        let direction = normalize_direction(token).ok()?;
        self.target(direction).map(|target| (direction, target))
    }

    /// Every key in the table, canonical and synonym alike.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expands canonical edges into a full exit table.
///
/// Pure and idempotent: feeding [`ExitTable::canonical`] of the result back in
/// produces an equal table. A later edge for the same direction replaces an
/// earlier one.
pub fn build_exits<I, S>(canonical_edges: I) -> ExitTable
where
    I: IntoIterator<Item = (CardinalDirection, S)>,
    S: Into<String>,
{
    let mut entries = BTreeMap::new();
    for (direction, target) in canonical_edges {
        let target = target.into();
        for synonym in direction.synonyms() {
            entries.insert((*synonym).to_string(), target.clone());
        }
        entries.insert(direction.as_str().to_string(), target);
    }
    ExitTable { entries }
}
