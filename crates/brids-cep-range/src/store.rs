//! In-memory cache of scraped CEP ranges, keyed by state and location.

use brids_core::StateCode;
use brids_ids::CepKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive range of CEPs attributed to one location.
///
/// `low <= high` is not enforced; see [`is_well_formed`](Self::is_well_formed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeEntry {
    pub low: CepKey,
    pub high: CepKey,
}

impl RangeEntry {
    #[must_use]
    pub fn new(low: CepKey, high: CepKey) -> Self {
        Self { low, high }
    }

    /// Whether `cep` lies within `[low, high]`.
    #[must_use]
    pub fn contains(&self, cep: &CepKey) -> bool {
        cep.is_between(&self.low, &self.high)
    }

    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.low <= self.high
    }
}

/// Ranges of one state, grouped by location in the order locations were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationRanges {
    order: Vec<String>,
    ranges: HashMap<String, Vec<RangeEntry>>,
}

impl LocationRanges {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a range to `location`, registering the location if new.
    pub fn push(&mut self, location: impl Into<String>, entry: RangeEntry) {
        let location = location.into();
        if !self.ranges.contains_key(&location) {
            self.order.push(location.clone());
        }
        self.ranges.entry(location).or_default().push(entry);
    }

    /// Merge another page's ranges after the ones already held.
    pub fn extend(&mut self, other: LocationRanges) {
        let LocationRanges { order, mut ranges } = other;
        for location in order {
            if let Some(entries) = ranges.remove(&location) {
                for entry in entries {
                    self.push(location.clone(), entry);
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, location: &str) -> Option<&[RangeEntry]> {
        self.ranges.get(location).map(Vec::as_slice)
    }

    /// Location names in first-seen order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every range, location by location.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RangeEntry)> {
        self.order.iter().flat_map(move |location| {
            self.ranges
                .get(location)
                .into_iter()
                .flatten()
                .map(move |entry| (location.as_str(), entry))
        })
    }

    /// Number of ranges across all locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-state cache owned by a range source.
///
/// A state is inserted once, after all of its pages were read, and is never
/// refreshed.
#[derive(Debug, Default)]
pub struct RangeStore {
    states: HashMap<StateCode, LocationRanges>,
}

impl RangeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cached(&self, state: &StateCode) -> bool {
        self.states.contains_key(state)
    }

    /// Record the complete ranges of a state. An already cached state is kept as is.
    pub fn insert_state(&mut self, state: StateCode, ranges: LocationRanges) {
        self.states.entry(state).or_insert(ranges);
    }

    #[must_use]
    pub fn state(&self, state: &StateCode) -> Option<&LocationRanges> {
        self.states.get(state)
    }

    /// Flattened ranges of a state, built fresh on each call.
    #[must_use]
    pub fn ranges_by_state(&self, state: &StateCode) -> Option<Vec<RangeEntry>> {
        self.states
            .get(state)
            .map(|ranges| ranges.iter().map(|(_, entry)| entry.clone()).collect())
    }

    #[must_use]
    pub fn ranges_by_location(&self, state: &StateCode, location: &str) -> Option<&[RangeEntry]> {
        self.states.get(state)?.get(location)
    }

    /// States cached so far, in no particular order.
    pub fn cached_states(&self) -> impl Iterator<Item = &StateCode> {
        self.states.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brids_ids::cep::parse;

    fn entry(low: &str, high: &str) -> RangeEntry {
        RangeEntry::new(parse(low).unwrap(), parse(high).unwrap())
    }

    fn uf(code: &str) -> StateCode {
        StateCode::new(code).unwrap()
    }

    #[test]
    fn test_entry_contains() {
        let range = entry("70000-001", "72799-999");
        assert!(range.contains(&parse("71000-000").unwrap()));
        assert!(range.contains(&parse("70000-001").unwrap()));
        assert!(range.contains(&parse("72799-999").unwrap()));
        assert!(!range.contains(&parse("70000-000").unwrap()));
        assert!(!range.contains(&parse("73700-000").unwrap()));
    }

    #[test]
    fn test_entry_well_formed() {
        assert!(entry("70000-001", "72799-999").is_well_formed());
        assert!(!entry("72799-999", "70000-001").is_well_formed());
    }

    #[test]
    fn test_entry_serializes_formatted_ceps() {
        let range = entry("70000001", "72799999");
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "low": "70000-001", "high": "72799-999" })
        );

        let back: RangeEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, range);

        let bad = serde_json::json!({ "low": "7000", "high": "72799-99x" });
        assert!(serde_json::from_value::<RangeEntry>(bad).is_err());
    }

    #[test]
    fn test_location_order_is_first_seen() {
        let mut ranges = LocationRanges::new();
        ranges.push("Uberaba", entry("38000-001", "38099-999"));
        ranges.push("Araxá", entry("38180-001", "38184-999"));
        ranges.push("Uberaba", entry("38100-001", "38109-999"));

        let locations: Vec<_> = ranges.locations().collect();
        assert_eq!(locations, vec!["Uberaba", "Araxá"]);
        assert_eq!(ranges.len(), 3);

        let flat: Vec<_> = ranges.iter().map(|(loc, e)| (loc, e.low.to_string())).collect();
        assert_eq!(
            flat,
            vec![
                ("Uberaba", "38000-001".to_string()),
                ("Uberaba", "38100-001".to_string()),
                ("Araxá", "38180-001".to_string()),
            ]
        );
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut first = LocationRanges::new();
        first.push("Brasília", entry("70000-001", "72799-999"));

        let mut second = LocationRanges::new();
        second.push("Gama", entry("72400-001", "72499-999"));
        second.push("Brasília", entry("73000-001", "73699-999"));

        first.extend(second);
        assert_eq!(first.locations().collect::<Vec<_>>(), vec!["Brasília", "Gama"]);
        assert_eq!(first.get("Brasília").map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_store_lookup() {
        let mut store = RangeStore::new();
        assert!(!store.is_cached(&uf("DF")));
        assert!(store.ranges_by_state(&uf("DF")).is_none());

        let mut ranges = LocationRanges::new();
        ranges.push("Brasília", entry("70000-001", "72799-999"));
        store.insert_state(uf("DF"), ranges);

        assert!(store.is_cached(&uf("DF")));
        assert_eq!(store.ranges_by_state(&uf("DF")).unwrap().len(), 1);
        assert!(store.ranges_by_location(&uf("DF"), "Brasília").is_some());
        assert!(store.ranges_by_location(&uf("DF"), "brasília").is_none());
        assert!(store.ranges_by_location(&uf("GO"), "Brasília").is_none());
    }

    #[test]
    fn test_insert_state_does_not_overwrite() {
        let mut store = RangeStore::new();
        let mut ranges = LocationRanges::new();
        ranges.push("Brasília", entry("70000-001", "72799-999"));
        store.insert_state(uf("DF"), ranges);
        store.insert_state(uf("DF"), LocationRanges::new());

        assert_eq!(store.state(&uf("DF")).map(LocationRanges::len), Some(1));
    }
}
