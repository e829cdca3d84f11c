//! Identity-keyed merge of per-match player records.
//!
//! Numeric fields are plain sums, so merging is associative and commutative:
//! any ordering or partitioning of the input yields the same totals. The stored
//! name is the one from the first record merged for an identity, which makes it
//! the only order-sensitive field. Callers that need a reproducible name should
//! feed outcomes in a stable order (the scanner sorts them by path).

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rayon::prelude::*;

use crate::types::{MatchOutcome, PlayerAggregate, PlayerId, PlayerMatchRecord};

/// Running totals keyed by player identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    players: HashMap<PlayerId, PlayerAggregate>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the totals
    pub fn absorb(&mut self, record: &PlayerMatchRecord) {
        match self.players.get_mut(&record.id) {
            Some(existing) => existing.accumulate(&PlayerAggregate::from(record)),
            None => {
                self.players.insert(record.id, PlayerAggregate::from(record));
            }
        }
    }

    /// Combine two partial aggregates. Names already stored in `self` win.
    pub fn merge(mut self, other: Aggregate) -> Aggregate {
        for (id, partial) in other.players {
            match self.players.entry(id) {
                Entry::Occupied(mut entry) => entry.get_mut().accumulate(&partial),
                Entry::Vacant(entry) => {
                    entry.insert(partial);
                }
            }
        }
        self
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerAggregate> {
        self.players.get(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Final list ordered by identity
    pub fn into_sorted(self) -> Vec<PlayerAggregate> {
        let mut players: Vec<PlayerAggregate> = self.players.into_values().collect();
        players.sort_by_key(|p| p.id);
        players
    }
}

impl<'a> FromIterator<&'a PlayerMatchRecord> for Aggregate {
    fn from_iter<I: IntoIterator<Item = &'a PlayerMatchRecord>>(records: I) -> Self {
        let mut aggregate = Aggregate::new();
        for record in records {
            aggregate.absorb(record);
        }
        aggregate
    }
}

/// Merge the records of every valid outcome. Skipped outcomes contribute nothing.
pub fn reduce(outcomes: &[MatchOutcome]) -> Aggregate {
    outcomes.iter().flat_map(MatchOutcome::records).collect()
}

/// Same result as [`reduce`], folding chunks of outcomes on the rayon pool.
///
/// Partial aggregates are combined left to right, so the first-seen name rule
/// matches the sequential fold.
pub fn reduce_parallel(outcomes: &[MatchOutcome]) -> Aggregate {
    outcomes
        .par_iter()
        .fold(Aggregate::new, |mut acc, outcome| {
            for record in outcome.records() {
                acc.absorb(record);
            }
            acc
        })
        .reduce(Aggregate::new, Aggregate::merge)
}
