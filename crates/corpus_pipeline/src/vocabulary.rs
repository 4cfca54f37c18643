//! Corpus-wide vocabulary accumulator
//!
//! Owns the mapping from unit to (total frequency, per-part counts). Counts
//! are stored as sparse postings with an implicit zero for absent parts;
//! dense vectors sized to the part count are materialized per unit when the
//! metric engine needs them. This keeps memory at O(occupied cells) instead
//! of O(vocabulary × parts).

use std::collections::HashMap;

use contracts::UnitKey;

/// Per-unit accumulation state
///
/// Invariant: `total_frequency == Σ postings counts`; postings carry one
/// entry per part the unit occurs in, in merge order.
#[derive(Debug, Clone, Default)]
pub struct UnitEntry {
    total_frequency: f64,
    postings: Vec<(usize, f64)>,
}

impl UnitEntry {
    fn record(&mut self, part_index: usize, count: f64) {
        self.total_frequency += count;
        self.postings.push((part_index, count));
    }

    /// Total frequency across all parts
    pub fn total_frequency(&self) -> f64 {
        self.total_frequency
    }

    /// Number of parts this unit occurs in
    pub fn occupied_parts(&self) -> usize {
        self.postings.len()
    }

    /// Materialize the dense per-part frequency vector
    pub fn dense_vector(&self, num_parts: usize) -> Vec<f64> {
        let mut v = vec![0.0; num_parts];
        for &(part_index, count) in &self.postings {
            v[part_index] = count;
        }
        v
    }
}

/// Corpus-wide vocabulary, merged part by part during Phase 2
#[derive(Debug, Default)]
pub struct VocabularyAccumulator {
    num_parts: usize,
    units: HashMap<UnitKey, UnitEntry>,
}

impl VocabularyAccumulator {
    /// Create an accumulator for a run with a fixed part count
    pub fn new(num_parts: usize) -> Self {
        Self {
            num_parts,
            units: HashMap::new(),
        }
    }

    /// Merge one part's (unit -> count) multiset
    ///
    /// A unit absent from a part simply contributes nothing; the merge is a
    /// commutative per-unit sum, so part order does not affect totals.
    pub fn merge_part(&mut self, part_index: usize, counts: &HashMap<UnitKey, f64>) {
        debug_assert!(part_index < self.num_parts, "part index out of range");

        for (unit, &count) in counts {
            self.units
                .entry(unit.clone())
                .or_default()
                .record(part_index, count);
        }
    }

    /// Number of distinct units observed so far
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Whether no unit has been observed
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Part count this run was created with
    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    /// Consume the accumulator, yielding units in sorted key order
    ///
    /// Sorting makes Phase 3 output deterministic across runs.
    pub fn into_sorted_units(self) -> Vec<(UnitKey, UnitEntry)> {
        let mut units: Vec<_> = self.units.into_iter().collect();
        units.sort_by(|(a, _), (b, _)| a.cmp(b));
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, &str, f64)]) -> HashMap<UnitKey, f64> {
        pairs
            .iter()
            .map(|(word, pos, count)| (UnitKey::new(*word, *pos), *count))
            .collect()
    }

    #[test]
    fn test_merge_accumulates_totals() {
        let mut vocab = VocabularyAccumulator::new(3);
        vocab.merge_part(0, &counts(&[("a", "word", 2.0), ("b", "word", 1.0)]));
        vocab.merge_part(2, &counts(&[("a", "word", 3.0)]));

        assert_eq!(vocab.unit_count(), 2);

        let units = vocab.into_sorted_units();
        let (key, entry) = &units[0];
        assert_eq!(key, &UnitKey::new("a", "word"));
        assert_eq!(entry.total_frequency(), 5.0);
        assert_eq!(entry.occupied_parts(), 2);
        assert_eq!(entry.dense_vector(3), vec![2.0, 0.0, 3.0]);
    }

    #[test]
    fn test_total_matches_posting_sum() {
        let mut vocab = VocabularyAccumulator::new(2);
        vocab.merge_part(0, &counts(&[("x", "word", 4.0)]));
        vocab.merge_part(1, &counts(&[("x", "word", 1.0)]));

        let units = vocab.into_sorted_units();
        let (_, entry) = &units[0];
        let dense_sum: f64 = entry.dense_vector(2).iter().sum();
        assert_eq!(entry.total_frequency(), dense_sum);
    }

    #[test]
    fn test_sorted_order() {
        let mut vocab = VocabularyAccumulator::new(1);
        vocab.merge_part(
            0,
            &counts(&[("b", "word", 1.0), ("a", "num", 1.0), ("a", "word", 1.0)]),
        );

        let keys: Vec<String> = vocab
            .into_sorted_units()
            .into_iter()
            .map(|(key, _)| key.to_string())
            .collect();
        assert_eq!(keys, vec!["a/num", "a/word", "b/word"]);
    }

    #[test]
    fn test_empty_vocabulary() {
        let vocab = VocabularyAccumulator::new(4);
        assert!(vocab.is_empty());
        assert_eq!(vocab.num_parts(), 4);
    }
}
