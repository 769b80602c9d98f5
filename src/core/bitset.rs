//! Bit-packed candidate sets
//!
//! A `CandidateSet` is a fixed-width bitset over answer indices. The number
//! of members is tracked alongside the words so cardinality queries are O(1).

use serde::{Deserialize, Serialize};

const BITS: usize = u64::BITS as usize;

/// Set of answer indices still consistent with the feedback applied so far
///
/// Decoding recounts the members from the blocks; a stored count is never
/// trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StoredSet")]
pub struct CandidateSet {
    blocks: Vec<u64>,
    count: usize,
}

/// Wire form of a `CandidateSet`
#[derive(Deserialize)]
struct StoredSet {
    blocks: Vec<u64>,
    #[serde(rename = "count")]
    _count: usize,
}

impl From<StoredSet> for CandidateSet {
    fn from(stored: StoredSet) -> Self {
        let count = popcount(&stored.blocks);
        Self {
            blocks: stored.blocks,
            count,
        }
    }
}

fn popcount(blocks: &[u64]) -> usize {
    blocks.iter().map(|b| b.count_ones() as usize).sum()
}

impl CandidateSet {
    /// Empty set able to hold indices `0..size`
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            blocks: vec![0; size.div_ceil(BITS)],
            count: 0,
        }
    }

    /// Set containing every index in `0..size`
    ///
    /// # Examples
    /// ```
    /// use wordle_bitset::core::CandidateSet;
    ///
    /// let all = CandidateSet::full(70);
    /// assert_eq!(all.len(), 70);
    /// assert!(all.contains(69));
    /// assert!(!all.contains(70));
    /// ```
    #[must_use]
    pub fn full(size: usize) -> Self {
        let mut blocks = vec![u64::MAX; size.div_ceil(BITS)];
        let tail = size % BITS;
        if let Some(last) = blocks.last_mut()
            && tail != 0
        {
            *last = (1u64 << tail) - 1;
        }
        Self {
            blocks,
            count: size,
        }
    }

    /// Build a set from an iterator of indices
    #[must_use]
    pub fn from_indices(size: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(size);
        for index in indices {
            set.insert(index);
        }
        set
    }

    /// Insert an index, returning `true` if it was not already present
    ///
    /// # Panics
    /// Panics if `index` is beyond the set's capacity
    pub fn insert(&mut self, index: usize) -> bool {
        let bit = 1u64 << (index % BITS);
        let block = &mut self.blocks[index / BITS];
        if *block & bit == 0 {
            *block |= bit;
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// Membership test; indices beyond capacity are never members
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.blocks
            .get(index / BITS)
            .is_some_and(|block| block & (1u64 << (index % BITS)) != 0)
    }

    /// Number of members
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of set bits, counted from the blocks
    #[must_use]
    pub fn count_bits(&self) -> usize {
        popcount(&self.blocks)
    }

    /// Number of indices this set can represent (rounded up to whole blocks)
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * BITS
    }

    /// Intersection of two sets
    ///
    /// Sets built over different universe sizes are truncated to the shorter
    /// block count; indices only the longer set can hold are dropped.
    ///
    /// # Examples
    /// ```
    /// use wordle_bitset::core::CandidateSet;
    ///
    /// let a = CandidateSet::from_indices(10, [1, 3, 5, 7]);
    /// let b = CandidateSet::from_indices(10, [3, 4, 5]);
    /// let both = a.intersect(&b);
    /// assert_eq!(both.iter().collect::<Vec<_>>(), vec![3, 5]);
    /// assert_eq!(both.len(), 2);
    /// ```
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let mut count = 0;
        let blocks = self
            .blocks
            .iter()
            .zip(&other.blocks)
            .map(|(a, b)| {
                let block = a & b;
                count += block.count_ones() as usize;
                block
            })
            .collect();
        Self { blocks, count }
    }

    /// In-place intersection, same truncation rule as [`CandidateSet::intersect`]
    pub fn intersect_with(&mut self, other: &Self) {
        self.blocks.truncate(other.blocks.len());
        let mut count = 0;
        for (a, b) in self.blocks.iter_mut().zip(&other.blocks) {
            *a &= b;
            count += a.count_ones() as usize;
        }
        self.count = count;
    }

    /// Cardinality of the intersection without allocating it
    #[must_use]
    pub fn intersection_len(&self, other: &Self) -> usize {
        self.blocks
            .iter()
            .zip(&other.blocks)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Check whether two sets share no member
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.blocks
            .iter()
            .zip(&other.blocks)
            .all(|(a, b)| a & b == 0)
    }

    /// Union of two sets, sized to the longer operand
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (long, short) = if self.blocks.len() >= other.blocks.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut blocks = long.blocks.clone();
        for (a, b) in blocks.iter_mut().zip(&short.blocks) {
            *a |= b;
        }
        let count = popcount(&blocks);
        Self { blocks, count }
    }

    /// Iterate member indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .flat_map(|(block_index, &block)| {
                let mut remaining = block;
                std::iter::from_fn(move || {
                    if remaining == 0 {
                        return None;
                    }
                    let bit = remaining.trailing_zeros() as usize;
                    remaining &= remaining - 1;
                    Some(block_index * BITS + bit)
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl CandidateSet {
        /// Copy with an arbitrary stored count, as a damaged snapshot would hold
        pub(crate) fn with_stored_count(&self, count: usize) -> Self {
            Self {
                blocks: self.blocks.clone(),
                count,
            }
        }
    }

    #[test]
    fn decoding_recounts_members() {
        let set = CandidateSet::from_indices(100, [1, 64, 99]);
        let damaged = set.with_stored_count(7);
        assert_eq!(damaged.len(), 7);

        let bytes = bincode::serialize(&damaged).unwrap();
        let decoded: CandidateSet = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.count_bits(), 3);
        assert_eq!(decoded, set);
    }

    #[test]
    fn insert_tracks_count() {
        let mut set = CandidateSet::new(100);
        assert!(set.is_empty());
        assert!(set.insert(0));
        assert!(set.insert(64));
        assert!(set.insert(99));
        assert!(!set.insert(64));
        assert_eq!(set.len(), 3);
        assert!(set.contains(64));
        assert!(!set.contains(63));
        assert!(!set.contains(1_000));
    }

    #[test]
    fn full_masks_tail() {
        let set = CandidateSet::full(130);
        assert_eq!(set.len(), 130);
        assert_eq!(set.iter().count(), 130);
        assert_eq!(set.iter().last(), Some(129));

        let exact = CandidateSet::full(128);
        assert_eq!(exact.iter().count(), 128);

        assert!(CandidateSet::full(0).is_empty());
    }

    #[test]
    fn intersection_is_commutative_and_associative() {
        let a = CandidateSet::from_indices(200, [1, 5, 64, 70, 150, 199]);
        let b = CandidateSet::from_indices(200, [5, 64, 71, 150]);
        let c = CandidateSet::from_indices(200, [0, 5, 150, 199]);

        assert_eq!(a.intersect(&b), b.intersect(&a));
        assert_eq!(a.intersect(&b).intersect(&c), a.intersect(&b.intersect(&c)));
        assert_eq!(a.intersect(&b).intersect(&c).iter().collect::<Vec<_>>(), [5, 150]);
    }

    #[test]
    fn intersection_with_self_is_identity() {
        let a = CandidateSet::from_indices(90, [2, 3, 88]);
        assert_eq!(a.intersect(&a), a);
    }

    #[test]
    fn intersection_truncates_to_shorter_universe() {
        let long = CandidateSet::from_indices(200, [3, 63, 64, 180]);
        let short = CandidateSet::full(64);

        let both = long.intersect(&short);
        assert_eq!(both.iter().collect::<Vec<_>>(), [3, 63]);
        assert_eq!(both.capacity(), 64);
        assert_eq!(short.intersect(&long), both);

        let mut in_place = long.clone();
        in_place.intersect_with(&short);
        assert_eq!(in_place, both);
    }

    #[test]
    fn intersection_len_matches_intersect() {
        let a = CandidateSet::from_indices(300, (0..300).step_by(3));
        let b = CandidateSet::from_indices(300, (0..300).step_by(5));
        assert_eq!(a.intersection_len(&b), a.intersect(&b).len());
        assert_eq!(a.intersection_len(&b), 20);
    }

    #[test]
    fn union_and_disjoint() {
        let a = CandidateSet::from_indices(10, [0, 2]);
        let b = CandidateSet::from_indices(100, [1, 99]);
        assert!(a.is_disjoint(&b));

        let u = a.union(&b);
        assert_eq!(u.len(), 4);
        assert_eq!(u.iter().collect::<Vec<_>>(), [0, 1, 2, 99]);
    }
}
