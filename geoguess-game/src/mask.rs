//! Mask generation: which letter positions the player has to fill in.
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::{MASK_RATIO_DEN, MASK_RATIO_NUM};

/// Number of hidden positions for a word of `length` characters: `floor(length * 0.6)`.
#[must_use]
pub const fn mask_size(length: usize) -> usize {
    length * MASK_RATIO_NUM / MASK_RATIO_DEN
}

/// Set of hidden character positions within a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaskSet(BTreeSet<usize>);

impl MaskSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mask a word, drawing only from its non-whitespace positions.
    ///
    /// Whitespace stays a fixed, revealed gap. For words without spaces this
    /// is the same draw as [`generate_mask`] over the full length.
    pub fn for_word<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Self {
        let letters: Vec<usize> = word
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| i)
            .collect();
        let drawn = generate_mask(letters.len(), rng);
        Self(drawn.iter().filter_map(|i| letters.get(i).copied()).collect())
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hidden positions in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for MaskSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Pick `floor(length * 0.6)` distinct positions in `[0, length)`.
///
/// Uses a partial Fisher–Yates draw so it terminates for every length.
pub fn generate_mask<R: Rng + ?Sized>(length: usize, rng: &mut R) -> MaskSet {
    let amount = mask_size(length);
    if amount == 0 {
        return MaskSet::new();
    }
    index::sample(rng, length, amount).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::CountryPool;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn mask_has_exact_size_and_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for length in 2..=40 {
            let mask = generate_mask(length, &mut rng);
            assert_eq!(mask.len(), length * 3 / 5, "length {length}");
            assert!(mask.iter().all(|i| i < length));
        }
    }

    #[test]
    fn mask_sizes_match_floor_of_sixty_percent() {
        assert_eq!(mask_size(1), 0);
        assert_eq!(mask_size(2), 1);
        assert_eq!(mask_size(5), 3);
        assert_eq!(mask_size(6), 3);
        assert_eq!(mask_size(8), 4);
        assert_eq!(mask_size(10), 6);
    }

    #[test]
    fn every_pool_entry_keeps_a_revealed_letter() {
        for country in CountryPool::builtin().iter() {
            let length = country.chars().count();
            assert!(mask_size(length) < length, "{country} would be fully hidden");
        }
        // "Japan": 3 hidden, 2 shown.
        assert_eq!(mask_size("Japan".len()), 3);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let a = generate_mask(9, &mut ChaCha20Rng::seed_from_u64(99));
        let b = generate_mask(9, &mut ChaCha20Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn word_mask_skips_whitespace() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..50 {
            let mask = MaskSet::for_word("SRI LANKA", &mut rng);
            assert!(!mask.contains(3));
            assert_eq!(mask.len(), mask_size(8));
        }
    }

    #[test]
    fn zero_and_one_lengths_hide_nothing() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(generate_mask(0, &mut rng).is_empty());
        assert!(generate_mask(1, &mut rng).is_empty());
    }
}
