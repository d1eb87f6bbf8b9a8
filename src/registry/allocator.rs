//! Round-scoped identifier allocation
//!
//! Identifiers are built from 3-character hex chunks; a tier-R identifier
//! is R chunks long. Tier-1 identifiers are drawn without replacement from
//! the full 4096-chunk space. Higher tiers compose: a tier-R identifier is
//! an assigned tier-(R-1) identifier with an assigned tier-1 chunk glued on
//! either side, so splicers can build rare effects out of tokens they
//! already hold. When the composable pool runs dry the allocator falls back
//! to the unconstrained tier-R space, a scarcity outcome rather than an error.

use crate::dna::CHUNK_LEN;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const ALPHABET: &[u8; 16] = b"0123456789ABCDEF";

/// Highest rarity tier.
pub const MAX_TIER: usize = 5;

/// Size of the tier-1 identifier space (16^3).
pub const CHUNK_SPACE: usize = 4096;

/// Per-namespace allocator state for one round.
///
/// All internal collections are ordered, so a seeded RNG reproduces an
/// assignment exactly. Within a round no identifier is handed out twice at
/// its tier; across rounds the state is reset and everything is redrawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkAllocator {
    assigned: Vec<BTreeSet<String>>,
    free_chunks: Vec<String>,
}

impl Default for ChunkAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkAllocator {
    pub fn new() -> Self {
        Self {
            assigned: vec![BTreeSet::new(); MAX_TIER],
            free_chunks: (0..CHUNK_SPACE).map(|v| format!("{:03X}", v)).collect(),
        }
    }

    /// Round-boundary reset: forget every assignment and refill the pool.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Identifiers handed out so far at `tier` (1-based).
    pub fn assigned(&self, tier: usize) -> &BTreeSet<String> {
        &self.assigned[tier - 1]
    }

    /// Draw one unused tier-1 identifier uniformly at random. `None` once
    /// the whole chunk space is taken.
    pub fn assign_chunk(&mut self, rng: &mut impl Rng) -> Option<String> {
        if self.free_chunks.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.free_chunks.len());
        let id = self.free_chunks.swap_remove(index);
        self.assigned[0].insert(id.clone());
        Some(id)
    }

    /// Assign `count` identifiers at `tier`, consuming the composable pool
    /// built from this round's lower-tier assignments.
    ///
    /// Tiers must be requested in increasing order: the pool for tier R is
    /// derived from what tiers R-1 and 1 already hold. Requests beyond the
    /// pool fall back to random unconstrained identifiers; such identifiers
    /// cannot be spliced together from lower-tier tokens this round.
    pub fn assign_tier(&mut self, tier: usize, count: usize, rng: &mut impl Rng) -> Vec<String> {
        assert!((1..=MAX_TIER).contains(&tier), "tier out of range: {}", tier);
        if tier == 1 {
            return (0..count).filter_map(|_| self.assign_chunk(rng)).collect();
        }

        let mut pool: Vec<String> = self
            .composable_pool(tier)
            .into_iter()
            .filter(|id| !self.assigned[tier - 1].contains(id))
            .collect();

        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let id = if pool.is_empty() {
                self.random_unconstrained(tier, rng)
            } else {
                pool.swap_remove(rng.gen_range(0..pool.len()))
            };
            self.assigned[tier - 1].insert(id.clone());
            out.push(id);
        }
        out
    }

    /// Prepend/append combinations of assigned tier-1 and tier-(R-1)
    /// identifiers, deduplicated. Combinations from different source pairs
    /// may coincide, hence the set.
    fn composable_pool(&self, tier: usize) -> BTreeSet<String> {
        let mut pool = BTreeSet::new();
        for parent in &self.assigned[tier - 2] {
            for chunk in &self.assigned[0] {
                pool.insert(format!("{}{}", chunk, parent));
                pool.insert(format!("{}{}", parent, chunk));
            }
        }
        pool
    }

    fn random_unconstrained(&self, tier: usize, rng: &mut impl Rng) -> String {
        loop {
            let id: String = (0..tier * CHUNK_LEN)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect();
            if !self.assigned[tier - 1].contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn decomposes(id: &str, allocator: &ChunkAllocator, tier: usize) -> bool {
        let chunk_chars = CHUNK_LEN;
        let prefix_chunk = &id[..chunk_chars];
        let suffix_chunk = &id[id.len() - chunk_chars..];
        let after_prefix = &id[chunk_chars..];
        let before_suffix = &id[..id.len() - chunk_chars];
        (allocator.assigned(1).contains(prefix_chunk)
            && allocator.assigned(tier - 1).contains(after_prefix))
            || (allocator.assigned(1).contains(suffix_chunk)
                && allocator.assigned(tier - 1).contains(before_suffix))
    }

    #[test]
    fn test_tier1_draws_are_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut allocator = ChunkAllocator::new();
        let ids = allocator.assign_tier(1, 200, &mut rng);
        assert_eq!(ids.len(), 200);
        let distinct: BTreeSet<&String> = ids.iter().collect();
        assert_eq!(distinct.len(), 200);
        assert!(ids.iter().all(|id| id.len() == CHUNK_LEN));
    }

    #[test]
    fn test_chunk_space_exhausts_to_none() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut allocator = ChunkAllocator::new();
        for _ in 0..CHUNK_SPACE {
            assert!(allocator.assign_chunk(&mut rng).is_some());
        }
        assert!(allocator.assign_chunk(&mut rng).is_none());
        assert_eq!(allocator.assigned(1).len(), CHUNK_SPACE);
    }

    #[test]
    fn test_higher_tiers_compose_from_lower() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut allocator = ChunkAllocator::new();
        allocator.assign_tier(1, 40, &mut rng);
        let tier2 = allocator.assign_tier(2, 30, &mut rng);
        let tier3 = allocator.assign_tier(3, 10, &mut rng);

        // pool of 40 tier-1 ids is far larger than demand, so every
        // assignment must decompose
        for id in &tier2 {
            assert_eq!(id.len(), 2 * CHUNK_LEN);
            assert!(decomposes(id, &allocator, 2), "{} does not decompose", id);
        }
        for id in &tier3 {
            assert_eq!(id.len(), 3 * CHUNK_LEN);
            assert!(decomposes(id, &allocator, 3), "{} does not decompose", id);
        }
    }

    #[test]
    fn test_pool_exhaustion_falls_back_to_unconstrained() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut allocator = ChunkAllocator::new();
        allocator.assign_tier(1, 2, &mut rng);
        // two tier-1 ids give exactly the 4 ordered pairs as composable
        // tier-2 ids (prepend and append coincide here)
        let tier2 = allocator.assign_tier(2, 12, &mut rng);
        assert_eq!(tier2.len(), 12);
        let distinct: BTreeSet<&String> = tier2.iter().collect();
        assert_eq!(distinct.len(), 12);
        let composable = tier2
            .iter()
            .filter(|id| decomposes(id, &allocator, 2))
            .count();
        assert!(composable >= 4, "only {} composable ids", composable);
        assert!(tier2.iter().all(|id| id.len() == 2 * CHUNK_LEN));
    }

    #[test]
    fn test_reset_forgets_assignments() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut allocator = ChunkAllocator::new();
        allocator.assign_tier(1, 10, &mut rng);
        allocator.assign_tier(2, 5, &mut rng);
        allocator.reset();
        for tier in 1..=MAX_TIER {
            assert!(allocator.assigned(tier).is_empty());
        }
    }

    #[test]
    fn test_seeded_assignment_is_reproducible() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(6);
            let mut allocator = ChunkAllocator::new();
            let mut ids = allocator.assign_tier(1, 20, &mut rng);
            ids.extend(allocator.assign_tier(2, 10, &mut rng));
            ids
        };
        assert_eq!(run(), run());
    }
}
