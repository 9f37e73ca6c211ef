//! Deterministic seed hierarchy.
//!
//! A master seed generates deterministic sub-seeds for each
//! `(stream, symbol, iteration)` tuple. Sub-seeds are derived via BLAKE3
//! hashing, independently of processing order, so a session replays
//! identically no matter which symbol advances first. Each concern draws
//! from its own named stream (`"tick"`, `"volume"`, `"fetch"`,
//! `"snapshot"`) so, e.g., adding a volume draw never shifts the price walk.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic seed hierarchy.
///
/// The master seed is expanded into per-(stream, symbol, iteration)
/// sub-seeds using BLAKE3. Because derivation is hash-based (not
/// order-dependent), the same master seed produces identical sub-seeds
/// regardless of the order in which symbols or iterations are processed.
#[derive(Debug, Clone)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a specific (stream, symbol, iteration).
    pub fn sub_seed(&self, stream: &str, symbol: &str, iteration: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(stream.as_bytes());
        hasher.update(&[0]); // domain separator between stream and symbol
        hasher.update(symbol.as_bytes());
        hasher.update(&iteration.to_le_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }

    /// Create a seeded StdRng for one (stream, symbol, iteration) draw.
    pub fn rng_for(&self, stream: &str, symbol: &str, iteration: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(stream, symbol, iteration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_seeds_are_deterministic() {
        let hierarchy = SeedHierarchy::new(42);
        let s1 = hierarchy.sub_seed("tick", "EURUSD", 0);
        let s2 = hierarchy.sub_seed("tick", "EURUSD", 0);
        assert_eq!(s1, s2);
    }

    #[test]
    fn different_symbols_different_seeds() {
        let hierarchy = SeedHierarchy::new(42);
        assert_ne!(
            hierarchy.sub_seed("tick", "EURUSD", 0),
            hierarchy.sub_seed("tick", "GBPUSD", 0)
        );
    }

    #[test]
    fn different_streams_different_seeds() {
        let hierarchy = SeedHierarchy::new(42);
        assert_ne!(
            hierarchy.sub_seed("tick", "EURUSD", 0),
            hierarchy.sub_seed("volume", "EURUSD", 0)
        );
    }

    #[test]
    fn different_iterations_different_seeds() {
        let hierarchy = SeedHierarchy::new(42);
        assert_ne!(
            hierarchy.sub_seed("tick", "EURUSD", 0),
            hierarchy.sub_seed("tick", "EURUSD", 1)
        );
    }

    #[test]
    fn derivation_order_independent() {
        let hierarchy = SeedHierarchy::new(42);

        let eur_first = hierarchy.sub_seed("tick", "EURUSD", 0);
        let _gbp = hierarchy.sub_seed("tick", "GBPUSD", 0);
        let eur_second = hierarchy.sub_seed("tick", "EURUSD", 0);

        assert_eq!(eur_first, eur_second);
    }

    #[test]
    fn different_master_seeds_different_output() {
        let h1 = SeedHierarchy::new(42);
        let h2 = SeedHierarchy::new(43);
        assert_ne!(
            h1.sub_seed("tick", "EURUSD", 0),
            h2.sub_seed("tick", "EURUSD", 0)
        );
    }

    #[test]
    fn stream_symbol_concatenation_does_not_collide() {
        // ("ab", "c") must differ from ("a", "bc").
        let hierarchy = SeedHierarchy::new(42);
        assert_ne!(
            hierarchy.sub_seed("ab", "c", 0),
            hierarchy.sub_seed("a", "bc", 0)
        );
    }
}
