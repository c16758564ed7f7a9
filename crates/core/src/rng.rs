//! RNG module - seedable randomness for tray generation
//!
//! Tray generation never reaches for ambient randomness: every shuffle goes
//! through a [`RandomSource`], so tests and daily challenges can pin the
//! sequence. [`SimpleRng`] is the default source.
//!
//! Also provides the two string hashes used by the catalog:
//! - [`additive_hash`]: sum of character codes, decides special-piece inclusion
//! - [`fnv1a_hash`]: stable 32-bit FNV-1a, seeds the shuffle

/// A source of pseudo-random numbers
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an RNG whose sequence is a pure function of `seed`
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(fnv1a_hash(seed))
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of an LCG have short periods; hand out the high half.
        self.state >> 16
    }
}

/// Sum of the character codes of `s`
pub fn additive_hash(s: &str) -> u32 {
    s.chars().fold(0u32, |acc, c| acc.wrapping_add(c as u32))
}

/// Stable 32-bit FNV-1a over the UTF-8 bytes of `s`
pub fn fnv1a_hash(s: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c9dc5;
    const PRIME: u32 = 0x01000193;

    s.bytes().fold(OFFSET_BASIS, |h, b| (h ^ b as u32).wrapping_mul(PRIME))
}
