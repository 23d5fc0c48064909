//! Seeded random number generator handle
//!
//! Uses a seeded ChaCha RNG for reproducibility. Several handles can share
//! one seed and still draw independent values by living on different streams.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Reseedable random number generator
///
/// Wraps ChaCha8Rng on a fixed stream.
/// Note: RNG position is not serialized - deserializing recreates the generator
/// from its seed and stream, as if freshly seeded.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: ChaCha8Rng,
    seed: u64,
    stream: u64,
}

#[derive(Serialize, Deserialize)]
struct SeedState {
    seed: u64,
    stream: u64,
}

// Custom serialization - only serialize seed and stream, recreate RNG on deserialize
impl Serialize for SeededRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SeedState {
            seed: self.seed,
            stream: self.stream,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SeededRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let state = SeedState::deserialize(deserializer)?;
        Ok(SeededRng::with_stream(state.seed, state.stream))
    }
}

impl SeededRng {
    /// Create a new RNG with the given seed on stream 0
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, 0)
    }

    /// Create a new RNG with the given seed on a specific stream
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng, seed, stream }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy(stream: u64) -> Self {
        let seed = rand::random();
        Self::with_stream(seed, stream)
    }

    /// Restart the generator from `seed`, keeping its stream
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::with_stream(seed, self.stream);
    }

    /// Get the seed this RNG was last seeded with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stream(&self) -> u64 {
        self.stream
    }

    /// Uniform index in `0..n`
    ///
    /// Returns 0 if n is 0.
    pub fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform float in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen()
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_entropy(0)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
