//! mlu-rng: seeded random sources and sampling
//!
//! Provides the reseedable [`SeededRng`] handle, the [`SeedRegistry`] that
//! seeds every source of a run in one call, and [`smart_sample`].

pub mod rng;
pub mod sample;
pub mod seed;

pub use rng::SeededRng;
pub use sample::smart_sample;
pub use seed::{
    Accelerator, RandomSource, SEED_WORKERS_ENV, SeedRegistry, SeedReport, SourceKind,
    derive_seed, set_global_seed,
};
