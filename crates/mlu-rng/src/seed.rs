//! Global seeding across every random source a run depends on.
//!
//! Sources are registered explicitly on a [`SeedRegistry`] instead of being
//! reached through process-wide singletons. Accelerator support is an
//! injected capability decided when the registry is built; when none is
//! injected, seeding simply skips that step.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::rng::SeededRng;

/// Environment flag that tells data-loader workers to seed themselves.
pub const SEED_WORKERS_ENV: &str = "PL_SEED_WORKERS";

/// The built-in random sources every registry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    /// General-purpose randomness (shuffles, choices)
    General,
    /// Numeric array generation
    Numeric,
    /// Tensor-compute randomness on the host
    Tensor,
}

impl SourceKind {
    /// ChaCha stream reserved for this source.
    pub fn stream(self) -> u64 {
        match self {
            SourceKind::General => 0,
            SourceKind::Numeric => 1,
            SourceKind::Tensor => 2,
        }
    }
}

/// Anything that can be restarted from an integer seed.
pub trait RandomSource: Send {
    fn name(&self) -> &str;
    fn reseed(&mut self, seed: u64);
}

/// Seeding and determinism controls of a compute accelerator runtime.
pub trait Accelerator: Send {
    fn name(&self) -> &str;

    /// Seed the generator of every device.
    fn manual_seed_all(&mut self, seed: u64);

    /// Allow or forbid autotuned (non-deterministic) algorithm selection.
    fn set_benchmark(&mut self, enabled: bool);

    /// Force deterministic kernel implementations.
    fn set_deterministic(&mut self, enabled: bool);
}

/// What a call to [`set_global_seed`] touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub seed: u64,
    /// Names of the seeded sources, in registration order
    pub sources: Vec<String>,
    /// Accelerator that was seeded, if one is present
    pub accelerator: Option<String>,
    pub worker_env: bool,
}

/// Registry of every random source and the optional accelerator of a run.
pub struct SeedRegistry {
    general: SeededRng,
    numeric: SeededRng,
    tensor: SeededRng,
    extra: Vec<Box<dyn RandomSource>>,
    accelerator: Option<Box<dyn Accelerator>>,
    worker_env: bool,
}

impl SeedRegistry {
    /// Registry with the three built-in sources seeded from entropy.
    pub fn new() -> Self {
        Self {
            general: SeededRng::from_entropy(SourceKind::General.stream()),
            numeric: SeededRng::from_entropy(SourceKind::Numeric.stream()),
            tensor: SeededRng::from_entropy(SourceKind::Tensor.stream()),
            extra: Vec::new(),
            accelerator: None,
            worker_env: true,
        }
    }

    /// Registry with the built-in sources already seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        let mut registry = Self::new();
        registry.reseed_sources(seed);
        registry
    }

    /// Register an additional source, seeded after the built-in ones.
    pub fn with_source(mut self, source: Box<dyn RandomSource>) -> Self {
        self.extra.push(source);
        self
    }

    /// Inject the accelerator runtime detected at startup.
    pub fn with_accelerator(mut self, accelerator: Option<Box<dyn Accelerator>>) -> Self {
        self.accelerator = accelerator;
        self
    }

    /// Whether seeding exports [`SEED_WORKERS_ENV`] (on by default).
    pub fn with_worker_env(mut self, enabled: bool) -> Self {
        self.worker_env = enabled;
        self
    }

    pub fn general(&mut self) -> &mut SeededRng {
        &mut self.general
    }

    pub fn numeric(&mut self) -> &mut SeededRng {
        &mut self.numeric
    }

    pub fn tensor(&mut self) -> &mut SeededRng {
        &mut self.tensor
    }

    pub fn source(&mut self, kind: SourceKind) -> &mut SeededRng {
        match kind {
            SourceKind::General => &mut self.general,
            SourceKind::Numeric => &mut self.numeric,
            SourceKind::Tensor => &mut self.tensor,
        }
    }

    pub fn has_accelerator(&self) -> bool {
        self.accelerator.is_some()
    }

    fn reseed_sources(&mut self, seed: u64) -> Vec<String> {
        let mut names = Vec::with_capacity(3 + self.extra.len());
        for kind in SourceKind::iter() {
            self.source(kind).reseed(seed);
            names.push(kind.to_string());
        }
        for source in &mut self.extra {
            source.reseed(seed);
            names.push(source.name().to_string());
        }
        names
    }
}

impl Default for SeedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for SeedRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeedRegistry")
            .field("general", &self.general)
            .field("numeric", &self.numeric)
            .field("tensor", &self.tensor)
            .field("extra", &self.extra.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("accelerator", &self.accelerator.as_ref().map(|a| a.name()))
            .field("worker_env", &self.worker_env)
            .finish()
    }
}

/// Seed every source in `registry` so the run is reproducible.
///
/// Call once at startup, before any stochastic operation and before worker
/// threads are spawned. Parallel workers should get their own seed from
/// [`derive_seed`] rather than share these sources.
pub fn set_global_seed(seed: u64, registry: &mut SeedRegistry) -> SeedReport {
    let sources = registry.reseed_sources(seed);
    debug!(seed, ?sources, "reseeded random sources");

    let accelerator = match registry.accelerator.as_mut() {
        Some(acc) => {
            acc.manual_seed_all(seed);
            acc.set_benchmark(false);
            acc.set_deterministic(true);
            debug!(seed, accelerator = acc.name(), "seeded accelerator");
            Some(acc.name().to_string())
        }
        None => {
            debug!("no accelerator registered, skipping device seeding");
            None
        }
    };

    if registry.worker_env {
        // SAFETY: seeding happens once at startup, before any thread reads the environment.
        unsafe { std::env::set_var(SEED_WORKERS_ENV, "1") };
    }

    SeedReport {
        seed,
        sources,
        accelerator,
        worker_env: registry.worker_env,
    }
}

/// Seed for worker `worker` of a run seeded with `base`.
///
/// Stable across platforms and releases (splitmix64 finalizer).
pub fn derive_seed(base: u64, worker: u64) -> u64 {
    let mut z = base.wrapping_add(worker.wrapping_add(1).wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
