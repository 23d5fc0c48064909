//! Global seeding tests: every registered source, the accelerator hook and
//! the worker environment flag.

use std::sync::{Arc, Mutex};

use mlu_rng::{
    Accelerator, RandomSource, SEED_WORKERS_ENV, SeedRegistry, SeededRng, set_global_seed,
    smart_sample,
};
use rand::RngCore;
use serial_test::serial;

#[derive(Debug, Default)]
struct DeviceState {
    seed: Option<u64>,
    benchmark: Option<bool>,
    deterministic: Option<bool>,
}

/// Accelerator stand-in that records what seeding asked of it.
struct RecordingAccelerator {
    state: Arc<Mutex<DeviceState>>,
}

impl Accelerator for RecordingAccelerator {
    fn name(&self) -> &str {
        "fake-gpu"
    }

    fn manual_seed_all(&mut self, seed: u64) {
        self.state.lock().unwrap().seed = Some(seed);
    }

    fn set_benchmark(&mut self, enabled: bool) {
        self.state.lock().unwrap().benchmark = Some(enabled);
    }

    fn set_deterministic(&mut self, enabled: bool) {
        self.state.lock().unwrap().deterministic = Some(enabled);
    }
}

/// Extra source that remembers the last seed it received.
struct CountingSource {
    seeds: Arc<Mutex<Vec<u64>>>,
}

impl RandomSource for CountingSource {
    fn name(&self) -> &str {
        "augmentations"
    }

    fn reseed(&mut self, seed: u64) {
        self.seeds.lock().unwrap().push(seed);
    }
}

fn draw_run(registry: &mut SeedRegistry) -> (Vec<u32>, u64, f64) {
    let pool: Vec<u32> = (0..100).collect();
    let sampled = smart_sample(&pool, 10, registry.general()).unwrap();
    let numeric = registry.numeric().next_u64();
    let tensor = registry.tensor().uniform();
    (sampled, numeric, tensor)
}

#[test]
#[serial]
fn test_same_seed_same_draws() {
    let mut registry = SeedRegistry::new();

    set_global_seed(42, &mut registry);
    let first = draw_run(&mut registry);

    set_global_seed(42, &mut registry);
    let second = draw_run(&mut registry);

    assert_eq!(first, second);
}

#[test]
#[serial]
fn test_different_seeds_differ() {
    let mut registry = SeedRegistry::new();
    set_global_seed(1, &mut registry);
    let a = draw_run(&mut registry);
    set_global_seed(2, &mut registry);
    let b = draw_run(&mut registry);
    assert_ne!(a, b);
}

#[test]
#[serial]
fn test_sources_are_independent_streams() {
    let mut registry = SeedRegistry::new();
    set_global_seed(7, &mut registry);
    let general = registry.general().next_u64();
    let numeric = registry.numeric().next_u64();
    let tensor = registry.tensor().next_u64();
    assert_ne!(general, numeric);
    assert_ne!(numeric, tensor);
    assert_eq!(general, SeededRng::new(7).next_u64());
}

#[test]
#[serial]
fn test_accelerator_seeded_and_made_deterministic() {
    let state = Arc::new(Mutex::new(DeviceState::default()));
    let accelerator = RecordingAccelerator {
        state: Arc::clone(&state),
    };
    let mut registry = SeedRegistry::new().with_accelerator(Some(Box::new(accelerator)));

    let report = set_global_seed(123, &mut registry);

    let device = state.lock().unwrap();
    assert_eq!(device.seed, Some(123));
    assert_eq!(device.benchmark, Some(false));
    assert_eq!(device.deterministic, Some(true));
    assert_eq!(report.accelerator.as_deref(), Some("fake-gpu"));
}

#[test]
#[serial]
fn test_missing_accelerator_is_not_an_error() {
    let mut registry = SeedRegistry::new().with_accelerator(None);
    assert!(!registry.has_accelerator());
    let report = set_global_seed(5, &mut registry);
    assert!(report.accelerator.is_none());
    assert_eq!(report.sources, ["general", "numeric", "tensor"]);
}

#[test]
#[serial]
fn test_extra_sources_seeded_in_order() {
    let seeds = Arc::new(Mutex::new(Vec::new()));
    let mut registry = SeedRegistry::new().with_source(Box::new(CountingSource {
        seeds: Arc::clone(&seeds),
    }));

    let report = set_global_seed(9, &mut registry);
    set_global_seed(10, &mut registry);

    assert_eq!(*seeds.lock().unwrap(), vec![9, 10]);
    assert_eq!(report.sources.last().map(String::as_str), Some("augmentations"));
}

#[test]
#[serial]
fn test_worker_env_flag() {
    // SAFETY: serialized test, no other thread touches the environment.
    unsafe { std::env::remove_var(SEED_WORKERS_ENV) };

    let mut quiet = SeedRegistry::new().with_worker_env(false);
    let report = set_global_seed(3, &mut quiet);
    assert!(!report.worker_env);
    assert!(std::env::var(SEED_WORKERS_ENV).is_err());

    let mut registry = SeedRegistry::new();
    let report = set_global_seed(3, &mut registry);
    assert!(report.worker_env);
    assert_eq!(std::env::var(SEED_WORKERS_ENV).as_deref(), Ok("1"));
}

#[test]
fn test_report_serializes() {
    let mut registry = SeedRegistry::new().with_worker_env(false);
    let report = set_global_seed(77, &mut registry);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["seed"], 77);
    assert_eq!(json["sources"][0], "general");
    assert!(json["accelerator"].is_null());
}
