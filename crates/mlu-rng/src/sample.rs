//! Pool sampling that tops up with repeats when the pool is too small.

use mlu_core::{Error, Result, Sequence};
use rand::Rng;
use rand::seq::{SliceRandom, index};
use tracing::trace;

/// Draw exactly `k` items from `pool`.
///
/// If the pool holds at least `k` items they are drawn without replacement,
/// uniformly over all `k`-subsets, in random order. Otherwise every pool item
/// is taken once (shuffled) and the remaining `k - n` slots are filled by
/// independent draws with replacement.
///
/// Drawing `k > 0` items from an empty pool is an error.
pub fn smart_sample<S, R>(pool: &S, k: usize, rng: &mut R) -> Result<Vec<S::Item>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    R: Rng + ?Sized,
{
    let n = pool.len();
    if k == 0 {
        return Ok(Vec::new());
    }
    if n == 0 {
        return Err(Error::invalid(
            "pool",
            format!("cannot sample {} items from an empty pool", k),
        ));
    }

    let ids: Vec<usize> = if n >= k {
        trace!(n, k, "sampling without replacement");
        index::sample(rng, n, k).into_vec()
    } else {
        trace!(n, k, "taking whole pool and topping up with replacement");
        let mut ids: Vec<usize> = (0..n).collect();
        ids.shuffle(rng);
        ids.extend((0..k - n).map(|_| rng.gen_range(0..n)));
        ids
    };

    Ok(ids.into_iter().filter_map(|i| pool.get(i).cloned()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;
    use std::collections::HashSet;

    #[test]
    fn test_without_replacement() {
        let mut rng = SeededRng::new(42);
        let pool: Vec<u32> = (0..10).collect();
        let sampled = smart_sample(&pool, 4, &mut rng).unwrap();
        assert_eq!(sampled.len(), 4);
        let unique: HashSet<u32> = sampled.iter().copied().collect();
        assert_eq!(unique.len(), 4);
        assert!(sampled.iter().all(|x| pool.contains(x)));
    }

    #[test]
    fn test_whole_pool_then_repeats() {
        let mut rng = SeededRng::new(42);
        let pool = ["a", "b", "c"];
        let sampled = smart_sample(&pool, 8, &mut rng).unwrap();
        assert_eq!(sampled.len(), 8);
        let head: HashSet<&str> = sampled[..3].iter().copied().collect();
        let expected: HashSet<&str> = pool.iter().copied().collect();
        assert_eq!(head, expected);
    }

    #[test]
    fn test_zero_items() {
        let mut rng = SeededRng::new(1);
        assert!(smart_sample(&[1, 2, 3], 0, &mut rng).unwrap().is_empty());
        let empty: Vec<i32> = Vec::new();
        assert!(smart_sample(&empty, 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_empty_pool_rejected() {
        let mut rng = SeededRng::new(1);
        let empty: Vec<i32> = Vec::new();
        let err = smart_sample(&empty, 2, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref arg, .. } if arg == "pool"));
    }

    #[test]
    fn test_exact_size_is_permutation() {
        let mut rng = SeededRng::new(3);
        let pool: Vec<u8> = (0..20).collect();
        let mut sampled = smart_sample(&pool, 20, &mut rng).unwrap();
        sampled.sort();
        assert_eq!(sampled, pool);
    }
}
