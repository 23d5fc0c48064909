//! Sequence capability and element-wise helpers.
//!
//! [`Sequence`] is the "sized, randomly indexable collection" seam used by
//! samplers and lookups, so slices, vectors and 1-D arrays are handled by the
//! same code path instead of being told apart at runtime.

use ndarray::{Array1, ArrayBase, Data, Ix1};

use crate::error::{Error, Result};

/// A finite collection with random access by position.
pub trait Sequence {
    type Item;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Element at `index`, or `None` when out of bounds.
    fn get(&self, index: usize) -> Option<&Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Sequence for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<S> Sequence for ArrayBase<S, Ix1>
where
    S: Data,
{
    type Item = S::Elem;

    fn len(&self) -> usize {
        self.dim()
    }

    fn get(&self, index: usize) -> Option<&S::Elem> {
        ArrayBase::get(self, index)
    }
}

/// Indices of all elements equal to `value`, in ascending order.
pub fn find_value_ids<S>(seq: &S, value: &S::Item) -> Vec<usize>
where
    S: Sequence + ?Sized,
    S::Item: PartialEq,
{
    (0..seq.len())
        .filter(|&i| seq.get(i) == Some(value))
        .collect()
}

/// Cap every element at `max_el`.
pub fn clip_max<T>(seq: &[T], max_el: T) -> Vec<T>
where
    T: PartialOrd + Clone,
{
    seq.iter()
        .map(|x| {
            if max_el < *x {
                max_el.clone()
            } else {
                x.clone()
            }
        })
        .collect()
}

/// Extend a 1-D sequence to exactly `required_len` elements by appending `val`.
///
/// Fails if the sequence is already longer than `required_len`.
pub fn pad_array_right<S>(arr: &S, required_len: usize, val: S::Item) -> Result<Array1<S::Item>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    let len = arr.len();
    if required_len < len {
        return Err(Error::invalid(
            "required_len",
            format!("expected at least the input length {}, got {}", len, required_len),
        ));
    }

    let mut out = Vec::with_capacity(required_len);
    out.extend((0..len).filter_map(|i| arr.get(i).cloned()));
    out.resize(required_len, val);
    Ok(Array1::from(out))
}

/// One-hot vector of length `dim` with a `1.0` at position `i`.
pub fn one_hot(i: usize, dim: usize) -> Result<Array1<f32>> {
    if i >= dim {
        return Err(Error::invalid(
            "i",
            format!("index {} is out of range for dimension {}", i, dim),
        ));
    }
    let mut vector = Array1::zeros(dim);
    vector[i] = 1.0;
    Ok(vector)
}
