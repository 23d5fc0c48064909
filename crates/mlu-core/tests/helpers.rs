//! Cross-module checks for the sequence helpers.

use mlu_core::{Sequence, clip_max, find_value_ids, pad_array_right};
use ndarray::Array1;
use proptest::prelude::*;

proptest! {
    #[test]
    fn find_value_ids_agrees_for_vec_and_array(
        data in prop::collection::vec(0u8..4, 0..64),
        needle in 0u8..4,
    ) {
        let arr = Array1::from(data.clone());
        let ids = find_value_ids(&data, &needle);
        prop_assert_eq!(&ids, &find_value_ids(&arr, &needle));
        for &i in &ids {
            prop_assert_eq!(data[i], needle);
        }
        prop_assert_eq!(ids.len(), data.iter().filter(|&&x| x == needle).count());
    }

    #[test]
    fn clip_max_caps_every_element(
        data in prop::collection::vec(-100i32..100, 0..32),
        max_el in -50i32..50,
    ) {
        let clipped = clip_max(&data, max_el);
        prop_assert_eq!(clipped.len(), data.len());
        for (orig, c) in data.iter().zip(&clipped) {
            prop_assert_eq!(*c, (*orig).min(max_el));
        }
    }

    #[test]
    fn pad_array_right_keeps_prefix(
        data in prop::collection::vec(any::<i16>(), 0..16),
        extra in 0usize..8,
    ) {
        let required = data.len() + extra;
        let padded = pad_array_right(&data, required, -7).unwrap();
        prop_assert_eq!(Sequence::len(&padded), required);
        prop_assert_eq!(&padded.to_vec()[..data.len()], &data[..]);
        prop_assert!(padded.iter().skip(data.len()).all(|&v| v == -7));
    }
}
