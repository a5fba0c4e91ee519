//! Normalizer behaviour across sizes, blank densities and input forms

mod common;

use common::{edge_case_lengths, with_blanks_i32, with_nans_f64};
use proptest::prelude::*;
use unistat_core::{
    is_sorted, no_blank_monotonic, no_blank_sorted, AnyBuffer, DataBuffer, ElementType,
    SortStatus, TileView,
};

#[test]
fn test_normalized_output_is_blank_free_and_increasing() {
    for n in edge_case_lengths() {
        let data = with_blanks_i32(n, 0.25, n as u64);
        let expected = data.iter().filter(|v| **v != i32::MIN).count();

        let buf = DataBuffer::new(data);
        let norm = no_blank_sorted(&buf);
        assert_eq!(norm.len(), expected, "n = {n}");
        assert!(norm.as_slice().iter().all(|v| *v != i32::MIN));
        assert_eq!(is_sorted(norm.as_slice()), SortStatus::Increasing);
    }
}

#[test]
fn test_in_place_and_copy_agree() {
    let data = with_nans_f64(200, 0.1, 7);
    let copy = no_blank_sorted(&DataBuffer::new(data.clone())).into_owned();

    let mut caller = DataBuffer::new(data);
    no_blank_sorted(&mut caller);
    assert_eq!(caller.as_slice(), copy.as_slice());
    assert_eq!(caller.sort_status(), SortStatus::Increasing);
}

#[test]
fn test_monotonic_keeps_decreasing_direction() {
    let mut data: Vec<f64> = (0..50).rev().map(f64::from).collect();
    data[10] = f64::NAN;
    let buf = DataBuffer::new(data);
    let mono = no_blank_monotonic(&buf);
    assert_eq!(mono.len(), 49);
    assert_eq!(mono.sort_status(), SortStatus::Decreasing);
    assert_eq!(mono.as_slice()[0], 49.0);
}

#[test]
fn test_raw_bytes_feed_the_normalizer() {
    let values = [3.5f32, f32::NAN, -1.0, 2.0];
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let any = AnyBuffer::from_bytes(ElementType::F32, &bytes, true).unwrap();
    let buf = any.downcast_ref::<f32>().unwrap();
    assert_eq!(no_blank_sorted(buf).as_slice(), &[-1.0, 2.0, 3.5]);
}

#[test]
fn test_tile_columns_are_gathered() {
    // 3 rows of 4, take the middle two columns
    let block: Vec<u16> = vec![
        9, 4, 8, 0, //
        9, u16::MAX, 1, 0, //
        9, 7, 2, 0,
    ];
    let tile = TileView::new(&block, 1, 2, 3, 4).unwrap();
    assert_eq!(no_blank_sorted(tile).as_slice(), &[1, 2, 4, 7, 8]);
}

proptest! {
    #[test]
    fn prop_normalized_is_sorted_permutation(
        mut data in proptest::collection::vec(-1e6f64..1e6, 0..200),
    ) {
        let buf = DataBuffer::new(data.clone());
        let norm = no_blank_sorted(&buf);
        data.sort_by(|a, b| a.partial_cmp(b).unwrap());
        prop_assert_eq!(norm.as_slice(), data.as_slice());
    }

    #[test]
    fn prop_blank_count_is_removed(data in proptest::collection::vec(any::<u8>(), 0..200)) {
        let blanks = data.iter().filter(|v| **v == u8::MAX).count();
        let mut buf = DataBuffer::new(data.clone());
        let removed = buf.remove_blanks();
        prop_assert_eq!(removed, blanks);
        prop_assert_eq!(buf.len(), data.len() - blanks);
    }
}
