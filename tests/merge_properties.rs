use brick_sort::algs::exchange::{merge_sorted, split_front, split_back};
use brick_sort::algs::local_sort::is_ascending;
use proptest::prelude::*;

fn sorted_vec(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(any::<i64>(), 0..max_len).prop_map(|mut v| {
        v.sort_unstable();
        v
    })
}

proptest! {
    #[test]
    fn merge_is_sorted_and_complete(a in sorted_vec(64), b in sorted_vec(64)) {
        let merged = merge_sorted(&a, &b);
        prop_assert_eq!(merged.len(), a.len() + b.len());
        prop_assert!(is_ascending(&merged));

        let mut expected = [a.as_slice(), b.as_slice()].concat();
        expected.sort_unstable();
        prop_assert_eq!(merged, expected);
    }

    #[test]
    fn split_parts_reconstruct_without_overlap(a in sorted_vec(64), b in sorted_vec(64)) {
        let merged = merge_sorted(&a, &b);
        let front = split_front(&merged, a.len());
        let back = split_back(&merged, b.len());

        let mut rebuilt = front.clone();
        rebuilt.extend_from_slice(&back);
        prop_assert_eq!(&rebuilt, &merged);

        if let (Some(&front_max), Some(&back_min)) = (front.last(), back.first()) {
            prop_assert!(front_max <= back_min);
        }
    }
}
