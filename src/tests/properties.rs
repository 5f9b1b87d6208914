use crate::compare::natural;
use crate::source::{from_vec, range};
use crate::{KeyValue, Sequence, Terminal};
use proptest::prelude::*;
use std::collections::HashSet;

/// Distinct elements of `input` in first-occurrence order.
fn first_occurrences(input: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::new();
    input.iter().copied().filter(|x| seen.insert(*x)).collect()
}

proptest! {
    /// Count agrees with the materialized length.
    #[test]
    fn prop_count_matches_to_vec(input: Vec<i32>) {
        let seq = from_vec(input.clone());
        prop_assert_eq!(seq.count(), seq.to_vec().len());
        prop_assert_eq!(seq.to_vec(), input);
    }

    /// Take never yields more than requested.
    #[test]
    fn prop_take_bounded(input: Vec<u8>, n in 0usize..64) {
        let seq = from_vec(input).take(n);
        prop_assert!(seq.count() <= n);
    }

    /// Skip then take matches slicing the materialized input.
    #[test]
    fn prop_skip_take_is_slice(input: Vec<u8>, n in 0usize..64, m in 0usize..64) {
        let seq = from_vec(input.clone()).skip(n).take(m);
        let start = n.min(input.len());
        let end = (start + m).min(input.len());
        prop_assert_eq!(seq.to_vec(), input[start..end].to_vec());
    }

    /// Reversing twice restores the original order.
    #[test]
    fn prop_reverse_involution(input: Vec<i32>) {
        let seq = from_vec(input.clone()).reverse().reverse();
        prop_assert_eq!(seq.to_vec(), input);
    }

    /// Distinct is idempotent and keeps first occurrences.
    #[test]
    fn prop_distinct_idempotent(input in prop::collection::vec(0i32..16, 0..64)) {
        let once = from_vec(input.clone()).distinct();
        let twice = from_vec(input.clone()).distinct().distinct();
        prop_assert_eq!(once.to_vec(), twice.to_vec());
        prop_assert_eq!(once.to_vec(), first_occurrences(&input));
    }

    /// Union equals distinct over the concatenation.
    #[test]
    fn prop_union_is_distinct_concat(
        a in prop::collection::vec(0i32..16, 0..32),
        b in prop::collection::vec(0i32..16, 0..32),
    ) {
        let union = from_vec(a.clone()).union(from_vec(b.clone()));
        let expected = from_vec(a).concat(from_vec(b)).distinct();
        prop_assert_eq!(union.to_vec(), expected.to_vec());
    }

    /// Every intersect result is in both inputs and appears once.
    #[test]
    fn prop_intersect_subset(
        a in prop::collection::vec(0i32..16, 0..32),
        b in prop::collection::vec(0i32..16, 0..32),
    ) {
        let result = from_vec(a.clone()).intersect(from_vec(b.clone())).to_vec();
        let unique: HashSet<_> = result.iter().copied().collect();
        prop_assert_eq!(unique.len(), result.len());
        for x in &result {
            prop_assert!(a.contains(x) && b.contains(x));
        }
    }

    /// OrderBy/ThenBy is stable and reapplying it is a no-op.
    #[test]
    fn prop_order_by_stable(input in prop::collection::vec((0u8..4, 0u8..4, any::<u16>()), 0..64)) {
        let sorted = from_vec(input.clone())
            .order_by(|t| t.0, natural)
            .then_by(|t| t.1, natural)
            .to_vec();

        let mut expected = input;
        expected.sort_by_key(|t| (t.0, t.1));
        prop_assert_eq!(&sorted, &expected);

        let again = from_vec(sorted.clone())
            .order_by(|t| t.0, natural)
            .then_by(|t| t.1, natural)
            .to_vec();
        prop_assert_eq!(again, sorted);
    }

    /// Sort agrees with the std stable sort.
    #[test]
    fn prop_sort_matches_std(input: Vec<i16>) {
        let mut expected = input.clone();
        expected.sort();
        prop_assert_eq!(from_vec(input).sort(|a, b| a < b).to_vec(), expected);
    }

    /// Groups partition the input, and each group keeps input order.
    #[test]
    fn prop_group_by_partitions(input in prop::collection::vec(0i32..100, 0..64)) {
        let groups = from_vec(input.clone()).group_by(|x| x % 3, |x| x).to_vec();
        let total: usize = groups.iter().map(|g| g.values.len()).sum();
        prop_assert_eq!(total, input.len());
        for group in groups {
            let expected: Vec<i32> = input.iter().copied().filter(|x| x % 3 == group.key).collect();
            prop_assert_eq!(group.values, expected);
        }
    }

    /// Join yields exactly the matching pairs, outer-major.
    #[test]
    fn prop_join_matches_nested_loop(
        outer in prop::collection::vec(0u8..8, 0..16),
        inner in prop::collection::vec(0u8..8, 0..16),
    ) {
        let joined = from_vec(outer.clone())
            .join(from_vec(inner.clone()), |x| *x, |y| *y, |x, y| (*x, *y))
            .to_vec();
        let mut expected = Vec::new();
        for x in &outer {
            for y in &inner {
                if x == y {
                    expected.push((*x, *y));
                }
            }
        }
        prop_assert_eq!(joined, expected);
    }

    /// ToMap keeps the last value of a repeated key.
    #[test]
    fn prop_to_map_last_wins(pairs in prop::collection::vec((0u8..8, any::<i32>()), 0..32)) {
        let map = from_vec(pairs.clone())
            .select(|(k, v)| KeyValue::new(k, v))
            .to_map();
        for (k, v) in map {
            let last = pairs.iter().rev().find(|p| p.0 == k).map(|p| p.1);
            prop_assert_eq!(Some(v), last);
        }
    }

    /// SequenceEqual is reflexive and sensitive to length.
    #[test]
    fn prop_sequence_equal(input: Vec<i32>, extra: i32) {
        let seq = from_vec(input.clone());
        prop_assert!(seq.sequence_equal(&seq));
        prop_assert!(!seq.sequence_equal(from_vec(input).append([extra])));
    }

    /// Range yields `count` consecutive values.
    #[test]
    fn prop_range(start in -1000i64..1000, count in 0usize..100) {
        let values = range(start, count).to_vec();
        prop_assert_eq!(values.len(), count);
        prop_assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
    }
}

/// Bolero fuzz test: a mixed pipeline never panics and stays re-iterable
#[cfg(test)]
#[test]
fn fuzz_pipeline_no_panic() {
    bolero::check!().with_type::<Vec<u8>>().for_each(|input| {
        let seq = from_vec(input.clone())
            .filter(|x| x % 2 == 0)
            .distinct()
            .order_by_descending(|x| *x, natural)
            .skip(1);

        let first = seq.to_vec();
        let second = seq.to_vec();
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0] > w[1]));
        assert!(first.len() <= input.len());
    });
}

/// Bolero fuzz test: aggregate and min/max agree with std
#[cfg(test)]
#[test]
fn fuzz_folds_agree() {
    bolero::check!()
        .with_type::<Vec<u8>>()
        .for_each(|input| {
            let seq = from_vec(input.clone());
            assert_eq!(seq.max(natural), input.iter().copied().max());
            assert_eq!(seq.min(natural), input.iter().copied().min());
            assert_eq!(
                seq.aggregate_with_seed(0u64, |acc, x| acc + x as u64),
                input.iter().map(|x| *x as u64).sum::<u64>()
            );
        });
}
