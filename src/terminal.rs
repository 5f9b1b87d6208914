//! Consumers that drive a sequence and return a plain value.

use crate::group_by::Group;
use crate::sequence::Sequence;
use crate::source::KeyValue;
use ahash::AHashMap as HashMap;
use crossbeam_channel::Sender;
use std::cmp::Ordering;
use std::hash::Hash;
use thiserror::Error;
use tracing::debug;

/// Why [`Terminal::try_single`] found no unique element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SingleError {
    #[error("sequence contains no matching element")]
    Empty,
    #[error("sequence contains more than one matching element")]
    Multiple,
}

/// Numeric element types that can be averaged.
pub trait Numeric {
    fn to_f64(&self) -> f64;
}

macro_rules! impl_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Terminal operations, available on every [`Sequence`].
///
/// Each call starts a fresh iteration, so terminals can be applied to the same
/// sequence any number of times.
pub trait Terminal: Sequence {
    /// True if every element satisfies `predicate`. Vacuously true when empty.
    fn all<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.iterate().all(|item| predicate(&item))
    }

    /// True if the sequence yields at least one element.
    fn any(&self) -> bool {
        self.iterate().next().is_some()
    }

    /// True if some element satisfies `predicate`. Stops at the first match.
    fn any_with<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.iterate().any(|item| predicate(&item))
    }

    fn count(&self) -> usize {
        self.iterate().count()
    }

    fn count_with<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.iterate().filter(|item| predicate(item)).count()
    }

    fn contains(&self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.iterate().any(|item| item == *value)
    }

    /// Zero-based position of the first element satisfying `predicate`.
    fn index_of<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.iterate().position(|item| predicate(&item))
    }

    fn first(&self) -> Option<Self::Item> {
        self.iterate().next()
    }

    fn first_with<F>(&self, predicate: F) -> Option<Self::Item>
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.iterate().find(|item| predicate(item))
    }

    /// Last element. Walks the whole sequence.
    fn last(&self) -> Option<Self::Item> {
        self.iterate().last()
    }

    fn last_with<F>(&self, predicate: F) -> Option<Self::Item>
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.iterate().filter(|item| predicate(item)).last()
    }

    /// The only element, or `None` if there are zero or several.
    ///
    /// Use [`try_single`](Terminal::try_single) to tell the two failure cases
    /// apart.
    fn single(&self) -> Option<Self::Item> {
        self.try_single().ok()
    }

    /// The only element satisfying `predicate`, or `None` if there are zero or
    /// several.
    fn single_with<F>(&self, predicate: F) -> Option<Self::Item>
    where
        F: Fn(&Self::Item) -> bool,
    {
        self.try_single_with(predicate).ok()
    }

    fn try_single(&self) -> Result<Self::Item, SingleError> {
        let mut iter = self.iterate();
        let item = iter.next().ok_or(SingleError::Empty)?;
        match iter.next() {
            Some(_) => Err(SingleError::Multiple),
            None => Ok(item),
        }
    }

    fn try_single_with<F>(&self, predicate: F) -> Result<Self::Item, SingleError>
    where
        F: Fn(&Self::Item) -> bool,
    {
        let mut matches = self.iterate().filter(|item| predicate(item));
        let item = matches.next().ok_or(SingleError::Empty)?;
        match matches.next() {
            Some(_) => Err(SingleError::Multiple),
            None => Ok(item),
        }
    }

    /// Smallest element under `compare`. Among equal elements the first wins.
    fn min<C>(&self, compare: C) -> Option<Self::Item>
    where
        C: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        self.iterate().reduce(|best, item| {
            if compare(&item, &best) == Ordering::Less {
                item
            } else {
                best
            }
        })
    }

    /// Largest element under `compare`. Among equal elements the first wins.
    fn max<C>(&self, compare: C) -> Option<Self::Item>
    where
        C: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        self.iterate().reduce(|best, item| {
            if compare(&item, &best) == Ordering::Greater {
                item
            } else {
                best
            }
        })
    }

    /// Sum of all elements; the additive identity when empty.
    fn sum(&self) -> Self::Item
    where
        Self::Item: std::iter::Sum,
    {
        self.iterate().sum()
    }

    /// Arithmetic mean, accumulated in `f64`. `NaN` when empty.
    fn average(&self) -> f64
    where
        Self::Item: Numeric,
    {
        let (total, count) = self
            .iterate()
            .fold((0.0, 0usize), |(total, count), item| {
                (total + item.to_f64(), count + 1)
            });
        if count == 0 {
            f64::NAN
        } else {
            total / count as f64
        }
    }

    /// True if both sequences yield equal elements and end together.
    fn sequence_equal<S>(&self, other: S) -> bool
    where
        S: Sequence<Item = Self::Item>,
        Self::Item: PartialEq,
    {
        self.iterate().eq(other.iterate())
    }

    fn for_each<F>(&self, action: F)
    where
        F: FnMut(Self::Item),
    {
        self.iterate().for_each(action)
    }

    fn for_each_indexed<F>(&self, mut action: F)
    where
        F: FnMut(usize, Self::Item),
    {
        for (index, item) in self.iterate().enumerate() {
            action(index, item);
        }
    }

    /// Collects the elements in iteration order.
    fn to_vec(&self) -> Vec<Self::Item> {
        self.iterate().collect()
    }

    /// Collects `KeyValue` elements into a map. Later keys overwrite earlier
    /// ones.
    fn to_map<K, V>(&self) -> HashMap<K, V>
    where
        Self: Sequence<Item = KeyValue<K, V>>,
        K: Hash + Eq,
    {
        self.iterate().map(|kv| (kv.key, kv.value)).collect()
    }

    /// Collects into a map using derived keys and values. Later keys
    /// overwrite earlier ones.
    fn to_map_by<K, V, KF, VF>(&self, key: KF, value: VF) -> HashMap<K, V>
    where
        KF: Fn(&Self::Item) -> K,
        VF: Fn(Self::Item) -> V,
        K: Hash + Eq,
    {
        self.iterate()
            .map(|item| (key(&item), value(item)))
            .collect()
    }

    /// Collects groups into a map, appending the values of repeated keys.
    fn to_map_from_groups<K, V>(&self) -> HashMap<K, Vec<V>>
    where
        Self: Sequence<Item = Group<K, V>>,
        K: Hash + Eq,
    {
        let mut map: HashMap<K, Vec<V>> = HashMap::new();
        for group in self.iterate() {
            map.entry(group.key).or_default().extend(group.values);
        }
        map
    }

    /// Sends every element to `sender`, then drops it to close the channel.
    ///
    /// Stops early if every receiver has gone away.
    fn to_channel(&self, sender: Sender<Self::Item>) {
        let mut sent = 0usize;
        for item in self.iterate() {
            if sender.send(item).is_err() {
                debug!(sent, "channel receiver disconnected");
                return;
            }
            sent += 1;
        }
    }

    /// Folds with the first element as the initial accumulator.
    /// `Default::default()` when empty.
    fn aggregate<F>(&self, f: F) -> Self::Item
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
        Self::Item: Default,
    {
        self.iterate().reduce(f).unwrap_or_default()
    }

    fn aggregate_with_seed<A, F>(&self, seed: A, f: F) -> A
    where
        F: FnMut(A, Self::Item) -> A,
    {
        self.iterate().fold(seed, f)
    }

    /// Seeded fold followed by a projection of the final accumulator.
    fn aggregate_with_seed_by<A, F, R, O>(&self, seed: A, f: F, result: R) -> O
    where
        F: FnMut(A, Self::Item) -> A,
        R: FnOnce(A) -> O,
    {
        result(self.iterate().fold(seed, f))
    }

    fn collect_string(&self) -> String
    where
        Self: Sequence<Item = char>,
    {
        self.iterate().collect()
    }
}

impl<S: Sequence + ?Sized> Terminal for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{natural, partial};
    use crate::source::{empty, from_map, from_string, from_vec, range};

    #[test]
    fn test_all_any() {
        let seq = from_vec(vec![2, 4, 6]);
        assert!(seq.all(|x| x % 2 == 0));
        assert!(!seq.all(|x| *x > 2));
        assert!(empty::<i32>().all(|_| false));

        assert!(seq.any());
        assert!(!empty::<i32>().any());
        assert!(seq.any_with(|x| *x == 4));
        assert!(!seq.any_with(|x| *x == 5));
    }

    #[test]
    fn test_any_with_short_circuits() {
        let pulls = std::cell::Cell::new(0);
        let seq = range(0, 100).select(|x| {
            pulls.set(pulls.get() + 1);
            x
        });
        assert!(seq.any_with(|x| *x == 2));
        assert_eq!(pulls.get(), 3);
    }

    #[test]
    fn test_count_contains() {
        let seq = from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(seq.count(), 5);
        assert_eq!(seq.count_with(|x| x % 2 == 1), 3);
        assert_eq!(empty::<i32>().count(), 0);
        assert!(seq.contains(&3));
        assert!(!seq.contains(&9));
    }

    #[test]
    fn test_index_of() {
        let seq = from_string("hello");
        assert_eq!(seq.index_of(|c| *c == 'l'), Some(2));
        assert_eq!(seq.index_of(|c| *c == 'z'), None);
    }

    #[test]
    fn test_first_last() {
        let seq = from_vec(vec![1, 2, 3, 4]);
        assert_eq!(seq.first(), Some(1));
        assert_eq!(seq.first_with(|x| *x > 2), Some(3));
        assert_eq!(seq.first_with(|x| *x > 9), None);
        assert_eq!(seq.last(), Some(4));
        assert_eq!(seq.last_with(|x| x % 2 == 1), Some(3));
        assert_eq!(empty::<i32>().first(), None);
        assert_eq!(empty::<i32>().last(), None);
    }

    #[test]
    fn test_single() {
        assert_eq!(from_vec(vec![7]).single(), Some(7));
        assert_eq!(from_vec(vec![7, 8]).single(), None);
        assert_eq!(empty::<i32>().single(), None);

        let seq = from_vec(vec![1, 2, 3, 4]);
        assert_eq!(seq.single_with(|x| *x > 3), Some(4));
        assert_eq!(seq.single_with(|x| *x > 2), None);
        assert_eq!(seq.single_with(|x| *x > 9), None);
    }

    #[test]
    fn test_try_single_distinguishes_failures() {
        let seq = from_vec(vec![1, 2, 3, 4]);
        assert_eq!(seq.try_single_with(|x| *x == 2), Ok(2));
        assert_eq!(seq.try_single_with(|x| *x > 9), Err(SingleError::Empty));
        assert_eq!(seq.try_single_with(|x| *x > 1), Err(SingleError::Multiple));
        assert_eq!(seq.try_single(), Err(SingleError::Multiple));
        assert_eq!(empty::<i32>().try_single(), Err(SingleError::Empty));
        assert_eq!(
            SingleError::Multiple.to_string(),
            "sequence contains more than one matching element"
        );
    }

    #[test]
    fn test_min_max() {
        let seq = from_vec(vec![3, 1, 4, 1, 5, 9, 2]);
        assert_eq!(seq.min(natural), Some(1));
        assert_eq!(seq.max(natural), Some(9));
        assert_eq!(empty::<i32>().min(natural), None);
        assert_eq!(empty::<i32>().max(natural), None);

        let floats = from_vec(vec![2.5, -1.0, 7.25]);
        assert_eq!(floats.max(partial), Some(7.25));
    }

    #[test]
    fn test_min_max_keep_first_of_equals() {
        let seq = from_vec(vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')]);
        assert_eq!(seq.min(|a, b| a.0.cmp(&b.0)), Some((0, 'b')));
        assert_eq!(seq.max(|a, b| a.0.cmp(&b.0)), Some((1, 'a')));
    }

    #[test]
    fn test_sum_average() {
        assert_eq!(range(1, 4).sum(), 10);
        assert_eq!(empty::<i32>().sum(), 0);
        assert_eq!(from_vec(vec![1.5, 2.5]).sum(), 4.0);

        assert_eq!(from_vec(vec![1u8, 2, 4, 5]).average(), 3.0);
        assert!(empty::<f64>().average().is_nan());
    }

    #[test]
    fn test_sequence_equal() {
        let seq = from_vec(vec![1, 2, 3]);
        assert!(seq.sequence_equal(&seq));
        assert!(seq.sequence_equal(range(1, 3).select(|x| x as i32)));
        assert!(!seq.sequence_equal(from_vec(vec![1, 2])));
        assert!(!seq.sequence_equal(from_vec(vec![1, 2, 3, 4])));
        assert!(empty::<i32>().sequence_equal(empty()));
    }

    #[test]
    fn test_for_each() {
        let mut seen = Vec::new();
        from_vec(vec!['a', 'b']).for_each(|c| seen.push(c));
        assert_eq!(seen, vec!['a', 'b']);

        let mut seen = Vec::new();
        from_vec(vec!['a', 'b']).for_each_indexed(|i, c| seen.push((i, c)));
        assert_eq!(seen, vec![(0, 'a'), (1, 'b')]);
    }

    #[test]
    fn test_to_map_last_wins() {
        let seq = from_vec(vec![KeyValue::new(1, true), KeyValue::new(1, false)]);
        let map = seq.to_map();
        assert_eq!(map.len(), 1);
        assert!(!map[&1]);
    }

    #[test]
    fn test_to_map_round_trips_from_map() {
        let mut source = HashMap::new();
        source.insert("a", 1);
        source.insert("b", 2);
        let map = from_map(source.clone()).to_map();
        assert_eq!(map, source);
    }

    #[test]
    fn test_to_map_by() {
        let map = from_string("abca").to_map_by(|c| *c, |c| c.is_alphabetic());
        assert_eq!(map.len(), 3);
        let map = range(0, 5).to_map_by(|x| x % 2, |x| x);
        assert_eq!(map[&0], 4);
        assert_eq!(map[&1], 3);
    }

    #[test]
    fn test_to_map_from_groups_appends() {
        let seq = from_vec(vec![
            Group::new("a", vec![1, 2]),
            Group::new("b", vec![3]),
            Group::new("a", vec![4]),
        ]);
        let map = seq.to_map_from_groups();
        assert_eq!(map["a"], vec![1, 2, 4]);
        assert_eq!(map["b"], vec![3]);
    }

    #[test]
    fn test_to_channel_sends_then_closes() {
        let (tx, rx) = crossbeam_channel::unbounded();
        range(0, 3).to_channel(tx);
        let received: Vec<i64> = rx.iter().collect();
        assert_eq!(received, vec![0, 1, 2]);
    }

    #[test]
    fn test_to_channel_stops_when_receiver_gone() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        drop(rx);
        let pulls = std::cell::Cell::new(0);
        range(0, 10)
            .select(|x| {
                pulls.set(pulls.get() + 1);
                x
            })
            .to_channel(tx);
        assert_eq!(pulls.get(), 1);
    }

    #[test]
    fn test_aggregate() {
        let fruits = from_vec(vec!["apple", "mango", "orange", "passionfruit", "grape"]);
        let longest = fruits.aggregate(|best, next| if next.len() > best.len() { next } else { best });
        assert_eq!(longest, "passionfruit");

        assert_eq!(empty::<&str>().aggregate(|a, _| a), "");
        assert_eq!(range(1, 4).aggregate(|a, b| a * b), 24);
    }

    #[test]
    fn test_aggregate_with_seed() {
        let total = from_string("abc").aggregate_with_seed(0usize, |n, _| n + 1);
        assert_eq!(total, 3);

        let longest = from_vec(vec!["apple", "mango", "passionfruit"]).aggregate_with_seed_by(
            "banana",
            |best, next| if next.len() > best.len() { next } else { best },
            |best| best.to_uppercase(),
        );
        assert_eq!(longest, "PASSIONFRUIT");

        assert_eq!(empty::<i32>().aggregate_with_seed(5, |a, b| a + b), 5);
    }

    #[test]
    fn test_collect_string() {
        assert_eq!(from_string("héllo").skip(1).collect_string(), "éllo");
    }
}
