use crate::sequence::Sequence;
use ahash::AHashMap as HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::trace;

/// A key together with every value projected from elements sharing it.
///
/// Values keep the order their elements arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group<K, V> {
    pub key: K,
    pub values: Vec<V>,
}

impl<K, V> Group<K, V> {
    pub fn new(key: K, values: Vec<V>) -> Self {
        Self { key, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sequence returned by [`Sequence::group_by`].
///
/// The order groups are yielded in is unspecified.
pub struct GroupBy<S, KF, VF, K> {
    source: S,
    key_selector: Rc<KF>,
    value_selector: Rc<VF>,
    _key: PhantomData<fn() -> K>,
}

impl<S, KF, VF, K> GroupBy<S, KF, VF, K> {
    pub(crate) fn new(source: S, key_selector: KF, value_selector: VF) -> Self {
        Self {
            source,
            key_selector: Rc::new(key_selector),
            value_selector: Rc::new(value_selector),
            _key: PhantomData,
        }
    }
}

impl<S, KF, VF, K, V> Sequence for GroupBy<S, KF, VF, K>
where
    S: Sequence,
    KF: Fn(&S::Item) -> K,
    VF: Fn(S::Item) -> V,
    K: Hash + Eq,
{
    type Item = Group<K, V>;
    type Iter = GroupByIter<S::Iter, KF, VF, K, V>;

    fn iterate(&self) -> Self::Iter {
        GroupByIter {
            upstream: Some(self.source.iterate()),
            key_selector: Rc::clone(&self.key_selector),
            value_selector: Rc::clone(&self.value_selector),
            groups: Vec::new().into_iter(),
        }
    }
}

/// Iterator for [`GroupBy`].
pub struct GroupByIter<I, KF, VF, K, V> {
    upstream: Option<I>,
    key_selector: Rc<KF>,
    value_selector: Rc<VF>,
    groups: std::vec::IntoIter<Group<K, V>>,
}

impl<I, KF, VF, K, V> Iterator for GroupByIter<I, KF, VF, K, V>
where
    I: Iterator,
    KF: Fn(&I::Item) -> K,
    VF: Fn(I::Item) -> V,
    K: Hash + Eq,
{
    type Item = Group<K, V>;

    fn next(&mut self) -> Option<Group<K, V>> {
        if let Some(upstream) = self.upstream.take() {
            let mut lookup: HashMap<K, Vec<V>> = HashMap::new();
            for item in upstream {
                let key = (self.key_selector)(&item);
                lookup
                    .entry(key)
                    .or_default()
                    .push((self.value_selector)(item));
            }
            trace!(groups = lookup.len(), "grouped sequence");
            self.groups = lookup
                .into_iter()
                .map(|(key, values)| Group { key, values })
                .collect::<Vec<_>>()
                .into_iter();
        }
        self.groups.next()
    }
}

impl<I, KF, VF, K, V> FusedIterator for GroupByIter<I, KF, VF, K, V>
where
    I: Iterator,
    KF: Fn(&I::Item) -> K,
    VF: Fn(I::Item) -> V,
    K: Hash + Eq,
{
}

#[cfg(test)]
mod tests {
    use super::Group;
    use crate::compare::natural;
    use crate::source::{empty, from_string, range};
    use crate::{Sequence, Terminal};

    fn sorted<K: Ord + Clone, V>(groups: Vec<Group<K, V>>) -> Vec<Group<K, V>> {
        let mut groups = groups;
        groups.sort_by(|a, b| natural(&a.key, &b.key));
        groups
    }

    #[test]
    fn test_group_by() {
        let groups = range(1, 9).group_by(|x| x % 2, |x| x).to_vec();
        assert_eq!(
            sorted(groups),
            vec![
                Group::new(0, vec![2, 4, 6, 8]),
                Group::new(1, vec![1, 3, 5, 7, 9]),
            ]
        );
    }

    #[test]
    fn test_group_by_projects_values() {
        let groups = from_string("aAbBa")
            .group_by(|c| c.to_ascii_lowercase(), |c| c.is_uppercase())
            .to_vec();
        assert_eq!(
            sorted(groups),
            vec![
                Group::new('a', vec![false, true, false]),
                Group::new('b', vec![false, true]),
            ]
        );
    }

    #[test]
    fn test_group_by_empty() {
        assert!(empty::<i32>().group_by(|x| *x, |x| x).to_vec().is_empty());
    }

    #[test]
    fn test_group_by_is_lazy() {
        let pulls = std::cell::Cell::new(0);
        let seq = range(0, 4)
            .select(|x| {
                pulls.set(pulls.get() + 1);
                x
            })
            .group_by(|x| *x, |x| x);
        let mut iter = seq.iterate();
        assert_eq!(pulls.get(), 0);
        assert!(iter.next().is_some());
        assert_eq!(pulls.get(), 4);
    }

    #[test]
    fn test_group_counts() {
        let counts = range(0, 10)
            .group_by(|x| x % 3, |x| x)
            .select(|g| (g.key, g.len()))
            .order_by(|(key, _)| *key, natural)
            .to_vec();
        assert_eq!(counts, vec![(0, 4), (1, 3), (2, 3)]);
    }
}
