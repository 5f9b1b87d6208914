use crate::sequence::Sequence;
use ahash::AHashSet as HashSet;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::rc::Rc;

/// Sequence returned by [`Sequence::distinct`].
pub struct Distinct<S> {
    source: S,
}

impl<S> Distinct<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S> Sequence for Distinct<S>
where
    S: Sequence,
    S::Item: Clone + Hash + Eq,
{
    type Item = S::Item;
    type Iter = DistinctIter<S::Iter>;

    fn iterate(&self) -> Self::Iter {
        DistinctIter {
            upstream: self.source.iterate(),
            seen: HashSet::new(),
        }
    }
}

/// Iterator for [`Distinct`].
pub struct DistinctIter<I: Iterator> {
    upstream: I,
    seen: HashSet<I::Item>,
}

impl<I> Iterator for DistinctIter<I>
where
    I: Iterator,
    I::Item: Clone + Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for item in self.upstream.by_ref() {
            if !self.seen.contains(&item) {
                self.seen.insert(item.clone());
                return Some(item);
            }
        }
        None
    }
}

impl<I> FusedIterator for DistinctIter<I>
where
    I: FusedIterator,
    I::Item: Clone + Hash + Eq,
{
}

/// Sequence returned by [`Sequence::distinct_by`].
pub struct DistinctBy<S, F, K> {
    source: S,
    selector: Rc<F>,
    _key: PhantomData<fn() -> K>,
}

impl<S, F, K> DistinctBy<S, F, K> {
    pub(crate) fn new(source: S, selector: F) -> Self {
        Self {
            source,
            selector: Rc::new(selector),
            _key: PhantomData,
        }
    }
}

impl<S, F, K> Sequence for DistinctBy<S, F, K>
where
    S: Sequence,
    F: Fn(&S::Item) -> K,
    K: Hash + Eq,
{
    type Item = S::Item;
    type Iter = DistinctByIter<S::Iter, F, K>;

    fn iterate(&self) -> Self::Iter {
        DistinctByIter {
            upstream: self.source.iterate(),
            selector: Rc::clone(&self.selector),
            seen: HashSet::new(),
        }
    }
}

/// Iterator for [`DistinctBy`].
pub struct DistinctByIter<I, F, K> {
    upstream: I,
    selector: Rc<F>,
    seen: HashSet<K>,
}

impl<I, F, K> Iterator for DistinctByIter<I, F, K>
where
    I: Iterator,
    F: Fn(&I::Item) -> K,
    K: Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for item in self.upstream.by_ref() {
            if self.seen.insert((self.selector)(&item)) {
                return Some(item);
            }
        }
        None
    }
}

impl<I, F, K> FusedIterator for DistinctByIter<I, F, K>
where
    I: FusedIterator,
    F: Fn(&I::Item) -> K,
    K: Hash + Eq,
{
}

/// Sequence returned by [`Sequence::dedup`].
pub struct Dedup<S> {
    source: S,
}

impl<S> Dedup<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S> Sequence for Dedup<S>
where
    S: Sequence,
    S::Item: Clone + PartialEq,
{
    type Item = S::Item;
    type Iter = DedupIter<S::Iter>;

    fn iterate(&self) -> Self::Iter {
        DedupIter {
            upstream: self.source.iterate(),
            previous: None,
        }
    }
}

/// Iterator for [`Dedup`].
pub struct DedupIter<I: Iterator> {
    upstream: I,
    previous: Option<I::Item>,
}

impl<I> Iterator for DedupIter<I>
where
    I: Iterator,
    I::Item: Clone + PartialEq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for item in self.upstream.by_ref() {
            if self.previous.as_ref() != Some(&item) {
                self.previous = Some(item.clone());
                return Some(item);
            }
        }
        None
    }
}

impl<I> FusedIterator for DedupIter<I>
where
    I: FusedIterator,
    I::Item: Clone + PartialEq,
{
}
