//! Set-like operators over two sequences.
//!
//! `except` and `intersect` read the whole second sequence into a hash set on
//! the first pull and then stream the first sequence against it. `union`
//! streams both, remembering what it has already yielded.

use crate::sequence::Sequence;
use ahash::AHashSet as HashSet;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::trace;

/// Sequence returned by [`Sequence::except`].
pub struct Except<A, B> {
    first: A,
    second: B,
}

impl<A, B> Except<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Sequence for Except<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: Hash + Eq,
{
    type Item = A::Item;
    type Iter = ExceptIter<A::Iter, B::Iter>;

    fn iterate(&self) -> Self::Iter {
        ExceptIter {
            first: self.first.iterate(),
            second: Some(self.second.iterate()),
            excluded: HashSet::new(),
        }
    }
}

/// Iterator for [`Except`].
pub struct ExceptIter<I: Iterator, J> {
    first: I,
    /// Pending until the first pull seeds `excluded`.
    second: Option<J>,
    excluded: HashSet<I::Item>,
}

impl<I, J> Iterator for ExceptIter<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    I::Item: Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(second) = self.second.take() {
            self.excluded.extend(second);
            trace!(keys = self.excluded.len(), "seeded except set");
        }
        self.first.by_ref().find(|item| !self.excluded.contains(item))
    }
}

impl<I, J> FusedIterator for ExceptIter<I, J>
where
    I: FusedIterator,
    J: Iterator<Item = I::Item>,
    I::Item: Hash + Eq,
{
}

/// Sequence returned by [`Sequence::except_by`].
pub struct ExceptBy<A, B, F, K> {
    first: A,
    second: B,
    selector: Rc<F>,
    _key: PhantomData<fn() -> K>,
}

impl<A, B, F, K> ExceptBy<A, B, F, K> {
    pub(crate) fn new(first: A, second: B, selector: F) -> Self {
        Self {
            first,
            second,
            selector: Rc::new(selector),
            _key: PhantomData,
        }
    }
}

impl<A, B, F, K> Sequence for ExceptBy<A, B, F, K>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    F: Fn(&A::Item) -> K,
    K: Hash + Eq,
{
    type Item = A::Item;
    type Iter = ExceptByIter<A::Iter, B::Iter, F, K>;

    fn iterate(&self) -> Self::Iter {
        ExceptByIter {
            first: self.first.iterate(),
            second: Some(self.second.iterate()),
            selector: Rc::clone(&self.selector),
            excluded: HashSet::new(),
        }
    }
}

/// Iterator for [`ExceptBy`].
pub struct ExceptByIter<I, J, F, K> {
    first: I,
    second: Option<J>,
    selector: Rc<F>,
    excluded: HashSet<K>,
}

impl<I, J, F, K> Iterator for ExceptByIter<I, J, F, K>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    F: Fn(&I::Item) -> K,
    K: Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(second) = self.second.take() {
            let selector = &self.selector;
            self.excluded.extend(second.map(|item| selector(&item)));
            trace!(keys = self.excluded.len(), "seeded except_by set");
        }
        let (selector, excluded) = (&self.selector, &self.excluded);
        self.first
            .by_ref()
            .find(|item| !excluded.contains(&selector(item)))
    }
}

impl<I, J, F, K> FusedIterator for ExceptByIter<I, J, F, K>
where
    I: FusedIterator,
    J: Iterator<Item = I::Item>,
    F: Fn(&I::Item) -> K,
    K: Hash + Eq,
{
}

/// Sequence returned by [`Sequence::intersect`].
pub struct Intersect<A, B> {
    first: A,
    second: B,
}

impl<A, B> Intersect<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Sequence for Intersect<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: Hash + Eq,
{
    type Item = A::Item;
    type Iter = IntersectIter<A::Iter, B::Iter>;

    fn iterate(&self) -> Self::Iter {
        IntersectIter {
            first: self.first.iterate(),
            second: Some(self.second.iterate()),
            remaining: HashSet::new(),
        }
    }
}

/// Iterator for [`Intersect`].
pub struct IntersectIter<I: Iterator, J> {
    first: I,
    second: Option<J>,
    /// Elements of the second sequence not yet matched.
    remaining: HashSet<I::Item>,
}

impl<I, J> Iterator for IntersectIter<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    I::Item: Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(second) = self.second.take() {
            self.remaining.extend(second);
            trace!(keys = self.remaining.len(), "seeded intersect set");
        }
        self.first
            .by_ref()
            .find(|item| self.remaining.remove(item))
    }
}

impl<I, J> FusedIterator for IntersectIter<I, J>
where
    I: FusedIterator,
    J: Iterator<Item = I::Item>,
    I::Item: Hash + Eq,
{
}

/// Sequence returned by [`Sequence::intersect_by`].
pub struct IntersectBy<A, B, F, K> {
    first: A,
    second: B,
    selector: Rc<F>,
    _key: PhantomData<fn() -> K>,
}

impl<A, B, F, K> IntersectBy<A, B, F, K> {
    pub(crate) fn new(first: A, second: B, selector: F) -> Self {
        Self {
            first,
            second,
            selector: Rc::new(selector),
            _key: PhantomData,
        }
    }
}

impl<A, B, F, K> Sequence for IntersectBy<A, B, F, K>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    F: Fn(&A::Item) -> K,
    K: Hash + Eq,
{
    type Item = A::Item;
    type Iter = IntersectByIter<A::Iter, B::Iter, F, K>;

    fn iterate(&self) -> Self::Iter {
        IntersectByIter {
            first: self.first.iterate(),
            second: Some(self.second.iterate()),
            selector: Rc::clone(&self.selector),
            remaining: HashSet::new(),
        }
    }
}

/// Iterator for [`IntersectBy`].
pub struct IntersectByIter<I, J, F, K> {
    first: I,
    second: Option<J>,
    selector: Rc<F>,
    remaining: HashSet<K>,
}

impl<I, J, F, K> Iterator for IntersectByIter<I, J, F, K>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    F: Fn(&I::Item) -> K,
    K: Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(second) = self.second.take() {
            let selector = &self.selector;
            self.remaining.extend(second.map(|item| selector(&item)));
            trace!(keys = self.remaining.len(), "seeded intersect_by set");
        }
        let (selector, remaining) = (&self.selector, &mut self.remaining);
        self.first
            .by_ref()
            .find(|item| remaining.remove(&selector(item)))
    }
}

impl<I, J, F, K> FusedIterator for IntersectByIter<I, J, F, K>
where
    I: FusedIterator,
    J: Iterator<Item = I::Item>,
    F: Fn(&I::Item) -> K,
    K: Hash + Eq,
{
}

/// Sequence returned by [`Sequence::union`].
pub struct Union<A, B> {
    first: A,
    second: B,
}

impl<A, B> Union<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Sequence for Union<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: Clone + Hash + Eq,
{
    type Item = A::Item;
    type Iter = UnionIter<A::Iter, B::Iter>;

    fn iterate(&self) -> Self::Iter {
        UnionIter {
            first: Some(self.first.iterate()),
            second: self.second.iterate(),
            seen: HashSet::new(),
        }
    }
}

/// Iterator for [`Union`].
pub struct UnionIter<I: Iterator, J> {
    first: Option<I>,
    second: J,
    seen: HashSet<I::Item>,
}

impl<I, J> UnionIter<I, J>
where
    I: Iterator,
    I::Item: Clone + Hash + Eq,
{
    fn unseen(seen: &mut HashSet<I::Item>, iter: impl Iterator<Item = I::Item>) -> Option<I::Item> {
        for item in iter {
            if !seen.contains(&item) {
                seen.insert(item.clone());
                return Some(item);
            }
        }
        None
    }
}

impl<I, J> Iterator for UnionIter<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    I::Item: Clone + Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(first) = self.first.as_mut() {
            if let Some(item) = Self::unseen(&mut self.seen, first.by_ref()) {
                return Some(item);
            }
            self.first = None;
        }
        Self::unseen(&mut self.seen, self.second.by_ref())
    }
}

impl<I, J> FusedIterator for UnionIter<I, J>
where
    I: Iterator,
    J: FusedIterator<Item = I::Item>,
    I::Item: Clone + Hash + Eq,
{
}

/// Sequence returned by [`Sequence::union_by`].
pub struct UnionBy<A, B, F, K> {
    first: A,
    second: B,
    selector: Rc<F>,
    _key: PhantomData<fn() -> K>,
}

impl<A, B, F, K> UnionBy<A, B, F, K> {
    pub(crate) fn new(first: A, second: B, selector: F) -> Self {
        Self {
            first,
            second,
            selector: Rc::new(selector),
            _key: PhantomData,
        }
    }
}

impl<A, B, F, K> Sequence for UnionBy<A, B, F, K>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    F: Fn(&A::Item) -> K,
    K: Hash + Eq,
{
    type Item = A::Item;
    type Iter = UnionByIter<A::Iter, B::Iter, F, K>;

    fn iterate(&self) -> Self::Iter {
        UnionByIter {
            first: Some(self.first.iterate()),
            second: self.second.iterate(),
            selector: Rc::clone(&self.selector),
            seen: HashSet::new(),
        }
    }
}

/// Iterator for [`UnionBy`].
pub struct UnionByIter<I, J, F, K> {
    first: Option<I>,
    second: J,
    selector: Rc<F>,
    seen: HashSet<K>,
}

impl<I, J, F, K> Iterator for UnionByIter<I, J, F, K>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    F: Fn(&I::Item) -> K,
    K: Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let (selector, seen) = (&self.selector, &mut self.seen);
        if let Some(first) = self.first.as_mut() {
            if let Some(item) = first.find(|item| seen.insert(selector(item))) {
                return Some(item);
            }
            self.first = None;
        }
        self.second.find(|item| seen.insert(selector(item)))
    }
}

impl<I, J, F, K> FusedIterator for UnionByIter<I, J, F, K>
where
    I: Iterator,
    J: FusedIterator<Item = I::Item>,
    F: Fn(&I::Item) -> K,
    K: Hash + Eq,
{
}
