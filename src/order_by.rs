//! Sorting operators.
//!
//! [`OrderedSequence`] keeps the unsorted source together with a composed
//! [`Comparer`]. Chaining [`then_by`](OrderedSequence::then_by) extends the
//! comparer rather than sorting twice, so the final sort is a single stable
//! pass over all keys. Sorting happens on the first pull of each iteration.

use crate::sequence::Sequence;
use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::trace;

/// Three-way comparison of two elements.
pub trait Comparer<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Compares elements by a selected key.
pub struct KeyOrder<F, C, K> {
    selector: F,
    compare: C,
    descending: bool,
    _key: PhantomData<fn() -> K>,
}

impl<F, C, K> KeyOrder<F, C, K> {
    pub(crate) fn new(selector: F, compare: C, descending: bool) -> Self {
        Self {
            selector,
            compare,
            descending,
            _key: PhantomData,
        }
    }
}

impl<T, F, C, K> Comparer<T> for KeyOrder<F, C, K>
where
    F: Fn(&T) -> K,
    C: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(&(self.selector)(a), &(self.selector)(b));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Falls back to `then` when `first` considers two elements equal.
pub struct ThenOrder<A, B> {
    first: Rc<A>,
    then: B,
}

impl<T, A, B> Comparer<T> for ThenOrder<A, B>
where
    A: Comparer<T>,
    B: Comparer<T>,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.first
            .compare(a, b)
            .then_with(|| self.then.compare(a, b))
    }
}

/// Adapts a "strictly before" function to a [`Comparer`].
pub struct Less<F>(F);

impl<T, F> Comparer<T> for Less<F>
where
    F: Fn(&T, &T) -> bool,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        if (self.0)(a, b) {
            Ordering::Less
        } else if (self.0)(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Sequence returned by [`Sequence::order_by`] and
/// [`Sequence::order_by_descending`].
pub struct OrderedSequence<S, C> {
    source: S,
    comparer: Rc<C>,
}

impl<S, C> OrderedSequence<S, C> {
    pub(crate) fn new(source: S, comparer: C) -> Self {
        Self {
            source,
            comparer: Rc::new(comparer),
        }
    }
}

impl<S, C> OrderedSequence<S, C>
where
    S: Sequence,
    C: Comparer<S::Item>,
{
    /// Breaks ties left by earlier keys with an ascending comparison on `key`.
    ///
    /// ```
    /// use linq_rs::compare::natural;
    /// use linq_rs::prelude::*;
    ///
    /// let words = from_vec(vec!["pear", "fig", "apple", "kiwi"]);
    /// let sorted = words.order_by(|w| w.len(), natural).then_by(|w| *w, natural);
    /// assert_eq!(sorted.to_vec(), vec!["fig", "kiwi", "pear", "apple"]);
    /// ```
    pub fn then_by<F, C2, K>(
        self,
        key: F,
        compare: C2,
    ) -> OrderedSequence<S, ThenOrder<C, KeyOrder<F, C2, K>>>
    where
        F: Fn(&S::Item) -> K,
        C2: Fn(&K, &K) -> Ordering,
    {
        self.chain(KeyOrder::new(key, compare, false))
    }

    /// Like [`then_by`](Self::then_by), but descending.
    pub fn then_by_descending<F, C2, K>(
        self,
        key: F,
        compare: C2,
    ) -> OrderedSequence<S, ThenOrder<C, KeyOrder<F, C2, K>>>
    where
        F: Fn(&S::Item) -> K,
        C2: Fn(&K, &K) -> Ordering,
    {
        self.chain(KeyOrder::new(key, compare, true))
    }

    fn chain<B>(self, then: B) -> OrderedSequence<S, ThenOrder<C, B>> {
        OrderedSequence {
            source: self.source,
            comparer: Rc::new(ThenOrder {
                first: self.comparer,
                then,
            }),
        }
    }
}

impl<S, C> Sequence for OrderedSequence<S, C>
where
    S: Sequence,
    C: Comparer<S::Item>,
{
    type Item = S::Item;
    type Iter = OrderedIter<S::Iter, C>;

    fn iterate(&self) -> Self::Iter {
        OrderedIter::new(self.source.iterate(), Rc::clone(&self.comparer))
    }
}

/// Iterator for [`OrderedSequence`] and [`Sort`].
pub struct OrderedIter<I: Iterator, C> {
    upstream: Option<I>,
    comparer: Rc<C>,
    items: std::vec::IntoIter<I::Item>,
}

impl<I: Iterator, C> OrderedIter<I, C> {
    fn new(upstream: I, comparer: Rc<C>) -> Self {
        Self {
            upstream: Some(upstream),
            comparer,
            items: Vec::new().into_iter(),
        }
    }
}

impl<I, C> Iterator for OrderedIter<I, C>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(upstream) = self.upstream.take() {
            let mut items: Vec<I::Item> = upstream.collect();
            items.sort_by(|a, b| self.comparer.compare(a, b));
            trace!(len = items.len(), "sorted sequence");
            self.items = items.into_iter();
        }
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.upstream {
            Some(upstream) => upstream.size_hint(),
            None => self.items.size_hint(),
        }
    }
}

impl<I, C> FusedIterator for OrderedIter<I, C>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
}

/// Sequence returned by [`Sequence::sort`].
pub struct Sort<S, F> {
    source: S,
    comparer: Rc<Less<F>>,
}

impl<S, F> Sort<S, F> {
    pub(crate) fn new(source: S, less: F) -> Self {
        Self {
            source,
            comparer: Rc::new(Less(less)),
        }
    }
}

impl<S, F> Sequence for Sort<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, &S::Item) -> bool,
{
    type Item = S::Item;
    type Iter = OrderedIter<S::Iter, Less<F>>;

    fn iterate(&self) -> Self::Iter {
        OrderedIter::new(self.source.iterate(), Rc::clone(&self.comparer))
    }
}
