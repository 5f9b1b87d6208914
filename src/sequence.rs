use crate::concat::{Append, Concat, Prepend};
use crate::default_if_empty::DefaultIfEmpty;
use crate::distinct::{Dedup, Distinct, DistinctBy};
use crate::filter::Filter;
use crate::group_by::GroupBy;
use crate::join::{GroupJoin, Join};
use crate::order_by::{KeyOrder, OrderedSequence, Sort};
use crate::predicate::{Indexed, Unindexed};
use crate::reverse::Reverse;
use crate::select::Select;
use crate::select_many::{SelectMany, SelectManyBy};
use crate::set::{Except, ExceptBy, Intersect, IntersectBy, Union, UnionBy};
use crate::skip::{Skip, SkipWhile};
use crate::take::{Take, TakeWhile};
use crate::zip::Zip;
use std::cmp::Ordering;
use std::hash::Hash;
use std::rc::Rc;

/// A lazily evaluated, re-enterable source of elements.
///
/// A sequence holds no iteration state of its own. Every call to
/// [`iterate`](Sequence::iterate) returns a fresh iterator that owns all the
/// state needed to walk the sequence once, so two iterations over the same
/// pipeline never observe each other. Operators only describe work; nothing
/// is pulled from a source until a terminal (see [`Terminal`](crate::Terminal))
/// drives the iterator.
///
/// # Example
///
/// ```
/// use linq_rs::prelude::*;
///
/// let evens = linq_rs::range(1, 10)
///     .filter(|x| x % 2 == 0)
///     .select(|x| x * 10);
///
/// assert_eq!(evens.to_vec(), vec![20, 40, 60, 80, 100]);
/// // Re-iteration starts over from the source.
/// assert_eq!(evens.count(), 5);
/// ```
pub trait Sequence {
    /// The element type yielded by this sequence.
    type Item;

    /// The pull iterator produced for a single pass over the sequence.
    type Iter: Iterator<Item = Self::Item>;

    /// Starts a new, independent pass over the sequence.
    fn iterate(&self) -> Self::Iter;

    /// Borrows the sequence so it can be composed without being consumed.
    fn by_ref(&self) -> &Self
    where
        Self: Sized,
    {
        self
    }

    /// Keeps the elements for which `predicate` returns true.
    fn filter<F>(self, predicate: F) -> Filter<Self, Unindexed<F>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, Unindexed(predicate))
    }

    /// Like [`filter`](Sequence::filter), with the zero-based position of
    /// each upstream element passed to the predicate.
    fn filter_indexed<F>(self, predicate: F) -> Filter<Self, Indexed<F>>
    where
        Self: Sized,
        F: Fn(usize, &Self::Item) -> bool,
    {
        Filter::new(self, Indexed(predicate))
    }

    /// Projects every element through `selector`.
    fn select<F, R>(self, selector: F) -> Select<Self, Unindexed<F>>
    where
        Self: Sized,
        F: Fn(Self::Item) -> R,
    {
        Select::new(self, Unindexed(selector))
    }

    /// Projects every element together with its zero-based index.
    fn select_indexed<F, R>(self, selector: F) -> Select<Self, Indexed<F>>
    where
        Self: Sized,
        F: Fn(usize, Self::Item) -> R,
    {
        Select::new(self, Indexed(selector))
    }

    /// Maps each element to an inner sequence and flattens the results.
    fn select_many<F, S>(self, selector: F) -> SelectMany<Self, Unindexed<F>>
    where
        Self: Sized,
        F: Fn(Self::Item) -> S,
        S: Sequence,
    {
        SelectMany::new(self, Unindexed(selector))
    }

    /// Like [`select_many`](Sequence::select_many); the selector also gets the
    /// index of the outer element.
    fn select_many_indexed<F, S>(self, selector: F) -> SelectMany<Self, Indexed<F>>
    where
        Self: Sized,
        F: Fn(usize, Self::Item) -> S,
        S: Sequence,
    {
        SelectMany::new(self, Indexed(selector))
    }

    /// Flattens inner sequences and combines every inner element with the
    /// outer element it came from.
    fn select_many_by<F, S, R, O>(
        self,
        selector: F,
        result: R,
    ) -> SelectManyBy<Self, Unindexed<F>, R, O>
    where
        Self: Sized,
        Self::Item: Clone,
        F: Fn(Self::Item) -> S,
        S: Sequence,
        R: Fn(S::Item, &Self::Item) -> O,
    {
        SelectManyBy::new(self, Unindexed(selector), result)
    }

    /// Indexed form of [`select_many_by`](Sequence::select_many_by).
    fn select_many_by_indexed<F, S, R, O>(
        self,
        selector: F,
        result: R,
    ) -> SelectManyBy<Self, Indexed<F>, R, O>
    where
        Self: Sized,
        Self::Item: Clone,
        F: Fn(usize, Self::Item) -> S,
        S: Sequence,
        R: Fn(S::Item, &Self::Item) -> O,
    {
        SelectManyBy::new(self, Indexed(selector), result)
    }

    /// Yields every element, then `items` in the given order.
    fn append<I>(self, items: I) -> Append<Self>
    where
        Self: Sized,
        Self::Item: Clone,
        I: IntoIterator<Item = Self::Item>,
    {
        Append::new(self, items.into_iter().collect())
    }

    /// Yields `items` in the given order, then every element.
    fn prepend<I>(self, items: I) -> Prepend<Self>
    where
        Self: Sized,
        Self::Item: Clone,
        I: IntoIterator<Item = Self::Item>,
    {
        Prepend::new(self, items.into_iter().collect())
    }

    /// Yields all of `self`, then all of `other`. Duplicates are kept.
    fn concat<S>(self, other: S) -> Concat<Self, S>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
    {
        Concat::new(self, other)
    }

    /// Yields `value` once if the sequence turns out to be empty.
    fn default_if_empty(self, value: Self::Item) -> DefaultIfEmpty<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        DefaultIfEmpty::new(self, value)
    }

    /// Buffers the whole sequence on first pull and yields it back to front.
    fn reverse(self) -> Reverse<Self>
    where
        Self: Sized,
    {
        Reverse::new(self)
    }

    /// Bypasses the first `count` elements.
    fn skip(self, count: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, count)
    }

    /// Bypasses elements while `predicate` holds, then yields the rest,
    /// starting with the first element that failed it.
    fn skip_while<F>(self, predicate: F) -> SkipWhile<Self, Unindexed<F>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> bool,
    {
        SkipWhile::new(self, Unindexed(predicate))
    }

    /// Indexed form of [`skip_while`](Sequence::skip_while).
    fn skip_while_indexed<F>(self, predicate: F) -> SkipWhile<Self, Indexed<F>>
    where
        Self: Sized,
        F: Fn(usize, &Self::Item) -> bool,
    {
        SkipWhile::new(self, Indexed(predicate))
    }

    /// Yields at most `count` elements.
    fn take(self, count: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, count)
    }

    /// Yields elements until the first one failing `predicate`.
    fn take_while<F>(self, predicate: F) -> TakeWhile<Self, Unindexed<F>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> bool,
    {
        TakeWhile::new(self, Unindexed(predicate))
    }

    /// Indexed form of [`take_while`](Sequence::take_while).
    fn take_while_indexed<F>(self, predicate: F) -> TakeWhile<Self, Indexed<F>>
    where
        Self: Sized,
        F: Fn(usize, &Self::Item) -> bool,
    {
        TakeWhile::new(self, Indexed(predicate))
    }

    /// Combines elements of two sequences pairwise, stopping at the shorter.
    fn zip<S, F, O>(self, other: S, result: F) -> Zip<Self, S, F>
    where
        Self: Sized,
        S: Sequence,
        F: Fn(Self::Item, S::Item) -> O,
    {
        Zip::new(self, other, result)
    }

    /// Yields each element the first time it is seen.
    fn distinct(self) -> Distinct<Self>
    where
        Self: Sized,
        Self::Item: Clone + Hash + Eq,
    {
        Distinct::new(self)
    }

    /// Yields each element whose `selector` key has not been seen before.
    fn distinct_by<F, K>(self, selector: F) -> DistinctBy<Self, F, K>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: Hash + Eq,
    {
        DistinctBy::new(self, selector)
    }

    /// Drops elements equal to the element immediately before them.
    ///
    /// This only removes *consecutive* duplicates. It matches
    /// [`distinct`](Sequence::distinct) only when the input is already sorted
    /// by equality, e.g. after [`order_by`](Sequence::order_by).
    fn dedup(self) -> Dedup<Self>
    where
        Self: Sized,
        Self::Item: Clone + PartialEq,
    {
        Dedup::new(self)
    }

    /// Yields elements of `self` that do not occur in `other`.
    fn except<S>(self, other: S) -> Except<Self, S>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
        Self::Item: Hash + Eq,
    {
        Except::new(self, other)
    }

    /// Yields elements of `self` whose key does not occur among the keys of
    /// `other`.
    fn except_by<S, F, K>(self, other: S, selector: F) -> ExceptBy<Self, S, F, K>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
        F: Fn(&Self::Item) -> K,
        K: Hash + Eq,
    {
        ExceptBy::new(self, other, selector)
    }

    /// Yields elements of `self` that occur in `other`.
    ///
    /// `other` is read into a set, and each of its distinct elements matches
    /// at most once: repeats in either sequence yield a single result.
    fn intersect<S>(self, other: S) -> Intersect<Self, S>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
        Self::Item: Hash + Eq,
    {
        Intersect::new(self, other)
    }

    /// Key-based form of [`intersect`](Sequence::intersect). Each distinct key
    /// of `other` matches at most one element of `self`, the first to carry it.
    fn intersect_by<S, F, K>(self, other: S, selector: F) -> IntersectBy<Self, S, F, K>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
        F: Fn(&Self::Item) -> K,
        K: Hash + Eq,
    {
        IntersectBy::new(self, other, selector)
    }

    /// Yields the distinct elements of `self` followed by the elements of
    /// `other` not yet seen.
    fn union<S>(self, other: S) -> Union<Self, S>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
        Self::Item: Clone + Hash + Eq,
    {
        Union::new(self, other)
    }

    /// Key-based form of [`union`](Sequence::union).
    fn union_by<S, F, K>(self, other: S, selector: F) -> UnionBy<Self, S, F, K>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
        F: Fn(&Self::Item) -> K,
        K: Hash + Eq,
    {
        UnionBy::new(self, other, selector)
    }

    /// Buckets elements by `key`, projecting each through `value`.
    ///
    /// The order in which groups are yielded is unspecified; sort the result
    /// if a stable order is needed.
    fn group_by<KF, VF, K, V>(self, key: KF, value: VF) -> GroupBy<Self, KF, VF, K>
    where
        Self: Sized,
        KF: Fn(&Self::Item) -> K,
        VF: Fn(Self::Item) -> V,
        K: Hash + Eq,
    {
        GroupBy::new(self, key, value)
    }

    /// Inner join on equal keys. Yields one result per matching pair, in
    /// outer order and then inner arrival order.
    fn join<S, OK, IK, R, K, O>(
        self,
        inner: S,
        outer_key: OK,
        inner_key: IK,
        result: R,
    ) -> Join<Self, S, OK, IK, R, K, O>
    where
        Self: Sized,
        S: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&S::Item) -> K,
        R: Fn(&Self::Item, &S::Item) -> O,
        K: Hash + Eq,
    {
        Join::new(self, inner, outer_key, inner_key, result)
    }

    /// Yields one result per outer element, paired with every inner element
    /// sharing its key (possibly none).
    fn group_join<S, OK, IK, R, K, O>(
        self,
        inner: S,
        outer_key: OK,
        inner_key: IK,
        result: R,
    ) -> GroupJoin<Self, S, OK, IK, R, K, O>
    where
        Self: Sized,
        S: Sequence,
        OK: Fn(&Self::Item) -> K,
        IK: Fn(&S::Item) -> K,
        R: Fn(Self::Item, &[S::Item]) -> O,
        K: Hash + Eq,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result)
    }

    /// Stable ascending sort by `key`, compared with `compare`.
    ///
    /// Further keys can be chained with
    /// [`then_by`](OrderedSequence::then_by).
    fn order_by<F, C, K>(self, key: F, compare: C) -> OrderedSequence<Self, KeyOrder<F, C, K>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        OrderedSequence::new(self, KeyOrder::new(key, compare, false))
    }

    /// Stable descending sort by `key`.
    fn order_by_descending<F, C, K>(
        self,
        key: F,
        compare: C,
    ) -> OrderedSequence<Self, KeyOrder<F, C, K>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        OrderedSequence::new(self, KeyOrder::new(key, compare, true))
    }

    /// Sorts with a plain "a before b" function, bypassing key chaining.
    fn sort<F>(self, less: F) -> Sort<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        Sort::new(self, less)
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Iter = S::Iter;

    fn iterate(&self) -> Self::Iter {
        (**self).iterate()
    }
}

impl<S: Sequence + ?Sized> Sequence for Rc<S> {
    type Item = S::Item;
    type Iter = S::Iter;

    fn iterate(&self) -> Self::Iter {
        (**self).iterate()
    }
}
