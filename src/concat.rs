use crate::sequence::Sequence;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Sequence returned by [`Sequence::concat`].
pub struct Concat<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concat<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Sequence for Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;
    type Iter = ConcatIter<A::Iter, B::Iter>;

    fn iterate(&self) -> Self::Iter {
        ConcatIter {
            first: Some(self.first.iterate()),
            second: self.second.iterate(),
        }
    }
}

/// Iterator for [`Concat`].
pub struct ConcatIter<I, J> {
    /// Dropped once exhausted so it is never pulled again.
    first: Option<I>,
    second: J,
}

impl<I, J> Iterator for ConcatIter<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(first) = self.first.as_mut() {
            if let Some(item) = first.next() {
                return Some(item);
            }
            self.first = None;
        }
        self.second.next()
    }
}

impl<I, J> FusedIterator for ConcatIter<I, J>
where
    I: Iterator,
    J: FusedIterator<Item = I::Item>,
{
}

/// Sequence returned by [`Sequence::append`].
pub struct Append<S: Sequence> {
    source: S,
    items: Rc<[S::Item]>,
}

impl<S: Sequence> Append<S> {
    pub(crate) fn new(source: S, items: Vec<S::Item>) -> Self {
        Self {
            source,
            items: items.into(),
        }
    }
}

impl<S> Sequence for Append<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;
    type Iter = AppendIter<S::Iter>;

    fn iterate(&self) -> Self::Iter {
        AppendIter {
            upstream: Some(self.source.iterate()),
            items: Rc::clone(&self.items),
            index: 0,
        }
    }
}

/// Iterator for [`Append`].
pub struct AppendIter<I: Iterator> {
    upstream: Option<I>,
    items: Rc<[I::Item]>,
    index: usize,
}

impl<I> Iterator for AppendIter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(upstream) = self.upstream.as_mut() {
            if let Some(item) = upstream.next() {
                return Some(item);
            }
            self.upstream = None;
        }
        let item = self.items.get(self.index)?.clone();
        self.index += 1;
        Some(item)
    }
}

impl<I> FusedIterator for AppendIter<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

/// Sequence returned by [`Sequence::prepend`].
pub struct Prepend<S: Sequence> {
    source: S,
    items: Rc<[S::Item]>,
}

impl<S: Sequence> Prepend<S> {
    pub(crate) fn new(source: S, items: Vec<S::Item>) -> Self {
        Self {
            source,
            items: items.into(),
        }
    }
}

impl<S> Sequence for Prepend<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;
    type Iter = PrependIter<S::Iter>;

    fn iterate(&self) -> Self::Iter {
        PrependIter {
            items: Rc::clone(&self.items),
            index: 0,
            upstream: self.source.iterate(),
        }
    }
}

/// Iterator for [`Prepend`].
pub struct PrependIter<I: Iterator> {
    items: Rc<[I::Item]>,
    index: usize,
    upstream: I,
}

impl<I> Iterator for PrependIter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(item) = self.items.get(self.index) {
            self.index += 1;
            return Some(item.clone());
        }
        self.upstream.next()
    }
}

impl<I> FusedIterator for PrependIter<I>
where
    I: FusedIterator,
    I::Item: Clone,
{
}
