use crate::sequence::Sequence;
use std::iter::FusedIterator;

/// Sequence returned by [`Sequence::default_if_empty`].
pub struct DefaultIfEmpty<S: Sequence> {
    source: S,
    value: S::Item,
}

impl<S: Sequence> DefaultIfEmpty<S> {
    pub(crate) fn new(source: S, value: S::Item) -> Self {
        Self { source, value }
    }
}

impl<S> Sequence for DefaultIfEmpty<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;
    type Iter = DefaultIfEmptyIter<S::Iter>;

    fn iterate(&self) -> Self::Iter {
        DefaultIfEmptyIter {
            upstream: self.source.iterate(),
            state: State::Start(self.value.clone()),
        }
    }
}

enum State<T> {
    /// Nothing pulled yet; holds the fallback.
    Start(T),
    /// Upstream produced at least one element.
    Passing,
    Done,
}

/// Iterator for [`DefaultIfEmpty`].
pub struct DefaultIfEmptyIter<I: Iterator> {
    upstream: I,
    state: State<I::Item>,
}

impl<I: Iterator> Iterator for DefaultIfEmptyIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        // Every arm starts from `Done` and restores a live state if needed
        match std::mem::replace(&mut self.state, State::Done) {
            // First pull decides: pass upstream through, or yield the fallback once
            State::Start(fallback) => match self.upstream.next() {
                Some(item) => {
                    self.state = State::Passing;
                    Some(item)
                }
                None => Some(fallback),
            },
            State::Passing => {
                let item = self.upstream.next();
                // Stay live until upstream runs dry
                if item.is_some() {
                    self.state = State::Passing;
                }
                item
            }
            State::Done => None,
        }
    }
}

impl<I: Iterator> FusedIterator for DefaultIfEmptyIter<I> {}
