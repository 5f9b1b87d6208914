use crate::predicate::Predicate;
use crate::sequence::Sequence;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Sequence returned by [`Sequence::filter`] and [`Sequence::filter_indexed`].
pub struct Filter<S, P> {
    source: S,
    predicate: Rc<P>,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    type Item = S::Item;
    type Iter = FilterIter<S::Iter, P>;

    fn iterate(&self) -> Self::Iter {
        FilterIter {
            upstream: self.source.iterate(),
            predicate: Rc::clone(&self.predicate),
            index: 0,
        }
    }
}

/// Iterator for [`Filter`].
pub struct FilterIter<I, P> {
    upstream: I,
    predicate: Rc<P>,
    /// Position of the next upstream element, counted whether or not it passes.
    index: usize,
}

impl<I, P> Iterator for FilterIter<I, P>
where
    I: Iterator,
    P: Predicate<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for item in self.upstream.by_ref() {
            let index = self.index;
            self.index += 1;
            if self.predicate.test(index, &item) {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

impl<I, P> FusedIterator for FilterIter<I, P>
where
    I: FusedIterator,
    P: Predicate<I::Item>,
{
}
