use crate::predicate::Selector;
use crate::sequence::Sequence;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Sequence returned by [`Sequence::select`] and [`Sequence::select_indexed`].
pub struct Select<S, F> {
    source: S,
    selector: Rc<F>,
}

impl<S, F> Select<S, F> {
    pub(crate) fn new(source: S, selector: F) -> Self {
        Self {
            source,
            selector: Rc::new(selector),
        }
    }
}

impl<S, F> Sequence for Select<S, F>
where
    S: Sequence,
    F: Selector<S::Item>,
{
    type Item = F::Output;
    type Iter = SelectIter<S::Iter, F>;

    fn iterate(&self) -> Self::Iter {
        SelectIter {
            upstream: self.source.iterate(),
            selector: Rc::clone(&self.selector),
            index: 0,
        }
    }
}

/// Iterator for [`Select`].
pub struct SelectIter<I, F> {
    upstream: I,
    selector: Rc<F>,
    index: usize,
}

impl<I, F> Iterator for SelectIter<I, F>
where
    I: Iterator,
    F: Selector<I::Item>,
{
    type Item = F::Output;

    fn next(&mut self) -> Option<F::Output> {
        let item = self.upstream.next()?;
        let index = self.index;
        self.index += 1;
        Some(self.selector.select(index, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

impl<I, F> FusedIterator for SelectIter<I, F>
where
    I: FusedIterator,
    F: Selector<I::Item>,
{
}
