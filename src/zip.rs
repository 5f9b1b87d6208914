use crate::sequence::Sequence;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Sequence returned by [`Sequence::zip`].
pub struct Zip<A, B, F> {
    first: A,
    second: B,
    result: Rc<F>,
}

impl<A, B, F> Zip<A, B, F> {
    pub(crate) fn new(first: A, second: B, result: F) -> Self {
        Self {
            first,
            second,
            result: Rc::new(result),
        }
    }
}

impl<A, B, F, O> Sequence for Zip<A, B, F>
where
    A: Sequence,
    B: Sequence,
    F: Fn(A::Item, B::Item) -> O,
{
    type Item = O;
    type Iter = ZipIter<A::Iter, B::Iter, F>;

    fn iterate(&self) -> Self::Iter {
        ZipIter {
            first: self.first.iterate(),
            second: self.second.iterate(),
            result: Rc::clone(&self.result),
            done: false,
        }
    }
}

/// Iterator for [`Zip`].
pub struct ZipIter<I, J, F> {
    first: I,
    second: J,
    result: Rc<F>,
    done: bool,
}

impl<I, J, F, O> Iterator for ZipIter<I, J, F>
where
    I: Iterator,
    J: Iterator,
    F: Fn(I::Item, J::Item) -> O,
{
    type Item = O;

    fn next(&mut self) -> Option<O> {
        if self.done {
            return None;
        }
        let pair = self
            .first
            .next()
            .and_then(|a| self.second.next().map(|b| (a, b)));
        match pair {
            Some((a, b)) => Some((self.result)(a, b)),
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<I, J, F, O> FusedIterator for ZipIter<I, J, F>
where
    I: Iterator,
    J: Iterator,
    F: Fn(I::Item, J::Item) -> O,
{
}
