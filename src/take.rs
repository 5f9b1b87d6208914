use crate::predicate::Predicate;
use crate::sequence::Sequence;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Sequence returned by [`Sequence::take`].
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;
    type Iter = TakeIter<S::Iter>;

    fn iterate(&self) -> Self::Iter {
        TakeIter {
            upstream: self.source.iterate(),
            remaining: self.count,
        }
    }
}

/// Iterator for [`Take`].
pub struct TakeIter<I> {
    upstream: I,
    remaining: usize,
}

impl<I: Iterator> Iterator for TakeIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.remaining == 0 {
            return None;
        }
        match self.upstream.next() {
            Some(item) => {
                self.remaining -= 1;
                Some(item)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.upstream.size_hint();
        let upper = upper.map_or(self.remaining, |n| n.min(self.remaining));
        (lower.min(self.remaining), Some(upper))
    }
}

impl<I: Iterator> FusedIterator for TakeIter<I> {}

/// Sequence returned by [`Sequence::take_while`] and
/// [`Sequence::take_while_indexed`].
pub struct TakeWhile<S, P> {
    source: S,
    predicate: Rc<P>,
}

impl<S, P> TakeWhile<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    type Item = S::Item;
    type Iter = TakeWhileIter<S::Iter, P>;

    fn iterate(&self) -> Self::Iter {
        TakeWhileIter {
            upstream: self.source.iterate(),
            predicate: Rc::clone(&self.predicate),
            index: 0,
            done: false,
        }
    }
}

/// Iterator for [`TakeWhile`].
pub struct TakeWhileIter<I, P> {
    upstream: I,
    predicate: Rc<P>,
    index: usize,
    done: bool,
}

impl<I, P> Iterator for TakeWhileIter<I, P>
where
    I: Iterator,
    P: Predicate<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        match self.upstream.next() {
            Some(item) if self.predicate.test(self.index, &item) => {
                self.index += 1;
                Some(item)
            }
            _ => {
                self.done = true;
                None
            }
        }
    }
}

impl<I, P> FusedIterator for TakeWhileIter<I, P>
where
    I: Iterator,
    P: Predicate<I::Item>,
{
}

#[cfg(test)]
mod tests {
    use crate::source::{from_fn, from_string, from_vec, range};
    use crate::{Sequence, Terminal};

    #[test]
    fn test_take() {
        let seq = from_vec(vec![1, 2, 2, 3, 1]).take(3);
        assert_eq!(seq.to_vec(), vec![1, 2, 2]);

        let seq = from_string("sstr").take(2);
        assert_eq!(seq.collect_string(), "ss");

        assert_eq!(range(0, 2).take(10).to_vec(), vec![0, 1]);
        assert!(range(0, 2).take(0).to_vec().is_empty());
    }

    #[test]
    fn test_take_does_not_overpull() {
        let pulls = std::cell::Cell::new(0);
        let seq = range(0, 100)
            .select(|x| {
                pulls.set(pulls.get() + 1);
                x
            })
            .take(3);
        assert_eq!(seq.to_vec(), vec![0, 1, 2]);
        assert_eq!(pulls.get(), 3);
    }

    #[test]
    fn test_take_from_unbounded_source() {
        let mut n = 0u64;
        let naturals = from_fn(move || {
            n += 1;
            Some(n)
        });
        assert_eq!(naturals.take(4).to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_take_while() {
        let seq = from_vec(vec![1, 1, 1, 2, 1, 2]).take_while(|x| *x < 2);
        assert_eq!(seq.to_vec(), vec![1, 1, 1]);

        let seq = from_string("sstr").take_while(|c| *c == 's');
        assert_eq!(seq.collect_string(), "ss");
    }

    #[test]
    fn test_take_while_never_resumes() {
        let seq = from_vec(vec![1, 5, 1, 1]).take_while(|x| *x < 2);
        let mut iter = seq.iterate();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_take_while_indexed() {
        let seq = from_vec(vec![1, 1, 1, 2]).take_while_indexed(|i, x| *x < 2 || i < 5);
        assert_eq!(seq.to_vec(), vec![1, 1, 1, 2]);

        let seq = from_string("sstr").take_while_indexed(|i, c| *c == 's' && i < 1);
        assert_eq!(seq.collect_string(), "s");
    }
}
