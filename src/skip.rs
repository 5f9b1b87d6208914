use crate::predicate::Predicate;
use crate::sequence::Sequence;
use std::iter::FusedIterator;
use std::rc::Rc;

/// Sequence returned by [`Sequence::skip`].
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;
    type Iter = SkipIter<S::Iter>;

    fn iterate(&self) -> Self::Iter {
        SkipIter {
            upstream: self.source.iterate(),
            remaining: self.count,
        }
    }
}

/// Iterator for [`Skip`].
pub struct SkipIter<I> {
    upstream: I,
    /// Elements still to discard before passing through.
    remaining: usize,
}

impl<I: Iterator> Iterator for SkipIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.remaining > 0 {
            let n = std::mem::take(&mut self.remaining);
            return self.upstream.nth(n);
        }
        self.upstream.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.upstream.size_hint();
        (
            lower.saturating_sub(self.remaining),
            upper.map(|n| n.saturating_sub(self.remaining)),
        )
    }
}

impl<I: FusedIterator> FusedIterator for SkipIter<I> {}

/// Sequence returned by [`Sequence::skip_while`] and
/// [`Sequence::skip_while_indexed`].
pub struct SkipWhile<S, P> {
    source: S,
    predicate: Rc<P>,
}

impl<S, P> SkipWhile<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    type Item = S::Item;
    type Iter = SkipWhileIter<S::Iter, P>;

    fn iterate(&self) -> Self::Iter {
        SkipWhileIter {
            upstream: self.source.iterate(),
            predicate: Rc::clone(&self.predicate),
            index: 0,
            skipping: true,
        }
    }
}

/// Iterator for [`SkipWhile`].
pub struct SkipWhileIter<I, P> {
    upstream: I,
    predicate: Rc<P>,
    /// Only advanced while still skipping.
    index: usize,
    skipping: bool,
}

impl<I, P> Iterator for SkipWhileIter<I, P>
where
    I: Iterator,
    P: Predicate<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.skipping {
            for item in self.upstream.by_ref() {
                if !self.predicate.test(self.index, &item) {
                    self.skipping = false;
                    return Some(item);
                }
                self.index += 1;
            }
            return None;
        }
        self.upstream.next()
    }
}

impl<I, P> FusedIterator for SkipWhileIter<I, P>
where
    I: FusedIterator,
    P: Predicate<I::Item>,
{
}

#[cfg(test)]
mod tests {
    use crate::source::{empty, from_string, from_vec, range};
    use crate::{Sequence, Terminal};

    #[test]
    fn test_skip() {
        let seq = from_vec(vec![1, 2, 1, 2, 1, 2]).skip(3);
        assert_eq!(seq.to_vec(), vec![2, 1, 2]);

        let seq = from_string("sstr").skip(2);
        assert_eq!(seq.collect_string(), "tr");
    }

    #[test]
    fn test_skip_past_end() {
        assert!(range(0, 3).skip(5).to_vec().is_empty());
        assert!(empty::<i32>().skip(1).to_vec().is_empty());
        assert_eq!(range(0, 3).skip(0).to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_skip_while() {
        let seq = from_vec(vec![1, 2, 3, 4, 1, 2]).skip_while(|x| *x < 3);
        assert_eq!(seq.to_vec(), vec![3, 4, 1, 2]);

        let seq = from_string("sstr").skip_while(|c| *c == 's');
        assert_eq!(seq.collect_string(), "tr");

        assert!(range(0, 4).skip_while(|_| true).to_vec().is_empty());
        assert_eq!(range(0, 4).skip_while(|_| false).count(), 4);
    }

    #[test]
    fn test_skip_while_indexed() {
        let seq = from_vec(vec![1, 2, 3, 4, 1, 2]).skip_while_indexed(|i, x| *x < 4 && i < 3);
        assert_eq!(seq.to_vec(), vec![4, 1, 2]);

        let seq = from_string("sstr").skip_while_indexed(|i, c| *c == 's' && i == 0);
        assert_eq!(seq.collect_string(), "str");
    }

    #[test]
    fn test_skip_while_stops_testing_after_first_failure() {
        let tested = std::cell::Cell::new(0);
        let seq = range(0, 10).skip_while(|x| {
            tested.set(tested.get() + 1);
            *x < 2
        });
        assert_eq!(seq.count(), 8);
        assert_eq!(tested.get(), 3);
    }
}
