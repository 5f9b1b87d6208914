use crate::sequence::Sequence;
use std::iter::FusedIterator;
use tracing::trace;

/// Sequence returned by [`Sequence::reverse`].
pub struct Reverse<S> {
    source: S,
}

impl<S> Reverse<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: Sequence> Sequence for Reverse<S> {
    type Item = S::Item;
    type Iter = ReverseIter<S::Iter>;

    fn iterate(&self) -> Self::Iter {
        ReverseIter {
            upstream: Some(self.source.iterate()),
            buffer: Vec::new(),
        }
    }
}

/// Iterator for [`Reverse`].
///
/// Drains the upstream into a buffer on the first pull, then pops from the
/// back.
pub struct ReverseIter<I: Iterator> {
    upstream: Option<I>,
    buffer: Vec<I::Item>,
}

impl<I: Iterator> Iterator for ReverseIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(upstream) = self.upstream.take() {
            self.buffer = upstream.collect();
            trace!(items = self.buffer.len(), "buffered sequence for reverse");
        }
        self.buffer.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.upstream {
            Some(upstream) => upstream.size_hint(),
            None => (self.buffer.len(), Some(self.buffer.len())),
        }
    }
}

impl<I: Iterator> FusedIterator for ReverseIter<I> {}

#[cfg(test)]
mod tests {
    use crate::source::{empty, from_vec, range};
    use crate::{Sequence, Terminal};

    #[test]
    fn test_reverse() {
        assert_eq!(from_vec(vec![1, 2, 3]).reverse().to_vec(), vec![3, 2, 1]);
        assert!(empty::<i32>().reverse().to_vec().is_empty());
    }

    #[test]
    fn test_reverse_is_involution() {
        let seq = range(0, 10).reverse().reverse();
        assert_eq!(seq.to_vec(), range(0, 10).to_vec());
    }

    #[test]
    fn test_reverse_buffers_on_first_pull() {
        let pulls = std::cell::Cell::new(0);
        let seq = range(0, 3)
            .select(|x| {
                pulls.set(pulls.get() + 1);
                x
            })
            .reverse();

        let mut iter = seq.iterate();
        assert_eq!(pulls.get(), 0);
        assert_eq!(iter.next(), Some(2));
        assert_eq!(pulls.get(), 3);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(pulls.get(), 3);
    }
}
