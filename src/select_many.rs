use crate::predicate::Selector;
use crate::sequence::Sequence;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::rc::Rc;

type InnerIter<T, F> = <<F as Selector<T>>::Output as Sequence>::Iter;
type InnerItem<T, F> = <<F as Selector<T>>::Output as Sequence>::Item;

/// Sequence returned by [`Sequence::select_many`] and
/// [`Sequence::select_many_indexed`].
pub struct SelectMany<S, F> {
    source: S,
    selector: Rc<F>,
}

impl<S, F> SelectMany<S, F> {
    pub(crate) fn new(source: S, selector: F) -> Self {
        Self {
            source,
            selector: Rc::new(selector),
        }
    }
}

impl<S, F> Sequence for SelectMany<S, F>
where
    S: Sequence,
    F: Selector<S::Item>,
    F::Output: Sequence,
{
    type Item = InnerItem<S::Item, F>;
    type Iter = SelectManyIter<S::Iter, F>;

    fn iterate(&self) -> Self::Iter {
        SelectManyIter {
            outer: self.source.iterate(),
            selector: Rc::clone(&self.selector),
            index: 0,
            inner: None,
        }
    }
}

/// Iterator for [`SelectMany`].
pub struct SelectManyIter<I, F>
where
    I: Iterator,
    F: Selector<I::Item>,
    F::Output: Sequence,
{
    outer: I,
    selector: Rc<F>,
    /// Index handed to the selector for the next outer element.
    index: usize,
    inner: Option<InnerIter<I::Item, F>>,
}

impl<I, F> Iterator for SelectManyIter<I, F>
where
    I: Iterator,
    F: Selector<I::Item>,
    F::Output: Sequence,
{
    type Item = InnerItem<I::Item, F>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Drain the active inner sequence first
            if let Some(inner) = self.inner.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                self.inner = None;
            }

            // Refill from the next outer element; stop once outer is done
            let outer = self.outer.next()?;
            let index = self.index;
            self.index += 1;
            self.inner = Some(self.selector.select(index, outer).iterate());
        }
    }
}

impl<I, F> FusedIterator for SelectManyIter<I, F>
where
    I: FusedIterator,
    F: Selector<I::Item>,
    F::Output: Sequence,
{
}

/// Sequence returned by [`Sequence::select_many_by`] and
/// [`Sequence::select_many_by_indexed`].
pub struct SelectManyBy<S, F, R, O> {
    source: S,
    selector: Rc<F>,
    result: Rc<R>,
    _output: PhantomData<fn() -> O>,
}

impl<S, F, R, O> SelectManyBy<S, F, R, O> {
    pub(crate) fn new(source: S, selector: F, result: R) -> Self {
        Self {
            source,
            selector: Rc::new(selector),
            result: Rc::new(result),
            _output: PhantomData,
        }
    }
}

impl<S, F, R, O> Sequence for SelectManyBy<S, F, R, O>
where
    S: Sequence,
    S::Item: Clone,
    F: Selector<S::Item>,
    F::Output: Sequence,
    R: Fn(InnerItem<S::Item, F>, &S::Item) -> O,
{
    type Item = O;
    type Iter = SelectManyByIter<S::Iter, F, R, O>;

    fn iterate(&self) -> Self::Iter {
        SelectManyByIter {
            outer: self.source.iterate(),
            selector: Rc::clone(&self.selector),
            result: Rc::clone(&self.result),
            index: 0,
            current: None,
            _output: PhantomData,
        }
    }
}

/// Iterator for [`SelectManyBy`].
pub struct SelectManyByIter<I, F, R, O>
where
    I: Iterator,
    F: Selector<I::Item>,
    F::Output: Sequence,
{
    outer: I,
    selector: Rc<F>,
    result: Rc<R>,
    index: usize,
    /// The outer element being expanded, kept for the result function.
    current: Option<(I::Item, InnerIter<I::Item, F>)>,
    _output: PhantomData<fn() -> O>,
}

impl<I, F, R, O> Iterator for SelectManyByIter<I, F, R, O>
where
    I: Iterator,
    I::Item: Clone,
    F: Selector<I::Item>,
    F::Output: Sequence,
    R: Fn(InnerItem<I::Item, F>, &I::Item) -> O,
{
    type Item = O;

    fn next(&mut self) -> Option<O> {
        loop {
            // Keep the outer element alive while its inner sequence yields
            if let Some((outer, inner)) = self.current.as_mut() {
                if let Some(item) = inner.next() {
                    return Some((self.result)(item, &*outer));
                }
                self.current = None;
            }

            let outer = self.outer.next()?;
            let index = self.index;
            self.index += 1;
            // The selector consumes a clone; the original goes to `result`
            let inner = self.selector.select(index, outer.clone()).iterate();
            self.current = Some((outer, inner));
        }
    }
}

impl<I, F, R, O> FusedIterator for SelectManyByIter<I, F, R, O>
where
    I: FusedIterator,
    I::Item: Clone,
    F: Selector<I::Item>,
    F::Output: Sequence,
    R: Fn(InnerItem<I::Item, F>, &I::Item) -> O,
{
}

#[cfg(test)]
mod tests {
    use crate::source::{empty, from_slice, from_string, from_vec};
    use crate::{Sequence, Terminal};

    #[test]
    fn test_select_many() {
        let seq = from_vec(vec!["str", "ing"]).select_many(from_string);
        assert_eq!(seq.collect_string(), "string");

        let seq = from_vec(vec![vec![1, 2, 3], vec![4, 5, 6, 7]]).select_many(from_vec);
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_select_many_skips_empty_inners() {
        let seq = from_vec(vec![vec![], vec![1], vec![], vec![], vec![2, 3], vec![]])
            .select_many(from_vec);
        assert_eq!(seq.to_vec(), vec![1, 2, 3]);

        let mut iter = seq.iterate();
        assert_eq!(iter.by_ref().count(), 3);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_select_many_indexed() {
        let seq = from_vec(vec![vec![1, 2, 3], vec![4, 5, 6, 7]]).select_many_indexed(|i, x| {
            if i > 0 {
                from_slice(&x[1..])
            } else {
                from_slice(&x)
            }
        });
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_select_many_indexed_counts_outer_elements() {
        let seq = from_vec(vec!["ab", "", "cd"])
            .select_many_indexed(|i, s| from_string(s).select(move |c| format!("{c}{i}")));
        assert_eq!(seq.to_vec(), vec!["a0", "b0", "c2", "d2"]);
    }

    #[test]
    fn test_select_many_by() {
        let seq = from_vec(vec![vec![1, 2, 3], vec![4, 5, 6, 7]])
            .select_many_by(from_vec, |inner, outer| inner * outer.len() as i32);
        assert_eq!(seq.to_vec(), vec![3, 6, 9, 16, 20, 24, 28]);
    }

    #[test]
    fn test_select_many_by_indexed() {
        let seq = from_vec(vec!["str", "ing"]).select_many_by_indexed(
            |i, s| from_string(s).take(i + 1),
            |c, outer| format!("{c}{outer}"),
        );
        assert_eq!(seq.to_vec(), vec!["sstr", "iing", "ning"]);
    }

    #[test]
    fn test_select_many_empty_outer() {
        let seq = empty::<Vec<i32>>().select_many(from_vec);
        assert_eq!(seq.count(), 0);
    }
}
