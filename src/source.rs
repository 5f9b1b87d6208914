use crate::sequence::Sequence;
use crossbeam_channel::Receiver;
use std::cell::RefCell;
use std::iter::FusedIterator;
use std::rc::Rc;

/// A key paired with a value.
///
/// Produced when a sequence is built from an associative collection and
/// consumed by [`Terminal::to_map`](crate::Terminal::to_map).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyValue<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValue<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<(K, V)> for KeyValue<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

/// A sequence over an owned, shared buffer of elements.
///
/// Every iteration yields clones of the buffered elements in index order.
#[derive(Debug)]
pub struct Slice<T> {
    items: Rc<[T]>,
}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

impl<T: Clone> Sequence for Slice<T> {
    type Item = T;
    type Iter = SliceIter<T>;

    fn iterate(&self) -> SliceIter<T> {
        SliceIter {
            items: Rc::clone(&self.items),
            index: 0,
        }
    }
}

/// Iterator for [`Slice`].
#[derive(Debug)]
pub struct SliceIter<T> {
    items: Rc<[T]>,
    index: usize,
}

impl<T: Clone> Iterator for SliceIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.index)?.clone();
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for SliceIter<T> {}
impl<T: Clone> FusedIterator for SliceIter<T> {}

/// Takes ownership of `items` as a sequence.
pub fn from_vec<T>(items: Vec<T>) -> Slice<T> {
    Slice {
        items: items.into(),
    }
}

/// Copies `items` into a sequence.
pub fn from_slice<T: Clone>(items: &[T]) -> Slice<T> {
    Slice {
        items: items.into(),
    }
}

/// A sequence with no elements.
pub fn empty<T>() -> Slice<T> {
    from_vec(Vec::new())
}

/// The characters of `text`, in order.
pub fn from_string(text: &str) -> Slice<char> {
    from_vec(text.chars().collect())
}

/// Snapshots the entries of an associative collection as [`KeyValue`]
/// records.
///
/// The entry order is whatever the collection yields when this is called,
/// and every iteration replays that same order.
pub fn from_map<K, V, M>(map: M) -> Slice<KeyValue<K, V>>
where
    M: IntoIterator<Item = (K, V)>,
{
    from_vec(map.into_iter().map(KeyValue::from).collect())
}

/// `count` consecutive integers starting at `start`.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    start: i64,
    count: usize,
}

/// Yields `count` consecutive integers starting at `start`.
pub fn range(start: i64, count: usize) -> Range {
    Range { start, count }
}

impl Sequence for Range {
    type Item = i64;
    type Iter = RangeIter;

    fn iterate(&self) -> RangeIter {
        RangeIter {
            current: self.start,
            remaining: self.count,
        }
    }
}

/// Iterator for [`Range`].
#[derive(Debug, Clone)]
pub struct RangeIter {
    current: i64,
    remaining: usize,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.current;
        self.remaining -= 1;
        self.current = self.current.wrapping_add(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RangeIter {}
impl FusedIterator for RangeIter {}

/// The same value, `count` times.
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
    count: usize,
}

/// Yields `value` `count` times.
pub fn repeat<T: Clone>(value: T, count: usize) -> Repeat<T> {
    Repeat { value, count }
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;
    type Iter = RepeatIter<T>;

    fn iterate(&self) -> RepeatIter<T> {
        RepeatIter {
            value: self.value.clone(),
            remaining: self.count,
        }
    }
}

/// Iterator for [`Repeat`].
#[derive(Debug, Clone)]
pub struct RepeatIter<T> {
    value: T,
    remaining: usize,
}

impl<T: Clone> Iterator for RepeatIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.value.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for RepeatIter<T> {}
impl<T: Clone> FusedIterator for RepeatIter<T> {}

/// Values received from a channel, in arrival order.
///
/// The channel is consumed as it is read: a second iteration only sees what
/// the first one left behind, and nothing at all once every sender is gone
/// and the buffer is drained. Each pull blocks until a value arrives or the
/// channel is disconnected.
#[derive(Debug, Clone)]
pub struct Channel<T> {
    receiver: Receiver<T>,
}

/// Reads from `receiver` until every sender has been dropped.
pub fn from_channel<T>(receiver: Receiver<T>) -> Channel<T> {
    Channel { receiver }
}

impl<T> Sequence for Channel<T> {
    type Item = T;
    type Iter = ChannelIter<T>;

    fn iterate(&self) -> ChannelIter<T> {
        ChannelIter {
            receiver: self.receiver.clone(),
            done: false,
        }
    }
}

/// Iterator for [`Channel`].
#[derive(Debug)]
pub struct ChannelIter<T> {
    receiver: Receiver<T>,
    done: bool,
}

impl<T> Iterator for ChannelIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        match self.receiver.recv() {
            Ok(item) => Some(item),
            Err(_) => {
                self.done = true;
                None
            }
        }
    }
}

impl<T> FusedIterator for ChannelIter<T> {}

/// A sequence backed by a caller-supplied pull function.
///
/// All iterations share the one function, so iterating again resumes where
/// the previous iteration stopped. Each iteration is fused on its own: once
/// the function returns `None` to it, that iteration stays exhausted.
pub struct FromFn<F> {
    pull: Rc<RefCell<F>>,
}

/// Lifts a pull function into a sequence.
///
/// ```
/// use linq_rs::prelude::*;
///
/// let mut n = 0;
/// let counter = linq_rs::from_fn(move || {
///     n += 1;
///     (n <= 3).then_some(n)
/// });
/// assert_eq!(counter.to_vec(), vec![1, 2, 3]);
/// ```
pub fn from_fn<T, F>(pull: F) -> FromFn<F>
where
    F: FnMut() -> Option<T>,
{
    FromFn {
        pull: Rc::new(RefCell::new(pull)),
    }
}

impl<T, F> Sequence for FromFn<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;
    type Iter = FromFnIter<F>;

    fn iterate(&self) -> FromFnIter<F> {
        FromFnIter {
            pull: Rc::clone(&self.pull),
            done: false,
        }
    }
}

/// Iterator for [`FromFn`].
pub struct FromFnIter<F> {
    pull: Rc<RefCell<F>>,
    done: bool,
}

impl<T, F> Iterator for FromFnIter<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        let mut pull = self.pull.borrow_mut();
        let item = (*pull)();
        if item.is_none() {
            self.done = true;
        }
        item
    }
}

impl<T, F> FusedIterator for FromFnIter<F> where F: FnMut() -> Option<T> {}

/// A sequence that replays a cloneable iterator.
///
/// Each iteration starts from a fresh clone of the stored iterator, so any
/// `Iterator + Clone` (ranges, `iter()` over a borrowed collection, chains
/// of std adapters) becomes re-enterable.
#[derive(Debug, Clone)]
pub struct Reiterable<I> {
    iter: I,
}

/// Wraps a cloneable iterator as a sequence.
pub fn from_iterator<I>(iter: I) -> Reiterable<I::IntoIter>
where
    I: IntoIterator,
    I::IntoIter: Clone,
{
    Reiterable {
        iter: iter.into_iter(),
    }
}

impl<I: Iterator + Clone> Sequence for Reiterable<I> {
    type Item = I::Item;
    type Iter = std::iter::Fuse<I>;

    fn iterate(&self) -> Self::Iter {
        self.iter.clone().fuse()
    }
}
