//! Key-matched joins of an outer and an inner sequence.
//!
//! Both operators read the inner sequence into a key lookup on the first pull,
//! then stream the outer sequence against it.

use crate::sequence::Sequence;
use ahash::AHashMap as HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::trace;

/// Groups inner elements by key, keeping arrival order within a key.
fn build_lookup<J, F, K>(inner: J, key: &F) -> HashMap<K, Vec<J::Item>>
where
    J: Iterator,
    F: Fn(&J::Item) -> K,
    K: Hash + Eq,
{
    let mut lookup: HashMap<K, Vec<J::Item>> = HashMap::new();
    for item in inner {
        lookup.entry(key(&item)).or_default().push(item);
    }
    trace!(keys = lookup.len(), "built join lookup");
    lookup
}

/// Sequence returned by [`Sequence::join`].
pub struct Join<A, B, OK, IK, R, K, O> {
    outer: A,
    inner: B,
    outer_key: Rc<OK>,
    inner_key: Rc<IK>,
    result: Rc<R>,
    _marker: PhantomData<fn() -> (K, O)>,
}

impl<A, B, OK, IK, R, K, O> Join<A, B, OK, IK, R, K, O> {
    pub(crate) fn new(outer: A, inner: B, outer_key: OK, inner_key: IK, result: R) -> Self {
        Self {
            outer,
            inner,
            outer_key: Rc::new(outer_key),
            inner_key: Rc::new(inner_key),
            result: Rc::new(result),
            _marker: PhantomData,
        }
    }
}

impl<A, B, OK, IK, R, K, O> Sequence for Join<A, B, OK, IK, R, K, O>
where
    A: Sequence,
    B: Sequence,
    OK: Fn(&A::Item) -> K,
    IK: Fn(&B::Item) -> K,
    R: Fn(&A::Item, &B::Item) -> O,
    K: Hash + Eq,
{
    type Item = O;
    type Iter = JoinIter<A::Iter, B::Iter, OK, IK, R, K, O>;

    fn iterate(&self) -> Self::Iter {
        JoinIter {
            outer: self.outer.iterate(),
            inner: Some(self.inner.iterate()),
            outer_key: Rc::clone(&self.outer_key),
            inner_key: Rc::clone(&self.inner_key),
            result: Rc::clone(&self.result),
            lookup: HashMap::new(),
            current: None,
            _output: PhantomData,
        }
    }
}

/// Iterator for [`Join`].
pub struct JoinIter<I: Iterator, J: Iterator, OK, IK, R, K, O> {
    outer: I,
    inner: Option<J>,
    outer_key: Rc<OK>,
    inner_key: Rc<IK>,
    result: Rc<R>,
    lookup: HashMap<K, Vec<J::Item>>,
    /// Outer element being paired, its key, and the next match to yield.
    current: Option<(I::Item, K, usize)>,
    _output: PhantomData<fn() -> O>,
}

impl<I, J, OK, IK, R, K, O> Iterator for JoinIter<I, J, OK, IK, R, K, O>
where
    I: Iterator,
    J: Iterator,
    OK: Fn(&I::Item) -> K,
    IK: Fn(&J::Item) -> K,
    R: Fn(&I::Item, &J::Item) -> O,
    K: Hash + Eq,
{
    type Item = O;

    fn next(&mut self) -> Option<O> {
        // First pull: index the inner side by key
        if let Some(inner) = self.inner.take() {
            self.lookup = build_lookup(inner, &*self.inner_key);
        }
        loop {
            // Pair the current outer element with its next unvisited match
            if let Some((outer, key, pos)) = self.current.as_mut() {
                let matched = self.lookup.get(key).and_then(|matches| matches.get(*pos));
                if let Some(inner) = matched {
                    *pos += 1;
                    return Some((self.result)(&*outer, inner));
                }
            }

            // Matches exhausted (or none): advance the outer side
            self.current = None;
            let outer = self.outer.next()?;
            let key = (self.outer_key)(&outer);
            self.current = Some((outer, key, 0));
        }
    }
}

impl<I, J, OK, IK, R, K, O> FusedIterator for JoinIter<I, J, OK, IK, R, K, O>
where
    I: FusedIterator,
    J: Iterator,
    OK: Fn(&I::Item) -> K,
    IK: Fn(&J::Item) -> K,
    R: Fn(&I::Item, &J::Item) -> O,
    K: Hash + Eq,
{
}

/// Sequence returned by [`Sequence::group_join`].
pub struct GroupJoin<A, B, OK, IK, R, K, O> {
    outer: A,
    inner: B,
    outer_key: Rc<OK>,
    inner_key: Rc<IK>,
    result: Rc<R>,
    _marker: PhantomData<fn() -> (K, O)>,
}

impl<A, B, OK, IK, R, K, O> GroupJoin<A, B, OK, IK, R, K, O> {
    pub(crate) fn new(outer: A, inner: B, outer_key: OK, inner_key: IK, result: R) -> Self {
        Self {
            outer,
            inner,
            outer_key: Rc::new(outer_key),
            inner_key: Rc::new(inner_key),
            result: Rc::new(result),
            _marker: PhantomData,
        }
    }
}

impl<A, B, OK, IK, R, K, O> Sequence for GroupJoin<A, B, OK, IK, R, K, O>
where
    A: Sequence,
    B: Sequence,
    OK: Fn(&A::Item) -> K,
    IK: Fn(&B::Item) -> K,
    R: Fn(A::Item, &[B::Item]) -> O,
    K: Hash + Eq,
{
    type Item = O;
    type Iter = GroupJoinIter<A::Iter, B::Iter, OK, IK, R, K, O>;

    fn iterate(&self) -> Self::Iter {
        GroupJoinIter {
            outer: self.outer.iterate(),
            inner: Some(self.inner.iterate()),
            outer_key: Rc::clone(&self.outer_key),
            inner_key: Rc::clone(&self.inner_key),
            result: Rc::clone(&self.result),
            lookup: HashMap::new(),
            _output: PhantomData,
        }
    }
}

/// Iterator for [`GroupJoin`].
pub struct GroupJoinIter<I, J: Iterator, OK, IK, R, K, O> {
    outer: I,
    inner: Option<J>,
    outer_key: Rc<OK>,
    inner_key: Rc<IK>,
    result: Rc<R>,
    lookup: HashMap<K, Vec<J::Item>>,
    _output: PhantomData<fn() -> O>,
}

impl<I, J, OK, IK, R, K, O> Iterator for GroupJoinIter<I, J, OK, IK, R, K, O>
where
    I: Iterator,
    J: Iterator,
    OK: Fn(&I::Item) -> K,
    IK: Fn(&J::Item) -> K,
    R: Fn(I::Item, &[J::Item]) -> O,
    K: Hash + Eq,
{
    type Item = O;

    fn next(&mut self) -> Option<O> {
        if let Some(inner) = self.inner.take() {
            self.lookup = build_lookup(inner, &*self.inner_key);
        }
        let outer = self.outer.next()?;
        let key = (self.outer_key)(&outer);
        // Unmatched outer elements still get a result, with no inner elements
        let matches = self.lookup.get(&key).map_or(&[][..], Vec::as_slice);
        Some((self.result)(outer, matches))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.outer.size_hint()
    }
}

impl<I, J, OK, IK, R, K, O> FusedIterator for GroupJoinIter<I, J, OK, IK, R, K, O>
where
    I: FusedIterator,
    J: Iterator,
    OK: Fn(&I::Item) -> K,
    IK: Fn(&J::Item) -> K,
    R: Fn(I::Item, &[J::Item]) -> O,
    K: Hash + Eq,
{
}
