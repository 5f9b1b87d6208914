//! Element tests and projections shared by the plain and indexed operators,
//! plus a few small predicate combinators.

/// Wraps a closure that does not care about element positions.
#[derive(Debug, Clone, Copy)]
pub struct Unindexed<F>(pub(crate) F);

/// Wraps a closure that receives the zero-based element position first.
#[derive(Debug, Clone, Copy)]
pub struct Indexed<F>(pub(crate) F);

/// A test applied to an element at a given position.
pub trait Predicate<T> {
    fn test(&self, index: usize, item: &T) -> bool;
}

impl<T, F: Fn(&T) -> bool> Predicate<T> for Unindexed<F> {
    #[inline]
    fn test(&self, _index: usize, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T, F: Fn(usize, &T) -> bool> Predicate<T> for Indexed<F> {
    #[inline]
    fn test(&self, index: usize, item: &T) -> bool {
        (self.0)(index, item)
    }
}

/// A projection applied to an element at a given position.
pub trait Selector<T> {
    type Output;

    fn select(&self, index: usize, item: T) -> Self::Output;
}

impl<T, F, R> Selector<T> for Unindexed<F>
where
    F: Fn(T) -> R,
{
    type Output = R;

    #[inline]
    fn select(&self, _index: usize, item: T) -> R {
        (self.0)(item)
    }
}

impl<T, F, R> Selector<T> for Indexed<F>
where
    F: Fn(usize, T) -> R,
{
    type Output = R;

    #[inline]
    fn select(&self, index: usize, item: T) -> R {
        (self.0)(index, item)
    }
}

/// A boxed element test, as accepted by [`all_of`].
pub type BoxedPredicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// A boxed indexed element test, as accepted by [`all_of_indexed`].
pub type BoxedIndexedPredicate<'a, T> = Box<dyn Fn(usize, &T) -> bool + 'a>;

/// Logical AND of any number of predicates. An empty list accepts everything.
///
/// ```
/// use linq_rs::prelude::*;
/// use linq_rs::predicate::{all_of, BoxedPredicate};
///
/// let checks: Vec<BoxedPredicate<i64>> = vec![Box::new(|x: &i64| x % 2 == 0), Box::new(|x: &i64| x % 3 == 0)];
/// let picked = linq_rs::range(0, 20).filter(all_of(checks)).to_vec();
/// assert_eq!(picked, vec![0, 6, 12, 18]);
/// ```
pub fn all_of<'a, T>(predicates: Vec<BoxedPredicate<'a, T>>) -> impl Fn(&T) -> bool + 'a
where
    T: 'a,
{
    move |item: &T| predicates.iter().all(|p| p(item))
}

/// Indexed form of [`all_of`].
pub fn all_of_indexed<'a, T>(
    predicates: Vec<BoxedIndexedPredicate<'a, T>>,
) -> impl Fn(usize, &T) -> bool + 'a
where
    T: 'a,
{
    move |index: usize, item: &T| predicates.iter().all(|p| p(index, item))
}

/// Negates a predicate.
pub fn not<T, F: Fn(&T) -> bool>(predicate: F) -> impl Fn(&T) -> bool {
    move |item: &T| !predicate(item)
}

/// Accepts every element.
pub fn always<T>(_: &T) -> bool {
    true
}

/// Rejects every element.
pub fn never<T>(_: &T) -> bool {
    false
}
