//! Ready-made three-way comparators for the ordering operators and
//! [`Terminal::min`](crate::Terminal::min) / [`Terminal::max`](crate::Terminal::max).

use std::cmp::Ordering;

/// Compares with the type's total order.
pub fn natural<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Compares with the type's partial order. Values not equal to themselves
/// (NaN) sort after every other value and equal to each other.
#[allow(clippy::eq_op)]
pub fn partial<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b)
        .unwrap_or_else(|| (a != a).cmp(&(b != b)))
}

/// Orders `false` before `true`.
pub fn by_bool(a: &bool, b: &bool) -> Ordering {
    a.cmp(b)
}

/// Inverts a comparator.
pub fn reverse<T, C>(compare: C) -> impl Fn(&T, &T) -> Ordering
where
    C: Fn(&T, &T) -> Ordering,
{
    move |a: &T, b: &T| compare(a, b).reverse()
}
