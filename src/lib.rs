//! # linq-rs - Lazy, Composable Sequence Queries
//!
//! A LINQ-style query library built on re-enterable, pull-based sequences.
//!
//! A [`Sequence`] is a factory: every call to [`Sequence::iterate`] produces a
//! fresh iterator with its own state, so a pipeline can be walked any number
//! of times. Operators (`filter`, `select`, `order_by`, `join`, ...) only
//! describe work; [`Terminal`] methods drive it.
//!
//! ## Example
//!
//! ```
//! use linq_rs::compare::natural;
//! use linq_rs::prelude::*;
//!
//! let words = from_vec(vec!["pear", "fig", "apple", "fig", "kiwi"]);
//!
//! let short = words
//!     .by_ref()
//!     .distinct()
//!     .filter(|w| w.len() <= 4)
//!     .order_by(|w| *w, natural);
//!
//! assert_eq!(short.to_vec(), vec!["fig", "kiwi", "pear"]);
//! assert_eq!(words.count(), 5);
//! ```
//!
//! ## Evaluation
//!
//! - Streaming operators pull one upstream element at a time
//! - Buffering operators (`reverse`, `order_by`, `group_by`, `join`, set
//!   operators) materialize what they need on the first pull, not earlier
//! - Sequences are single-threaded; channels are the hand-off point between
//!   threads ([`from_channel`], [`Terminal::to_channel`])

mod concat;
mod default_if_empty;
mod distinct;
mod filter;
mod group_by;
mod join;
mod order_by;
mod reverse;
mod select;
mod select_many;
mod sequence;
mod set;
mod skip;
mod source;
mod take;
mod terminal;
mod zip;

pub mod compare;
pub mod predicate;

#[cfg(test)]
mod tests;

pub use group_by::Group;
pub use order_by::{Comparer, OrderedSequence};
pub use sequence::Sequence;
pub use source::{
    empty, from_channel, from_fn, from_iterator, from_map, from_slice, from_string, from_vec,
    range, repeat, KeyValue,
};
pub use terminal::{Numeric, SingleError, Terminal};

/// Sequence and iterator types returned by the operators.
pub mod ops {
    pub use crate::concat::{Append, AppendIter, Concat, ConcatIter, Prepend, PrependIter};
    pub use crate::default_if_empty::{DefaultIfEmpty, DefaultIfEmptyIter};
    pub use crate::distinct::{Dedup, DedupIter, Distinct, DistinctBy, DistinctByIter, DistinctIter};
    pub use crate::filter::{Filter, FilterIter};
    pub use crate::group_by::{GroupBy, GroupByIter};
    pub use crate::join::{GroupJoin, GroupJoinIter, Join, JoinIter};
    pub use crate::order_by::{KeyOrder, Less, OrderedIter, Sort, ThenOrder};
    pub use crate::reverse::{Reverse, ReverseIter};
    pub use crate::select::{Select, SelectIter};
    pub use crate::select_many::{SelectMany, SelectManyBy, SelectManyByIter, SelectManyIter};
    pub use crate::set::{
        Except, ExceptBy, ExceptByIter, ExceptIter, Intersect, IntersectBy, IntersectByIter,
        IntersectIter, Union, UnionBy, UnionByIter, UnionIter,
    };
    pub use crate::skip::{Skip, SkipIter, SkipWhile, SkipWhileIter};
    pub use crate::source::{
        Channel, ChannelIter, FromFn, FromFnIter, Range, RangeIter, Reiterable, Repeat,
        RepeatIter, Slice, SliceIter,
    };
    pub use crate::take::{Take, TakeIter, TakeWhile, TakeWhileIter};
    pub use crate::zip::{Zip, ZipIter};
}

/// Traits and sources needed by most pipelines.
pub mod prelude {
    pub use crate::{
        empty, from_channel, from_fn, from_iterator, from_map, from_slice, from_string, from_vec,
        range, repeat, Group, KeyValue, Sequence, Terminal,
    };
}
