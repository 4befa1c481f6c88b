// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The pattern tree.
//!
//! A `Pattern` is the parsed form of a pattern: it plays the role that `regex_syntax::Expr` plays
//! for textual regexes. Nothing in this crate parses patterns from strings; callers either build
//! the tree directly or use the small constructor functions on `Pattern`.

use crate::error::{Error, Result};
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

/// A test on a single element.
///
/// Predicates are shared (not copied) between every automaton compiled from the same pattern, so
/// a predicate that closes over a `Cell` or `RefCell` sees every evaluation made by any of them.
/// The only promise made to such predicates is that, for a given automaton and input, they are
/// evaluated in the same order every time.
pub struct Predicate<T> {
    f: Rc<dyn Fn(&T) -> bool>,
}

impl<T> Predicate<T> {
    pub fn new<F>(f: F) -> Predicate<T> where F: Fn(&T) -> bool + 'static {
        Predicate { f: Rc::new(f) }
    }

    #[inline]
    pub fn test(&self, elt: &T) -> bool {
        (self.f)(elt)
    }

    /// Returns true if both predicates share the same function.
    pub fn ptr_eq(&self, other: &Predicate<T>) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Predicate<T> {
        Predicate { f: self.f.clone() }
    }
}

impl<T> Debug for Predicate<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({:p})", Rc::as_ptr(&self.f) as *const ())
    }
}

/// A zero-width assertion about the position in the input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Anchor {
    Start,
    End,
}

impl Anchor {
    /// Does this anchor hold at `index`?
    ///
    /// `len` is the total length of the input, or `None` if it isn't known yet. An `End` anchor
    /// never holds while the length is unknown.
    pub fn holds(&self, index: usize, len: Option<usize>) -> bool {
        match *self {
            Anchor::Start => index == 0,
            Anchor::End => len == Some(index),
        }
    }
}

pub enum Pattern<T> {
    /// Matches one element satisfying the predicate.
    Predicate(Predicate<T>),
    /// Matches any one element.
    Any,
    /// Matches the children one after the other. An empty sequence matches the empty input.
    Sequence(Vec<Pattern<T>>),
    /// Matches between `min` and `max` (inclusive) copies of `pattern`. If `max` is `None`,
    /// there is no upper bound.
    ///
    /// `greedy` only affects which match is preferred when several repetition counts work.
    Repeat {
        pattern: Box<Pattern<T>>,
        min: u32,
        max: Option<u32>,
        greedy: bool,
    },
    /// Matches either alternative. There is no preference between the two.
    Alternate(Box<Pattern<T>>, Box<Pattern<T>>),
    Anchor(Anchor),
}

impl<T> Pattern<T> {
    pub fn pred<F>(f: F) -> Pattern<T> where F: Fn(&T) -> bool + 'static {
        Pattern::Predicate(Predicate::new(f))
    }

    pub fn any() -> Pattern<T> {
        Pattern::Any
    }

    pub fn seq(children: Vec<Pattern<T>>) -> Pattern<T> {
        Pattern::Sequence(children)
    }

    /// Between `min` and `max` copies of `pat`, preferring more copies.
    pub fn repeat(pat: Pattern<T>, min: u32, max: Option<u32>) -> Pattern<T> {
        Pattern::Repeat {
            pattern: Box::new(pat),
            min: min,
            max: max,
            greedy: true,
        }
    }

    /// Between `min` and `max` copies of `pat`, preferring fewer copies.
    pub fn lazy_repeat(pat: Pattern<T>, min: u32, max: Option<u32>) -> Pattern<T> {
        Pattern::Repeat {
            pattern: Box::new(pat),
            min: min,
            max: max,
            greedy: false,
        }
    }

    pub fn one_or_more(pat: Pattern<T>) -> Pattern<T> {
        Pattern::repeat(pat, 1, None)
    }

    pub fn zero_or_more(pat: Pattern<T>) -> Pattern<T> {
        Pattern::repeat(pat, 0, None)
    }

    pub fn optional(pat: Pattern<T>) -> Pattern<T> {
        Pattern::repeat(pat, 0, Some(1))
    }

    /// If this is a repetition, makes it prefer fewer copies. Otherwise, does nothing.
    pub fn lazy(self) -> Pattern<T> {
        match self {
            Pattern::Repeat { pattern, min, max, .. } =>
                Pattern::Repeat { pattern: pattern, min: min, max: max, greedy: false },
            other => other,
        }
    }

    pub fn alt(left: Pattern<T>, right: Pattern<T>) -> Pattern<T> {
        Pattern::Alternate(Box::new(left), Box::new(right))
    }

    /// Matches any one of `alts`.
    ///
    /// Fails immediately if `alts` is empty, since there would be nothing to match.
    pub fn one_of(alts: Vec<Pattern<T>>) -> Result<Pattern<T>> {
        let mut alts = alts.into_iter().rev();
        let last = alts.next().ok_or(Error::EmptyAlternation)?;
        Ok(alts.fold(last, |acc, alt| Pattern::alt(alt, acc)))
    }

    pub fn start() -> Pattern<T> {
        Pattern::Anchor(Anchor::Start)
    }

    pub fn end() -> Pattern<T> {
        Pattern::Anchor(Anchor::End)
    }

    /// Returns true unless some repetition in this pattern is lazy.
    pub fn is_greedy(&self) -> bool {
        match *self {
            Pattern::Predicate(_) | Pattern::Any | Pattern::Anchor(_) => true,
            Pattern::Sequence(ref children) => children.iter().all(|c| c.is_greedy()),
            Pattern::Repeat { ref pattern, greedy, .. } => greedy && pattern.is_greedy(),
            Pattern::Alternate(ref l, ref r) => l.is_greedy() && r.is_greedy(),
        }
    }
}

impl<T> Clone for Pattern<T> {
    fn clone(&self) -> Pattern<T> {
        match *self {
            Pattern::Predicate(ref p) => Pattern::Predicate(p.clone()),
            Pattern::Any => Pattern::Any,
            Pattern::Sequence(ref children) => Pattern::Sequence(children.clone()),
            Pattern::Repeat { ref pattern, min, max, greedy } => Pattern::Repeat {
                pattern: pattern.clone(),
                min: min,
                max: max,
                greedy: greedy,
            },
            Pattern::Alternate(ref l, ref r) => Pattern::Alternate(l.clone(), r.clone()),
            Pattern::Anchor(a) => Pattern::Anchor(a),
        }
    }
}

impl<T> Debug for Pattern<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Pattern::Predicate(ref p) => p.fmt(f),
            Pattern::Any => f.write_str("Any"),
            Pattern::Sequence(ref children) => f.debug_list().entries(children).finish(),
            Pattern::Repeat { ref pattern, min, max, greedy } => {
                pattern.fmt(f)?;
                match max {
                    Some(max) => write!(f, "{{{},{}}}", min, max)?,
                    None => write!(f, "{{{},}}", min)?,
                }
                if !greedy {
                    f.write_str("?")?;
                }
                Ok(())
            },
            Pattern::Alternate(ref l, ref r) => write!(f, "({:?}|{:?})", l, r),
            Pattern::Anchor(Anchor::Start) => f.write_str("^"),
            Pattern::Anchor(Anchor::End) => f.write_str("$"),
        }
    }
}
