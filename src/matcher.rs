// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::Result;
use crate::nfa::Nfa;
use crate::pattern::Pattern;
use crate::runner::Match;
use crate::runner::batch::{self, Matches};
use crate::runner::scanner::Scanner;
use std::fmt::{self, Debug, Formatter};

/// A compiled pattern, ready to be run.
///
/// Whether the pattern prefers long or short matches is decided once, when the `Matcher` is
/// created: if any repetition in the pattern is lazy, all of the matching is lazy.
pub struct Matcher<T> {
    nfa: Nfa<T>,
    greedy: bool,
}

impl<T> Clone for Matcher<T> {
    fn clone(&self) -> Matcher<T> {
        Matcher {
            nfa: self.nfa.clone(),
            greedy: self.greedy,
        }
    }
}

impl<T> Debug for Matcher<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher (greedy: {}) {:?}", self.greedy, self.nfa)
    }
}

impl<T> Matcher<T> {
    /// Compiles a pattern.
    pub fn new(pat: &Pattern<T>) -> Matcher<T> {
        Matcher {
            nfa: Nfa::from_pattern(pat),
            greedy: pat.is_greedy(),
        }
    }

    /// Compiles a pattern, but only if it doesn't require more than `max_states` states.
    pub fn new_bounded(pat: &Pattern<T>, max_states: usize) -> Result<Matcher<T>> {
        Ok(Matcher {
            nfa: Nfa::from_pattern_bounded(pat, max_states)?,
            greedy: pat.is_greedy(),
        })
    }

    pub fn nfa(&self) -> &Nfa<T> {
        &self.nfa
    }

    pub fn is_greedy(&self) -> bool {
        self.greedy
    }
}

impl<T: Clone> Matcher<T> {
    /// Iterates over the non-overlapping matches in `input`, from left to right.
    pub fn find_iter<'m, 'i>(&'m self, input: &'i [T]) -> Matches<'m, 'i, T> {
        Matches::new(&self.nfa, input, self.greedy)
    }

    pub fn find_all(&self, input: &[T]) -> Vec<Match<T>> {
        self.find_iter(input).collect()
    }

    /// Returns the leftmost match.
    pub fn find(&self, input: &[T]) -> Option<Match<T>> {
        self.find_iter(input).next()
    }

    pub fn test(&self, input: &[T]) -> bool {
        self.find(input).is_some()
    }

    /// Returns the length of the preferred match starting exactly at `input[offset]`.
    ///
    /// Unlike the other methods, this can return a zero-length match.
    ///
    /// # Panics
    ///
    /// Panics if `offset > input.len()`.
    pub fn match_at(&self, input: &[T], offset: usize) -> Option<usize> {
        batch::simulate(&self.nfa, input, offset, self.greedy)
    }

    /// Returns a `Scanner` for feeding input to this matcher one element at a time.
    pub fn scanner(&self) -> Scanner<'_, T> {
        Scanner::new(&self.nfa, self.greedy)
    }

    /// Finds all matches in input that can only be traversed once.
    pub fn find_all_stream<I>(&self, input: I) -> Vec<Match<T>> where I: IntoIterator<Item=T> {
        let mut scanner = self.scanner();
        let mut ret = Vec::new();
        for elt in input {
            ret.extend(scanner.push(elt));
        }
        ret.extend(scanner.end());
        ret
    }

    /// Finds the leftmost match in input that can only be traversed once.
    ///
    /// This stops pulling from `input` as soon as the first match is known.
    pub fn find_stream<I>(&self, input: I) -> Option<Match<T>> where I: IntoIterator<Item=T> {
        let mut scanner = self.scanner();
        for elt in input {
            if let Some(m) = scanner.push(elt).into_iter().next() {
                return Some(m);
            }
        }
        scanner.end().into_iter().next()
    }

    pub fn test_stream<I>(&self, input: I) -> bool where I: IntoIterator<Item=T> {
        self.find_stream(input).is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::matcher::Matcher;
    use crate::pattern::Pattern;
    use crate::runner::Match;
    use std::cell::Cell;

    fn even() -> Pattern<i32> {
        Pattern::pred(|x: &i32| x % 2 == 0)
    }

    fn m(start: usize, data: Vec<i32>) -> Match<i32> {
        Match { start: start, end: start + data.len() - 1, data: data }
    }

    #[test]
    fn greedy_flag() {
        assert!(Matcher::new(&Pattern::one_or_more(even())).is_greedy());
        assert!(!Matcher::new(&Pattern::one_or_more(even()).lazy()).is_greedy());
    }

    #[test]
    fn batch() {
        let mat = Matcher::new(&Pattern::one_or_more(even()));
        let input = [1, 2, 4, 3, 6];
        assert_eq!(mat.find_all(&input), vec![m(1, vec![2, 4]), m(4, vec![6])]);
        assert_eq!(mat.find(&input), Some(m(1, vec![2, 4])));
        assert!(mat.test(&input));
        assert!(!mat.test(&[1, 3, 5]));
        assert_eq!(mat.find(&[]), None);
    }

    #[test]
    fn match_at() {
        let mat = Matcher::new(&Pattern::zero_or_more(even()));
        assert_eq!(mat.match_at(&[2, 4, 1], 0), Some(2));
        assert_eq!(mat.match_at(&[2, 4, 1], 2), Some(0));
        assert_eq!(mat.match_at(&[2, 4, 1], 3), Some(0));
    }

    #[test]
    fn stream() {
        let mat = Matcher::new(&Pattern::one_or_more(even()));
        let input = vec![1, 2, 4, 3, 6];
        assert_eq!(mat.find_all_stream(input.clone()), mat.find_all(&input));
        assert_eq!(mat.find_stream(input.clone()), mat.find(&input));
        assert!(mat.test_stream(input));
        assert!(!mat.test_stream(vec![1, 3]));
    }

    #[test]
    fn find_stream_stops_early() {
        let pulled = Cell::new(0);
        let input = (1..100).inspect(|_| pulled.set(pulled.get() + 1));

        let mat = Matcher::new(&even());
        assert_eq!(mat.find_stream(input), Some(m(1, vec![2])));
        // The match at 1 is only certain once we see that nothing continues it.
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn matchers_are_independent() {
        let pat = Pattern::one_or_more(even());
        let a = Matcher::new(&pat);
        let b = a.clone();
        let mut s = a.scanner();
        s.push(2);
        assert_eq!(b.find_all(&[2]), vec![m(0, vec![2])]);
        assert_eq!(s.end(), vec![m(0, vec![2])]);
    }

    #[test]
    fn bounded() {
        let pat = Pattern::repeat(Pattern::repeat(even(), 10, Some(10)), 10, Some(10));
        assert_eq!(Matcher::new_bounded(&pat, 50).unwrap_err(), Error::TooManyStates);
        assert!(Matcher::new_bounded(&pat, 10_000).is_ok());
    }
}
