// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::nfa::Nfa;
use crate::runner::{Attempt, Match};

/// Looks for a match beginning at `input[offset]`, and returns its length.
///
/// If `greedy` is true, this is the longest match; otherwise it is the first (i.e. shortest) one.
/// The returned length can be zero.
///
/// The worst-case running time is `O(m * n)`, where `m` is the number of states and `n` is the
/// length of the input.
pub fn simulate<T>(nfa: &Nfa<T>, input: &[T], offset: usize, greedy: bool) -> Option<usize> {
    let len = Some(input.len());
    let mut att = Attempt::new(nfa, offset, len, greedy);
    for elt in &input[offset..] {
        if !att.is_alive() {
            break;
        }
        att.step(nfa, elt, len);
    }
    att.best()
}

/// An iterator over all non-overlapping, non-empty matches in a slice.
///
/// At each position, we look for a match using `simulate`. If we find a non-empty one then we
/// yield it and continue looking at the end of it; otherwise, we move ahead by one element.
#[derive(Debug)]
pub struct Matches<'n, 'i, T: 'n + 'i> {
    nfa: &'n Nfa<T>,
    input: &'i [T],
    greedy: bool,
    pos: usize,
}

impl<'n, 'i, T> Matches<'n, 'i, T> {
    pub fn new(nfa: &'n Nfa<T>, input: &'i [T], greedy: bool) -> Matches<'n, 'i, T> {
        Matches {
            nfa: nfa,
            input: input,
            greedy: greedy,
            pos: 0,
        }
    }
}

impl<'n, 'i, T: Clone> Iterator for Matches<'n, 'i, T> {
    type Item = Match<T>;

    fn next(&mut self) -> Option<Match<T>> {
        while self.pos < self.input.len() {
            let start = self.pos;
            match simulate(self.nfa, self.input, start, self.greedy) {
                Some(len) if len > 0 => {
                    self.pos += len;
                    return Some(Match::new(start, &self.input[start..self.pos]));
                },
                _ => self.pos += 1,
            }
        }
        None
    }
}
