// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Thompson's construction: every node of the pattern becomes a fragment of the automaton with
//! one entry state and one exit state, and the fragments are glued together with eps
//! transitions.

use crate::error::{Error, Result};
use crate::nfa::{Guard, Nfa, StateIdx};
use crate::pattern::{Anchor, Pattern};

/// The piece of automaton that recognizes one node of the pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Fragment {
    start: StateIdx,
    accept: StateIdx,
}

/// Returns the number of states that `pat` compiles to, or `None` if that doesn't fit in a
/// `usize`.
fn num_states_needed<T>(pat: &Pattern<T>) -> Option<usize> {
    match *pat {
        Pattern::Predicate(_) | Pattern::Any | Pattern::Anchor(_) => Some(2),
        Pattern::Sequence(ref children) => {
            if children.is_empty() {
                Some(2)
            } else {
                children.iter().try_fold(0usize, |acc, c| acc.checked_add(num_states_needed(c)?))
            }
        },
        Pattern::Repeat { ref pattern, min, max, .. } => {
            let child = num_states_needed(pattern)?;
            // An unbounded repeat has one extra copy for the loop.
            let copies = match max {
                Some(max) => (min as usize).checked_add(max.saturating_sub(min) as usize)?,
                None => (min as usize).checked_add(1)?,
            };
            copies.checked_mul(child)?.checked_add(2)
        },
        Pattern::Alternate(ref l, ref r) =>
            num_states_needed(l)?.checked_add(num_states_needed(r)?)?.checked_add(2),
    }
}

impl<T> Nfa<T> {
    /// Compiles a pattern into an `Nfa`.
    ///
    /// Every call creates fresh states; the only thing shared with the pattern (or with other
    /// automata compiled from it) is the predicates.
    pub fn from_pattern(pat: &Pattern<T>) -> Nfa<T> {
        let mut ret = Nfa::with_capacity(num_states_needed(pat).unwrap_or(0));
        let frag = ret.add_pattern(pat);
        ret.start = frag.start;
        ret.accept = frag.accept;

        debug!("compiled {:?} into {} states", pat, ret.num_states());
        ret
    }

    /// Compiles a pattern into an `Nfa`, but only if it doesn't require more than `max_states`
    /// states.
    ///
    /// Since bounded repetitions are compiled by copying, patterns like `(x{0,100}){0,100}` can
    /// be much bigger than they look.
    pub fn from_pattern_bounded(pat: &Pattern<T>, max_states: usize) -> Result<Nfa<T>> {
        match num_states_needed(pat) {
            Some(n) if n <= max_states => Ok(Nfa::from_pattern(pat)),
            _ => Err(Error::TooManyStates),
        }
    }

    /// Appends a bunch of new states, representing `pat`.
    fn add_pattern(&mut self, pat: &Pattern<T>) -> Fragment {
        match *pat {
            Pattern::Predicate(ref p) => self.add_single_transition(Guard::Pred(p.clone())),
            Pattern::Any => self.add_single_transition(Guard::Any),
            Pattern::Sequence(ref children) => self.add_sequence(children),
            Pattern::Repeat { ref pattern, min, max, greedy } =>
                self.add_repeat(pattern, min, max, greedy),
            Pattern::Alternate(ref l, ref r) => self.add_alternate(l, r),
            Pattern::Anchor(anchor) => self.add_anchor(anchor),
        }
    }

    /// Appends two states, with a given transition between them.
    fn add_single_transition(&mut self, guard: Guard<T>) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_transition(start, accept, guard);
        Fragment { start: start, accept: accept }
    }

    /// Appends a sequence of states that recognizes the concatenation of `children`.
    fn add_sequence(&mut self, children: &[Pattern<T>]) -> Fragment {
        if let Some((first, rest)) = children.split_first() {
            let first = self.add_pattern(first);
            let start = first.start;
            let mut accept = first.accept;

            for child in rest {
                let frag = self.add_pattern(child);
                self.add_eps(accept, frag.start);
                accept = frag.accept;
            }
            Fragment { start: start, accept: accept }
        } else {
            let start = self.add_state();
            let accept = self.add_state();
            self.add_eps(start, accept);
            Fragment { start: start, accept: accept }
        }
    }

    /// Adds eps transitions from `from` to both `more` and `done`. The first one added is the
    /// preferred one.
    fn add_choice(&mut self, from: StateIdx, more: StateIdx, done: StateIdx, greedy: bool) {
        if greedy {
            self.add_eps(from, more);
            self.add_eps(from, done);
        } else {
            self.add_eps(from, done);
            self.add_eps(from, more);
        }
    }

    /// Appends new states, representing multiple copies of `pat`.
    ///
    /// The new states represent a language that accepts at least `min` and at most `max` copies
    /// of `pat`. (If `max` is `None`, there is no upper bound.) If `max` is smaller than `min`,
    /// it is ignored and exactly `min` copies are accepted.
    fn add_repeat(&mut self, pat: &Pattern<T>, min: u32, max: Option<u32>, greedy: bool)
    -> Fragment {
        let start = self.add_state();
        let mut cur = start;
        for _ in 0..min {
            let frag = self.add_pattern(pat);
            self.add_eps(cur, frag.start);
            cur = frag.accept;
        }

        let accept = self.add_state();
        if let Some(max) = max {
            for _ in min..max {
                let frag = self.add_pattern(pat);
                self.add_choice(cur, frag.start, accept, greedy);
                cur = frag.accept;
            }
            self.add_eps(cur, accept);
        } else {
            let frag = self.add_pattern(pat);
            self.add_choice(cur, frag.start, accept, greedy);
            self.add_eps(frag.accept, cur);
        }
        Fragment { start: start, accept: accept }
    }

    /// Appends a sequence of states that recognizes either of the two alternatives.
    fn add_alternate(&mut self, left: &Pattern<T>, right: &Pattern<T>) -> Fragment {
        let start = self.add_state();
        let left = self.add_pattern(left);
        let right = self.add_pattern(right);
        let accept = self.add_state();

        self.add_eps(start, left.start);
        self.add_eps(start, right.start);
        self.add_eps(left.accept, accept);
        self.add_eps(right.accept, accept);
        Fragment { start: start, accept: accept }
    }

    /// Adds two new states, with an anchor guarding the first.
    fn add_anchor(&mut self, anchor: Anchor) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.set_anchor(start, anchor);
        self.add_eps(start, accept);
        Fragment { start: start, accept: accept }
    }
}
