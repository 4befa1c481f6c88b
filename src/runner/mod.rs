// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Running an `Nfa`.
//!
//! Both ways of running (`batch`, on a slice, and `scanner`, on elements that arrive one at a
//! time) are built out of `Attempt`, which tracks a single attempt to match starting at a single
//! position. Because they share `Attempt`, they evaluate predicates in exactly the same order.

use crate::nfa::{ClosureScratch, Nfa, StateSet};

pub mod batch;
pub mod scanner;

/// A match.
///
/// `start` and `end` are indices into the input, and both are inclusive; `data` holds a copy of
/// the matched elements. Matches are never empty.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Match<T> {
    pub start: usize,
    pub end: usize,
    pub data: Vec<T>,
}

impl<T: Clone> Match<T> {
    fn new(start: usize, data: &[T]) -> Match<T> {
        debug_assert!(!data.is_empty());
        Match {
            start: start,
            end: start + data.len() - 1,
            data: data.to_vec(),
        }
    }
}

/// The state of one attempt to match, starting from a fixed position.
#[derive(Clone, Debug)]
pub struct Attempt {
    // Where the attempt began.
    start: usize,
    // The position of the next element to consume.
    pos: usize,
    // The states that we moved into when consuming the last element (or the initial state, if we
    // haven't consumed anything). `active` is their closure at `pos`.
    seeds: StateSet,
    active: StateSet,
    scratch: ClosureScratch,
    // The length of the best match so far.
    best: Option<usize>,
    alive: bool,
    greedy: bool,
}

impl Attempt {
    pub fn new<T>(nfa: &Nfa<T>, start: usize, len: Option<usize>, greedy: bool) -> Attempt {
        let mut ret = Attempt {
            start: start,
            pos: start,
            seeds: StateSet::with_capacity(nfa.num_states()),
            active: StateSet::with_capacity(nfa.num_states()),
            scratch: ClosureScratch::with_capacity(nfa.num_states()),
            best: None,
            alive: true,
            greedy: greedy,
        };
        ret.reset(nfa, start, len);
        ret
    }

    /// Throws away the current attempt (but not its allocations), and begins a new one at
    /// `start`.
    pub fn reset<T>(&mut self, nfa: &Nfa<T>, start: usize, len: Option<usize>) {
        self.start = start;
        self.pos = start;
        self.best = None;
        self.seeds.clear();
        self.seeds.insert(nfa.start());
        self.settle(nfa, len);
    }

    // Brings `active` up to date with `seeds`, and checks whether we are accepting.
    fn settle<T>(&mut self, nfa: &Nfa<T>, len: Option<usize>) {
        let deferred = nfa.closure(self.seeds.as_slice(),
                                   self.pos,
                                   len,
                                   &mut self.active,
                                   &mut self.scratch);

        if self.active.contains(nfa.accept()) {
            self.best = Some(self.pos - self.start);
            if !self.greedy {
                self.alive = false;
                return;
            }
        }
        // If an `End` anchor was deferred, we are still waiting to find out whether it holds;
        // that keeps us alive even if there is nothing else left.
        self.alive = !self.active.is_empty() || deferred;
    }

    /// Consumes the next element.
    ///
    /// This should only be called while the attempt is alive.
    pub fn step<T>(&mut self, nfa: &Nfa<T>, elt: &T, len: Option<usize>) {
        debug_assert!(self.alive);

        nfa.step(&self.active, elt, &mut self.seeds);
        self.pos += 1;
        self.settle(nfa, len);
    }

    /// Tells the attempt that the input has ended, and that it has length `len`.
    ///
    /// Any `End` anchors that were waiting on the length get evaluated now. Afterwards, the
    /// attempt is dead.
    pub fn finish<T>(&mut self, nfa: &Nfa<T>, len: usize) {
        if self.alive {
            debug_assert!(self.pos == len);
            self.settle(nfa, Some(len));
        }
        self.stop();
    }

    /// Gives up on the attempt, keeping whatever match we found so far.
    pub fn stop(&mut self) {
        self.alive = false;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// The length of the preferred match, if there is one. It may be zero.
    pub fn best(&self) -> Option<usize> {
        self.best
    }
}
