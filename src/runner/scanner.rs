// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::nfa::Nfa;
use crate::runner::{Attempt, Match};

/// Runs an `Nfa` on input that arrives one element at a time.
///
/// Feeding a sequence to `push`, one element at a time, and then calling `end` produces exactly
/// the same matches (in the same order, and with predicates evaluated in the same order) as
/// running `batch::Matches` on the whole sequence.
///
/// At any moment, there is one attempt in progress, starting at `scan_start`. Once it dies, we
/// either emit its match or give up on its starting position, and then start a new attempt
/// by replaying the buffered input. We only buffer input from `scan_start` onwards, so the
/// memory used is bounded by the length of the longest match attempt rather than the length of
/// the input.
///
/// Because the length of the input isn't known until `end` is called, `End` anchors never hold
/// during `push`. They are re-checked by `end`.
#[derive(Debug)]
pub struct Scanner<'n, T: 'n> {
    nfa: &'n Nfa<T>,
    // The number of elements pushed so far.
    position: usize,
    // Where the current attempt started.
    scan_start: usize,
    // The absolute position of `buffer[0]`. This is always `scan_start` in between calls.
    buf_start: usize,
    buffer: Vec<T>,
    attempt: Attempt,
    finished: bool,
}

impl<'n, T: Clone> Scanner<'n, T> {
    pub fn new(nfa: &'n Nfa<T>, greedy: bool) -> Scanner<'n, T> {
        Scanner {
            nfa: nfa,
            position: 0,
            scan_start: 0,
            buf_start: 0,
            buffer: Vec::new(),
            attempt: Attempt::new(nfa, 0, None, greedy),
            finished: false,
        }
    }

    /// Feeds the next element, and returns any matches that we are now sure of.
    ///
    /// Pushing after `end` has been called does nothing.
    ///
    /// # Panics
    ///
    /// If a predicate panics, the panic passes straight through. The attempt in progress is then
    /// left half-way through a step, so the scanner must not be used again (neither `push` nor
    /// `end` would give meaningful results). The same goes for `end`.
    pub fn push(&mut self, elt: T) -> Vec<Match<T>> {
        if self.finished {
            warn!("push called on a scanner that has already ended, ignoring it");
            return Vec::new();
        }

        self.buffer.push(elt);
        self.position += 1;
        if self.attempt.is_alive() {
            let elt = &self.buffer[self.buffer.len() - 1];
            self.attempt.step(self.nfa, elt, None);
        }
        self.drain(None)
    }

    /// Signals the end of the input, and returns all the remaining matches.
    ///
    /// Only the first call does anything; later calls return nothing.
    pub fn end(&mut self) -> Vec<Match<T>> {
        if self.finished {
            warn!("end called twice on the same scanner, ignoring it");
            return Vec::new();
        }
        self.finished = true;

        let len = self.position;
        self.attempt.finish(self.nfa, len);
        self.drain(Some(len))
    }

    /// The number of elements pushed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The number of elements currently held on to.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // Deals with the current attempt, if it is dead, and keeps starting new ones until one of them
    // is still alive (or we run out of input). Then forgets about input that can no longer be
    // part of a match.
    fn drain(&mut self, len: Option<usize>) -> Vec<Match<T>> {
        let mut ret = Vec::new();
        while !self.attempt.is_alive() && self.scan_start < self.position {
            self.resolve(&mut ret);
            self.restart(len);
        }

        self.buffer.drain(..(self.scan_start - self.buf_start));
        self.buf_start = self.scan_start;
        ret
    }

    // Emits the match found by the (dead) current attempt, or skips over its starting position.
    fn resolve(&mut self, out: &mut Vec<Match<T>>) {
        debug_assert!(self.attempt.start() == self.scan_start);
        match self.attempt.best() {
            Some(n) if n > 0 => {
                let from = self.scan_start - self.buf_start;
                let m = Match::new(self.scan_start, &self.buffer[from..(from + n)]);
                trace!("emitting match at {}..={}", m.start, m.end);
                out.push(m);
                self.scan_start += n;
            },
            _ => self.scan_start += 1,
        }
    }

    // Starts a new attempt at `scan_start`, and catches it up with the input we have so far.
    fn restart(&mut self, len: Option<usize>) {
        trace!("restarting at {}, replaying {} elements",
               self.scan_start, self.position - self.scan_start);

        self.attempt.reset(self.nfa, self.scan_start, len);
        let from = self.scan_start - self.buf_start;
        for elt in &self.buffer[from..] {
            if !self.attempt.is_alive() {
                break;
            }
            self.attempt.step(self.nfa, elt, len);
        }

        // Once the length is known, we have already seen everything this attempt will ever see.
        if len.is_some() {
            self.attempt.stop();
        }
    }
}
