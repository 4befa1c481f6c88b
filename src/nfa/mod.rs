// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bit_set::BitSet;
use itertools::Itertools;
use crate::pattern::{Anchor, Predicate};
use std::fmt::{self, Debug, Formatter};
use std::slice;

mod builder;

pub type StateIdx = usize;

/// How we represent a set of states while simulating.
///
/// The order of the states matters: it is the order in which they were discovered, and it
/// determines the order in which predicates get evaluated. Therefore this is a `Vec`, and the
/// `BitSet` is only there to make membership queries fast.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateSet {
    states: Vec<StateIdx>,
    present: BitSet,
}

impl StateSet {
    pub fn with_capacity(n: usize) -> StateSet {
        StateSet {
            states: Vec::with_capacity(n),
            present: BitSet::with_capacity(n),
        }
    }

    /// Adds a state to the end of this set, unless it is already there.
    ///
    /// Returns true if the state was added.
    pub fn insert(&mut self, state: StateIdx) -> bool {
        if self.present.insert(state) {
            self.states.push(state);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, state: StateIdx) -> bool {
        self.present.contains(state)
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.present.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn as_slice(&self) -> &[StateIdx] {
        &self.states
    }

    pub fn iter(&self) -> slice::Iter<'_, StateIdx> {
        self.states.iter()
    }
}

/// Working space for `Nfa::closure`.
///
/// Closures get computed once per element per attempt, so the stack and the set of blocked states
/// are kept here and reused instead of being allocated every time.
#[derive(Clone, Debug, Default)]
pub struct ClosureScratch {
    stack: Vec<StateIdx>,
    blocked: BitSet,
}

impl ClosureScratch {
    pub fn with_capacity(n: usize) -> ClosureScratch {
        ClosureScratch {
            stack: Vec::with_capacity(n),
            blocked: BitSet::with_capacity(n),
        }
    }
}

/// The condition on a consuming transition.
pub enum Guard<T> {
    Any,
    Pred(Predicate<T>),
}

impl<T> Guard<T> {
    #[inline]
    pub fn accepts(&self, elt: &T) -> bool {
        match *self {
            Guard::Any => true,
            Guard::Pred(ref p) => p.test(elt),
        }
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Guard<T> {
        match *self {
            Guard::Any => Guard::Any,
            Guard::Pred(ref p) => Guard::Pred(p.clone()),
        }
    }
}

// Two predicate guards are the same only if they share the same function.
impl<T> PartialEq for Guard<T> {
    fn eq(&self, other: &Guard<T>) -> bool {
        match (self, other) {
            (&Guard::Any, &Guard::Any) => true,
            (&Guard::Pred(ref p), &Guard::Pred(ref q)) => p.ptr_eq(q),
            _ => false,
        }
    }
}

impl<T> Debug for Guard<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Guard::Any => f.write_str("Any"),
            Guard::Pred(ref p) => p.fmt(f),
        }
    }
}

struct State<T> {
    // Transitions that don't consume input, in priority order.
    eps: Vec<StateIdx>,
    // Transitions that consume one element, if it satisfies the guard.
    consuming: Vec<(Guard<T>, StateIdx)>,
    // If set, this state (and everything reachable from it by eps transitions) is only reachable
    // at positions where the anchor holds.
    anchor: Option<Anchor>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> State<T> {
        State {
            eps: self.eps.clone(),
            consuming: self.consuming.clone(),
            anchor: self.anchor,
        }
    }
}

impl<T> PartialEq for State<T> {
    fn eq(&self, other: &State<T>) -> bool {
        self.eps == other.eps && self.consuming == other.consuming && self.anchor == other.anchor
    }
}

/// A non-deterministic finite automaton over elements of type `T`.
///
/// The states live in a `Vec` and refer to one another by index, so the (typically cyclic)
/// transition graph has no ownership cycles. There is exactly one initial state and exactly one
/// accepting state.
///
/// Match priority
/// ==============
///
/// The eps transitions out of each state are ordered, and the closure of a set of states lists
/// states in the order that a depth-first search following the eps transitions in order would
/// find them. Greedy repetitions put their "repeat again" transition first and lazy ones put it
/// last, so the order of a closure says which ways of matching are preferred.
pub struct Nfa<T> {
    states: Vec<State<T>>,
    start: StateIdx,
    accept: StateIdx,
}

impl<T> Clone for Nfa<T> {
    fn clone(&self) -> Nfa<T> {
        Nfa {
            states: self.states.clone(),
            start: self.start,
            accept: self.accept,
        }
    }
}

impl<T> PartialEq for Nfa<T> {
    fn eq(&self, other: &Nfa<T>) -> bool {
        self.states == other.states && self.start == other.start && self.accept == other.accept
    }
}

impl<T> Nfa<T> {
    /// Creates a new `Nfa` that can `add_state()` `n` times without re-allocating.
    ///
    /// The new `Nfa` has no states, so it needs some before it can be run.
    fn with_capacity(n: usize) -> Nfa<T> {
        Nfa {
            states: Vec::with_capacity(n),
            start: 0,
            accept: 0,
        }
    }

    /// Adds a new state and returns its index.
    fn add_state(&mut self) -> StateIdx {
        let idx = self.states.len();
        self.states.push(State {
            eps: Vec::new(),
            consuming: Vec::new(),
            anchor: None,
        });
        idx
    }

    /// Adds an eps transition, with lower priority than all of `from`'s existing ones.
    fn add_eps(&mut self, from: StateIdx, to: StateIdx) {
        self.states[from].eps.push(to);
    }

    /// Adds a transition that moves from `from` to `to` on consuming an element satisfying
    /// `guard`.
    fn add_transition(&mut self, from: StateIdx, to: StateIdx, guard: Guard<T>) {
        self.states[from].consuming.push((guard, to));
    }

    fn set_anchor(&mut self, state: StateIdx, anchor: Anchor) {
        self.states[state].anchor = Some(anchor);
    }

    /// Returns the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn start(&self) -> StateIdx {
        self.start
    }

    pub fn accept(&self) -> StateIdx {
        self.accept
    }

    /// Finds the set of states reachable from `seeds` using only eps transitions, at position
    /// `index` of an input of length `len` (or of unknown length, if `len` is `None`).
    ///
    /// A state whose anchor fails at this position is left out, and so is everything that can
    /// only be reached through it. The result is written to `out`, in order of discovery.
    ///
    /// Returns true if some `End` anchor failed only because `len` was unknown; in that case,
    /// computing the closure again once the length is known could give a bigger set.
    pub fn closure(&self,
                   seeds: &[StateIdx],
                   index: usize,
                   len: Option<usize>,
                   out: &mut StateSet,
                   scratch: &mut ClosureScratch)
    -> bool {
        let ClosureScratch { ref mut stack, ref mut blocked } = *scratch;
        let mut deferred = false;
        stack.clear();
        stack.extend(seeds.iter().cloned().rev());
        blocked.clear();

        out.clear();
        while let Some(idx) = stack.pop() {
            if out.contains(idx) || blocked.contains(idx) {
                continue;
            }

            let st = &self.states[idx];
            if let Some(anchor) = st.anchor {
                if !anchor.holds(index, len) {
                    deferred |= anchor == Anchor::End && len.is_none();
                    blocked.insert(idx);
                    continue;
                }
            }

            out.insert(idx);
            stack.extend(st.eps.iter().cloned().rev());
        }
        deferred
    }

    /// Feeds `elt` to every state in `active`, writing the states that accept it into `next`.
    ///
    /// Guards are evaluated in the order of `active`, and then in the order that the transitions
    /// were added.
    pub fn step(&self, active: &StateSet, elt: &T, next: &mut StateSet) {
        next.clear();
        for &idx in active.iter() {
            for &(ref guard, target) in &self.states[idx].consuming {
                if guard.accepts(elt) {
                    next.insert(target);
                }
            }
        }
    }
}

impl<T> Debug for Nfa<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Nfa ({} states, start {}, accept {}):\n",
               self.states.len(), self.start, self.accept)?;

        for (st_idx, st) in self.states.iter().enumerate().take(40) {
            write!(f, "\tState {}", st_idx)?;
            if let Some(anchor) = st.anchor {
                write!(f, " ({:?})", anchor)?;
            }
            f.write_str(":\n")?;

            if !st.eps.is_empty() {
                write!(f, "\t\tEps: {}\n", st.eps.iter().join(", "))?;
            }
            for &(ref guard, target) in &st.consuming {
                write!(f, "\t\t{:?} => {}\n", guard, target)?;
            }
        }
        if self.states.len() > 40 {
            write!(f, "\t... ({} more states)\n", self.states.len() - 40)?;
        }
        Ok(())
    }
}
