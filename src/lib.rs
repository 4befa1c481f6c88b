// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/*!
This crate provides regular-expression style matching over sequences of arbitrary elements. In
place of characters and character classes, a pattern is built out of predicates: functions that
look at a single element and say whether it fits.

A `Pattern` is compiled into an `Nfa`, which is run by simulating all of its states at once.
This means that the running time is always linear in the length of the input, even for patterns
like `(x+)+y` that make backtracking matchers explode.

The input can either be a slice (see `Matcher::find_all`) or it can arrive one element at a time
(see `Scanner`). Both ways give exactly the same results.

# Example: finding runs of even numbers

```rust
use regex_seq::{Match, Matcher, Pattern};

let evens = Pattern::one_or_more(Pattern::pred(|x: &i32| x % 2 == 0));
let matcher = Matcher::new(&evens);
assert_eq!(matcher.find_all(&[2, 4, 6, 3, 8]),
           vec![Match { start: 0, end: 2, data: vec![2, 4, 6] },
                Match { start: 4, end: 4, data: vec![8] }]);

// The same thing, but feeding the input one element at a time.
let mut scanner = matcher.scanner();
let mut matches = Vec::new();
for x in vec![2, 4, 6, 3, 8] {
    matches.extend(scanner.push(x));
}
matches.extend(scanner.end());
assert_eq!(matches, matcher.find_all(&[2, 4, 6, 3, 8]));
```

# Matching semantics

Matches are non-empty and non-overlapping, and they are found from left to right. At each
position, if every repetition in the pattern is greedy, we take the longest match starting there;
if any repetition is lazy, we take the shortest one. Alternation has no preference of its own.

Predicates are allowed to have side effects (for example, to remember something about an element
for a later predicate to look at). The only guarantee about them is that they are evaluated in
the same order every time, whether the input is a slice or a stream.
*/

extern crate bit_set;
extern crate itertools;
#[macro_use]
extern crate log;

mod error;
mod matcher;
mod nfa;
mod pattern;
mod runner;

pub use crate::error::{Error, Result};
pub use crate::matcher::Matcher;
pub use crate::nfa::{ClosureScratch, Nfa, StateIdx, StateSet};
pub use crate::pattern::{Anchor, Pattern, Predicate};
pub use crate::runner::Match;
pub use crate::runner::batch::Matches;
pub use crate::runner::scanner::Scanner;
