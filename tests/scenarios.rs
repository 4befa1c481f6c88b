// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use regex_seq::{Error, Match, Matcher, Pattern};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::{Duration, Instant};

fn even() -> Pattern<i32> {
    Pattern::pred(|x: &i32| x % 2 == 0)
}

fn positive() -> Pattern<i32> {
    Pattern::pred(|x: &i32| *x > 0)
}

fn m<T>(start: usize, data: Vec<T>) -> Match<T> {
    Match { start: start, end: start + data.len() - 1, data: data }
}

// Runs the matcher both ways, checks that they agree, and returns the matches.
fn find_all(pat: &Pattern<i32>, input: &[i32]) -> Vec<Match<i32>> {
    let mat = Matcher::new(pat);
    let ret = mat.find_all(input);
    assert_eq!(ret, mat.find_all_stream(input.to_vec()));
    ret
}

#[test]
fn greedy_run_of_evens() {
    assert_eq!(find_all(&Pattern::one_or_more(even()), &[2, 4, 6, 3]),
               vec![m(0, vec![2, 4, 6])]);
}

#[test]
fn lazy_repeat_then_positive() {
    let pat = Pattern::seq(vec![Pattern::one_or_more(positive()).lazy(), positive()]);
    assert_eq!(find_all(&pat, &[1, 2, 3]), vec![m(0, vec![1, 2])]);
}

#[test]
fn end_anchor_in_stream() {
    let mat = Matcher::new(&Pattern::seq(vec![even(), Pattern::end()]));
    let mut scanner = mat.scanner();
    for &x in &[1, 3, 4] {
        assert_eq!(scanner.push(x), vec![]);
    }
    assert_eq!(scanner.end(), vec![m(2, vec![4])]);
    assert_eq!(mat.find_all(&[1, 3, 4]), vec![m(2, vec![4])]);
}

#[test]
fn single_predicate() {
    assert_eq!(find_all(&even(), &[1, 2, 3, 4, 5, 6]),
               vec![m(1, vec![2]), m(3, vec![4]), m(5, vec![6])]);
}

#[test]
fn empty_one_of() {
    assert_eq!(Pattern::<i32>::one_of(vec![]).unwrap_err(), Error::EmptyAlternation);
}

#[test]
fn one_of() {
    let pat = Pattern::one_of(vec![
        Pattern::seq(vec![even(), even()]),
        Pattern::seq(vec![even(), positive()]),
        Pattern::start(),
    ]).unwrap();
    assert_eq!(find_all(&pat, &[2, 1, 4, 6, -2]), vec![m(0, vec![2, 1]), m(2, vec![4, 6])]);
}

#[test]
fn whole_input() {
    let pat = Pattern::seq(vec![
        Pattern::start(),
        Pattern::zero_or_more(Pattern::any()),
        Pattern::end(),
    ]);
    assert_eq!(find_all(&pat, &[5, 6, 7]), vec![m(0, vec![5, 6, 7])]);
    assert_eq!(find_all(&pat, &[]), vec![]);
}

#[test]
fn elements_need_not_be_numbers() {
    let word = |w: &'static str| Pattern::pred(move |x: &&str| *x == w);
    let pat = Pattern::seq(vec![
        word("the"),
        Pattern::lazy_repeat(Pattern::any(), 0, Some(2)),
        word("dog"),
    ]);
    let mat = Matcher::new(&pat);
    let text = vec!["the", "quick", "dog", "the", "lazy", "brown", "dog", "the", "dog"];
    assert_eq!(mat.find_all(&text),
               vec![m(0, vec!["the", "quick", "dog"]),
                    m(3, vec!["the", "lazy", "brown", "dog"]),
                    m(7, vec!["the", "dog"])]);
}

// Predicates can communicate through shared state, as long as they only depend on the order in
// which they are evaluated.
#[test]
fn stateful_predicates() {
    let last = Rc::new(Cell::new(0));
    let remember = {
        let last = last.clone();
        Pattern::pred(move |x: &i32| {
            last.set(*x);
            true
        })
    };
    let same = Pattern::pred(move |x: &i32| *x == last.get());
    let pat = Pattern::seq(vec![remember, same]);

    assert_eq!(find_all(&pat, &[1, 2, 2, 3, 4, 4]), vec![m(1, vec![2, 2]), m(4, vec![4, 4])]);
}

// A panicking predicate aborts whatever was running it, whether that is a batch search, `push`
// or `end`.
#[test]
fn panicking_predicates_propagate() {
    let armed = Rc::new(Cell::new(false));
    let touchy = {
        let armed = armed.clone();
        Pattern::pred(move |x: &i32| {
            if armed.get() && *x == 7 {
                panic!("found a seven");
            }
            *x > 0
        })
    };
    // Two `any`s after the first element keep the attempt at 0 alive, so that its match is only
    // emitted (and the 7 replayed) once the input ends.
    let pat = Pattern::seq(vec![
        touchy,
        Pattern::optional(Pattern::seq(vec![Pattern::any(), Pattern::any()])),
    ]);
    let mat = Matcher::new(&pat);
    assert_eq!(find_all(&pat, &[1, 7]), vec![m(0, vec![1]), m(1, vec![7])]);

    armed.set(true);
    assert!(panic::catch_unwind(AssertUnwindSafe(|| mat.find_all(&[1, 7]))).is_err());

    let mut scanner = mat.scanner();
    assert!(panic::catch_unwind(AssertUnwindSafe(|| scanner.push(7))).is_err());

    armed.set(false);
    let mut scanner = mat.scanner();
    assert_eq!(scanner.push(1), vec![]);
    assert_eq!(scanner.push(7), vec![]);
    armed.set(true);
    assert!(panic::catch_unwind(AssertUnwindSafe(|| scanner.end())).is_err());
}

// `(x+)+(x+)+(x+)+y` against a long run of `x`s, with no `y`: a backtracking matcher would take
// exponential time here.
#[test]
fn nested_repeats_are_fast() {
    let x = || Pattern::pred(|c: &char| *c == 'x');
    let group = || Pattern::one_or_more(Pattern::one_or_more(x()));
    let pat = Pattern::seq(vec![group(), group(), group(), Pattern::pred(|c: &char| *c == 'y')]);
    let mat = Matcher::new(&pat);
    let input = vec!['x'; 500];

    let now = Instant::now();
    assert_eq!(mat.find_all(&input), vec![]);
    assert_eq!(mat.find_all_stream(input), vec![]);
    assert!(now.elapsed() < Duration::from_secs(30));
}
