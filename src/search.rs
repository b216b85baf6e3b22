//! Search for the cheapest repeated bit run.
//!
//! For a run length `length`, every anchor start `s` is scanned left to right.
//! The occurrences of `[s, s + length)` are collected greedily: a match at `i`
//! is recorded and the scan resumes at `i + length`, otherwise at `i + 1`.
//! Every non-empty occurrence list is costed and the cheapest one wins; ties
//! keep the first candidate found.
//!
//! [`SearchStrategy::Bisection`] ratchets over lengths: `low` always moves past
//! the tested length and `high` drops below it when nothing repeated. It tests
//! a handful of lengths and can miss the cheapest one.
//! [`SearchStrategy::Exhaustive`] tests every length from the longest down.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitstream::BitCursor;
use crate::candidate::Candidate;
use crate::stats::SearchStats;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    #[default]
    Bisection,
    Exhaustive,
}

/// Best candidate so far and its cost, threaded through the search.
#[derive(Debug, Clone)]
struct Best {
    candidate: Candidate,
    cost: usize,
}

fn runs_equal(
    a: &mut BitCursor<'_>,
    b: &mut BitCursor<'_>,
    x: usize,
    y: usize,
    length: usize,
) -> bool {
    a.set_position(x);
    b.set_position(y);
    (0..length).all(|_| a.next() == b.next())
}

/// Non-overlapping occurrences of the run `[start, start + length)` after its
/// own span.
pub fn scan_occurrences(
    input: &BitCursor<'_>,
    start: usize,
    length: usize,
    stats: &mut SearchStats,
) -> Vec<usize> {
    let input_bits = input.bit_len();
    let mut anchor = input.clone();
    let mut probe = input.clone();
    let mut occurrences = Vec::new();
    let mut i = start + length;
    while i + length <= input_bits {
        stats.comparisons += 1;
        if runs_equal(&mut anchor, &mut probe, start, i, length) {
            occurrences.push(i);
            i += length;
        } else {
            i += 1;
        }
    }
    occurrences
}

/// Keep `best` unless `candidate` is strictly cheaper.
fn consider(
    best: Option<Best>,
    candidate: Candidate,
    cost: usize,
    stats: &mut SearchStats,
) -> Option<Best> {
    stats.record_considered(cost);
    match best {
        Some(b) if b.cost <= cost => Some(b),
        _ => {
            debug!(
                start = candidate.start,
                length = candidate.length,
                occurrences = candidate.occurrences.len(),
                cost,
                "new best candidate"
            );
            stats.best_updates += 1;
            Some(Best { candidate, cost })
        }
    }
}

/// Scan every admissible start for one run length. Returns the updated best
/// and whether any start repeated at all.
///
/// With `prune`, a start is admissible only while
/// `start + length * max(1, k) < input_bits`, `k` being the occurrence count
/// of the current best.
fn scan_length(
    input: &BitCursor<'_>,
    length: usize,
    prune: bool,
    mut best: Option<Best>,
    stats: &mut SearchStats,
) -> (Option<Best>, bool) {
    let input_bits = input.bit_len();
    let mut repeated = false;
    let mut start = 0;
    loop {
        let k = match &best {
            Some(b) if prune => b.candidate.occurrences.len().max(1),
            _ => 1,
        };
        if start + length * k >= input_bits {
            break;
        }
        stats.starts_scanned += 1;
        let occurrences = scan_occurrences(input, start, length, stats);
        if !occurrences.is_empty() {
            repeated = true;
            let candidate = Candidate {
                start,
                length,
                occurrences,
            };
            let cost = candidate.cost(input_bits);
            best = consider(best, candidate, cost, stats);
        }
        start += 1;
    }
    (best, repeated)
}

fn bisect(input: &BitCursor<'_>, stats: &mut SearchStats) -> Option<Best> {
    let mut best = None;
    let mut low = 1;
    let mut high = input.bit_len() / 2;
    while low < high {
        let length = (low + high) / 2;
        stats.lengths_tested += 1;
        let (next, repeated) = scan_length(input, length, true, best, stats);
        debug!(length, low, high, repeated, "tested run length");
        best = next;
        if !repeated {
            high = length - 1;
        }
        low = length + 1;
    }
    best
}

fn exhaustive(input: &BitCursor<'_>, stats: &mut SearchStats) -> Option<Best> {
    let mut best = None;
    for length in (1..=input.bit_len() / 2).rev() {
        stats.lengths_tested += 1;
        let (next, _) = scan_length(input, length, false, best, stats);
        best = next;
    }
    best
}

/// Find the cheapest candidate over the bits covered by `input`, or `None`
/// when no tested run repeats.
pub fn find_best_candidate(
    input: &BitCursor<'_>,
    strategy: SearchStrategy,
    stats: &mut SearchStats,
) -> Option<Candidate> {
    let best = match strategy {
        SearchStrategy::Bisection => bisect(input, stats),
        SearchStrategy::Exhaustive => exhaustive(input, stats),
    };
    best.map(|b| b.candidate)
}
