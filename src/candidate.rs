//! Repeated-run candidates and their cost model.

use serde::{Deserialize, Serialize};

use crate::varlen::encoded_width;

/// A bit run anchored at `start` together with the later, non-overlapping
/// places it repeats. All values are bit offsets or bit counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub start: usize,
    pub length: usize,
    /// Strictly increasing occurrence positions, each at least `length` bits
    /// past the previous span.
    pub occurrences: Vec<usize>,
}

impl Candidate {
    /// A run that never repeats saves nothing.
    pub fn is_viable(&self) -> bool {
        !self.occurrences.is_empty() && self.length > 0
    }

    /// Bits spent on the container header.
    pub fn header_bits(&self) -> usize {
        encoded_width(self.length)
            + encoded_width(self.occurrences.len())
            + self
                .occurrences
                .iter()
                .map(|&p| encoded_width(p))
                .sum::<usize>()
    }

    /// Exact container size in bits for an input of `input_bits`: header,
    /// literal run, and the input with the anchor and every occurrence span
    /// removed.
    pub fn cost(&self, input_bits: usize) -> usize {
        self.header_bits() + input_bits - self.length * self.occurrences.len()
    }

    /// Every excised span as `(start, end)`, anchor first.
    pub fn spans(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        std::iter::once(self.start)
            .chain(self.occurrences.iter().copied())
            .map(move |s| (s, s + self.length))
    }

    /// True when no two spans overlap and occurrences ascend.
    pub fn spans_disjoint(&self) -> bool {
        let spans: Vec<_> = self.spans().collect();
        spans.windows(2).all(|w| w[0].1 <= w[1].0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(start: usize, length: usize, occurrences: Vec<usize>) -> Candidate {
        Candidate {
            start,
            length,
            occurrences,
        }
    }

    #[test]
    fn cost_counts_header_and_remaining_bits() {
        let c = cand(0, 32, vec![32, 64, 96]);
        assert_eq!(c.header_bits(), 40);
        assert_eq!(c.cost(128), 72);
    }

    #[test]
    fn wide_positions_cost_more() {
        let c = cand(0, 4, vec![200]);
        assert_eq!(c.header_bits(), 8 + 8 + 16);
        assert_eq!(c.cost(256), 32 + 252);
    }

    #[test]
    fn empty_candidate_is_not_viable() {
        assert!(!cand(0, 8, vec![]).is_viable());
        assert!(cand(0, 8, vec![8]).is_viable());
    }

    #[test]
    fn span_checks() {
        assert!(cand(3, 5, vec![8, 20]).spans_disjoint());
        assert!(!cand(3, 5, vec![7]).spans_disjoint());
        assert!(!cand(0, 2, vec![10, 9]).spans_disjoint());
        let spans: Vec<_> = cand(1, 2, vec![4]).spans().collect();
        assert_eq!(spans, vec![(1, 3), (4, 6)]);
    }
}
