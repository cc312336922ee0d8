//! # Token Lattice

use core::ops::Range;

/// The best path found so far into a lattice position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BestEdge {
    score: f64,
    start: usize,
    piece: Option<usize>,
}

/// A Viterbi lattice over the char positions of one word.
///
/// Edges must be inserted in ascending start order, after every edge
/// ending at that start has been inserted; so the best path into a start
/// position is final when edges leave it.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenLattice {
    best: Vec<Option<BestEdge>>,
}

impl TokenLattice {
    /// Create a lattice over `len` chars.
    pub fn new(len: usize) -> Self {
        let mut best = vec![None; len + 1];
        best[0] = Some(BestEdge {
            score: 0.0,
            start: 0,
            piece: None,
        });
        Self { best }
    }

    /// The number of chars covered.
    pub fn len(&self) -> usize {
        self.best.len() - 1
    }

    /// Does the lattice cover no chars?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The best path score into `pos`, if `pos` is reachable.
    pub fn best_score(
        &self,
        pos: usize,
    ) -> Option<f64> {
        self.best.get(pos).copied().flatten().map(|e| e.score)
    }

    /// Insert an edge over chars `start..end`.
    ///
    /// The edge replaces the best path into `end` only when strictly better;
    /// ties keep the earlier-inserted edge. Edges leaving an unreachable
    /// start are ignored.
    ///
    /// ## Arguments
    /// * `start`, `end` - the char span.
    /// * `score` - the edge's own score.
    /// * `piece` - the vocabulary piece; `None` for an unknown span.
    pub fn insert(
        &mut self,
        start: usize,
        end: usize,
        score: f64,
        piece: Option<usize>,
    ) {
        let Some(base) = self.best_score(start) else {
            return;
        };
        let score = base + score;
        let slot = &mut self.best[end];
        if slot.is_none_or(|e| score > e.score) {
            *slot = Some(BestEdge {
                score,
                start,
                piece,
            });
        }
    }

    /// Backtrack the best full path.
    ///
    /// ## Returns
    /// The `(char span, piece)` edges of the path, left to right;
    /// or `None` if the end is unreachable.
    pub fn viterbi(&self) -> Option<Vec<(Range<usize>, Option<usize>)>> {
        let mut path = Vec::new();
        let mut pos = self.len();
        while pos > 0 {
            let edge = self.best[pos]?;
            path.push((edge.start..pos, edge.piece));
            pos = edge.start;
        }
        path.reverse();
        Some(path)
    }
}
