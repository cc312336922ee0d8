//! # Merge Heap
//!
//! Applies ranked merges to one word.
//!
//! The word's symbols live in an arena of doubly-linked nodes; candidate
//! pairs live in a min-heap keyed by `(rank, position)`. Merging a pair
//! retires both nodes, links in the merged node, and queues the merged
//! node's new neighbor pairs. Popped candidates whose nodes were retired,
//! or are no longer adjacent, are stale and skipped.

use core::{cmp::Ordering, ops::Range};

use dary_heap::OctonaryHeap;

use crate::{
    errors::{WCResult, WordchiselError},
    models::bpe::MergeTable,
};

#[derive(Debug, Clone)]
struct MergeNode {
    range: Range<usize>,
    symbol: Option<u32>,
    position: u32,
    prev: Option<usize>,
    next: Option<usize>,
    live: bool,
}

#[derive(Debug, Clone, Copy)]
struct MergeCandidate {
    rank: u32,
    position: u32,
    left: usize,
    right: usize,
    merged: u32,
}

impl MergeCandidate {
    /// The candidate key.
    ///
    /// Min-heap by rank; ties go to the leftmost original position.
    fn heap_key(&self) -> (u32, u32, usize) {
        (self.rank, self.position, self.left)
    }
}

impl PartialEq for MergeCandidate {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl Eq for MergeCandidate {}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeCandidate {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        // Reversed; `OctonaryHeap` is a max-heap.
        other.heap_key().cmp(&self.heap_key())
    }
}

struct MergeState<'a> {
    table: &'a MergeTable,
    nodes: Vec<MergeNode>,
    heap: OctonaryHeap<MergeCandidate>,
}

impl MergeState<'_> {
    fn queue_pair(
        &mut self,
        left: usize,
    ) {
        let node = &self.nodes[left];
        let Some(right) = node.next else {
            return;
        };
        let (Some(a), Some(b)) = (node.symbol, self.nodes[right].symbol) else {
            return;
        };
        if let Some(rule) = self.table.lookup(a, b) {
            self.heap.push(MergeCandidate {
                rank: rule.rank,
                position: node.position,
                left,
                right,
                merged: rule.merged,
            });
        }
    }

    fn is_stale(
        &self,
        candidate: &MergeCandidate,
    ) -> bool {
        let left = &self.nodes[candidate.left];
        !left.live || !self.nodes[candidate.right].live || left.next != Some(candidate.right)
    }
}

/// Merge the initial segments of `text` by rank.
///
/// ## Arguments
/// * `text` - the word text, including any end-of-word suffix.
/// * `segments` - the initial, adjacent byte ranges covering `text`.
/// * `table` - the merge rules.
///
/// ## Returns
/// The byte ranges of the final pieces, left to right.
pub fn merge_word(
    text: &str,
    segments: Vec<Range<usize>>,
    table: &MergeTable,
) -> WCResult<Vec<Range<usize>>> {
    if segments.len() < 2 {
        return Ok(segments);
    }

    let count = segments.len();
    let nodes: Vec<MergeNode> = segments
        .into_iter()
        .enumerate()
        .map(|(idx, range)| MergeNode {
            symbol: table.symbol(&text[range.clone()]),
            range,
            position: idx as u32,
            prev: idx.checked_sub(1),
            next: (idx + 1 < count).then_some(idx + 1),
            live: true,
        })
        .collect();

    let mut state = MergeState {
        table,
        heap: OctonaryHeap::with_capacity(count),
        nodes,
    };
    for idx in 0..count - 1 {
        state.queue_pair(idx);
    }

    let mut head = 0;
    while let Some(candidate) = state.heap.pop() {
        if state.is_stale(&candidate) {
            continue;
        }

        let left = state.nodes[candidate.left].clone();
        let right = state.nodes[candidate.right].clone();
        if left.range.end != right.range.start {
            return Err(WordchiselError::BpeInvariant(format!(
                "merged pieces are not adjacent: {:?} {:?}",
                left.range, right.range
            )));
        }

        let merged = state.nodes.len();
        state.nodes.push(MergeNode {
            range: left.range.start..right.range.end,
            symbol: Some(candidate.merged),
            position: left.position,
            prev: left.prev,
            next: right.next,
            live: true,
        });
        state.nodes[candidate.left].live = false;
        state.nodes[candidate.right].live = false;

        match left.prev {
            Some(prev) => state.nodes[prev].next = Some(merged),
            None => head = merged,
        }
        if let Some(next) = right.next {
            state.nodes[next].prev = Some(merged);
        }

        if let Some(prev) = left.prev {
            state.queue_pair(prev);
        }
        state.queue_pair(merged);
    }

    let mut pieces = Vec::new();
    let mut cursor = Some(head);
    while let Some(idx) = cursor {
        let node = &state.nodes[idx];
        pieces.push(node.range.clone());
        cursor = node.next;
    }
    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_segments(text: &str) -> Vec<Range<usize>> {
        text.char_indices()
            .map(|(idx, c)| idx..idx + c.len_utf8())
            .collect()
    }

    fn merge<'a>(
        text: &'a str,
        table: &MergeTable,
    ) -> Vec<&'a str> {
        merge_word(text, char_segments(text), table)
            .unwrap()
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn test_rank_order() {
        let table = MergeTable::from_pairs([
            ("l", "o"),
            ("lo", "w"),
            ("e", "r"),
            ("low", "er"),
        ]);
        assert_eq!(merge("lower", &table), vec!["lower"]);
        assert_eq!(merge("lowest", &table), vec!["low", "e", "s", "t"]);
        assert_eq!(merge("", &table), Vec::<&str>::new());
        assert_eq!(merge("x", &table), vec!["x"]);
    }

    #[test]
    fn test_leftmost_tie_break() {
        let table = MergeTable::from_pairs([("a", "a")]);
        assert_eq!(merge("aaa", &table), vec!["aa", "a"]);
        assert_eq!(merge("aaaa", &table), vec!["aa", "aa"]);
    }

    #[test]
    fn test_stale_candidates_skipped() {
        // "b c" outranks "a b"; the queued "a b" candidate goes stale.
        let table = MergeTable::from_pairs([("b", "c"), ("a", "b"), ("a", "bc")]);
        assert_eq!(merge("abc", &table), vec!["abc"]);
    }

    #[test]
    fn test_multibyte_segments() {
        let table = MergeTable::from_pairs([("é", "t"), ("ét", "é")]);
        assert_eq!(merge("été", &table), vec!["été"]);
    }

    #[test]
    fn test_non_adjacent_segments() {
        let table = MergeTable::from_pairs([("a", "c")]);
        assert!(matches!(
            merge_word("abc", vec![0..1, 2..3], &table),
            Err(WordchiselError::BpeInvariant(_))
        ));
    }
}
