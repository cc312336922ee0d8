//! # Char Trie

use crate::types::{WCHashMap, hash_map_new};

#[derive(Debug, Clone, Default, PartialEq)]
struct TrieNode {
    children: WCHashMap<char, usize>,
    value: Option<usize>,
}

/// A char-keyed prefix tree over vocabulary pieces.
///
/// Nodes live in an arena; node `0` is the root.
#[derive(Debug, Clone, PartialEq)]
pub struct CharTrie {
    nodes: Vec<TrieNode>,
}

impl Default for CharTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl CharTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode {
                children: hash_map_new(),
                value: None,
            }],
        }
    }

    /// Insert a piece, overwriting any previous value.
    pub fn insert(
        &mut self,
        piece: &str,
        value: usize,
    ) {
        let mut node = 0;
        for c in piece.chars() {
            node = match self.nodes[node].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(c, child);
                    child
                }
            };
        }
        self.nodes[node].value = Some(value);
    }

    /// Find every non-empty piece that is a prefix of `chars`.
    ///
    /// ## Returns
    /// `(char_len, value)` pairs, shortest first.
    pub fn common_prefix_search(
        &self,
        chars: &[char],
    ) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        let mut node = 0;
        for (idx, c) in chars.iter().enumerate() {
            match self.nodes[node].children.get(c) {
                Some(&child) => node = child,
                None => break,
            }
            if let Some(value) = self.nodes[node].value {
                found.push((idx + 1, value));
            }
        }
        found
    }
}
