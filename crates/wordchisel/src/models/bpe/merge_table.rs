//! # Merge Table

use crate::types::{WCHashMap, hash_map_new};

/// A ranked merge rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRule {
    /// The rule's priority; lower merges first.
    pub rank: u32,

    /// The interned symbol of the merged string.
    pub merged: u32,
}

/// Interned merge symbols and the `(left, right) => rule` table.
///
/// Every left, right and merged string is interned; so a merged pair's
/// symbol can itself participate in later merges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeTable {
    symbols: WCHashMap<String, u32>,
    rules: WCHashMap<(u32, u32), MergeRule>,
}

impl MergeTable {
    /// Build a table from merge pairs, in rank order.
    ///
    /// A repeated pair takes the rank of its last occurrence.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut table = Self {
            symbols: hash_map_new(),
            rules: hash_map_new(),
        };
        for (rank, (left, right)) in pairs.into_iter().enumerate() {
            let (left, right) = (left.as_ref(), right.as_ref());
            let merged = table.intern(&format!("{left}{right}"));
            let key = (table.intern(left), table.intern(right));
            table.rules.insert(
                key,
                MergeRule {
                    rank: rank as u32,
                    merged,
                },
            );
        }
        table
    }

    fn intern(
        &mut self,
        symbol: &str,
    ) -> u32 {
        let next = self.symbols.len() as u32;
        *self.symbols.entry(symbol.to_string()).or_insert(next)
    }

    /// The number of merge rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up the interned symbol for a string.
    pub fn symbol(
        &self,
        text: &str,
    ) -> Option<u32> {
        self.symbols.get(text).copied()
    }

    /// Look up the rule merging `left` and `right`.
    pub fn lookup(
        &self,
        left: u32,
        right: u32,
    ) -> Option<MergeRule> {
        self.rules.get(&(left, right)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning() {
        let table = MergeTable::from_pairs([("a", "b"), ("ab", "c"), ("a", "b")]);
        assert_eq!(table.len(), 2);

        let a = table.symbol("a").unwrap();
        let b = table.symbol("b").unwrap();
        let ab = table.symbol("ab").unwrap();
        let c = table.symbol("c").unwrap();

        assert_eq!(table.lookup(a, b), Some(MergeRule { rank: 2, merged: ab }));
        assert_eq!(
            table.lookup(ab, c).map(|r| r.merged),
            table.symbol("abc")
        );
        assert_eq!(table.lookup(b, a), None);
        assert_eq!(table.symbol("zz"), None);
    }
}
