//! Huffman coding on top of the Fibonacci heap
//!
//! Leaves are keyed by `(frequency, sequence)`. The sequence number is the
//! order in which a tree entered the heap, so ties on frequency are broken
//! the same way on every run and the resulting codes are deterministic.
//!
//! # Example
//!
//! ```rust
//! use arena_fibonacci_heap::huffman::build_tree;
//!
//! let tree = build_tree([('a', 5), ('b', 2), ('c', 1)]).unwrap();
//! assert_eq!(tree.weight(), 8);
//!
//! let codes = tree.codes();
//! assert_eq!(codes.len(), 3);
//! // The most frequent symbol gets the shortest code.
//! let a = codes.iter().find(|(s, _)| **s == 'a').unwrap();
//! assert_eq!(a.1.len(), 1);
//! ```

use crate::fibonacci::FibonacciHeap;
use log::trace;

/// A Huffman code tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanTree<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanTree<S>>,
        right: Box<HuffmanTree<S>>,
    },
}

impl<S> HuffmanTree<S> {
    /// Total frequency below this node.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanTree::Leaf { weight, .. } | HuffmanTree::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanTree::Leaf { .. })
    }

    /// Code of every symbol, left edges are `'0'` and right edges `'1'`.
    ///
    /// Symbols are listed left to right. A tree holding a single symbol
    /// assigns it the code `"0"`.
    pub fn codes(&self) -> Vec<(&S, String)> {
        let mut codes = Vec::new();
        if let HuffmanTree::Leaf { symbol, .. } = self {
            codes.push((symbol, String::from("0")));
            return codes;
        }

        let mut stack = vec![(self, String::new())];
        while let Some((node, prefix)) = stack.pop() {
            match node {
                HuffmanTree::Leaf { symbol, .. } => codes.push((symbol, prefix)),
                HuffmanTree::Internal { left, right, .. } => {
                    stack.push((&**right, format!("{prefix}1")));
                    stack.push((&**left, format!("{prefix}0")));
                }
            }
        }
        codes
    }

    /// Sum of `frequency * code length` over all symbols.
    pub fn encoded_bits(&self) -> u64 {
        let mut total = 0u64;
        let mut stack = vec![(self, 0u64)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanTree::Leaf { weight, .. } => {
                    total = total.saturating_add(weight.saturating_mul(depth.max(1)));
                }
                HuffmanTree::Internal { left, right, .. } => {
                    stack.push((&**left, depth + 1));
                    stack.push((&**right, depth + 1));
                }
            }
        }
        total
    }
}

/// Builds an optimal prefix code tree from `(symbol, frequency)` pairs.
///
/// Returns `None` when there are no symbols.
pub fn build_tree<S>(symbols: impl IntoIterator<Item = (S, u64)>) -> Option<HuffmanTree<S>> {
    let mut heap: FibonacciHeap<(u64, u64), HuffmanTree<S>> = FibonacciHeap::new();
    let mut sequence = 0u64;

    for (symbol, weight) in symbols {
        heap.insert((weight, sequence), HuffmanTree::Leaf { symbol, weight });
        sequence += 1;
    }
    trace!("huffman: {} leaves", heap.len());

    while heap.len() > 1 {
        let ((w1, _), left) = heap.extract_min().ok()?;
        let ((w2, _), right) = heap.extract_min().ok()?;
        let weight = w1.saturating_add(w2);
        heap.insert(
            (weight, sequence),
            HuffmanTree::Internal {
                weight,
                left: Box::new(left),
                right: Box::new(right),
            },
        );
        sequence += 1;
    }

    heap.extract_min().ok().map(|(_, tree)| tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(build_tree(Vec::<(char, u64)>::new()), None);
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let tree = build_tree([("only", 3)]).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.codes(), vec![(&"only", String::from("0"))]);
        assert_eq!(tree.encoded_bits(), 3);
    }

    #[test]
    fn test_two_symbols_lower_frequency_goes_left() {
        let tree = build_tree([('x', 7), ('y', 2)]).unwrap();
        assert_eq!(
            tree.codes(),
            vec![(&'y', String::from("0")), (&'x', String::from("1"))]
        );
    }

    #[test]
    fn test_equal_frequencies_break_ties_by_arrival() {
        let tree = build_tree([('p', 1), ('q', 1)]).unwrap();
        assert_eq!(
            tree.codes(),
            vec![(&'p', String::from("0")), (&'q', String::from("1"))]
        );
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let tree = build_tree([('a', 45), ('b', 13), ('c', 12), ('d', 16), ('e', 9), ('f', 5)]).unwrap();
        let codes = tree.codes();

        for (i, (_, a)) in codes.iter().enumerate() {
            for (j, (_, b)) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{a} is a prefix of {b}");
                }
            }
        }
    }
}
