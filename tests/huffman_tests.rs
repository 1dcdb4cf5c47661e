//! Integration tests for Huffman coding
//!
//! Tests cover:
//! - The classic six-symbol table
//! - Degenerate tables (one symbol, equal frequencies)
//! - Encoding and decoding real text through both decoders
//! - Error reporting for bad input

use greedy_structures::huffman::{
    build_frequency_table, run_huffman, Bit, FrequencyTable, HuffmanNode, HuffmanTree,
};
use greedy_structures::EngineError;

fn classic() -> FrequencyTable<char> {
    FrequencyTable::from_counts([('a', 45), ('b', 13), ('c', 12), ('d', 16), ('e', 9), ('f', 5)])
        .unwrap()
}

// ============================================================================
// Tree shape
// ============================================================================

#[test]
fn test_classic_code_lengths() {
    let (tree, codebook) = run_huffman(&classic()).unwrap();

    assert_eq!(tree.total_frequency(), 100);
    assert_eq!(tree.len(), 11);
    assert_eq!(tree.weighted_path_length(), 224);

    let lengths: Vec<(char, usize)> = "abcdef"
        .chars()
        .map(|c| (c, codebook.get(&c).unwrap().len()))
        .collect();
    assert_eq!(
        lengths,
        vec![('a', 1), ('b', 3), ('c', 3), ('d', 3), ('e', 4), ('f', 4)]
    );
    assert!(codebook.is_prefix_free());
}

#[test]
fn test_parent_links_agree_with_codes() {
    let (tree, codebook) = run_huffman(&classic()).unwrap();

    for (id, node) in tree.nodes().iter().enumerate() {
        let HuffmanNode::Leaf { symbol, .. } = node else {
            continue;
        };
        let mut bits = Vec::new();
        let mut current = id;
        while let Some(parent) = tree.parent(current) {
            bits.push(tree.bit_label(current).unwrap());
            current = parent;
        }
        assert_eq!(current, tree.root());
        let code: String = bits.iter().rev().map(|b| b.as_char()).collect();
        assert_eq!(codebook.get(symbol), Some(code.as_str()));
    }
    assert_eq!(tree.bit_label(tree.root()), None);
}

#[test]
fn test_internal_frequency_is_sum_of_children() {
    let (tree, _) = run_huffman(&build_frequency_table("mississippi river".chars())).unwrap();
    for node in tree.nodes() {
        if let HuffmanNode::Internal {
            frequency,
            left,
            right,
        } = node
        {
            let sum = tree.node(*left).frequency() + tree.node(*right).frequency();
            assert_eq!(*frequency, sum);
            assert_eq!(tree.bit_label(*left), Some(Bit::Zero));
            assert_eq!(tree.bit_label(*right), Some(Bit::One));
        }
    }
}

// ============================================================================
// Degenerate tables
// ============================================================================

#[test]
fn test_single_symbol() {
    let table = build_frequency_table("zzzz".chars());
    let (tree, codebook) = run_huffman(&table).unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(codebook.get(&'z'), Some("0"));
    let bits = codebook.encode("zzzz".chars()).unwrap();
    assert_eq!(bits, "0000");
    assert_eq!(codebook.decode(&bits).unwrap(), vec!['z'; 4]);
    assert_eq!(tree.decode(&bits).unwrap(), vec!['z'; 4]);
}

#[test]
fn test_equal_frequencies_give_balanced_codes() {
    let table = build_frequency_table("abcdefgh".chars());
    let (_, codebook) = run_huffman(&table).unwrap();
    assert_eq!(codebook.len(), 8);
    assert!(codebook.entries().iter().all(|e| e.code.len() == 3));
}

#[test]
fn test_empty_table_rejected() {
    let table: FrequencyTable<char> = FrequencyTable::new();
    assert!(matches!(
        HuffmanTree::build(&table),
        Err(EngineError::EmptyFrequencyTable)
    ));
}

// ============================================================================
// Encoding real text
// ============================================================================

#[test]
fn test_text_round_trip() {
    let text = "the quick brown fox jumps over the lazy dog, again and again";
    let (tree, codebook) = run_huffman(&build_frequency_table(text.chars())).unwrap();

    let bits = codebook.encode(text.chars()).unwrap();
    assert_eq!(bits.len() as u64, tree.weighted_path_length());

    let via_book: String = codebook.decode(&bits).unwrap().into_iter().collect();
    let via_tree: String = tree.decode(&bits).unwrap().into_iter().collect();
    assert_eq!(via_book, text);
    assert_eq!(via_tree, text);
}

#[test]
fn test_words_as_symbols() {
    let words = "to be or not to be".split_whitespace();
    let (_, codebook) = run_huffman(&build_frequency_table(words.clone())).unwrap();
    let bits = codebook.encode(words.clone()).unwrap();
    assert_eq!(codebook.decode(&bits).unwrap(), words.collect::<Vec<_>>());
}

#[test]
fn test_encode_unknown_symbol() {
    let (_, codebook) = run_huffman(&classic()).unwrap();
    assert!(matches!(
        codebook.encode("abz".chars()),
        Err(EngineError::UnknownSymbol(_))
    ));
}

#[test]
fn test_decode_rejects_bad_input() {
    let (tree, codebook) = run_huffman(&classic()).unwrap();

    assert!(matches!(
        codebook.decode("01x"),
        Err(EngineError::InvalidEncoding { position: 2, .. })
    ));
    // "11" is the start of e's code
    assert!(matches!(
        codebook.decode("011"),
        Err(EngineError::InvalidEncoding { position: 1, .. })
    ));
    assert!(matches!(
        tree.decode("011"),
        Err(EngineError::InvalidEncoding { position: 1, .. })
    ));
}

#[test]
fn test_negative_frequency_rejected() {
    let err = FrequencyTable::from_counts([('a', 3), ('b', -1)]).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidFrequency { frequency: -1, .. }
    ));
}
