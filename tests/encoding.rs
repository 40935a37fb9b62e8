//! End-to-end tests: models of an encoding are exactly the valid trial sequences.

mod common;

use std::collections::HashSet;

use num_bigint::BigUint;

use design_cnf::block::{allocate_vars, get_shaped_levels, HlBlock};
use design_cnf::design::DesignNode;
use design_cnf::encode::{encode, EncodeConfig};
use design_cnf::lower::EntangleMode;
use design_cnf::metrics::DesignMetrics;
use design_cnf::store::Store;

use common::{all_models, propagate};

use test_log::test;

fn config(entangle: EntangleMode) -> EncodeConfig {
    EncodeConfig {
        entangle,
        ..EncodeConfig::default()
    }
}

fn sequences(block: &HlBlock, entangle: EntangleMode) -> Vec<Vec<Vec<String>>> {
    let encoding = encode(block, &config(entangle)).unwrap();
    all_models(encoding.store())
        .iter()
        .map(|model| {
            encoding
                .decode(model)
                .unwrap()
                .into_iter()
                .map(|trial| trial.into_iter().map(String::from).collect())
                .collect()
        })
        .collect()
}

#[test]
fn single_factor_has_two_orderings() {
    let block = HlBlock::fully_crossed(vec![DesignNode::factor("color", ["red", "blue"])], &["color"]).unwrap();
    for mode in [EntangleMode::Iff, EntangleMode::Implies] {
        let seqs: HashSet<Vec<Vec<String>>> = sequences(&block, mode).into_iter().collect();
        let expected: HashSet<Vec<Vec<String>>> = [
            vec![vec!["red".to_string()], vec!["blue".to_string()]],
            vec![vec!["blue".to_string()], vec!["red".to_string()]],
        ]
        .into_iter()
        .collect();
        assert_eq!(seqs, expected);
    }
}

#[test]
fn three_levels_yield_all_permutations() {
    let block = HlBlock::fully_crossed(vec![DesignNode::factor("shape", ["circle", "square", "star"])], &["shape"]).unwrap();
    for mode in [EntangleMode::Iff, EntangleMode::Implies] {
        let seqs = sequences(&block, mode);
        assert_eq!(seqs.len(), 6);
        let distinct: HashSet<_> = seqs.iter().collect();
        assert_eq!(distinct.len(), 6, "each model must be a distinct sequence");
        for seq in &seqs {
            let levels: HashSet<&str> = seq.iter().map(|t| t[0].as_str()).collect();
            assert_eq!(levels.len(), 3);
        }
    }
}

#[test]
fn uncrossed_factor_is_free() {
    let design = vec![
        DesignNode::factor("color", ["red", "blue"]),
        DesignNode::factor("size", ["small", "large"]),
    ];
    let block = HlBlock::fully_crossed(design, &["color"]).unwrap();
    let seqs = sequences(&block, EntangleMode::Iff);
    assert_eq!(seqs.len(), 8);

    let encoding = encode(&block, &EncodeConfig::default()).unwrap();
    let metrics = DesignMetrics::collect(&encoding);
    assert_eq!(metrics.sequence_count, Some(BigUint::from(seqs.len())));
}

#[test]
fn nested_levels_count_as_leaves() {
    let tone = DesignNode::group(
        "tone",
        vec![DesignNode::factor("low", ["c", "d"]), DesignNode::leaf("high")],
    );
    let block = HlBlock::fully_crossed(vec![tone], &["tone"]).unwrap();
    let seqs = sequences(&block, EntangleMode::Iff);
    assert_eq!(seqs.len(), 6);
    assert!(seqs.contains(&vec![vec!["high".to_string()], vec!["c".to_string()], vec!["d".to_string()]]));
}

#[test]
fn two_by_two_crossing_accepts_exactly_permutations() {
    let design = vec![
        DesignNode::factor("color", ["red", "blue"]),
        DesignNode::factor("text", ["red", "blue"]),
    ];
    let block = HlBlock::fully_crossed(design, &["color", "text"]).unwrap();
    let encoding = encode(&block, &config(EntangleMode::Iff)).unwrap();
    let shaped = get_shaped_levels(encoding.il_block());

    let mut accepted = 0;
    // Each trial picks one of 4 (color, text) combinations.
    for code in 0..4u32.pow(4) {
        let picks: Vec<u32> = (0..4).map(|t| (code >> (2 * t)) & 3).collect();
        let mut assumptions = Vec::new();
        for (t, &pick) in picks.iter().enumerate() {
            let choice = [(pick >> 1) as usize, (pick & 1) as usize];
            for (f, &level) in choice.iter().enumerate() {
                for (l, v) in shaped[t][f].iter().enumerate() {
                    let lit = v.id() as i32;
                    assumptions.push(if l == level { lit } else { -lit });
                }
            }
        }

        let distinct: HashSet<u32> = picks.iter().copied().collect();
        match propagate(encoding.store(), &assumptions) {
            Some(values) => {
                assert_eq!(distinct.len(), 4, "accepted a repeated combination: {:?}", picks);
                assert!(values[1..].iter().all(Option::is_some));
                accepted += 1;
            }
            None => assert!(distinct.len() < 4, "rejected a permutation: {:?}", picks),
        }
    }
    assert_eq!(accepted, 24);
}

#[test]
fn shaped_levels_round_trip() {
    let design = vec![
        DesignNode::factor("a", ["1", "2", "3"]),
        DesignNode::group("b", vec![DesignNode::factor("b1", ["x"]), DesignNode::factor("b2", ["y", "z"])]),
    ];
    let block = HlBlock::fully_crossed(design, &["a", "b"]).unwrap();
    let il = allocate_vars(&block, &mut Store::new(7));
    let shaped = get_shaped_levels(&il);
    assert_eq!(shaped.len(), il.num_trials());

    let mut seen = HashSet::new();
    let mut total = 0;
    for trial in &shaped {
        for group in trial {
            for pair in group.windows(2) {
                assert_eq!(pair[0].id() + 1, pair[1].id());
            }
            for v in group {
                assert!(v.id() >= il.start_addr() && v.id() <= il.end_addr());
                assert!(seen.insert(*v));
            }
            total += group.len();
        }
    }
    assert_eq!(total, (il.end_addr() - il.start_addr() + 1) as usize);
}
