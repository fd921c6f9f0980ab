//! A reference model for differential testing and fuzzing.
//!
//! The model is a sorted `Vec` kept in the same order the tree must produce. Values are tagged
//! with an insertion sequence number and compared by key alone, so duplicate placement is checked
//! along with everything else.

use std::cmp::Ordering;

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::RbTree;

/// A key tagged with the order in which it was inserted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tagged {
    pub key: u32,
    pub seq: usize,
}

fn by_key(a: &Tagged, b: &Tagged) -> Ordering {
    a.key.cmp(&b.key)
}

type ModelTree = RbTree<Tagged, fn(&Tagged, &Tagged) -> Ordering>;

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Find(ItemValue),
    Min,
    Max,
    Count,
    InOrder,
}

impl Op {
    fn finalize(self, sorted: &[Tagged]) -> FinalOp {
        // `Index` picks an existing key so that duplicates and hits are common.
        fn get_value(v: &[Tagged], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()].key
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Find(item) => FinalOp::Find(get_value(sorted, item)),
            Op::Min => FinalOp::Min,
            Op::Max => FinalOp::Max,
            Op::Count => FinalOp::Count,
            Op::InOrder => FinalOp::InOrder,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Find(u32),
    Min,
    Max,
    Count,
    InOrder,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        3 => value_strategy().prop_map(Op::Insert),
        1 => value_strategy().prop_map(Op::Find),
        1 => Just(Op::Min),
        1 => Just(Op::Max),
        1 => Just(Op::Count),
        1 => Just(Op::InOrder),
    ]
}

/// Applies `ops` to both an [`RbTree`] and the model, asserting that they agree after every step
/// and that the tree's invariants hold throughout.
pub fn run_model_equivalence(ops: Vec<Op>) {
    let mut sorted: Vec<Tagged> = Vec::with_capacity(ops.len());
    let mut tree: ModelTree = RbTree::with_comparator(by_key);

    // Inserts after every element with an equal key.
    fn insert_sorted(v: &mut Vec<Tagged>, value: Tagged) {
        let idx = v.partition_point(|t| t.key <= value.key);
        v.insert(idx, value);
    }

    fn key_of(t: &Tagged) -> u32 {
        t.key
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted);

        match final_op {
            FinalOp::Insert(key) => {
                let value = Tagged { key, seq: op_id };
                insert_sorted(&mut sorted, value);

                let id = tree.insert(value);
                let node = tree.node(id).expect("returned id must be valid");
                assert_eq!(*node.value(), value, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Find(key) => {
                let probe = Tagged { key, seq: 0 };
                let from_model = sorted.iter().any(|t| t.key == key).then_some(key);
                let from_tree = tree.find(&probe).map(key_of);

                assert_eq!(from_model, from_tree, "FinalOp #{op_id}: {op:?}");
                assert_eq!(from_tree.is_some(), tree.contains(&probe));
            }

            FinalOp::Min => {
                assert_eq!(sorted.first(), tree.find_min(), "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Max => {
                assert_eq!(sorted.last(), tree.find_max(), "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Count => {
                assert_eq!(sorted.len(), tree.count_nodes(), "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::InOrder => {
                // Two walks between inserts must agree.
                let first: Vec<Tagged> = tree.in_order().copied().collect();
                let second: Vec<Tagged> = tree.in_order().copied().collect();
                assert_eq!(first, second, "FinalOp #{op_id}: {op:?}");
            }
        }

        tree.assert_invariants();
        assert_eq!(sorted.len(), tree.len());
        assert!(sorted.iter().eq(tree.iter()));
    }
}
