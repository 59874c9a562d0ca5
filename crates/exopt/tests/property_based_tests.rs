//! Property-based tests for the canonicalization and interning pipeline.

use std::rc::Rc;

use exopt::{BinaryOp, Expr, FuncKind, Node, Normalizer, optimize};
use proptest::prelude::*;

mod strategies {
    use super::*;

    pub fn binary_op() -> impl Strategy<Value = BinaryOp> {
        prop_oneof![
            Just(BinaryOp::Plus),
            Just(BinaryOp::Minus),
            Just(BinaryOp::Multiply),
            Just(BinaryOp::Divide),
        ]
    }

    pub fn func_kind() -> impl Strategy<Value = FuncKind> {
        prop_oneof![Just(FuncKind::Sin), Just(FuncKind::Cos), Just(FuncKind::Max)]
    }

    pub fn leaf() -> impl Strategy<Value = Rc<Node>> {
        prop_oneof![
            (-100i64..=100).prop_map(Node::constant),
            prop::sample::select(vec!["a", "b", "c", "x", "y", "z"]).prop_map(Node::variable),
        ]
    }

    /// Arbitrary well-formed trees up to depth 6.
    pub fn expr() -> impl Strategy<Value = Rc<Node>> {
        leaf().prop_recursive(6, 64, 2, |inner| {
            prop_oneof![
                (binary_op(), inner.clone(), inner.clone())
                    .prop_map(|(op, left, right)| Node::binary(op, left, right)),
                (func_kind(), inner).prop_map(|(kind, argument)| Node::function(kind, argument)),
            ]
        })
    }
}

/// Renderings of all leaves, sorted: the multiset normalization must preserve.
fn leaf_multiset(root: &Rc<Node>, acc: &mut Vec<String>) {
    match &root.expr {
        Expr::Constant(_) | Expr::Variable(_) => acc.push(root.to_string()),
        Expr::Function(_, argument) => leaf_multiset(argument, acc),
        Expr::Binary(_, left, right) => {
            leaf_multiset(left, acc);
            leaf_multiset(right, acc);
        }
    }
}

proptest! {
    #[test]
    fn optimize_is_idempotent(root in strategies::expr(), normalize in any::<bool>()) {
        let once = optimize(&root, normalize).unwrap();
        let twice = optimize(&once, normalize).unwrap();
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn interning_alone_preserves_structure(root in strategies::expr()) {
        let optimized = optimize(&root, false).unwrap();
        prop_assert_eq!(&optimized, &root);
    }

    #[test]
    fn normalization_is_deterministic(root in strategies::expr()) {
        let normalizer = Normalizer::new();
        let a = normalizer.normalize(&root).unwrap();
        let b = normalizer.normalize(&root).unwrap();
        prop_assert_eq!(a.to_string(), b.to_string());
        prop_assert_eq!(&a, &b);
    }

    #[test]
    fn normalization_is_idempotent(root in strategies::expr()) {
        let normalizer = Normalizer::new();
        let once = normalizer.normalize(&root).unwrap();
        let twice = normalizer.normalize(&once).unwrap();
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn normalization_preserves_leaf_multiset(root in strategies::expr()) {
        let normalized = Normalizer::new().normalize(&root).unwrap();
        let mut before = Vec::new();
        let mut after = Vec::new();
        leaf_multiset(&root, &mut before);
        leaf_multiset(&normalized, &mut after);
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn normalized_permutation_of_two_operands_merges(
        left in strategies::leaf(),
        right in strategies::leaf(),
    ) {
        let a = Node::binary(BinaryOp::Plus, Rc::clone(&left), Rc::clone(&right));
        let b = Node::binary(BinaryOp::Plus, right, left);
        let root = Node::binary(BinaryOp::Minus, a, b);
        let optimized = optimize(&root, true).unwrap();
        let Expr::Binary(_, l, r) = &optimized.expr else { unreachable!() };
        prop_assert!(Rc::ptr_eq(l, r));
    }
}
