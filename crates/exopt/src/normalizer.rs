use std::rc::Rc;

use smallvec::SmallVec;

use crate::{
    DEFAULT_MAX_DEPTH,
    error::Error,
    expr::{BinaryOp, Expr, Node},
};

/// Flattened operand chain of one commutative operator.
type Terms = SmallVec<[Rc<Node>; 8]>;

/// Rewrites associative/commutative operator chains into one deterministic
/// canonical shape.
///
/// `Plus` and `Multiply` chains are flattened across same-sign descendants,
/// sorted by the byte-wise order of each term's canonical rendering, and
/// rebuilt as a balanced tree of depth O(log n). `Minus`, `Divide` and
/// function applications keep their operand order and are rebuilt only when a
/// child actually changed. Two trees that differ only in the grouping or
/// permutation of a same-sign chain normalize to identical shape and leaf
/// order, which is what lets the interner merge them afterwards.
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_depth: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns a semantically equivalent expression in canonical form.
    ///
    /// Deterministic and referentially transparent: the same input always
    /// yields a tree with identical shape and leaf order.
    pub fn normalize(&self, node: &Rc<Node>) -> Result<Rc<Node>, Error> {
        self.normalize_at(node, 0)
    }

    fn normalize_at(&self, node: &Rc<Node>, depth: usize) -> Result<Rc<Node>, Error> {
        if depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        match &node.expr {
            Expr::Constant(_) | Expr::Variable(_) => Ok(Rc::clone(node)),
            Expr::Function(kind, argument) => {
                let normalized = self.normalize_at(argument, depth + 1)?;
                if Rc::ptr_eq(&normalized, argument) {
                    Ok(Rc::clone(node))
                } else {
                    Ok(Node::function(*kind, normalized))
                }
            }
            Expr::Binary(op, left, right) => {
                let l = self.normalize_at(left, depth + 1)?;
                let r = self.normalize_at(right, depth + 1)?;

                if op.is_commutative() {
                    // Children are canonical at this point; a normalized
                    // same-sign child re-flattens into already-normalized
                    // terms, so each collected term is canonical too.
                    let mut terms = Terms::new();
                    Self::collect_terms(&l, *op, &mut terms);
                    Self::collect_terms(&r, *op, &mut terms);
                    terms.sort_by_cached_key(|term| term.to_string());
                    Ok(Self::build_balanced(&terms, *op))
                } else if Rc::ptr_eq(&l, left) && Rc::ptr_eq(&r, right) {
                    Ok(Rc::clone(node))
                } else {
                    Ok(Node::binary(*op, l, r))
                }
            }
        }
    }

    /// Depth-first collection of the maximal same-sign chain rooted at
    /// `node`, discarding the original grouping.
    fn collect_terms(node: &Rc<Node>, op: BinaryOp, acc: &mut Terms) {
        match &node.expr {
            Expr::Binary(sign, left, right) if *sign == op => {
                Self::collect_terms(left, op, acc);
                Self::collect_terms(right, op, acc);
            }
            _ => acc.push(Rc::clone(node)),
        }
    }

    fn build_balanced(terms: &[Rc<Node>], op: BinaryOp) -> Rc<Node> {
        match terms.len() {
            0 => Node::constant(0),
            1 => Rc::clone(&terms[0]),
            len => Self::build_range(terms, 0, len - 1, op),
        }
    }

    // Midpoint split `(lo + hi) / 2`; the exact split is part of the
    // canonical shape and must not change across releases.
    fn build_range(terms: &[Rc<Node>], lo: usize, hi: usize, op: BinaryOp) -> Rc<Node> {
        if lo == hi {
            return Rc::clone(&terms[lo]);
        }
        let mid = (lo + hi) / 2;
        Node::binary(
            op,
            Self::build_range(terms, lo, mid, op),
            Self::build_range(terms, mid + 1, hi, op),
        )
    }
}
