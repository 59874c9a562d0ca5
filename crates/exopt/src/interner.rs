use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::{
    DEFAULT_MAX_DEPTH,
    error::Error,
    expr::{Expr, Node},
};

/// A hash-consing pool over expression nodes.
///
/// [`Interner::intern`] replaces every subtree with the pool-canonical
/// equivalent, bottom-up: within one pool, any two structurally equal
/// subtrees collapse to the same `Rc` allocation, so downstream code can use
/// `Rc::ptr_eq` instead of a recursive compare. The pool is scoped to this
/// instance; sharing across multiple trees only happens when the caller
/// reuses the interner across calls.
#[derive(Debug)]
pub struct Interner {
    pool: FxHashSet<Rc<Node>>,
    max_depth: usize,
}

impl Default for Interner {
    fn default() -> Self {
        Self {
            pool: FxHashSet::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            pool: FxHashSet::default(),
            max_depth,
        }
    }

    /// Returns the canonical instance for `node`, merging duplicates.
    ///
    /// The input is left untouched; its subtrees simply may not appear in the
    /// result when the pool already holds a structurally equal instance.
    pub fn intern(&mut self, node: &Rc<Node>) -> Result<Rc<Node>, Error> {
        self.intern_at(node, 0)
    }

    fn intern_at(&mut self, node: &Rc<Node>, depth: usize) -> Result<Rc<Node>, Error> {
        if depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        // Intern children first so the candidate references canonical
        // instances only; reuse the input node when nothing below moved.
        let candidate = match &node.expr {
            Expr::Constant(_) | Expr::Variable(_) => Rc::clone(node),
            Expr::Function(kind, argument) => {
                let arg = self.intern_at(argument, depth + 1)?;
                if Rc::ptr_eq(&arg, argument) {
                    Rc::clone(node)
                } else {
                    Node::function(*kind, arg)
                }
            }
            Expr::Binary(op, left, right) => {
                let l = self.intern_at(left, depth + 1)?;
                let r = self.intern_at(right, depth + 1)?;
                if Rc::ptr_eq(&l, left) && Rc::ptr_eq(&r, right) {
                    Rc::clone(node)
                } else {
                    Node::binary(*op, l, r)
                }
            }
        };

        Ok(self.canonical(candidate))
    }

    fn canonical(&mut self, candidate: Rc<Node>) -> Rc<Node> {
        if let Some(existing) = self.pool.get(&candidate) {
            return Rc::clone(existing);
        }
        self.pool.insert(Rc::clone(&candidate));
        candidate
    }

    /// Number of canonical nodes in the pool.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}
