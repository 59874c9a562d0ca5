//! `exopt` canonicalizes arithmetic/trigonometric expression trees and
//! deduplicates structurally identical subtrees, so that semantically equal
//! fragments anywhere in one tree become one shared object.
//!
//! Two stages: an optional associative/commutative [`Normalizer`] that
//! rewrites `Plus`/`Multiply` chains into a deterministic flattened, sorted
//! and balanced shape, followed by an [`Interner`] (hash-consing pool) that
//! merges structurally equal nodes into single canonical `Rc` instances.
//!
//! ## Examples
//!
//! ```rust
//! use std::rc::Rc;
//! use exopt::{optimize, BinaryOp, Expr, Node};
//!
//! // (x + 2) * (x + 2): both factors intern to one shared node.
//! let factor = || Node::binary(BinaryOp::Plus, Node::variable("x"), Node::constant(2));
//! let product = Node::binary(BinaryOp::Multiply, factor(), factor());
//!
//! let optimized = optimize(&product, false).unwrap();
//! let Expr::Binary(_, left, right) = &optimized.expr else { unreachable!() };
//! assert!(Rc::ptr_eq(left, right));
//!
//! // (x + 2) and (2 + x) only merge when normalization is requested.
//! let a = Node::binary(BinaryOp::Plus, Node::variable("x"), Node::constant(2));
//! let b = Node::binary(BinaryOp::Plus, Node::constant(2), Node::variable("x"));
//! let root = Node::binary(BinaryOp::Minus, a, b);
//!
//! let optimized = optimize(&root, true).unwrap();
//! let Expr::Binary(_, left, right) = &optimized.expr else { unreachable!() };
//! assert!(Rc::ptr_eq(left, right));
//! ```

mod error;
mod expr;
mod interner;
mod normalizer;
mod optimizer;

use std::rc::Rc;

pub use error::Error;
pub use expr::{BinaryOp, Expr, FuncKind, Node};
pub use interner::Interner;
pub use normalizer::Normalizer;
pub use optimizer::{Optimizer, Options, optimize};

/// Recursion depth accepted by default; see [`Options::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 4096;

pub type OptimizeResult = Result<Rc<Node>, Error>;
