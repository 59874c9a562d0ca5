use std::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    rc::Rc,
};

use rustc_hash::FxHasher;
use smol_str::SmolStr;

/// The operator of a [`Expr::Binary`] node.
///
/// `Plus` and `Multiply` are associative and commutative; the normalizer may
/// reorder their operand chains. `Minus` and `Divide` are order-significant
/// and are never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn is_commutative(&self) -> bool {
        matches!(self, BinaryOp::Plus | BinaryOp::Multiply)
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            BinaryOp::Plus => write!(f, "Plus"),
            BinaryOp::Minus => write!(f, "Minus"),
            BinaryOp::Multiply => write!(f, "Multiply"),
            BinaryOp::Divide => write!(f, "Divide"),
        }
    }
}

/// The kind of a [`Expr::Function`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncKind {
    Sin,
    Cos,
    Max,
}

impl Display for FuncKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            FuncKind::Sin => write!(f, "Sin"),
            FuncKind::Cos => write!(f, "Cos"),
            FuncKind::Max => write!(f, "Max"),
        }
    }
}

/// The closed set of expression variants.
///
/// Every consumer dispatches with an exhaustive `match`, so adding a variant
/// here fails compilation of the normalizer, the interner, the hash
/// derivation and the rendering until they handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Constant(i64),
    Variable(SmolStr),
    Binary(BinaryOp, Rc<Node>, Rc<Node>),
    Function(FuncKind, Rc<Node>),
}

/// An immutable expression node carrying its structural hash.
///
/// The hash is derived once at construction from the variant tag, the scalar
/// fields and the child hashes, which makes pool lookups amortized O(1) plus
/// a shallow confirmation compare. Nodes are only built through the
/// [`Node::constant`], [`Node::variable`], [`Node::binary`] and
/// [`Node::function`] constructors, so the cached hash always matches `expr`.
#[derive(Debug, Clone)]
pub struct Node {
    pub expr: Expr,
    hash: u64,
}

impl Node {
    pub fn new(expr: Expr) -> Rc<Self> {
        let hash = structural_hash(&expr);
        Rc::new(Self { expr, hash })
    }

    pub fn constant(value: i64) -> Rc<Self> {
        Self::new(Expr::Constant(value))
    }

    pub fn variable(name: impl Into<SmolStr>) -> Rc<Self> {
        Self::new(Expr::Variable(name.into()))
    }

    pub fn binary(op: BinaryOp, left: Rc<Node>, right: Rc<Node>) -> Rc<Self> {
        Self::new(Expr::Binary(op, left, right))
    }

    pub fn function(kind: FuncKind, argument: Rc<Node>) -> Rc<Self> {
        Self::new(Expr::Function(kind, argument))
    }

    /// The precomputed structural hash of this subtree.
    pub fn structural_hash(&self) -> u64 {
        self.hash
    }
}

/// Structural equality: same variant, same scalar fields, children pairwise
/// equal in positional order. `Plus(x, 2)` and `Plus(2, x)` are not equal;
/// collapsing commutative order is the normalizer's job, not this one's.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || (self.hash == other.hash && self.expr == other.expr)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

// Variant tags mirror the historical hash layout (1..4). Child hashes are
// folded in as the cached values, so hashing a node never re-walks the tree.
fn structural_hash(expr: &Expr) -> u64 {
    let mut state = FxHasher::default();
    match expr {
        Expr::Constant(value) => {
            state.write_u8(1);
            state.write_i64(*value);
        }
        Expr::Variable(name) => {
            state.write_u8(2);
            state.write(name.as_bytes());
        }
        Expr::Function(kind, argument) => {
            state.write_u8(3);
            state.write_u8(*kind as u8);
            state.write_u64(argument.hash);
        }
        Expr::Binary(op, left, right) => {
            state.write_u8(4);
            state.write_u8(*op as u8);
            state.write_u64(left.hash);
            state.write_u64(right.hash);
        }
    }
    state.finish()
}

/// The canonical textual rendering.
///
/// The normalizer orders flattened terms by the byte-wise comparison of this
/// rendering, so its exact spelling is part of the canonical shape: changing
/// it changes which trees normalize to what.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match &self.expr {
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Function(kind, argument) => write!(f, "{}({})", kind, argument),
            Expr::Binary(op, left, right) => write!(f, "({} {} {})", left, op, right),
        }
    }
}
