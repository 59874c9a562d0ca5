use std::rc::Rc;

use crate::{OptimizeResult, expr::Node, interner::Interner, normalizer::Normalizer};

/// Configuration for an [`Optimizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum recursion depth accepted by both passes. Inputs deeper than
    /// this fail with [`crate::Error::DepthLimitExceeded`].
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: crate::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Orchestrates the two-stage pipeline: optional canonical normalization,
/// then interning.
///
/// Each `Optimizer` owns its interning pool, so by default every instance is
/// a self-contained scope: subtrees are only merged with what this instance
/// has seen. Reusing the pool across several trees is explicit, via
/// [`Optimizer::with_interner`] and [`Optimizer::into_interner`] — never
/// implicit or global.
#[derive(Debug, Default)]
pub struct Optimizer {
    normalizer: Normalizer,
    interner: Interner,
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            normalizer: Normalizer::with_max_depth(options.max_depth),
            interner: Interner::with_max_depth(options.max_depth),
        }
    }

    /// Builds an optimizer over an existing pool, carrying canonical
    /// instances over from earlier runs.
    pub fn with_interner(interner: Interner) -> Self {
        Self {
            normalizer: Normalizer::new(),
            interner,
        }
    }

    /// Returns the canonical, maximally shared form of `node`.
    ///
    /// With `normalize` set, associative/commutative `Plus`/`Multiply` chains
    /// are first rewritten into their canonical shape, so all permutations of
    /// one chain merge to a single instance. Without it, only subtrees that
    /// are structurally identical as written are merged and operand order is
    /// preserved. The input tree is never modified.
    pub fn optimize(&mut self, node: &Rc<Node>, normalize: bool) -> OptimizeResult {
        let node = if normalize {
            self.normalizer.normalize(node)?
        } else {
            Rc::clone(node)
        };
        self.interner.intern(&node)
    }

    /// Releases the pool for reuse by a later optimizer.
    pub fn into_interner(self) -> Interner {
        self.interner
    }
}

/// Optimizes a single tree with a fresh, self-contained pool.
pub fn optimize(node: &Rc<Node>, normalize: bool) -> OptimizeResult {
    Optimizer::new().optimize(node, normalize)
}
