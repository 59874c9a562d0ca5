/// Errors surfaced by the normalizer, the interner and the optimizer.
///
/// Malformed trees (a binary or function node without a child) are
/// unrepresentable in the model, and an unhandled variant is a compile error
/// thanks to exhaustive matching over [`crate::Expr`], so the only runtime
/// failure left is blowing the configured recursion budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expression depth exceeds the configured limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}
