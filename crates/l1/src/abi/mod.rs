//! The `sol!` bindings for the logs and calls of the tracked contracts.

/// The calls of the rollup contract and of the price feed.
pub mod calls;
/// The logs of the rollup contract and of the global exit root manager.
pub mod logs;
