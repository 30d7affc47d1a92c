//! Bindings for the contracts of the zkEVM rollup deployed on L1.

pub mod abi;

mod constants;
pub use constants::*;
