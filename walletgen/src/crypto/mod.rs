//! Cryptographic primitives and operations
//!
//! Mnemonic generation and validation, seed stretching, hardened key
//! derivation and the per-chain key adapters.

pub mod mnemonic;
pub mod keys;

pub use mnemonic::*;
pub use keys::*;
