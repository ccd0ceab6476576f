//! Proof Verification Module
//!
//! Everything between a fulfiller's JSON blob and a yes/no settlement
//! decision.
//!
//! - `wire`: snarkjs-style encoding, dual decimal/hex integers, curve checks
//! - `verifier`: the Groth16 pairing gate and the price-consistency check

pub mod wire;
pub mod verifier;

// Re-export key types
pub use wire::{
    ProofArtifact, ProofWire, VerificationKeyWire, ParseError, parse_proof,
    parse_verification_key,
};
pub use verifier::{ProofVerifier, ProofError, check_consistency, PRICE_SCALE};
