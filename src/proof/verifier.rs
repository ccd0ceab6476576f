//! Groth16 Verifier
//!
//! The cryptographic gate in front of settlement. Holds the one verification
//! key installed at initialization and answers a single question per
//! artifact: does `e(A, B) == e(alpha, beta) * e(vk_x(signals), gamma) *
//! e(C, delta)` hold over BN254?
//!
//! The check is pure and deterministic, and its cost is a constant number of
//! pairings regardless of how large the proven computation was — that bound
//! is the whole reason a succinct proof can gate an escrow payout.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{prepare_verifying_key, Groth16, PreparedVerifyingKey, Proof, VerifyingKey};
use thiserror::Error;
use tracing::debug;

use crate::proof::wire::{parse_verification_key, ParseError, ProofArtifact};

/// Fixed-point scale linking the submitted price to the proof's first
/// public signal: `public_signals[0] == predicted_price * PRICE_SCALE`.
pub const PRICE_SCALE: u64 = 1000;

/// Proof decoded fine but failed verification, or could not be checked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProofError {
    /// The request requires a proof and none was attached.
    #[error("request requires a zero-knowledge proof but none was supplied")]
    Missing,

    /// No verification key has been installed yet.
    #[error("no verification key has been initialized")]
    VerifierNotInitialized,

    /// Signal count does not match the verification key.
    #[error("proof carries {got} public signals, verification key expects {expected}")]
    SignalCount {
        /// Signals the key's input commitments accommodate.
        expected: usize,
        /// Signals the artifact carried.
        got: usize,
    },

    /// `public_signals[0]` does not encode the submitted price.
    #[error("public_signals[0] does not equal predicted_price * {scale}")]
    ConsistencyMismatch {
        /// Scale the check was performed with.
        scale: u64,
    },

    /// The pairing equality does not hold.
    #[error("pairing check failed")]
    PairingCheckFailed,

    /// The arkworks backend rejected the inputs.
    #[error("verifier backend error: {0}")]
    Backend(String),
}

/// Immutable Groth16 verifier over BN254.
///
/// Owns the verification key for the lifetime of the market; replacing the
/// key means redeploying, never mutating in place.
#[derive(Clone, Debug)]
pub struct ProofVerifier {
    vk: VerifyingKey<Bn254>,
    pvk: PreparedVerifyingKey<Bn254>,
}

impl ProofVerifier {
    /// Build from an already-validated verifying key.
    pub fn new(vk: VerifyingKey<Bn254>) -> Self {
        let pvk = prepare_verifying_key(&vk);
        Self { vk, pvk }
    }

    /// Build from the JSON wire encoding of a verification key.
    pub fn from_wire(json: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse_verification_key(json)?))
    }

    /// Number of public signals every artifact must carry.
    pub fn public_signal_count(&self) -> usize {
        // one commitment base per signal, plus the constant term
        self.vk.gamma_abc_g1.len().saturating_sub(1)
    }

    /// Run the pairing check.
    ///
    /// Deterministic: identical artifacts always yield the identical
    /// boolean. `Ok(false)` means a well-formed proof that does not verify;
    /// `Err` means the artifact could not be checked at all.
    pub fn verify(&self, artifact: &ProofArtifact) -> Result<bool, ProofError> {
        let expected = self.public_signal_count();
        if artifact.public_signals.len() != expected {
            return Err(ProofError::SignalCount {
                expected,
                got: artifact.public_signals.len(),
            });
        }
        let proof = Proof {
            a: artifact.a,
            b: artifact.b,
            c: artifact.c,
        };
        let valid = Groth16::<Bn254>::verify_proof(&self.pvk, &proof, &artifact.public_signals)
            .map_err(|e| ProofError::Backend(e.to_string()))?;
        debug!(valid, signals = expected, "pairing check complete");
        Ok(valid)
    }
}

/// Check that the artifact's first public signal commits to the submitted
/// price: `public_signals[0] == predicted_price * scale`.
///
/// An empty signal vector fails the check; it never panics.
pub fn check_consistency(artifact: &ProofArtifact, predicted_price: u64, scale: u64) -> bool {
    match artifact.public_signals.first() {
        Some(first) => *first == Fr::from(predicted_price) * Fr::from(scale),
        None => false,
    }
}
