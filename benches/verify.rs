//! Verification-cost benchmark.
//!
//! The reason a succinct proof can gate an escrow payout is that the
//! pairing check costs the same no matter how large the proven computation
//! was. This bench proves proofs over circuits of very different sizes and
//! shows flat verification time across them.

use ark_bn254::{Bn254, Fr};
use ark_groth16::Groth16;
use ark_relations::{
    lc,
    r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError, Variable},
};
use ark_snark::SNARK;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use prediction_escrow::proof::wire::ProofArtifact;
use prediction_escrow::proof::verifier::ProofVerifier;
use prediction_escrow::PRICE_SCALE;

/// `price * PRICE_SCALE = signal`, padded with dummy constraints to stand
/// in for computations of different sizes.
#[derive(Clone)]
struct PaddedPriceCircuit {
    price: Option<Fr>,
    padding_constraints: usize,
}

impl ConstraintSynthesizer<Fr> for PaddedPriceCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let scaled = cs.new_input_variable(|| {
            self.price
                .map(|p| p * Fr::from(PRICE_SCALE))
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let price =
            cs.new_witness_variable(|| self.price.ok_or(SynthesisError::AssignmentMissing))?;
        cs.enforce_constraint(
            lc!() + (Fr::from(PRICE_SCALE), price),
            lc!() + Variable::One,
            lc!() + scaled,
        )?;
        for _ in 0..self.padding_constraints {
            let w = cs.new_witness_variable(|| Ok(Fr::from(1u64)))?;
            cs.enforce_constraint(lc!() + w, lc!() + Variable::One, lc!() + w)?;
        }
        Ok(())
    }
}

fn fixture(padding_constraints: usize) -> (ProofVerifier, ProofArtifact) {
    let mut rng = StdRng::seed_from_u64(42);
    let blank = PaddedPriceCircuit { price: None, padding_constraints };
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(blank, &mut rng).unwrap();

    let witness = PaddedPriceCircuit {
        price: Some(Fr::from(542u64)),
        padding_constraints,
    };
    let proof = Groth16::<Bn254>::prove(&pk, witness, &mut rng).unwrap();

    let artifact = ProofArtifact {
        a: proof.a,
        b: proof.b,
        c: proof.c,
        public_signals: vec![Fr::from(542u64) * Fr::from(PRICE_SCALE)],
    };
    (ProofVerifier::new(vk), artifact)
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("groth16_verify");
    for constraints in [1usize, 256, 4096] {
        let (verifier, artifact) = fixture(constraints);
        group.bench_with_input(
            BenchmarkId::from_parameter(constraints),
            &constraints,
            |b, _| {
                b.iter(|| verifier.verify(&artifact).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_verify);
criterion_main!(benches);
