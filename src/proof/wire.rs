//! Proof Wire Format
//!
//! Decodes the snarkjs-style JSON artifact a fulfiller submits:
//!
//! ```json
//! {
//!   "pi_a": ["..", ".."],
//!   "pi_b": [["..", ".."], ["..", ".."]],
//!   "pi_c": ["..", ".."],
//!   "public_signals": [".."]
//! }
//! ```
//!
//! Every string is one integer, accepted in either decimal or `0x`-prefixed
//! hex; both spellings of the same value normalize to the identical field
//! element. Coordinates must be below the BN254 base-field modulus, public
//! signals below the scalar-field modulus, and every decoded point must lie
//! on its curve and in the prime-order subgroup. Anything else is a
//! [`ParseError`], never a panic.

use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ff::{BigInteger, PrimeField};
use ark_groth16::VerifyingKey;
use num_bigint::BigUint;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Malformed proof or verification-key encoding.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The artifact is not structurally valid JSON for the schema
    /// (including wrong array lengths).
    #[error("malformed proof JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A string is neither a decimal nor a `0x`-hex integer.
    #[error("{context}: {value:?} is not a decimal or 0x-hex integer")]
    BadInteger {
        /// Which element was malformed (e.g. "pi_a[0]").
        context: String,
        /// The offending string, truncated for display.
        value: String,
    },

    /// The integer is not below the relevant field modulus.
    #[error("{context}: value is not below the field modulus")]
    NotInField {
        /// Which element was out of range.
        context: String,
    },

    /// The decoded coordinates do not satisfy the curve equation.
    #[error("{context}: point is not on the curve")]
    OffCurve {
        /// Which point failed.
        context: String,
    },

    /// The point is on the curve but outside the prime-order subgroup.
    #[error("{context}: point is not in the prime-order subgroup")]
    WrongSubgroup {
        /// Which point failed.
        context: String,
    },
}

/// Parsed and validated Groth16 artifact.
///
/// Constructed only by [`parse_proof`] (or directly in tests), consumed by
/// the verifier, and never persisted: after settlement only the boolean
/// verdicts survive, inside the request's fulfillment outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofArtifact {
    /// Proof element A (G1).
    pub a: G1Affine,
    /// Proof element B (G2).
    pub b: G2Affine,
    /// Proof element C (G1).
    pub c: G1Affine,
    /// Ordered public signals; index 0 carries the scaled price.
    pub public_signals: Vec<Fr>,
}

/// Proof artifact as it appears on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProofWire {
    /// A coordinates, exactly two strings.
    pub pi_a: [String; 2],
    /// B coordinates, exactly a 2×2 grid ([x_c0, x_c1], [y_c0, y_c1]).
    pub pi_b: [[String; 2]; 2],
    /// C coordinates, exactly two strings.
    pub pi_c: [String; 2],
    /// Public signal values.
    pub public_signals: Vec<String>,
}

/// Verification key as it appears on the wire (snarkjs naming).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationKeyWire {
    /// alpha (G1).
    pub vk_alpha_1: [String; 2],
    /// beta (G2).
    pub vk_beta_2: [[String; 2]; 2],
    /// gamma (G2).
    pub vk_gamma_2: [[String; 2]; 2],
    /// delta (G2).
    pub vk_delta_2: [[String; 2]; 2],
    /// Input-commitment bases (G1); length fixes the public-signal count
    /// at one less than this.
    pub ic: Vec<[String; 2]>,
}

/// Parse and validate a proof artifact from JSON.
pub fn parse_proof(json: &str) -> Result<ProofArtifact, ParseError> {
    let wire: ProofWire = serde_json::from_str(json)?;
    wire.to_artifact()
}

/// Parse and validate a verification key from JSON.
pub fn parse_verification_key(json: &str) -> Result<VerifyingKey<Bn254>, ParseError> {
    let wire: VerificationKeyWire = serde_json::from_str(json)?;
    wire.to_verifying_key()
}

impl ProofWire {
    /// Validate the wire strings into curve points and field elements.
    pub fn to_artifact(&self) -> Result<ProofArtifact, ParseError> {
        let a = parse_g1(&self.pi_a, "pi_a")?;
        let b = parse_g2(&self.pi_b, "pi_b")?;
        let c = parse_g1(&self.pi_c, "pi_c")?;
        let public_signals = self
            .public_signals
            .iter()
            .enumerate()
            .map(|(i, s)| parse_fr(s, &format!("public_signals[{}]", i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProofArtifact { a, b, c, public_signals })
    }

    /// Render an artifact back to wire form (decimal spellings).
    ///
    /// Used by fixtures and tooling; the settlement path only ever decodes.
    pub fn from_artifact(artifact: &ProofArtifact) -> Self {
        Self {
            pi_a: g1_to_wire(&artifact.a),
            pi_b: g2_to_wire(&artifact.b),
            pi_c: g1_to_wire(&artifact.c),
            public_signals: artifact
                .public_signals
                .iter()
                .map(|s| fr_to_decimal(s))
                .collect(),
        }
    }
}

impl VerificationKeyWire {
    /// Validate the wire strings into an arkworks verifying key.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey<Bn254>, ParseError> {
        let gamma_abc_g1 = self
            .ic
            .iter()
            .enumerate()
            .map(|(i, pair)| parse_g1(pair, &format!("ic[{}]", i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(VerifyingKey {
            alpha_g1: parse_g1(&self.vk_alpha_1, "vk_alpha_1")?,
            beta_g2: parse_g2(&self.vk_beta_2, "vk_beta_2")?,
            gamma_g2: parse_g2(&self.vk_gamma_2, "vk_gamma_2")?,
            delta_g2: parse_g2(&self.vk_delta_2, "vk_delta_2")?,
            gamma_abc_g1,
        })
    }

    /// Render a verifying key to wire form (decimal spellings).
    pub fn from_verifying_key(vk: &VerifyingKey<Bn254>) -> Self {
        Self {
            vk_alpha_1: g1_to_wire(&vk.alpha_g1),
            vk_beta_2: g2_to_wire(&vk.beta_g2),
            vk_gamma_2: g2_to_wire(&vk.gamma_g2),
            vk_delta_2: g2_to_wire(&vk.delta_g2),
            ic: vk.gamma_abc_g1.iter().map(g1_to_wire).collect(),
        }
    }
}

// =============================================================================
// STRING → FIELD ELEMENT
// =============================================================================

/// Decode one integer string, decimal or `0x`-hex.
fn parse_uint(s: &str, context: &str) -> Result<BigUint, ParseError> {
    let bad = || ParseError::BadInteger {
        context: context.to_string(),
        value: truncate_for_display(s),
    };

    let trimmed = s.trim();
    if let Some(hex_digits) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        if hex_digits.is_empty() {
            return Err(bad());
        }
        // hex::decode needs whole bytes; odd-length inputs get a leading 0
        let padded;
        let even = if hex_digits.len() % 2 == 0 {
            hex_digits
        } else {
            padded = format!("0{}", hex_digits);
            &padded
        };
        let bytes = hex::decode(even).map_err(|_| bad())?;
        Ok(BigUint::from_bytes_be(&bytes))
    } else {
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        BigUint::parse_bytes(trimmed.as_bytes(), 10).ok_or_else(bad)
    }
}

fn base_field_modulus() -> BigUint {
    BigUint::from_bytes_le(&Fq::MODULUS.to_bytes_le())
}

fn scalar_field_modulus() -> BigUint {
    BigUint::from_bytes_le(&Fr::MODULUS.to_bytes_le())
}

/// Base-field coordinate: decode, range-check against q, reduce.
fn parse_fq(s: &str, context: &str) -> Result<Fq, ParseError> {
    let value = parse_uint(s, context)?;
    if value >= base_field_modulus() {
        return Err(ParseError::NotInField {
            context: context.to_string(),
        });
    }
    Ok(Fq::from_le_bytes_mod_order(&value.to_bytes_le()))
}

/// Scalar-field signal: decode, range-check against r, reduce.
fn parse_fr(s: &str, context: &str) -> Result<Fr, ParseError> {
    let value = parse_uint(s, context)?;
    if value >= scalar_field_modulus() {
        return Err(ParseError::NotInField {
            context: context.to_string(),
        });
    }
    Ok(Fr::from_le_bytes_mod_order(&value.to_bytes_le()))
}

fn parse_g1(coords: &[String; 2], context: &str) -> Result<G1Affine, ParseError> {
    let x = parse_fq(&coords[0], &format!("{}[0]", context))?;
    let y = parse_fq(&coords[1], &format!("{}[1]", context))?;
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(ParseError::OffCurve {
            context: context.to_string(),
        });
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(ParseError::WrongSubgroup {
            context: context.to_string(),
        });
    }
    Ok(point)
}

fn parse_g2(coords: &[[String; 2]; 2], context: &str) -> Result<G2Affine, ParseError> {
    let x = Fq2::new(
        parse_fq(&coords[0][0], &format!("{}[0][0]", context))?,
        parse_fq(&coords[0][1], &format!("{}[0][1]", context))?,
    );
    let y = Fq2::new(
        parse_fq(&coords[1][0], &format!("{}[1][0]", context))?,
        parse_fq(&coords[1][1], &format!("{}[1][1]", context))?,
    );
    let point = G2Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(ParseError::OffCurve {
            context: context.to_string(),
        });
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(ParseError::WrongSubgroup {
            context: context.to_string(),
        });
    }
    Ok(point)
}

fn truncate_for_display(s: &str) -> String {
    const MAX: usize = 48;
    if s.len() <= MAX {
        s.to_string()
    } else {
        let mut end = MAX;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}

// =============================================================================
// FIELD ELEMENT → STRING
// =============================================================================

fn fq_to_decimal(v: &Fq) -> String {
    BigUint::from_bytes_le(&v.into_bigint().to_bytes_le()).to_string()
}

fn fr_to_decimal(v: &Fr) -> String {
    BigUint::from_bytes_le(&v.into_bigint().to_bytes_le()).to_string()
}

fn g1_to_wire(p: &G1Affine) -> [String; 2] {
    [fq_to_decimal(&p.x), fq_to_decimal(&p.y)]
}

fn g2_to_wire(p: &G2Affine) -> [[String; 2]; 2] {
    [
        [fq_to_decimal(&p.x.c0), fq_to_decimal(&p.x.c1)],
        [fq_to_decimal(&p.y.c0), fq_to_decimal(&p.y.c1)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::AffineRepr;
    use proptest::prelude::*;

    fn g1_generator_wire() -> [String; 2] {
        g1_to_wire(&G1Affine::generator())
    }

    fn g2_generator_wire() -> [[String; 2]; 2] {
        g2_to_wire(&G2Affine::generator())
    }

    fn valid_wire() -> ProofWire {
        ProofWire {
            pi_a: g1_generator_wire(),
            pi_b: g2_generator_wire(),
            pi_c: g1_generator_wire(),
            public_signals: vec!["542000000".to_string()],
        }
    }

    #[test]
    fn test_decimal_and_hex_normalize_identically() {
        assert_eq!(
            parse_fr("255", "t").unwrap(),
            parse_fr("0xff", "t").unwrap()
        );
        assert_eq!(
            parse_fr("255", "t").unwrap(),
            parse_fr("0XFF", "t").unwrap()
        );
        // odd-length hex
        assert_eq!(parse_fr("10", "t").unwrap(), parse_fr("0xa", "t").unwrap());
    }

    #[test]
    fn test_junk_integers_rejected() {
        for bad in ["", " ", "-1", "12.5", "0x", "0xzz", "ff", "1e9", "+3"] {
            assert!(
                matches!(parse_uint(bad, "t"), Err(ParseError::BadInteger { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_modulus_boundary() {
        let q = base_field_modulus();
        assert!(matches!(
            parse_fq(&q.to_string(), "t"),
            Err(ParseError::NotInField { .. })
        ));
        // q - 1 is in range
        parse_fq(&(q - 1u8).to_string(), "t").unwrap();

        let r = scalar_field_modulus();
        assert!(matches!(
            parse_fr(&r.to_string(), "t"),
            Err(ParseError::NotInField { .. })
        ));
    }

    #[test]
    fn test_valid_proof_parses() {
        let json = serde_json::to_string(&valid_wire()).unwrap();
        let artifact = parse_proof(&json).unwrap();
        assert_eq!(artifact.a, G1Affine::generator());
        assert_eq!(artifact.public_signals.len(), 1);
    }

    #[test]
    fn test_wrong_array_lengths_rejected() {
        // three coordinates for pi_a
        let json = r#"{
            "pi_a": ["1", "2", "1"],
            "pi_b": [["1","1"],["1","1"]],
            "pi_c": ["1", "2"],
            "public_signals": []
        }"#;
        assert!(matches!(parse_proof(json), Err(ParseError::Json(_))));

        // 2x1 grid for pi_b
        let json = r#"{
            "pi_a": ["1", "2"],
            "pi_b": [["1"],["1"]],
            "pi_c": ["1", "2"],
            "public_signals": []
        }"#;
        assert!(matches!(parse_proof(json), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_off_curve_point_rejected() {
        let mut wire = valid_wire();
        wire.pi_a = ["1".to_string(), "1".to_string()];
        let json = serde_json::to_string(&wire).unwrap();
        assert!(matches!(parse_proof(&json), Err(ParseError::OffCurve { .. })));
    }

    #[test]
    fn test_wire_round_trip_preserves_points() {
        let artifact = valid_wire().to_artifact().unwrap();
        let back = ProofWire::from_artifact(&artifact).to_artifact().unwrap();
        assert_eq!(artifact, back);
    }

    #[test]
    fn test_verification_key_wire() {
        let wire = VerificationKeyWire {
            vk_alpha_1: g1_generator_wire(),
            vk_beta_2: g2_generator_wire(),
            vk_gamma_2: g2_generator_wire(),
            vk_delta_2: g2_generator_wire(),
            ic: vec![g1_generator_wire(), g1_generator_wire()],
        };
        let vk = wire.to_verifying_key().unwrap();
        assert_eq!(vk.gamma_abc_g1.len(), 2);
        let round = VerificationKeyWire::from_verifying_key(&vk);
        assert_eq!(round.vk_alpha_1, wire.vk_alpha_1);
    }

    proptest! {
        #[test]
        fn prop_decimal_hex_agree(v in any::<u128>()) {
            let dec = v.to_string();
            let hex = format!("{:#x}", v);
            prop_assert_eq!(
                parse_fr(&dec, "t").unwrap(),
                parse_fr(&hex, "t").unwrap()
            );
        }

        #[test]
        fn prop_arbitrary_strings_never_panic(s in "\\PC*") {
            let _ = parse_uint(&s, "t");
        }

        #[test]
        fn prop_arbitrary_json_never_panics(s in "\\PC*") {
            let _ = parse_proof(&s);
        }
    }
}
