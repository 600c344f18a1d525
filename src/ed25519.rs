//! ed25519 side of the proof: compressed Edwards-Y point codec, the fixed
//! Pedersen blinding base, and a Schnorr signature bound to this protocol.
//!
//! The signature is not RFC 8032 EdDSA. Given secret scalar `s` and message
//! point `P`: `r = H512(enc(s))` reduced, `R = r*G`, `A = s*G`,
//! `c = H512(enc(R) || enc(A) || enc(P))` reduced, `S = r + c*s`, signature
//! `enc(R) || enc(S)`. Verification recomputes `c` and checks
//! `S*G - c*A == R`. Both sides of an exchange must use this exact
//! transcript.

use crate::{curve::Curve, error::Error};
use ark_ec::{twisted_edwards::TECurveConfig, AffineRepr, CurveGroup};
use ark_ff::{BigInteger, Field, MontFp, One, PrimeField, Zero};
use ark_ed25519::{EdwardsAffine, EdwardsConfig, Fq, Fr};
use ark_std::{rand::RngCore, vec::Vec};
use sha2::{Digest, Sha512};

/// Blinding base, fixed by the compressed encoding
/// `8b655970153799af2aeadc9ff1add0ea6c7251d54154cfa92c173a0dd39c1f94`.
/// Its discrete log relative to the generator is not known, and it lies in
/// the prime-order subgroup.
const ALT_GENERATOR_X: Fq =
    MontFp!("44115840154693352731557989475342686826820046586146704265789981914775973517427");
const ALT_GENERATOR_Y: Fq =
    MontFp!("9102111593045260626123023279363907201838477468971026384621755002289944880523");

impl Curve for EdwardsAffine {
    const BIT_SIZE: u64 = 252;
    const COMPRESSED_POINT_SIZE: usize = 32;

    fn alt_generator() -> Self {
        EdwardsAffine::new_unchecked(ALT_GENERATOR_X, ALT_GENERATOR_Y)
    }

    fn encode_point(&self) -> Vec<u8> {
        let (x, y) = if self.is_zero() {
            (Fq::zero(), Fq::one())
        } else {
            self.xy().expect("nonzero point has coordinates")
        };
        // y is below 2^255, leaving the top bit free for the parity of x
        let mut out = y.into_bigint().to_bytes_le();
        if x.into_bigint().is_odd() {
            out[31] |= 0x80;
        }
        out
    }

    fn decode_point(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::COMPRESSED_POINT_SIZE {
            return Err(Error::BadPointEncoding);
        }
        let x_odd = bytes[31] & 0x80 != 0;
        let mut y_bytes = [0u8; 32];
        y_bytes.copy_from_slice(bytes);
        y_bytes[31] &= 0x7f;
        let y = Fq::from_le_bytes_mod_order(&y_bytes);
        if y.into_bigint().to_bytes_le() != y_bytes {
            return Err(Error::BadPointEncoding);
        }
        // a*x^2 + y^2 = 1 + d*x^2*y^2 with a = -1, so
        // x^2 = (y^2 - 1) / (d*y^2 + 1)
        let y_sq = y.square();
        let denominator = EdwardsConfig::COEFF_D * y_sq + Fq::one();
        let x_sq = (y_sq - Fq::one())
            * denominator.inverse().ok_or(Error::BadPointEncoding)?;
        let mut x = x_sq.sqrt().ok_or(Error::BadPointEncoding)?;
        if x.is_zero() {
            if x_odd {
                return Err(Error::BadPointEncoding);
            }
        } else if x.into_bigint().is_odd() != x_odd {
            x = -x;
        }
        Ok(EdwardsAffine::new_unchecked(x, y))
    }

    fn sign<R: RngCore>(_rng: &mut R, secret: &Fr, message: &Self) -> Vec<u8> {
        // deterministic nonce, derived from the secret alone
        let r = Fr::from_be_bytes_mod_order(&Sha512::digest(Self::encode_scalar(secret)));
        let big_r = (EdwardsAffine::generator() * r).into_affine();
        let public = (EdwardsAffine::generator() * *secret).into_affine();
        let c = challenge(&big_r, &public, message);
        let s = r + c * secret;

        let mut signature = big_r.encode_point();
        signature.extend_from_slice(&Self::encode_scalar(&s));
        signature
    }

    fn verify_signature(public_key: &Self, message: &Self, signature: &[u8]) -> bool {
        if signature.len() != 64 {
            return false;
        }
        let big_r = match Self::decode_point(&signature[..32]) {
            Ok(point) => point,
            Err(_) => return false,
        };
        let s = match Self::decode_scalar(&signature[32..]) {
            Ok(scalar) => scalar,
            Err(_) => return false,
        };
        let c = challenge(&big_r, public_key, message);
        (EdwardsAffine::generator() * s - *public_key * c).into_affine() == big_r
    }
}

fn challenge(big_r: &EdwardsAffine, public_key: &EdwardsAffine, message: &EdwardsAffine) -> Fr {
    let mut preimage = big_r.encode_point();
    preimage.extend_from_slice(&public_key.encode_point());
    preimage.extend_from_slice(&message.encode_point());
    Fr::from_be_bytes_mod_order(&Sha512::digest(&preimage))
}
