//! secp256k1 side of the proof: SEC1 compressed point codec, the fixed
//! Pedersen blinding base, and ECDSA-SHA256 over the encoded message point.

use crate::{curve::Curve, error::Error};
use ark_ec::{short_weierstrass::SWCurveConfig, AffineRepr, CurveGroup};
use ark_ff::{BigInteger, Field, MontFp, PrimeField, Zero};
use ark_secp256k1::{Affine, Config, Fq, Fr};
use ark_std::{rand::RngCore, vec, vec::Vec, UniformRand};
use sha2::{Digest, Sha256};

/// SEC1 prefix of a compressed point with an even y coordinate.
const TAG_EVEN_Y: u8 = 0x02;
/// SEC1 prefix of a compressed point with an odd y coordinate.
const TAG_ODD_Y: u8 = 0x03;

/// Blinding base, fixed by the compressed encoding
/// `0250929b74c1a04954b78b4b6035e97a5e078a5a0f28ec96d547bfee9ace803ac0`.
/// Its discrete log relative to the generator is not known.
const ALT_GENERATOR_X: Fq =
    MontFp!("36444060476547731421425013472121489344383018981262552973668657287772036414144");
const ALT_GENERATOR_Y: Fq =
    MontFp!("22537504475708154238330251540244790414456712057027634449505794721772594235652");

impl Curve for Affine {
    const BIT_SIZE: u64 = 255;
    const COMPRESSED_POINT_SIZE: usize = 33;

    fn alt_generator() -> Self {
        Affine::new_unchecked(ALT_GENERATOR_X, ALT_GENERATOR_Y)
    }

    fn encode_point(&self) -> Vec<u8> {
        let mut out = vec![0u8; Self::COMPRESSED_POINT_SIZE];
        match self.xy() {
            Some((x, y)) => {
                out[0] = if y.into_bigint().is_odd() {
                    TAG_ODD_Y
                } else {
                    TAG_EVEN_Y
                };
                let x_bytes = x.into_bigint().to_bytes_be();
                out[Self::COMPRESSED_POINT_SIZE - x_bytes.len()..].copy_from_slice(&x_bytes);
            }
            // The protocol never signs or transmits the identity; keep the
            // output length fixed so transcripts stay well-formed.
            None => (),
        }
        out
    }

    fn decode_point(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::COMPRESSED_POINT_SIZE {
            return Err(Error::BadPointEncoding);
        }
        let y_odd = match bytes[0] {
            TAG_EVEN_Y => false,
            TAG_ODD_Y => true,
            _ => return Err(Error::BadPointEncoding),
        };
        let x = decode_base_field(&bytes[1..])?;
        let y_sq = x.square() * x + Config::COEFF_B;
        let mut y = y_sq.sqrt().ok_or(Error::BadPointEncoding)?;
        if y.into_bigint().is_odd() != y_odd {
            y = -y;
        }
        Ok(Affine::new_unchecked(x, y))
    }

    fn sign<R: RngCore>(rng: &mut R, secret: &Fr, message: &Self) -> Vec<u8> {
        let z = message_scalar(message);
        loop {
            let k = Fr::rand(rng);
            if k.is_zero() {
                continue;
            }
            let big_r = (Affine::generator() * k).into_affine();
            let r = match big_r.xy() {
                Some((x, _)) => base_field_to_scalar(&x),
                None => continue,
            };
            if r.is_zero() {
                continue;
            }
            let s = k.inverse().expect("k is nonzero") * (z + r * secret);
            if s.is_zero() {
                continue;
            }
            return der_encode(&r, &s);
        }
    }

    fn verify_signature(public_key: &Self, message: &Self, signature: &[u8]) -> bool {
        let (r, s) = match der_decode(signature) {
            Some(sig) => sig,
            None => return false,
        };
        if r.is_zero() || s.is_zero() {
            return false;
        }
        let s_inv = match s.inverse() {
            Some(inv) => inv,
            None => return false,
        };
        let z = message_scalar(message);
        let big_r = (Affine::generator() * (z * s_inv) + *public_key * (r * s_inv)).into_affine();
        match big_r.xy() {
            Some((x, _)) => base_field_to_scalar(&x) == r,
            None => false,
        }
    }
}

/// Big-endian bytes to a base field element, rejecting non-canonical input.
fn decode_base_field(bytes: &[u8]) -> Result<Fq, Error> {
    let x = Fq::from_be_bytes_mod_order(bytes);
    if x.into_bigint().to_bytes_be() != bytes {
        return Err(Error::BadPointEncoding);
    }
    Ok(x)
}

/// The `r = R.x mod n` step of ECDSA.
fn base_field_to_scalar(x: &Fq) -> Fr {
    Fr::from_le_bytes_mod_order(&x.into_bigint().to_bytes_le())
}

/// Message digest as a scalar: SHA-256 over the compressed message point.
fn message_scalar(message: &Affine) -> Fr {
    let digest = Sha256::digest(message.encode_point());
    Fr::from_be_bytes_mod_order(&digest)
}

/// ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }`, 70..=72 bytes for all but a
/// negligible fraction of signatures.
fn der_encode(r: &Fr, s: &Fr) -> Vec<u8> {
    let mut body = Vec::with_capacity(72);
    der_encode_integer(&mut body, r);
    der_encode_integer(&mut body, s);
    let mut out = Vec::with_capacity(body.len() + 2);
    out.push(0x30);
    out.push(body.len() as u8);
    out.extend_from_slice(&body);
    out
}

fn der_encode_integer(out: &mut Vec<u8>, value: &Fr) {
    let bytes = value.into_bigint().to_bytes_be();
    let mut start = 0;
    while start < bytes.len() - 1 && bytes[start] == 0 {
        start += 1;
    }
    let body = &bytes[start..];
    out.push(0x02);
    if body[0] & 0x80 != 0 {
        // INTEGER is signed; pad so the value stays positive
        out.push(body.len() as u8 + 1);
        out.push(0x00);
    } else {
        out.push(body.len() as u8);
    }
    out.extend_from_slice(body);
}

fn der_decode(signature: &[u8]) -> Option<(Fr, Fr)> {
    if signature.len() < 2 || signature[0] != 0x30 || signature[1] as usize != signature.len() - 2 {
        return None;
    }
    let (r, rest) = der_decode_integer(&signature[2..])?;
    let (s, rest) = der_decode_integer(rest)?;
    if !rest.is_empty() {
        return None;
    }
    Some((r, s))
}

fn der_decode_integer(input: &[u8]) -> Option<(Fr, &[u8])> {
    if input.len() < 3 || input[0] != 0x02 {
        return None;
    }
    let len = input[1] as usize;
    if len == 0 || len > 33 || input.len() < 2 + len {
        return None;
    }
    let body = &input[2..2 + len];
    if body[0] & 0x80 != 0 {
        // negative
        return None;
    }
    if len > 1 && body[0] == 0 && body[1] & 0x80 == 0 {
        // non-minimal
        return None;
    }
    let unpadded = if body[0] == 0 { &body[1..] } else { body };
    if unpadded.len() > 32 {
        return None;
    }
    let value = Fr::from_be_bytes_mod_order(unpadded);
    let mut canonical = [0u8; 32];
    canonical[32 - unpadded.len()..].copy_from_slice(unpadded);
    if value.into_bigint().to_bytes_be() != canonical {
        // >= group order
        return None;
    }
    Some((value, &input[2 + len..]))
}
