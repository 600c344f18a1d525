//! Capability set a curve must provide to participate in a cross-group DLEq
//! proof, on top of its arkworks group arithmetic.
//!
//! A curve is its affine point type; scalars are the associated
//! `ScalarField`. Because the proof is generic over two such types, a scalar
//! or point of one group handed to an operation of the other is rejected at
//! compile time.

use crate::error::Error;
use ark_ff::{BigInteger, PrimeField};
use ark_std::{rand::RngCore, vec::Vec};
use sha3::{Digest, Sha3_512};

/// Scalars of both supported groups encode to this many bytes, big-endian.
pub const SCALAR_ENCODED_SIZE: usize = 32;

pub trait Curve: ark_ec::AffineRepr {
    /// Number of witness bits representable on this curve. Strictly less than
    /// the bit length of the group order so that any witness below
    /// `2^BIT_SIZE` is a canonical scalar.
    const BIT_SIZE: u64;

    /// Byte length of a compressed point encoding.
    const COMPRESSED_POINT_SIZE: usize;

    /// Second public generator with unknown discrete log relative to the
    /// canonical generator, used as the Pedersen blinding base.
    fn alt_generator() -> Self;

    /// Compressed encoding of `COMPRESSED_POINT_SIZE` bytes.
    fn encode_point(&self) -> Vec<u8>;

    fn decode_point(bytes: &[u8]) -> Result<Self, Error>;

    fn encode_scalar(scalar: &Self::ScalarField) -> [u8; 32] {
        let mut out = [0u8; SCALAR_ENCODED_SIZE];
        let bytes = scalar.into_bigint().to_bytes_be();
        out[SCALAR_ENCODED_SIZE - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    /// Rejects encodings that are not 32 bytes or not the canonical
    /// representative of a field element.
    fn decode_scalar(bytes: &[u8]) -> Result<Self::ScalarField, Error> {
        if bytes.len() != SCALAR_ENCODED_SIZE {
            return Err(Error::BadScalarEncoding);
        }
        let scalar = Self::ScalarField::from_be_bytes_mod_order(bytes);
        if Self::encode_scalar(&scalar)[..] != bytes[..] {
            return Err(Error::BadScalarEncoding);
        }
        Ok(scalar)
    }

    /// Interprets 32 little-endian bytes as a scalar, reducing mod the group
    /// order. The caller is responsible for keeping the magnitude below
    /// `2^BIT_SIZE` when the value must mean the same thing on both curves.
    fn scalar_from_le_bytes(bytes: &[u8; 32]) -> Self::ScalarField {
        Self::ScalarField::from_le_bytes_mod_order(bytes)
    }

    /// SHA3-512 of the preimage, interpreted as a big-endian integer and
    /// reduced mod the group order. The 512-bit digest leaves negligible bias
    /// after reduction into a ~252..256-bit field. Both groups share this
    /// body so the same preimage yields the matching challenge pair.
    fn hash_to_scalar(preimage: &[u8]) -> Self::ScalarField {
        let digest = Sha3_512::digest(preimage);
        Self::ScalarField::from_be_bytes_mod_order(&digest)
    }

    /// Signature under `secret` over the encoded `message` point. The output
    /// is opaque bytes carried in the proof, not part of any Fiat-Shamir
    /// transcript.
    fn sign<R: RngCore>(rng: &mut R, secret: &Self::ScalarField, message: &Self) -> Vec<u8>;

    fn verify_signature(public_key: &Self, message: &Self, signature: &[u8]) -> bool;
}
