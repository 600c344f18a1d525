#![cfg_attr(not(feature = "std"), no_std)]

//! Proof that one secret is committed on two prime-order groups of different
//! order: given `X_A = x*G_A` on curve A and `X_B = x*G_B` on curve B, the
//! prover shows knowledge of the shared discrete log `x` without revealing
//! it. Instantiated for secp256k1 and ed25519, where the witness is capped at
//! 252 bits so it is a canonical scalar on both curves.
//!
//! The construction follows the classic bitwise approach:
//! - `x` is decomposed into bits, and each bit is committed on both curves as
//!   a Pedersen commitment `C_i = b_i*G + r_i*H`. The last blinder is chosen
//!   so that the blinding terms cancel in `sum(2^i * C_i)`, which therefore
//!   equals `X` on each curve; the verifier checks this with one
//!   multi-scalar multiplication per curve. See [`commitments`].
//! - For every bit, a two-branch ring signature proves the committed value is
//!   0 or 1 *on both curves simultaneously*: each Fiat-Shamir challenge is
//!   one SHA3-512 preimage reduced into both scalar fields. See [`ring`] and
//!   [`transcript`].
//! - The proof additionally carries a signature under `x` on each curve over
//!   the public commitment itself (ECDSA on secp256k1, a protocol-specific
//!   Schnorr on ed25519), pinning knowledge of the witness. See
//!   [`secp256k1`] and [`ed25519`].
//!
//! The curve pair is a type parameter of [`Proof`]; scalars and points of the
//! two groups are distinct types, so cross-group mix-ups fail to compile.
//! Proofs serialize to a fixed byte layout via [`Proof::serialize`] and
//! [`Proof::deserialize`].

pub mod commitments;
pub mod curve;
pub mod ed25519;
pub mod error;
pub mod proof;
pub mod ring;
pub mod secp256k1;
mod serialization;
pub mod transcript;
pub mod witness;

pub use crate::{
    curve::Curve,
    error::{Error, Side},
    proof::{BitProof, Proof},
    witness::generate_secret,
};
