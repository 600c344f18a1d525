//! Byte-accumulating transcript for deriving Fiat-Shamir challenges on two
//! curves from one preimage.
//!
//! The ring signature needs the same transcript bytes reduced into two
//! different scalar fields. The builder collects the encoded elements once;
//! [`Transcript::challenge`] can then be invoked per curve without rebuilding
//! the preimage. Append order is a protocol contract, fixed by the caller.

use crate::curve::Curve;
use ark_std::vec::Vec;

#[derive(Clone, Debug, Default)]
pub struct Transcript {
    bytes: Vec<u8>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn append_point<G: Curve>(&mut self, point: &G) {
        self.bytes.extend_from_slice(&point.encode_point());
    }

    pub fn append_scalar<G: Curve>(&mut self, scalar: &G::ScalarField) {
        self.bytes.extend_from_slice(&G::encode_scalar(scalar));
    }

    /// Challenge in the scalar field of `G` over everything appended so far.
    pub fn challenge<G: Curve>(&self) -> G::ScalarField {
        G::hash_to_scalar(&self.bytes)
    }
}
