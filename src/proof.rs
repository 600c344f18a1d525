//! Prover and verifier for the cross-group DLEq proof.
//!
//! A proof asserts knowledge of one witness `x` behind both public
//! commitments `X_A = x*G_A` and `X_B = x*G_B`. It carries the per-bit
//! commitment pairs, one ring signature per bit, and a signature under `x`
//! on each curve over the public commitment itself (the commitment is both
//! public key and message; there is no external message).

use crate::{
    commitments::{check_commitment_sum, commit_to_bits},
    curve::Curve,
    error::{Error, Side},
    ring::{RingNonces, RingSignature},
    witness::{check_witness_size, get_bit},
};
use ark_ec::CurveGroup;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_into_iter, cfg_iter, rand::RngCore, vec::Vec};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Proof for one bit of the witness: the commitment pair and the ring
/// signature that one of `{0, 1}` is committed in both.
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct BitProof<A: Curve, B: Curve> {
    pub commitment_a: A,
    pub commitment_b: B,
    pub ring_sig: RingSignature<A, B>,
}

/// A DLEq proof between curves `A` and `B`.
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof<A: Curve, B: Curve> {
    /// `x*G_A`
    pub commitment_a: A,
    /// `x*G_B`
    pub commitment_b: B,
    /// One entry per bit, lowest bit first; always `min(n_A, n_B)` long.
    pub bit_proofs: Vec<BitProof<A, B>>,
    pub signature_a: Vec<u8>,
    pub signature_b: Vec<u8>,
}

impl<A: Curve, B: Curve> Proof<A, B> {
    /// Proves knowledge of the witness `x` (32 bytes, little-endian). `x`
    /// must fit in `min(A::BIT_SIZE, B::BIT_SIZE)` bits.
    pub fn new<R: RngCore>(rng: &mut R, x: &[u8; 32]) -> Result<Self, Error> {
        let bits = A::BIT_SIZE.min(B::BIT_SIZE);
        check_witness_size(x, bits)?;

        let x_a = A::scalar_from_le_bytes(x);
        let x_b = B::scalar_from_le_bytes(x);
        let commitment_a = (A::generator() * x_a).into_affine();
        let commitment_b = (B::generator() * x_b).into_affine();

        let comms_a = commit_to_bits::<A, _>(rng, x, bits);
        let comms_b = commit_to_bits::<B, _>(rng, x, bits);

        // fail closed if the cancellation did not bind the bits to X
        let points_a = comms_a.iter().map(|c| c.comm).collect::<Vec<_>>();
        check_commitment_sum(&points_a, &commitment_a, Side::A)?;
        let points_b = comms_b.iter().map(|c| c.comm).collect::<Vec<_>>();
        check_commitment_sum(&points_b, &commitment_b, Side::B)?;

        // nonces come out of the caller's RNG sequentially; the rings
        // themselves are then independent and may fan out
        let nonces = (0..bits)
            .map(|_| RingNonces::<A, B>::rand(rng))
            .collect::<Vec<_>>();
        let bit_proofs = cfg_into_iter!(0..bits as usize)
            .zip(cfg_into_iter!(nonces))
            .map(|(i, nonces)| BitProof {
                commitment_a: comms_a[i].comm,
                commitment_b: comms_b[i].comm,
                ring_sig: RingSignature::new(
                    get_bit(x, i as u64),
                    &comms_a[i],
                    &comms_b[i],
                    &nonces,
                ),
            })
            .collect::<Vec<_>>();

        let signature_a = A::sign(rng, &x_a, &commitment_a);
        let signature_b = B::sign(rng, &x_b, &commitment_b);

        Ok(Self {
            commitment_a,
            commitment_b,
            bit_proofs,
            signature_a,
            signature_b,
        })
    }

    /// Checks the proof. Checks run cheapest first: the commitment sums,
    /// then the two signatures, then the per-bit rings.
    pub fn verify(&self) -> Result<(), Error> {
        let bits = A::BIT_SIZE.min(B::BIT_SIZE);
        if self.bit_proofs.len() != bits as usize {
            return Err(Error::WrongNumberOfBitProofs);
        }

        let points_a = self
            .bit_proofs
            .iter()
            .map(|bp| bp.commitment_a)
            .collect::<Vec<_>>();
        check_commitment_sum(&points_a, &self.commitment_a, Side::A)?;
        let points_b = self
            .bit_proofs
            .iter()
            .map(|bp| bp.commitment_b)
            .collect::<Vec<_>>();
        check_commitment_sum(&points_b, &self.commitment_b, Side::B)?;

        if !A::verify_signature(&self.commitment_a, &self.commitment_a, &self.signature_a) {
            return Err(Error::SignatureInvalid(Side::A));
        }
        if !B::verify_signature(&self.commitment_b, &self.commitment_b, &self.signature_b) {
            return Err(Error::SignatureInvalid(Side::B));
        }

        let ring_ok = cfg_iter!(self.bit_proofs)
            .map(|bp| bp.ring_sig.verify(&bp.commitment_a, &bp.commitment_b))
            .collect::<Vec<_>>();
        if let Some(index) = ring_ok.iter().position(|ok| !ok) {
            return Err(Error::RingInvalid(index));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness::generate_secret;
    use ark_ec::AffineRepr;
    use ark_ed25519::EdwardsAffine;
    use ark_ff::One;
    use ark_secp256k1::Affine;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    type A = Affine;
    type B = EdwardsAffine;

    fn test_proof(seed: u64) -> (Proof<A, B>, [u8; 32]) {
        let mut rng = StdRng::seed_from_u64(seed);
        let x = generate_secret::<A, B, _>(&mut rng).unwrap();
        (Proof::new(&mut rng, &x).unwrap(), x)
    }

    #[test]
    fn prove_and_verify() {
        let (proof, _) = test_proof(0);
        assert_eq!(proof.bit_proofs.len(), 252);
        assert_eq!(proof.signature_b.len(), 64);
        assert!(proof.signature_a.len() >= 68 && proof.signature_a.len() <= 72);
        proof.verify().unwrap();
        // no hidden state: verification is repeatable
        proof.verify().unwrap();
    }

    #[test]
    fn oversized_witness_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let mut x = [0u8; 32];
        x[31] = 0x10; // bit 252
        assert_eq!(
            Proof::<A, B>::new(&mut rng, &x),
            Err(Error::WitnessTooLarge)
        );
    }

    #[test]
    fn wrong_commitment_is_rejected() {
        let (mut proof, x) = test_proof(2);
        let x_a = A::scalar_from_le_bytes(&x) + ark_secp256k1::Fr::one();
        proof.commitment_a = (A::generator() * x_a).into_affine();
        assert_eq!(proof.verify(), Err(Error::CommitmentSumMismatch(Side::A)));

        let (mut proof, x) = test_proof(3);
        let x_b = B::scalar_from_le_bytes(&x) + ark_ed25519::Fr::one();
        proof.commitment_b = (B::generator() * x_b).into_affine();
        assert_eq!(proof.verify(), Err(Error::CommitmentSumMismatch(Side::B)));
    }

    #[test]
    fn wrong_signature_is_rejected() {
        let (mut proof, _) = test_proof(4);
        proof.signature_b[10] ^= 0x01;
        assert_eq!(proof.verify(), Err(Error::SignatureInvalid(Side::B)));

        let (mut proof, _) = test_proof(5);
        proof.signature_a[10] ^= 0x01;
        assert_eq!(proof.verify(), Err(Error::SignatureInvalid(Side::A)));
    }

    #[test]
    fn wrong_bit_proof_is_rejected() {
        let (mut proof, _) = test_proof(6);
        proof.bit_proofs[17].ring_sig.a_0 += ark_secp256k1::Fr::one();
        assert_eq!(proof.verify(), Err(Error::RingInvalid(17)));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let (mut proof, _) = test_proof(7);
        proof.bit_proofs.pop();
        assert_eq!(proof.verify(), Err(Error::WrongNumberOfBitProofs));
    }
}
