//! Bitwise Pedersen commitments with a cancelling top-bit blinder.
//!
//! The witness `x` is committed bit by bit as `C_i = b_i*G + r_i*H`. All
//! blinders but the last are random; the last is fixed to
//! `-(sum(2^i * r_i)) * (2^(n-1))^-1` so the blinding contributions cancel in
//! the weighted sum, leaving `sum(2^i * C_i) = x*G`. One multi-scalar
//! multiplication on the verifier side then binds the bit commitments to the
//! public commitment.

use crate::{
    curve::Curve,
    error::{Error, Side},
    witness::get_bit,
};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_ff::{Field, One, PrimeField, Zero};
use ark_std::{rand::RngCore, vec::Vec, UniformRand};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A bit commitment together with its blinder. The blinder exists only at
/// proving time and never leaves the prover.
#[derive(Clone, PartialEq, Eq, Debug, Zeroize, ZeroizeOnDrop)]
pub struct CommitmentWithBlinder<G: Curve> {
    #[zeroize(skip)]
    pub comm: G,
    pub blinder: G::ScalarField,
}

/// Commits to the lowest `bits` bits of `x` on one curve.
///
/// Panics on states that are impossible unless the field arithmetic is
/// broken or the RNG produced a zero scalar.
pub fn commit_to_bits<G: Curve, R: RngCore>(
    rng: &mut R,
    x: &[u8; 32],
    bits: u64,
) -> Vec<CommitmentWithBlinder<G>> {
    let g = G::generator();
    let h = G::alt_generator();
    let two = G::ScalarField::from(2u32);

    let mut pow = G::ScalarField::one();
    let mut sum = G::ScalarField::zero();
    let mut commitments = Vec::with_capacity(bits as usize);

    for i in 0..bits {
        let blinder = if i == bits - 1 {
            let pow_inv = pow.inverse().expect("2^i is nonzero in a prime field");
            let blinder = -sum * pow_inv;
            sum += blinder * pow;
            assert!(sum.is_zero(), "blinders do not cancel");
            blinder
        } else {
            let blinder = G::ScalarField::rand(rng);
            sum += blinder * pow;
            pow *= two;
            assert!(!pow.is_zero(), "power of two vanished");
            blinder
        };
        assert!(!blinder.is_zero(), "blinder {} is zero", i);

        let bit = G::ScalarField::from(get_bit(x, i) as u8);
        let comm = (g * bit + h * blinder).into_affine();
        assert!(!comm.is_zero(), "bit commitment is the identity");
        if !get_bit(x, i) {
            debug_assert_eq!(comm, (h * blinder).into_affine());
        }

        commitments.push(CommitmentWithBlinder { comm, blinder });
    }

    commitments
}

/// Checks `sum(2^i * commitments[i]) == expected`.
pub fn verify_commitment_sum<G: Curve>(commitments: &[G], expected: &G) -> bool {
    let powers = powers_of_two::<G::ScalarField>(commitments.len());
    G::Group::msm_unchecked(commitments, &powers) == expected.into_group()
}

fn powers_of_two<F: PrimeField>(n: usize) -> Vec<F> {
    let two = F::from(2u32);
    let mut powers = Vec::with_capacity(n);
    let mut current = F::one();
    for _ in 0..n {
        powers.push(current);
        current *= two;
    }
    powers
}

/// Commitment sum check with the error tagged by the caller.
pub(crate) fn check_commitment_sum<G: Curve>(
    commitments: &[G],
    expected: &G,
    side: Side,
) -> Result<(), Error> {
    if verify_commitment_sum(commitments, expected) {
        Ok(())
    } else {
        Err(Error::CommitmentSumMismatch(side))
    }
}
