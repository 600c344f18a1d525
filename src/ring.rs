//! Two-branch ring signature proving a bit commitment opens to 0 or 1 on
//! both curves at once.
//!
//! Branch 0 proves `C = r*H`, branch 1 proves `C - G = r*H`, on each curve.
//! The honest branch is closed with the real blinder; the other branch is
//! simulated first, its challenge taken from the transcript of the honest
//! branch's nonce commitments. Challenges for the two curves are the same
//! preimage reduced into each scalar field, so the transcript bytes are built
//! once. Preimage order per hash: `C_A || C_B || L_A || L_B` where `L` is the
//! left-hand value being bound.
//!
//! Verification is challenge-recomputation: rebuild both nonce commitments
//! from the responses, rederive the challenge pair and compare it with the
//! stored one.

use crate::{
    commitments::CommitmentWithBlinder, curve::Curve, transcript::Transcript,
};
use ark_ec::CurveGroup;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, UniformRand};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Ring signature for one bit index. `e_a`/`e_b` are the ring's starting
/// challenges; `(a_0, b_0)` close branch 0 and `(a_1, b_1)` close branch 1
/// on curves A and B respectively.
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct RingSignature<A: Curve, B: Curve> {
    pub e_a: A::ScalarField,
    pub e_b: B::ScalarField,
    pub a_0: A::ScalarField,
    pub a_1: A::ScalarField,
    pub b_0: B::ScalarField,
    pub b_1: B::ScalarField,
}

/// Random scalars consumed by one ring: the nonces `j`, `k` behind the
/// honest-branch commitments and the simulated branch's responses. Sampled
/// up front so ring generation itself is deterministic and can fan out.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct RingNonces<A: Curve, B: Curve> {
    j: A::ScalarField,
    k: B::ScalarField,
    resp_a: A::ScalarField,
    resp_b: B::ScalarField,
}

impl<A: Curve, B: Curve> RingNonces<A, B> {
    pub(crate) fn rand<R: RngCore>(rng: &mut R) -> Self {
        Self {
            j: A::ScalarField::rand(rng),
            k: B::ScalarField::rand(rng),
            resp_a: A::ScalarField::rand(rng),
            resp_b: B::ScalarField::rand(rng),
        }
    }
}

impl<A: Curve, B: Curve> RingSignature<A, B> {
    pub(crate) fn new(
        bit: bool,
        comm_a: &CommitmentWithBlinder<A>,
        comm_b: &CommitmentWithBlinder<B>,
        nonces: &RingNonces<A, B>,
    ) -> Self {
        let g_a = A::generator();
        let h_a = A::alt_generator();
        let g_b = B::generator();
        let h_b = B::alt_generator();

        let t_a = (h_a * nonces.j).into_affine();
        let t_b = (h_b * nonces.k).into_affine();
        let mut transcript = Transcript::new();
        transcript.append_point(&comm_a.comm);
        transcript.append_point(&comm_b.comm);
        transcript.append_point(&t_a);
        transcript.append_point(&t_b);
        let e_a = transcript.challenge::<A>();
        let e_b = transcript.challenge::<B>();

        if !bit {
            // branch 0 is honest; simulate branch 1 under (e_a, e_b)
            let a_0 = nonces.resp_a;
            let b_0 = nonces.resp_b;
            let u_a = (h_a * a_0 - (comm_a.comm.into_group() - g_a) * e_a).into_affine();
            let u_b = (h_b * b_0 - (comm_b.comm.into_group() - g_b) * e_b).into_affine();

            let (e_a_closing, e_b_closing) =
                closing_challenges::<A, B>(&comm_a.comm, &comm_b.comm, &u_a, &u_b);
            let a_1 = nonces.j + e_a_closing * comm_a.blinder;
            let b_1 = nonces.k + e_b_closing * comm_b.blinder;
            Self {
                e_a: e_a_closing,
                e_b: e_b_closing,
                a_0,
                a_1,
                b_0,
                b_1,
            }
        } else {
            // branch 1 is honest; simulate branch 0 under (e_a, e_b)
            let a_1 = nonces.resp_a;
            let b_1 = nonces.resp_b;
            let u_a = (h_a * a_1 - comm_a.comm * e_a).into_affine();
            let u_b = (h_b * b_1 - comm_b.comm * e_b).into_affine();

            let (e_a_closing, e_b_closing) =
                closing_challenges::<A, B>(&comm_a.comm, &comm_b.comm, &u_a, &u_b);
            let a_0 = nonces.j + e_a_closing * comm_a.blinder;
            let b_0 = nonces.k + e_b_closing * comm_b.blinder;
            Self {
                e_a,
                e_b,
                a_0,
                a_1,
                b_0,
                b_1,
            }
        }
    }

    /// Bit-agnostic: the stored challenge pair either closes branch 0 or
    /// opens branch 1, and the two recomputations below meet it either way.
    pub(crate) fn verify(&self, comm_a: &A, comm_b: &B) -> bool {
        let g_a = A::generator();
        let h_a = A::alt_generator();
        let g_b = B::generator();
        let h_b = B::alt_generator();

        let t_a = (h_a * self.a_1 - *comm_a * self.e_a).into_affine();
        let t_b = (h_b * self.b_1 - *comm_b * self.e_b).into_affine();
        let (e_a_mid, e_b_mid) = closing_challenges::<A, B>(comm_a, comm_b, &t_a, &t_b);

        let u_a = (h_a * self.a_0 - (comm_a.into_group() - g_a) * e_a_mid).into_affine();
        let u_b = (h_b * self.b_0 - (comm_b.into_group() - g_b) * e_b_mid).into_affine();
        let (e_a_final, e_b_final) = closing_challenges::<A, B>(comm_a, comm_b, &u_a, &u_b);

        e_a_final == self.e_a && e_b_final == self.e_b
    }
}

fn closing_challenges<A: Curve, B: Curve>(
    comm_a: &A,
    comm_b: &B,
    left_a: &A,
    left_b: &B,
) -> (A::ScalarField, B::ScalarField) {
    let mut transcript = Transcript::new();
    transcript.append_point(comm_a);
    transcript.append_point(comm_b);
    transcript.append_point(left_a);
    transcript.append_point(left_b);
    (transcript.challenge::<A>(), transcript.challenge::<B>())
}
