//! Wire format for proof transport.
//!
//! All integers big-endian, scalars fixed at 32 bytes:
//!
//! ```text
//! X_A               ptlen_A bytes
//! X_B               ptlen_B bytes
//! nbits             1 byte
//! nbits times:
//!     C_A           ptlen_A bytes
//!     C_B           ptlen_B bytes
//!     e_a, e_b      32 bytes each
//!     a_0, a_1      32 bytes each
//!     b_0, b_1      32 bytes each
//! siglen_a          1 byte
//! sig_a             siglen_a bytes
//! siglen_b          1 byte
//! sig_b             siglen_b bytes
//! ```
//!
//! Length bytes hold for every supported pairing: `nbits <= 255`, DER ECDSA
//! signatures are at most 72 bytes and the ed25519 Schnorr is 64.

use crate::{
    curve::{Curve, SCALAR_ENCODED_SIZE},
    error::Error,
    proof::{BitProof, Proof},
    ring::RingSignature,
};
use ark_std::vec::Vec;

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.buf.len() < n {
            return Err(Error::Truncated);
        }
        let (head, rest) = self.buf.split_at(n);
        self.buf = rest;
        Ok(head)
    }

    fn take_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }
}

impl<A: Curve, B: Curve> Proof<A, B> {
    pub fn serialize(&self) -> Vec<u8> {
        assert!(self.bit_proofs.len() <= u8::MAX as usize);
        assert!(self.signature_a.len() <= u8::MAX as usize);
        assert!(self.signature_b.len() <= u8::MAX as usize);

        let mut out = Vec::with_capacity(self.serialized_size());
        out.extend_from_slice(&self.commitment_a.encode_point());
        out.extend_from_slice(&self.commitment_b.encode_point());
        out.push(self.bit_proofs.len() as u8);
        for bp in &self.bit_proofs {
            out.extend_from_slice(&bp.commitment_a.encode_point());
            out.extend_from_slice(&bp.commitment_b.encode_point());
            out.extend_from_slice(&A::encode_scalar(&bp.ring_sig.e_a));
            out.extend_from_slice(&B::encode_scalar(&bp.ring_sig.e_b));
            out.extend_from_slice(&A::encode_scalar(&bp.ring_sig.a_0));
            out.extend_from_slice(&A::encode_scalar(&bp.ring_sig.a_1));
            out.extend_from_slice(&B::encode_scalar(&bp.ring_sig.b_0));
            out.extend_from_slice(&B::encode_scalar(&bp.ring_sig.b_1));
        }
        out.push(self.signature_a.len() as u8);
        out.extend_from_slice(&self.signature_a);
        out.push(self.signature_b.len() as u8);
        out.extend_from_slice(&self.signature_b);
        out
    }

    pub fn serialized_size(&self) -> usize {
        let bit_proof_size =
            A::COMPRESSED_POINT_SIZE + B::COMPRESSED_POINT_SIZE + 6 * SCALAR_ENCODED_SIZE;
        A::COMPRESSED_POINT_SIZE
            + B::COMPRESSED_POINT_SIZE
            + 1
            + self.bit_proofs.len() * bit_proof_size
            + 1
            + self.signature_a.len()
            + 1
            + self.signature_b.len()
    }

    /// Decodes a proof produced by [`Proof::serialize`] for the same curve
    /// pair. Trailing bytes are ignored.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = Reader { buf: bytes };

        let commitment_a = A::decode_point(reader.take(A::COMPRESSED_POINT_SIZE)?)?;
        let commitment_b = B::decode_point(reader.take(B::COMPRESSED_POINT_SIZE)?)?;

        let nbits = reader.take_u8()? as usize;
        let mut bit_proofs = Vec::with_capacity(nbits);
        for _ in 0..nbits {
            let bit_commitment_a = A::decode_point(reader.take(A::COMPRESSED_POINT_SIZE)?)?;
            let bit_commitment_b = B::decode_point(reader.take(B::COMPRESSED_POINT_SIZE)?)?;
            let e_a = A::decode_scalar(reader.take(SCALAR_ENCODED_SIZE)?)?;
            let e_b = B::decode_scalar(reader.take(SCALAR_ENCODED_SIZE)?)?;
            let a_0 = A::decode_scalar(reader.take(SCALAR_ENCODED_SIZE)?)?;
            let a_1 = A::decode_scalar(reader.take(SCALAR_ENCODED_SIZE)?)?;
            let b_0 = B::decode_scalar(reader.take(SCALAR_ENCODED_SIZE)?)?;
            let b_1 = B::decode_scalar(reader.take(SCALAR_ENCODED_SIZE)?)?;
            bit_proofs.push(BitProof {
                commitment_a: bit_commitment_a,
                commitment_b: bit_commitment_b,
                ring_sig: RingSignature {
                    e_a,
                    e_b,
                    a_0,
                    a_1,
                    b_0,
                    b_1,
                },
            });
        }

        let siglen_a = reader.take_u8()? as usize;
        let signature_a = reader.take(siglen_a)?.to_vec();
        let siglen_b = reader.take_u8()? as usize;
        let signature_b = reader.take(siglen_b)?.to_vec();

        Ok(Self {
            commitment_a,
            commitment_b,
            bit_proofs,
            signature_a,
            signature_b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness::generate_secret;
    use ark_ec::AffineRepr;
    use ark_ed25519::EdwardsAffine;
    use ark_secp256k1::Affine;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    type A = Affine;
    type B = EdwardsAffine;

    fn test_proof(seed: u64) -> Proof<A, B> {
        let mut rng = StdRng::seed_from_u64(seed);
        let x = generate_secret::<A, B, _>(&mut rng).unwrap();
        Proof::new(&mut rng, &x).unwrap()
    }

    #[test]
    fn round_trip() {
        let proof = test_proof(0);
        let encoded = proof.serialize();
        assert_eq!(encoded.len(), proof.serialized_size());

        let decoded = Proof::<A, B>::deserialize(&encoded).unwrap();
        assert_eq!(decoded, proof);
        decoded.verify().unwrap();
        assert_eq!(decoded.serialize(), encoded);
    }

    #[test]
    fn fixed_prefix_for_witness_one() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let mut x = [0u8; 32];
        x[0] = 0x01;
        let proof = Proof::<A, B>::new(&mut rng, &x).unwrap();
        let encoded = proof.serialize();

        // X = 1*G on both curves, followed by the bit count
        let mut expected = A::generator().encode_point();
        expected.extend_from_slice(&B::generator().encode_point());
        expected.push(252);
        assert_eq!(&encoded[..expected.len()], &expected[..]);
    }

    #[test]
    fn truncation_is_detected() {
        let encoded = test_proof(2).serialize();
        // inside X_B, inside the bit proofs, and one byte short at the end
        for cut in [40, 500, encoded.len() - 1] {
            assert_eq!(
                Proof::<A, B>::deserialize(&encoded[..cut]),
                Err(Error::Truncated)
            );
        }
    }

    #[test]
    fn single_byte_tampering_is_detected() {
        let proof = test_proof(3);
        let encoded = proof.serialize();
        let offsets = [
            0,                  // X_A prefix
            10,                 // X_A x-coordinate
            40,                 // X_B
            65,                 // bit count
            66,                 // first bit proof, C_A
            100,                // first bit proof, C_B
            140,                // first bit proof, inside a challenge scalar
            encoded.len() - 40, // inside a signature
            encoded.len() - 1,
        ];
        for offset in offsets {
            let mut tampered = encoded.clone();
            tampered[offset] ^= 0x01;
            let rejected = match Proof::<A, B>::deserialize(&tampered) {
                Ok(decoded) => decoded.verify().is_err(),
                Err(_) => true,
            };
            assert!(rejected, "offset {}", offset);
        }
    }
}
