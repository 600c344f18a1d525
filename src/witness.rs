//! Witness generation and size checks.
//!
//! A witness is 32 little-endian bytes interpreted as an integer. It is valid
//! for a curve pair when every bit at index `min(n_A, n_B)` or above is zero,
//! which keeps it a canonical scalar on both curves.

use crate::{curve::Curve, error::Error};
use ark_std::rand::RngCore;

/// Generates a witness that has a commitment on both curves.
pub fn generate_secret<A: Curve, B: Curve, R: RngCore>(rng: &mut R) -> Result<[u8; 32], Error> {
    generate_random_bits(rng, A::BIT_SIZE.min(B::BIT_SIZE))
}

/// Generates up to 256 random bits, little-endian.
pub fn generate_random_bits<R: RngCore>(rng: &mut R, bits: u64) -> Result<[u8; 32], Error> {
    let mut x = [0u8; 32];
    rng.try_fill_bytes(&mut x).map_err(|_| Error::RngFailure)?;
    let to_clear = 256 - bits;
    x[31] &= 0xffu8.checked_shr(to_clear as u32).unwrap_or(0);
    Ok(x)
}

/// Fails unless every bit of `x` at index `bits` or above is zero.
pub fn check_witness_size(x: &[u8; 32], bits: u64) -> Result<(), Error> {
    let cleared = 256 - bits;
    let tail_start = (bits / 8) as usize;
    if cleared % 8 != 0 {
        let mask = 0xffu8 << (8 - cleared % 8);
        if x[tail_start] & mask != 0 {
            return Err(Error::WitnessTooLarge);
        }
    }
    if x[tail_start + 1..].iter().any(|byte| *byte != 0) {
        return Err(Error::WitnessTooLarge);
    }
    Ok(())
}

/// Bit of `x` at little-endian index `i`.
pub fn get_bit(x: &[u8; 32], i: u64) -> bool {
    (x[(i / 8) as usize] >> (i % 8)) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ed25519::EdwardsAffine;
    use ark_secp256k1::Affine;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generated_secret_fits() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let bits = <Affine as Curve>::BIT_SIZE.min(<EdwardsAffine as Curve>::BIT_SIZE);
        assert_eq!(bits, 252);
        for _ in 0..10 {
            let x = generate_secret::<Affine, EdwardsAffine, _>(&mut rng).unwrap();
            check_witness_size(&x, bits).unwrap();
            // the top four bits must be clear
            assert_eq!(x[31] & 0xf0, 0);
        }
    }

    #[test]
    fn witness_size_gate() {
        let mut x = [0u8; 32];
        x[31] = 0xff;
        assert_eq!(check_witness_size(&x, 255), Err(Error::WitnessTooLarge));

        let mut x = [0u8; 32];
        x[30] = 0xff;
        assert_eq!(check_witness_size(&x, 247), Err(Error::WitnessTooLarge));

        let mut x = [0u8; 32];
        x[30] = 0b00010101;
        assert_eq!(check_witness_size(&x, 244), Err(Error::WitnessTooLarge));
        assert_eq!(check_witness_size(&x, 245), Ok(()));
    }

    #[test]
    fn bit_extraction() {
        let mut x = [0u8; 32];
        x[0] = 0b0000_0101;
        x[17] = 0b1000_0000;
        assert!(get_bit(&x, 0));
        assert!(!get_bit(&x, 1));
        assert!(get_bit(&x, 2));
        assert!(get_bit(&x, 17 * 8 + 7));
        assert!(!get_bit(&x, 255));
    }
}
