/// Identifies which of the two groups of a proof an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The witness has bits set at or above `min(n_A, n_B)`
    WitnessTooLarge,
    /// The host RNG could not produce the requested bytes
    RngFailure,
    /// `sum(2^i * C_i)` does not equal the public commitment on the given side
    CommitmentSumMismatch(Side),
    /// The per-group signature over the public commitment does not verify
    SignatureInvalid(Side),
    /// The ring signature for the given bit index does not verify
    RingInvalid(usize),
    /// The number of bit proofs does not equal `min(n_A, n_B)`
    WrongNumberOfBitProofs,
    /// Input bytes ended before the structure they claim to contain
    Truncated,
    BadPointEncoding,
    BadScalarEncoding,
}
