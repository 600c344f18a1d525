use ark_ed25519::EdwardsAffine;
use ark_secp256k1::Affine;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use criterion::{criterion_group, criterion_main, Criterion};
use cross_group_dleq::{generate_secret, Proof};

type A = Affine;
type B = EdwardsAffine;

fn prove(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let x = generate_secret::<A, B, _>(&mut rng).unwrap();

    c.bench_function("prove secp256k1/ed25519", |b| {
        b.iter(|| Proof::<A, B>::new(&mut rng, &x).unwrap())
    });
}

fn verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let x = generate_secret::<A, B, _>(&mut rng).unwrap();
    let proof = Proof::<A, B>::new(&mut rng, &x).unwrap();

    c.bench_function("verify secp256k1/ed25519", |b| b.iter(|| proof.verify().unwrap()));
}

fn serialize(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let x = generate_secret::<A, B, _>(&mut rng).unwrap();
    let proof = Proof::<A, B>::new(&mut rng, &x).unwrap();
    let encoded = proof.serialize();

    c.bench_function("deserialize secp256k1/ed25519", |b| {
        b.iter(|| Proof::<A, B>::deserialize(&encoded).unwrap())
    });
}

criterion_group!(benches, prove, verify, serialize);
criterion_main!(benches);
