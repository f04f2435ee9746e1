use hd_bip32::{ChildNumber, ExtendedPrivateKey};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_master_from_seed(c: &mut Criterion) {
    let seed = [0x5Au8; 64];
    c.bench_function("master_from_seed", |b| {
        b.iter(|| ExtendedPrivateKey::from_seed(black_box(&seed)).unwrap())
    });
}

fn bench_derive_child_normal(c: &mut Criterion) {
    let seed = [0x5Au8; 64];
    let master = ExtendedPrivateKey::from_seed(&seed).unwrap();
    c.bench_function("derive_child_normal", |b| {
        b.iter(|| master.derive_child(black_box(ChildNumber::Normal(0))).unwrap())
    });
}

fn bench_derive_child_hardened(c: &mut Criterion) {
    let seed = [0x5Au8; 64];
    let master = ExtendedPrivateKey::from_seed(&seed).unwrap();
    c.bench_function("derive_child_hardened", |b| {
        b.iter(|| master.derive_child(black_box(ChildNumber::Hardened(0))).unwrap())
    });
}

fn bench_derive_child_public(c: &mut Criterion) {
    let seed = [0x5Au8; 64];
    let master_pub = ExtendedPrivateKey::from_seed(&seed).unwrap().to_extended_public_key();
    c.bench_function("derive_child_public", |b| {
        b.iter(|| master_pub.derive_child(black_box(ChildNumber::Normal(0))).unwrap())
    });
}

criterion_group!(
    benches,
    bench_master_from_seed,
    bench_derive_child_normal,
    bench_derive_child_hardened,
    bench_derive_child_public
);
criterion_main!(benches);
