use criterion::{black_box, criterion_group, criterion_main, Criterion};
use djn_paillier::{Decrypt, Encrypt, FloatingPointNumber, FloatingPointPaillier, Homomorphic, KeyPair};
use num_bigint_dig::BigInt;

fn bench_integer_ops(c: &mut Criterion) {
    let keypair = KeyPair::generate().unwrap();
    let pk = keypair.public_key();

    let m1 = BigInt::from(12323423434i64);
    let m2 = BigInt::from(2342342344i64);
    let v = BigInt::from(21334234234i64);
    let c1 = pk.encrypt(&m1).unwrap();
    let c2 = pk.encrypt(&m2).unwrap();

    c.bench_function("encrypt (public key, 2048)", |b| {
        b.iter(|| pk.encrypt(black_box(&m1)).unwrap())
    });

    c.bench_function("encrypt (crt, 2048)", |b| {
        b.iter(|| keypair.encrypt(black_box(&m1)).unwrap())
    });

    c.bench_function("decrypt (crt, 2048)", |b| {
        b.iter(|| keypair.decrypt(black_box(&c1)).unwrap())
    });

    c.bench_function("add", |b| b.iter(|| pk.add(black_box(&c1), black_box(&c2)).unwrap()));

    c.bench_function("sub", |b| b.iter(|| pk.sub(black_box(&c1), black_box(&c2)).unwrap()));

    c.bench_function("scalar_mul (public key)", |b| {
        b.iter(|| pk.scalar_mul(black_box(&v), black_box(&c1)).unwrap())
    });

    c.bench_function("scalar_mul (crt)", |b| {
        b.iter(|| keypair.scalar_mul(black_box(&v), black_box(&c1)).unwrap())
    });
}

fn bench_floating_point(c: &mut Criterion) {
    let keypair = KeyPair::generate().unwrap();
    let pk = keypair.public_key();

    let a: FloatingPointNumber = "-23.2344234".parse().unwrap();
    let b: FloatingPointNumber = "4.234".parse().unwrap();
    let ca = FloatingPointPaillier::encrypt(pk, &a).unwrap();
    let cb = FloatingPointPaillier::encrypt(pk, &b).unwrap();

    c.bench_function("fp encrypt_fast", |bench| {
        bench.iter(|| FloatingPointPaillier::encrypt_fast(&keypair, black_box(&a)).unwrap())
    });

    c.bench_function("fp add (aligned)", |bench| {
        bench.iter(|| FloatingPointPaillier::add(pk, black_box(&ca), black_box(&cb)).unwrap())
    });

    c.bench_function("fp decrypt", |bench| {
        bench.iter(|| FloatingPointPaillier::decrypt(&keypair, black_box(&ca)).unwrap())
    });
}

fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("keygen");
    group.sample_size(10);
    group.bench_function("2048", |b| b.iter(|| KeyPair::generate_with_size(black_box(2048)).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_integer_ops, bench_floating_point, bench_keygen);
criterion_main!(benches);
