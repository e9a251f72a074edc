#![allow(non_snake_case)]

#[macro_use]
extern crate criterion;

use criterion::Criterion;

use nistp256::scalar::Scalar;
use nistp256::weierstrass::JacobianPoint;

fn consttime_fixed_base_scalar_mul(c: &mut Criterion) {
    let k = Scalar::from(897_987_897u64);
    c.bench_function("Fixed-base scalar mul", move |b| {
        b.iter(|| JacobianPoint::mul_base(&k))
    });
}

fn consttime_variable_base_scalar_mul(c: &mut Criterion) {
    let P = JacobianPoint::generator().double();
    let k = Scalar::from(0x1234_5678_9abc_def0u64);
    c.bench_function("Variable-base scalar mul", move |b| b.iter(|| &P * &k));
}

fn consttime_linear_combination(c: &mut Criterion) {
    let G = JacobianPoint::generator();
    let P = G.double();
    let k = Scalar::from(0xdead_beefu64);
    let k1 = Scalar::from(0xcafe_f00du64);
    c.bench_function("Linear combination kG + k1P", move |b| {
        b.iter(|| JacobianPoint::linear_combination(Some(&k), Some(&G), &[k1], &[P]).unwrap())
    });
}

criterion_group! {
    name = p256_benches;
    config = Criterion::default();
    targets =
        consttime_fixed_base_scalar_mul,
        consttime_variable_base_scalar_mul,
        consttime_linear_combination,
}
criterion_main!(p256_benches);
