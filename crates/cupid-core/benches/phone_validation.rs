use cupid_core::phone::{self, PhoneValidator};

pub(crate) fn bench(c: &mut criterion::Criterion) {
    c.bench_function("phone_validate_national", |b| {
        b.iter(|| phone::validate("0712345678", "KE"))
    });
    c.bench_function("phone_validate_international", |b| {
        b.iter(|| phone::validate("+254 712 345 678", "KE"))
    });
    c.bench_function("phone_validate_unsupported", |b| {
        b.iter(|| phone::validate("0712345678", "ZZ"))
    });
    c.bench_function("phone_validator_new", |b| b.iter(PhoneValidator::new));
}
