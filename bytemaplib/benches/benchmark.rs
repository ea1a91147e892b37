use bytemaplib::{MappingTable, compile, decode, encode};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;

/// Mapping with a mix of 1, 2 and 3 byte replacements for the lowercase letters
fn bench_table() -> MappingTable {
    let mut table = MappingTable::new();
    for (i, byte) in (b'a'..=b'z').enumerate() {
        let seq = match i % 3 {
            0 => vec![0x80 + byte % 0x20],
            1 => vec![0xA0, byte],
            _ => vec![0xB0, 0xB1, byte],
        };
        assert!(table.insert(byte, seq).is_ok());
    }
    table
}

#[allow(clippy::expect_used)]
fn bench_codec(c: &mut Criterion) {
    let table = bench_table();
    let tables = compile(&table);

    let text: Vec<u8> = rand::rng()
        .sample_iter(rand::distr::Uniform::new_inclusive(b'a', b'z').expect("Valid range"))
        .take(1 << 20)
        .collect();
    let encoded = bytemaplib::encode_sequences(&text, &table);

    c.bench_function("compile_table", |b| {
        b.iter(|| std::hint::black_box(compile(std::hint::black_box(&table))));
    });

    c.bench_function("encode_1mb", |b| {
        b.iter(|| std::hint::black_box(encode(std::hint::black_box(&text), &tables.encode)));
    });

    c.bench_function("decode_1mb", |b| {
        b.iter(|| std::hint::black_box(decode(std::hint::black_box(&encoded), &tables.decode)));
    });
}

criterion_group!(
    name = bytemaplib_benches;
    config = Criterion::default().sample_size(20);
    targets = bench_codec
);
criterion_main!(bytemaplib_benches);
