//! Criterion benchmarks for txwire
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use txwire::messages::cancel_order::{self, CancelOrder};
use txwire::messages::std_signature::StdSignature;
use txwire::{Message, UnknownField};

fn sample_order() -> CancelOrder {
    CancelOrder::builder()
        .set_sender(vec![0xBA; 20])
        .set_symbol("BNB_USDT")
        .set_refid("6A4C2A1A4E7A9D2B-1")
        .finalize()
}

fn sample_signature() -> StdSignature {
    StdSignature::builder()
        .set_pub_key(vec![0x02; 33])
        .set_signature(vec![0x5F; 64])
        .set_account_number(1_234_567)
        .set_sequence(42)
        .finalize()
}

fn bench_cancel_order(c: &mut Criterion) {
    let order = sample_order();
    let bytes = order.encode();

    c.bench_function("cancel_order_encode", |b| {
        b.iter(|| black_box(black_box(&order).encode()));
    });

    c.bench_function("cancel_order_encode_to_slice", |b| {
        let mut buf = vec![0u8; 256];
        b.iter(|| {
            let size = black_box(&order)
                .as_message()
                .encode_to_slice(black_box(&mut buf))
                .unwrap();
            black_box(size);
        });
    });

    c.bench_function("cancel_order_decode", |b| {
        b.iter(|| black_box(CancelOrder::decode(black_box(&bytes)).unwrap()));
    });
}

fn bench_std_signature(c: &mut Criterion) {
    let sig = sample_signature();
    let bytes = sig.encode();

    c.bench_function("std_signature_encode", |b| {
        b.iter(|| black_box(black_box(&sig).encode()));
    });

    c.bench_function("std_signature_decode", |b| {
        b.iter(|| black_box(StdSignature::decode(black_box(&bytes)).unwrap()));
    });

    c.bench_function("std_signature_roundtrip", |b| {
        b.iter(|| {
            let decoded = StdSignature::decode(black_box(&bytes)).unwrap();
            black_box(decoded.encode());
        });
    });
}

fn bench_merge(c: &mut Criterion) {
    let base = sample_signature();
    let overlay = StdSignature::builder().set_sequence(43).finalize();
    let overlay_bytes = overlay.encode();

    c.bench_function("merge_from_message", |b| {
        b.iter(|| {
            let mut builder = base.to_builder();
            builder.merge_from(black_box(&overlay));
            black_box(builder.finalize());
        });
    });

    c.bench_function("merge_from_bytes", |b| {
        b.iter(|| {
            let mut builder = base.to_builder();
            builder.merge_from_bytes(black_box(&overlay_bytes)).unwrap();
            black_box(builder.finalize());
        });
    });
}

fn bench_unknown_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("unknown_fields");

    for count in [0usize, 4, 16, 64] {
        let mut builder = sample_order().to_builder();
        builder.set_unknown_fields(
            (0..count)
                .map(|i| UnknownField::varint(10 + i as u32, i as u64 * 1000))
                .collect(),
        );
        let bytes = builder.finalize().encode();

        group.bench_with_input(
            BenchmarkId::new("decode_reencode", count),
            &bytes,
            |b, bytes| {
                b.iter(|| {
                    let message = Message::decode(black_box(bytes), &cancel_order::SCHEMA).unwrap();
                    black_box(message.encode());
                });
            },
        );
    }

    group.finish();
}

fn bench_variable_payload_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("variable_sizes");

    for size in [0usize, 32, 256, 4096] {
        let sig = StdSignature::builder()
            .set_signature(vec![0xA5; size])
            .set_sequence(1)
            .finalize();
        let bytes = sig.encode();

        group.bench_with_input(BenchmarkId::new("signature_encode", size), &sig, |b, sig| {
            b.iter(|| black_box(sig.encode()));
        });
        group.bench_with_input(BenchmarkId::new("signature_decode", size), &bytes, |b, bytes| {
            b.iter(|| black_box(StdSignature::decode(bytes).unwrap()));
        });
    }

    group.finish();
}

fn bench_length_delimited_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");

    for batch_size in [10usize, 100, 1000] {
        let mut stream = Vec::new();
        for i in 0..batch_size {
            let order = CancelOrder::builder()
                .set_sender(vec![0xBA; 20])
                .set_symbol("BNB_USDT")
                .set_refid(format!("ref-{i}"))
                .finalize();
            stream.extend(order.encode_length_delimited());
        }

        group.bench_with_input(
            BenchmarkId::new("cancel_order_decode_stream", batch_size),
            &stream,
            |b, stream| {
                b.iter(|| {
                    let mut offset = 0;
                    while offset < stream.len() {
                        let (order, used) =
                            CancelOrder::decode_length_delimited(&stream[offset..]).unwrap();
                        black_box(order);
                        offset += used;
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cancel_order,
    bench_std_signature,
    bench_merge,
    bench_unknown_fields,
    bench_variable_payload_sizes,
    bench_length_delimited_stream
);
criterion_main!(benches);
