// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use panelterm_emulator::ansi::PaneltermAnsiParser;

/// A synthetic host stream: text lines interleaved with the control
/// sequences a shell session actually produces.
fn synthetic_stream() -> Vec<u8> {
    let mut out = Vec::with_capacity(128 * 1024);

    for line in 0..1000 {
        out.extend_from_slice(format!("\x1b[{};1H", (line % 40) + 1).as_bytes());
        out.extend_from_slice(format!("\x1b[3{}m", line % 8).as_bytes());
        out.extend_from_slice(b"lorem ipsum dolor sit amet consectetur");
        out.extend_from_slice(b"\x1b[K\x1b[m\r\n");
        if line % 50 == 0 {
            out.extend_from_slice(b"\x1b[2J\x1b[5;20r\x1b[?7h");
        }
    }

    out
}

fn bench_parser_large_chunk(bench: &mut Criterion) {
    let data = synthetic_stream();

    let mut group = bench.benchmark_group("parser_large_chunk");
    group.bench_with_input(BenchmarkId::from_parameter("mixed"), &data, |b, data| {
        b.iter(|| {
            let mut parser = PaneltermAnsiParser::new();
            let output = parser.push(data);
            assert!(!output.is_empty());
        });
    });

    group.finish();
}

fn bench_parser_chunked(bench: &mut Criterion) {
    let data = synthetic_stream();
    let chunks: Vec<&[u8]> = data.chunks(64).collect();

    let mut group = bench.benchmark_group("parser_chunked");
    group.bench_with_input(
        BenchmarkId::from_parameter("mixed"),
        &chunks,
        |b, chunks| {
            b.iter(|| {
                let mut parser = PaneltermAnsiParser::new();
                let mut total = 0;
                for chunk in chunks {
                    total += parser.push(chunk).len();
                }
                assert!(total > 0);
            });
        },
    );

    group.finish();
}

criterion_group!(benches, bench_parser_large_chunk, bench_parser_chunked);
criterion_main!(benches);
