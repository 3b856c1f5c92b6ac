use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hufzip::{compress, decompress, Codebook, HuffmanTree};

fn text_input(len: usize) -> Vec<u8> {
    let sample = b"Huffman encoding is a greedy algorithm that builds optimal prefix codes. \
                   The quick brown fox jumps over the lazy dog. ";
    sample.iter().copied().cycle().take(len).collect()
}

fn skewed_input(len: usize) -> Vec<u8> {
    // Roughly geometric byte distribution.
    (0..len)
        .map(|i| (i.wrapping_mul(2654435761) % 255).trailing_zeros() as u8)
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    for &len in &[1_000usize, 64_000] {
        for (name, input) in [("text", text_input(len)), ("skewed", skewed_input(len))] {
            group.throughput(Throughput::Bytes(len as u64));
            group.bench_with_input(BenchmarkId::new(name, len), &input, |b, input| {
                b.iter(|| compress(black_box(input)).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    for &len in &[1_000usize, 64_000] {
        for (name, input) in [("text", text_input(len)), ("skewed", skewed_input(len))] {
            let packed = compress(&input).unwrap();
            group.throughput(Throughput::Bytes(len as u64));
            group.bench_with_input(BenchmarkId::new(name, len), &packed, |b, packed| {
                b.iter(|| decompress(black_box(packed)).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");
    let input: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    group.bench_function("build_full_alphabet", |b| {
        b.iter(|| HuffmanTree::from_bytes(black_box(&input)).unwrap())
    });

    let tree = HuffmanTree::from_bytes(&input).unwrap();
    group.bench_function("codebook", |b| b.iter(|| Codebook::from_tree(black_box(&tree))));

    let header = tree.serialize();
    group.bench_function("deserialize", |b| {
        b.iter(|| HuffmanTree::deserialize(black_box(&header)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_tree);
criterion_main!(benches);
