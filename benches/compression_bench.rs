use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use img_downsize::decode::{decode_data_url, encode_data_url};
use img_downsize::{
    compress_decoded, target_dimensions, CompressorConfig, DecodedImage, RasterSurface,
};
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn bench_target_dimensions(c: &mut Criterion) {
    c.bench_function("target_dimensions", |b| {
        b.iter(|| target_dimensions(black_box(4032), black_box(3024), black_box(1200)))
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut buf = Cursor::new(Vec::new());
    gradient(1920, 1080).write_to(&mut buf, ImageFormat::Png).unwrap();
    let data_url = encode_data_url("image/png", &buf.into_inner());

    c.bench_function("decode_data_url", |b| {
        b.iter(|| decode_data_url(black_box(&data_url)))
    });
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_decoded");
    let config = CompressorConfig::default();

    for size in [Small, Medium, Large].iter() {
        let (width, height) = match size {
            Small => (800, 600),
            Medium => (1920, 1080),
            Large => (3840, 2160),
        };

        let decoded = DecodedImage::new(gradient(width, height));
        let mut surface = RasterSurface::new();

        group.bench_with_input(
            BenchmarkId::new("resize_encode", format!("{}x{}", width, height)),
            &decoded,
            |b, decoded| {
                b.iter(|| compress_decoded(black_box(decoded), &mut surface, black_box(&config)))
            },
        );
    }

    group.finish();
}

enum ImageSize {
    Small,
    Medium,
    Large,
}

use ImageSize::*;

criterion_group!(benches, bench_target_dimensions, bench_decode, bench_compress);
criterion_main!(benches);
