// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_rs::{Rgba, RgbaImage};
use pfp_editor::editor::HatTransform;
use pfp_editor::media::compositor;
use pfp_editor::media::image::pixmap_from_rgba;
use pfp_editor::media::HatAsset;
use std::hint::black_box;

fn compositing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositing");

    let photo = pixmap_from_rgba(&RgbaImage::from_pixel(1600, 1200, Rgba([180, 120, 90, 255])))
        .expect("photo pixmap");
    let overlay = HatAsset::Party.rasterize(512).expect("hat raster");
    let transform = HatTransform {
        rotation: 30.0,
        ..HatTransform::default()
    };

    group.bench_function("render_1200", |b| {
        b.iter(|| {
            let canvas = compositor::render(&photo, &transform, &overlay, 1200).expect("render");
            black_box(canvas);
        });
    });

    let canvas = compositor::render(&photo, &transform, &overlay, 1200).expect("render");
    group.bench_function("encode_png_1200", |b| {
        b.iter(|| black_box(compositor::encode_png(&canvas).expect("png")));
    });
    group.bench_function("encode_thumbnail", |b| {
        b.iter(|| black_box(compositor::encode_thumbnail(&canvas).expect("thumbnail")));
    });

    group.bench_function("rasterize_hat_512", |b| {
        b.iter(|| black_box(HatAsset::Crown.rasterize(512).expect("hat raster")));
    });

    group.finish();
}

criterion_group!(benches, compositing_benchmark);
criterion_main!(benches);
