use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridfinder::{GridFinder, Mask, Pixel};

/// Build a 410x308 mask containing a painted square with a 60px margin.
fn square_mask(width: u32, height: u32, margin: u32) -> Mask {
    let mut mask = Mask::new(width, height);
    let right = width - margin - 1;
    let bottom = height - margin - 1;
    for x in margin..=right {
        mask.set(Pixel::new(x, margin));
        mask.set(Pixel::new(x, bottom));
    }
    for y in margin..=bottom {
        mask.set(Pixel::new(margin, y));
        mask.set(Pixel::new(right, y));
    }
    mask
}

fn bench_find_square(c: &mut Criterion) {
    let mask = square_mask(410, 308, 60);
    c.bench_function("find_square (410x308)", |b| {
        b.iter(|| {
            let finder = GridFinder::new(black_box(mask.clone()));
            black_box(finder.find_square());
        });
    });
}

criterion_group!(benches, bench_find_square);
criterion_main!(benches);
