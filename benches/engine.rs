use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridfall::engine::{Command, Engine, EngineConfig, ShapeTable};
use gridfall::grid::flood_fill;
use gridfall::types::Cell;

fn bench_gravity_step(c: &mut Criterion) {
    let mut game = Engine::new(EngineConfig::default(), ShapeTable::Pentomino).unwrap();
    game.reset();

    c.bench_function("gravity_step", |b| {
        b.iter(|| {
            if game.is_over() {
                game.apply(Command::Reset);
            }
            game.apply(black_box(Command::StepDown));
            game.take_events();
        })
    });
}

fn bench_shift(c: &mut Criterion) {
    let mut game = Engine::new(EngineConfig::default(), ShapeTable::Pentomino).unwrap();
    game.reset();

    c.bench_function("shift_left_right", |b| {
        b.iter(|| {
            game.apply(black_box(Command::MoveLeft));
            game.apply(black_box(Command::MoveRight));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = Engine::new(EngineConfig::default(), ShapeTable::Pentomino).unwrap();
    game.reset();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            game.apply(black_box(Command::Rotate));
        })
    });
}

fn bench_flood_fill(c: &mut Criterion) {
    // A full 20x10 block: one large component, worst case for the scan.
    let cells: HashSet<Cell> = (0..20)
        .flat_map(|r| (0..10).map(move |c| Cell::new(r, c)))
        .collect();

    c.bench_function("flood_fill_200_cells", |b| {
        b.iter(|| flood_fill(black_box(&cells)))
    });
}

fn bench_animate(c: &mut Criterion) {
    let config = EngineConfig {
        slide_ratios: vec![0.25, 0.5, 0.75, 1.0],
        fall_ratios: vec![0.5, 1.0],
        ..EngineConfig::default()
    };
    let mut game = Engine::new(config, ShapeTable::Pentomino).unwrap();
    game.reset();

    c.bench_function("animate_frame", |b| {
        b.iter(|| {
            game.apply(Command::MoveLeft);
            game.apply(Command::MoveRight);
            game.animate();
        })
    });
}

criterion_group!(
    benches,
    bench_gravity_step,
    bench_shift,
    bench_rotate,
    bench_flood_fill,
    bench_animate
);
criterion_main!(benches);
