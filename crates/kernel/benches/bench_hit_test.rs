use std::hint::black_box;
use std::time::Instant;

use arena_common::ArenaConfig;
use arena_input::Action;
use arena_kernel::Arena;

fn make_arena(target_count: usize) -> Arena {
    let config = ArenaConfig {
        target_count,
        seed: Some(42),
        ..ArenaConfig::default()
    };
    Arena::new(config, 16.0 / 9.0).expect("default config is valid")
}

fn bench_nearest_hit(target_count: usize, iterations: usize) {
    let arena = make_arena(target_count);
    let ray = arena.camera().ray();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(arena.nearest_hit(black_box(&ray)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  nearest_hit ({target_count} targets, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_update(target_count: usize, iterations: usize) {
    let mut arena = make_arena(target_count);
    let actions = [Action::Look(glam::Vec2::new(3.0, 0.0)), Action::Fire];

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(arena.update(black_box(1.0 / 60.0), black_box(&actions)));
        arena.drain_events();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  update ({target_count} targets, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("arena-kernel hit-test benchmarks");
    for count in [5, 100, 1_000] {
        bench_nearest_hit(count, 10_000);
    }
    for count in [5, 100] {
        bench_update(count, 10_000);
    }
}
