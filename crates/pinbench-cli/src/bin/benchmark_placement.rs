use pinbench_core::placement::{GridPlacer, PlacementStats};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::time::{Duration, Instant};

fn time_density(
    placer: &mut GridPlacer<ChaCha12Rng>,
    pins: usize,
    rounds: u32,
) -> (Duration, PlacementStats) {
    let mut totals = PlacementStats::default();
    let start = Instant::now();
    for _ in 0..rounds {
        let stats = placer
            .place(pins)
            .unwrap_or_else(|e| panic!("placement of {pins} pins failed: {e}"));
        totals.accumulate(&stats);
        placer.clear();
    }
    (start.elapsed(), totals)
}

fn main() {
    let grid_size = 200;
    let cells = grid_size * grid_size;
    let rounds = 20;
    println!(
        "Benchmarking placement on a {grid_size}x{grid_size} grid ({cells} cells), {rounds} rounds per density"
    );

    let mut placer = GridPlacer::new(grid_size, ChaCha12Rng::seed_from_u64(42));

    for (label, pins) in [
        ("sparse (1%)", cells / 100),
        ("half (50%)", cells / 2),
        ("dense (90%)", cells * 9 / 10),
        ("full (100%)", cells),
    ] {
        let (elapsed, totals) = time_density(&mut placer, pins, rounds);
        println!("{label}: {pins} pins");
        println!("  Avg time per placement: {:?}", elapsed / rounds);
        println!(
            "  Redraws per pin: {:.3}, probed pins: {:.2}%",
            totals.redraws as f64 / totals.pins as f64,
            100.0 * totals.probe_fallbacks as f64 / totals.pins as f64
        );
    }
}
