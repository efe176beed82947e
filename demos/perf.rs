//! Performance profiling example for query_poly
//!
//! Performs intensive polygon queries on a large dataset.
//! Designed to be used with low-level profilers like `samply`:
//!
//! ```bash
//! samply record cargo run --release --example perf
//! ```

use polyrange::prelude::*;
use std::time::Instant;

/// Simple LCG returning values in [0, 1)
fn next_unit(rng: &mut u64) -> f64 {
    *rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (*rng >> 32) as f64 / (u64::from(u32::MAX) + 1) as f64
}

fn main() -> Result<(), RangeSearchError> {
    println!("Generating 1,000,000 points...");
    let mut rng = 12345_u64;
    let points: Vec<Point> = (0..1_000_000)
        .map(|_| Point::new(next_unit(&mut rng) * 1000.0, next_unit(&mut rng) * 1000.0))
        .collect();

    let build_start = Instant::now();
    let engine = RangeSearch::new(points)?;
    let build_duration = build_start.elapsed();

    let mut found = 0;
    let query_start = Instant::now();

    // Each query is a diamond inscribed in a window covering ~1% of the space
    for _ in 0..100_000 {
        let cx = next_unit(&mut rng) * 1000.0;
        let cy = next_unit(&mut rng) * 1000.0;
        let r = 50.0;
        let diamond = Polygon::new(vec![
            Point::new(cx, cy - r),
            Point::new(cx + r, cy),
            Point::new(cx, cy + r),
            Point::new(cx - r, cy),
        ])?;
        found += engine.query_poly_count(&diamond);
    }

    let query_duration = query_start.elapsed();

    println!(
        "\nCompleted 100,000 queries in {:.2}ms ({:.2}µs per query, {} points found)",
        query_duration.as_secs_f64() * 1000.0,
        query_duration.as_secs_f64() * 1_000_000.0 / 100_000.0,
        found
    );

    println!("\nProfile Summary:");
    println!("  Building: {:.2}ms", build_duration.as_secs_f64() * 1000.0);
    println!("  Querying: {:.2}ms", query_duration.as_secs_f64() * 1000.0);
    println!("  Total:    {:.2}ms", (build_duration + query_duration).as_secs_f64() * 1000.0);
    Ok(())
}
