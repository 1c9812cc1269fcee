//! rkfield quickstart: build a grid, step it, plug in a custom kernel.
//!
//! Demonstrates:
//!   1. Creating a FieldGrid and seeding an initial pulse
//!   2. Stepping with the built-in LocalWaveKernel
//!   3. Reading field statistics and status bits
//!   4. Implementing a Derivative with a 4-connected stencil
//!   5. Running with the finiteness check enabled
//!
//! Run with:
//!   RUST_LOG=rkfield_solver=debug cargo run --example quickstart

use rkfield::prelude::*;
use tracing_subscriber::EnvFilter;

// ─── Grid parameters ────────────────────────────────────────────

const WIDTH: usize = 8;
const HEIGHT: usize = 8;
const DT: f64 = 0.05;
const DIFFUSION: f64 = 0.2;

// ─── Derivative: pressure diffusion on top of the local wave ────
//
// The local wave kernel leaves pressure alone. This kernel adds a
// 4-connected Laplacian on pressure with reflecting edges, so a pulse
// spreads across the grid while potential and velocity oscillate.

struct DiffusingWave;

impl Derivative<f64> for DiffusingWave {
    fn name(&self) -> &str {
        "diffusing_wave"
    }

    fn evaluate(&self, state: &FieldGrid<f64>, out: &mut FieldGrid<f64>) {
        LocalWaveKernel.evaluate(state, out);

        let (w, h) = (state.width(), state.height());
        let p = state.pressure();
        let d_p = out.pressure_mut();
        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let n = if y > 0 { p[i - w] } else { p[i] };
                let s = if y + 1 < h { p[i + w] } else { p[i] };
                let west = if x > 0 { p[i - 1] } else { p[i] };
                let east = if x + 1 < w { p[i + 1] } else { p[i] };
                d_p[i] = DIFFUSION * (n + s + west + east - 4.0 * p[i]);
            }
        }
    }
}

fn print_stats(label: &str, grid: &FieldGrid<f64>) {
    for kind in [FieldKind::Potential, FieldKind::Vx, FieldKind::Pressure] {
        if let Some(s) = grid.field_stats(kind) {
            println!(
                "  {label:>8} {kind:<9} min={:+.5} max={:+.5} mean={:+.5}",
                s.min, s.max, s.mean
            );
        }
    }
}

// ─── Main ───────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== rkfield quickstart ===\n");

    // 1. Create the grid and seed a pulse in the centre.
    let mut grid = FieldGrid::<f64>::try_new(WIDTH, HEIGHT)?;
    grid.set(FieldKind::Potential, WIDTH / 2, HEIGHT / 2, 1.0)?;
    grid.set(FieldKind::Pressure, WIDTH / 2, HEIGHT / 2, 10.0)?;
    grid.set_state(0, true);
    println!(
        "Grid: {}x{}, {} cells padded to {}, {} bytes",
        grid.width(),
        grid.height(),
        grid.active_size(),
        grid.padded_size(),
        grid.memory_bytes()
    );

    // 2. Step with the built-in kernel.
    let mut solver = Rk4Solver::new();
    let reallocations = solver.advance(&mut grid, DT, 20)?;
    println!("\nLocal wave, 20 steps (scratch reallocations: {reallocations})");
    print_stats("wave", &grid);

    // 3. Status bits survive stepping untouched.
    println!("  flagged cells: {}", grid.status().count_ones());

    // 4. Swap in the stencil kernel with the finiteness check on.
    let mut diffusing =
        Rk4Solver::with_kernel(DiffusingWave).with_config(SolverConfig::checked());
    let mut spread = grid.clone();
    for step in 1..=40 {
        diffusing.step(&mut spread, DT)?;
        if step % 10 == 0 {
            let p = spread.field_stats(FieldKind::Pressure).ok_or("empty grid")?;
            println!("  step {step:>3}: pressure max={:.5} sum={:.5}", p.max, p.sum);
        }
    }
    print_stats("diffused", &spread);

    // 5. A moved-out grid leaves an empty one behind.
    let taken = spread.take();
    println!(
        "\nTook {}x{} grid; source is now {}x{}",
        taken.width(),
        taken.height(),
        spread.width(),
        spread.height()
    );
    Ok(())
}
