// Sweep the iso level across one cell and report how its classification changes
use anyhow::{bail, Result};
use clap::Parser;
use log::debug;
use stillness_core::GridCell;
use stillness_marching::{cube_index, polygonise};

#[derive(Parser, Debug)]
#[command(about = "Sweep the iso level across a single cell", allow_negative_numbers = true)]
struct Args {
    /// Lowest iso level
    #[arg(long, default_value_t = -0.25)]
    from: f32,

    /// Highest iso level
    #[arg(long, default_value_t = 1.25)]
    to: f32,

    /// Number of iso levels to sample
    #[arg(long, default_value_t = 13)]
    steps: usize,

    /// Eight corner densities, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 1.0])]
    densities: Vec<f32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.steps < 2 {
        bail!("need at least two steps, got {}", args.steps);
    }
    if args.to <= args.from {
        bail!("empty range {} .. {}", args.from, args.to);
    }

    let cube = GridCell::cube(1.0);
    let cell = GridCell::from_slices(&cube.positions, &args.densities)?;

    println!("{:>10}  {:>6}  {:>8}  {:>9}", "iso", "index", "bits", "triangles");
    for step in 0..args.steps {
        let t = step as f32 / (args.steps - 1) as f32;
        let iso = args.from + t * (args.to - args.from);

        let config = cube_index(&cell, iso);
        let triangles = polygonise(&cell, iso);
        debug!("iso {} -> {} triangles", iso, triangles.len());

        println!(
            "{:>10.4}  {:>6}  {:08b}  {:>9}",
            iso,
            config,
            config,
            triangles.len()
        );
    }

    Ok(())
}
