// Polygonise one grid cell and print the resulting flat-shaded mesh
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use stillness_core::{Drawable, GridCell, TriangleMesh};
use stillness_marching::{cube_index, triangle_count, CellPolygonizer, PolygonizerConfig};

#[derive(Parser, Debug)]
#[command(about = "Polygonise a single marching cubes cell", allow_negative_numbers = true)]
struct Args {
    /// Iso level to extract
    #[arg(long, default_value_t = 0.99)]
    iso: f32,

    /// Edge length of the cube centered at the origin
    #[arg(long, default_value_t = 2.0)]
    size: f32,

    /// Eight corner densities, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0])]
    densities: Vec<f32>,

    /// Read the cell from a JSON file instead
    #[arg(long)]
    cell: Option<PathBuf>,

    /// Print the triangles as JSON
    #[arg(long)]
    json: bool,
}

fn load_cell(args: &Args) -> Result<GridCell> {
    if let Some(path) = &args.cell {
        return GridCell::from_json_file(path)
            .with_context(|| format!("loading cell from {}", path.display()));
    }

    if args.size <= 0.0 {
        bail!("cube size must be positive, got {}", args.size);
    }

    let cube = GridCell::cube(args.size);
    Ok(GridCell::from_slices(&cube.positions, &args.densities)?)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cell = load_cell(&args)?;
    let polygonizer = CellPolygonizer::new(PolygonizerConfig::default().with_iso_level(args.iso))?;

    let config = cube_index(&cell, args.iso);
    info!(
        "cell configuration {:#010b} ({}), table lists {} triangles",
        config,
        config,
        triangle_count(config)
    );

    let triangles = polygonizer.polygonise(&cell);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&triangles)?);
        return Ok(());
    }

    if triangles.is_empty() {
        warn!("no surface crosses the cell at iso level {}", args.iso);
        println!("No triangles");
        return Ok(());
    }

    let mesh = TriangleMesh::from_triangles(&triangles);
    let normals = mesh.calculate_face_normals();

    println!("Triangles: {}", triangles.len());
    for (i, (triangle, normal)) in triangles.iter().zip(&normals).enumerate() {
        println!(
            "  {}: ({:.4}, {:.4}, {:.4}) ({:.4}, {:.4}, {:.4}) ({:.4}, {:.4}, {:.4})  n = ({:.3}, {:.3}, {:.3})",
            i,
            triangle.x.x, triangle.x.y, triangle.x.z,
            triangle.y.x, triangle.y.y, triangle.y.z,
            triangle.z.x, triangle.z.y, triangle.z.z,
            normal.x, normal.y, normal.z,
        );
    }

    let (min, max) = mesh.bounding_box();
    println!("Mesh: {} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
    println!(
        "Bounds: ({:.4}, {:.4}, {:.4}) .. ({:.4}, {:.4}, {:.4})",
        min.x, min.y, min.z, max.x, max.y, max.z
    );
    println!(
        "Vertex buffer: {} vertices, {} indices",
        mesh.interleaved_vertices().len(),
        mesh.index_buffer()?.len()
    );

    Ok(())
}
