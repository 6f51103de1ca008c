//! Example: Load and inspect a binary STL file.
//!
//! Run with: cargo run --example load_stl -- path/to/mesh.stl

use std::env;

use blink_core::StlReader;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_stl <path-to-stl-file>");
        return;
    }

    let path = &args[1];
    println!("Loading STL file: {}", path);

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error opening STL file: {}", e);
            return;
        }
    };

    match StlReader::new(std::io::BufReader::new(file)).read_mesh_with_stats() {
        Ok((mesh, stats)) => {
            println!("\n=== Mesh ===");
            println!("Triangles: {}", mesh.triangle_count());
            println!("Unique vertices: {}", mesh.vertex_count());
            println!("Duplicates dropped: {}", stats.duplicate_vertices);
            println!("Longest bucket chain: {}", stats.longest_chain);

            if let Some((min, max)) = mesh.bounds() {
                println!("\n--- Bounds ---");
                println!("  Min: ({:.2}, {:.2}, {:.2})", min.x, min.y, min.z);
                println!("  Max: ({:.2}, {:.2}, {:.2})", max.x, max.y, max.z);
            }
        }
        Err(e) => {
            eprintln!("Error loading STL file: {}", e);
        }
    }
}
