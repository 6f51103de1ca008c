//! Blink Core - mesh loading for the blink renderer.
//!
//! This crate provides:
//!
//! - **Binary STL reading**: `StlReader` / `load_stl`
//! - **Vertex deduplication**: `VertexTable`, a fixed-capacity chained hash
//!   table keyed on exact vertex bit patterns
//! - **Indexed meshes**: `Mesh` with unique positions in first-seen order
//!
//! # Example
//!
//! ```ignore
//! use blink_core::load_stl;
//!
//! let mesh = load_stl("part.stl")?;
//! println!("{} triangles, {} unique vertices",
//!     mesh.triangle_count(),
//!     mesh.vertex_count());
//! ```

pub mod mesh;
pub mod stl;
pub mod vertex_table;

// Re-export commonly used types
pub use mesh::Mesh;
pub use stl::{load_stl, LoadError, LoadResult, LoadStats, StlField, StlReader};
pub use vertex_table::{CapacityError, VertexTable};
