//! Binary STL reader.
//!
//! Layout (little-endian):
//!
//! - 80-byte header, ignored
//! - `u32` triangle count `N`
//! - `N` records of 50 bytes: facet normal (3 x `f32`), three vertices
//!   (9 x `f32`), `u16` attribute byte count
//!
//! Facet normals and attribute fields are read and dropped. Vertices are
//! deduplicated on the fly through a [`VertexTable`] sized for the worst
//! case of three distinct vertices per triangle, so a single pass produces
//! the final indexed [`Mesh`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use blink_math::Vec3;
use thiserror::Error;

use crate::mesh::Mesh;
use crate::vertex_table::{CapacityError, VertexTable};

/// Size of the ignored header block.
pub const HEADER_LEN: usize = 80;

/// Size of one triangle record.
pub const TRIANGLE_RECORD_LEN: usize = 50;

/// The on-disk field a short read happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlField {
    Header,
    TriangleCount,
    Normal,
    Vertices,
    AttributeByteCount,
}

impl fmt::Display for StlField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StlField::Header => "header",
            StlField::TriangleCount => "number of triangles",
            StlField::Normal => "normal",
            StlField::Vertices => "vertices",
            StlField::AttributeByteCount => "attribute byte count",
        };
        f.write_str(name)
    }
}

fn describe_read(field: &StlField, triangle: &Option<u32>) -> String {
    match triangle {
        Some(index) => format!("{field} of triangle {index}"),
        None => field.to_string(),
    }
}

/// Errors that can occur while loading an STL file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}", describe_read(.field, .triangle))]
    Parse {
        field: StlField,
        /// Zero-based triangle index, `None` for the file preamble
        triangle: Option<u32>,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Allocation(#[from] CapacityError),
}

impl LoadError {
    /// The field a parse error occurred in, if this is a parse error.
    pub fn field(&self) -> Option<StlField> {
        match self {
            LoadError::Parse { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Numbers gathered during a load, mostly for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub triangles: u32,
    pub unique_vertices: usize,
    pub duplicate_vertices: usize,
    pub longest_chain: usize,
}

/// Streaming reader over a binary STL source.
pub struct StlReader<R> {
    inner: R,
}

impl<R: Read> StlReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn read_field<const N: usize>(
        &mut self,
        field: StlField,
        triangle: Option<u32>,
    ) -> LoadResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|source| LoadError::Parse {
                field,
                triangle,
                source,
            })?;
        Ok(buf)
    }

    /// Read the whole stream into a deduplicated mesh.
    pub fn read_mesh(self) -> LoadResult<Mesh> {
        self.read_mesh_with_stats().map(|(mesh, _)| mesh)
    }

    /// Read the whole stream, also returning load statistics.
    pub fn read_mesh_with_stats(mut self) -> LoadResult<(Mesh, LoadStats)> {
        let start = Instant::now();

        self.read_field::<HEADER_LEN>(StlField::Header, None)?;
        let triangle_count =
            u32::from_le_bytes(self.read_field::<4>(StlField::TriangleCount, None)?);

        if triangle_count == 0 {
            log::warn!("STL file contains no triangles");
            return Ok((Mesh::default(), LoadStats::default()));
        }

        // Worst case: no vertex is shared between triangles
        let max_unique_vertices = (triangle_count as usize)
            .checked_mul(3)
            .ok_or(CapacityError::IndexRange(usize::MAX))?;

        let mut table = VertexTable::try_with_capacity(max_unique_vertices)?;
        let mut indices = Vec::new();
        indices
            .try_reserve_exact(max_unique_vertices)
            .map_err(|source| CapacityError::Reserve {
                capacity: max_unique_vertices,
                source,
            })?;

        for triangle in 0..triangle_count {
            let _normal = self.read_field::<12>(StlField::Normal, Some(triangle))?;
            let vertices = self.read_field::<36>(StlField::Vertices, Some(triangle))?;
            let _attribute = self.read_field::<2>(StlField::AttributeByteCount, Some(triangle))?;

            for corner in vertices.chunks_exact(12) {
                let (index, _) = table.insert(vec3_from_le(corner));
                indices.push(index);
            }
        }

        let stats = LoadStats {
            triangles: triangle_count,
            unique_vertices: table.len(),
            duplicate_vertices: indices.len() - table.len(),
            longest_chain: table.max_chain_length(),
        };

        log::info!(
            "Loaded {} triangles, {} unique vertices ({} duplicates dropped) in {:?}",
            stats.triangles,
            stats.unique_vertices,
            stats.duplicate_vertices,
            start.elapsed()
        );
        log::debug!(
            "Vertex table: {} buckets, longest chain {}",
            table.bucket_count(),
            stats.longest_chain
        );

        Ok((Mesh::new(table.into_vertices(), indices), stats))
    }
}

/// Decode three consecutive little-endian `f32`s.
fn vec3_from_le(bytes: &[u8]) -> Vec3 {
    let mut c = [0.0f32; 3];
    for (dst, chunk) in c.iter_mut().zip(bytes.chunks_exact(4)) {
        *dst = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    Vec3::from_array(c)
}

/// Load a binary STL file from disk.
///
/// # Example
///
/// ```ignore
/// use blink_core::load_stl;
///
/// let mesh = load_stl("bunny.stl")?;
/// println!("Loaded {} unique vertices", mesh.vertex_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Reading {}", path.display());
    StlReader::new(BufReader::new(file)).read_mesh()
}
