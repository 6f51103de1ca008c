//! Fixed-capacity vertex deduplication table.
//!
//! Vertices are keyed on the exact bit patterns of their three components,
//! never on approximate equality. Buckets hold the head of a singly-linked
//! chain; chain nodes live in an arena and link to each other by index, so
//! nothing moves or is freed before the table itself.

use std::collections::TryReserveError;

use blink_math::{fingerprint_vec3, Vec3};
use thiserror::Error;

/// Errors raised while sizing a [`VertexTable`].
#[derive(Error, Debug)]
pub enum CapacityError {
    #[error("vertex capacity {0} exceeds the 32-bit index range")]
    IndexRange(usize),

    #[error("failed to allocate storage for {capacity} vertices: {source}")]
    Reserve {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Chain node stored in the arena.
#[derive(Debug, Clone, Copy)]
struct Node {
    key: [u32; 3],
    value: u32,
    next: Option<u32>,
}

/// Chained hash table mapping vertex positions to stable, sequential indices.
///
/// The bucket count is fixed at construction. `capacity` is the number of
/// distinct vertices the arena is reserved for; within it no insert
/// allocates. Inserting past it still works (the arena grows, chains get
/// longer), it just stops being allocation-free.
#[derive(Debug)]
pub struct VertexTable {
    buckets: Vec<Option<u32>>,
    nodes: Vec<Node>,
    vertices: Vec<Vec3>,
}

/// Bit-pattern key: `0.0` and `-0.0` are different vertices.
#[inline]
fn key_of(v: Vec3) -> [u32; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

fn reserve<T>(storage: &mut Vec<T>, capacity: usize) -> Result<(), CapacityError> {
    storage
        .try_reserve_exact(capacity)
        .map_err(|source| CapacityError::Reserve { capacity, source })
}

impl VertexTable {
    /// Create a table for up to `capacity` distinct vertices, with one
    /// bucket per potential vertex.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        if capacity > u32::MAX as usize {
            return Err(CapacityError::IndexRange(capacity));
        }

        // At least one bucket so the modulo below is always defined
        let bucket_count = capacity.max(1);

        let mut buckets = Vec::new();
        reserve(&mut buckets, bucket_count)?;
        buckets.resize(bucket_count, None);

        let mut nodes = Vec::new();
        reserve(&mut nodes, capacity)?;

        let mut vertices = Vec::new();
        reserve(&mut vertices, capacity)?;

        Ok(Self {
            buckets,
            nodes,
            vertices,
        })
    }

    #[inline]
    fn bucket_of(&self, v: Vec3) -> usize {
        fingerprint_vec3(v) as usize % self.buckets.len()
    }

    /// Walk a bucket's chain looking for an exact key match.
    fn find(&self, bucket: usize, key: [u32; 3]) -> Option<u32> {
        let mut cursor = self.buckets[bucket];
        while let Some(handle) = cursor {
            let node = &self.nodes[handle as usize];
            if node.key == key {
                return Some(node.value);
            }
            cursor = node.next;
        }
        None
    }

    /// Look up the index previously assigned to `v`.
    pub fn get(&self, v: Vec3) -> Option<u32> {
        self.find(self.bucket_of(v), key_of(v))
    }

    /// Insert `v` if it has not been seen before.
    ///
    /// Returns the vertex's index and whether it was newly added. Indices
    /// are assigned sequentially in first-seen order and never change.
    pub fn insert(&mut self, v: Vec3) -> (u32, bool) {
        let bucket = self.bucket_of(v);
        let key = key_of(v);

        if let Some(index) = self.find(bucket, key) {
            return (index, false);
        }

        let index = self.vertices.len() as u32;
        let handle = self.nodes.len() as u32;

        // New node becomes the bucket head
        self.nodes.push(Node {
            key,
            value: index,
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = Some(handle);
        self.vertices.push(v);

        (index, true)
    }

    /// Number of distinct vertices inserted so far.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of buckets (fixed at construction).
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Unique vertices in first-seen order.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Consume the table, keeping only the unique-vertex sequence.
    pub fn into_vertices(self) -> Vec<Vec3> {
        self.vertices
    }

    /// Length of the longest bucket chain.
    pub fn max_chain_length(&self) -> usize {
        self.buckets
            .iter()
            .map(|head| {
                let mut length = 0;
                let mut cursor = *head;
                while let Some(handle) = cursor {
                    length += 1;
                    cursor = self.nodes[handle as usize].next;
                }
                length
            })
            .max()
            .unwrap_or(0)
    }
}
