//! Math types shared by the blink crates.
//!
//! `Vec3` is glam's, re-exported as-is. Its `normalize` divides by the
//! length without a guard: normalizing a zero-length vector produces
//! non-finite components and is a precondition violation on the caller.

// Re-export glam for convenience
pub use glam::*;

pub mod hash;
mod ray;

pub use hash::{fingerprint, fingerprint_vec3};
pub use ray::Ray;
