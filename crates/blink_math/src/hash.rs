//! 32-bit fingerprint of a vertex position.
//!
//! The hash is a pure function of the IEEE-754 bit patterns of the three
//! components, so `0.0` and `-0.0` (or two NaNs with different payloads)
//! fingerprint differently. It only picks a bucket; identity is always
//! decided by an exact bit comparison.

use crate::Vec3;

/// Invertible xorshift-multiply mixer ("hash prospector" constants).
#[inline]
pub fn mix32(mut x: u32) -> u32 {
    x ^= x >> 17;
    x = x.wrapping_mul(0xed5a_d4bb);
    x ^= x >> 11;
    x = x.wrapping_mul(0xac4c_1b51);
    x ^= x >> 15;
    x = x.wrapping_mul(0x3184_8bab);
    x ^= x >> 14;
    x
}

/// Fingerprint three floats by folding their bit patterns through [`mix32`].
#[inline]
pub fn fingerprint(x: f32, y: f32, z: f32) -> u32 {
    let mut h = 0u32;
    h = mix32(h ^ x.to_bits());
    h = mix32(h ^ y.to_bits());
    h = mix32(h ^ z.to_bits());
    h
}

#[inline]
pub fn fingerprint_vec3(v: Vec3) -> u32 {
    fingerprint(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix32_zero_is_fixed_point() {
        assert_eq!(mix32(0), 0);
    }

    #[test]
    fn test_mix32_has_no_collisions_on_small_inputs() {
        let outputs: std::collections::HashSet<u32> = (0..10_000u32).map(mix32).collect();
        assert_eq!(outputs.len(), 10_000);
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = fingerprint(0.25, -3.5, 1e-7);
        let b = fingerprint(0.25, -3.5, 1e-7);
        assert_eq!(a, b);
        assert_eq!(fingerprint_vec3(Vec3::new(0.25, -3.5, 1e-7)), a);
    }

    #[test]
    fn test_fingerprint_of_origin_is_zero() {
        // All-zero bits never leave the mixer's fixed point
        assert_eq!(fingerprint(0.0, 0.0, 0.0), 0);
    }

    #[test]
    fn test_single_bit_flip_changes_fingerprint() {
        let base = [1.0f32, 2.0, 3.0];
        let reference = fingerprint(base[0], base[1], base[2]);

        for component in 0..3 {
            for bit in 0..32 {
                let mut flipped = base;
                flipped[component] = f32::from_bits(flipped[component].to_bits() ^ (1 << bit));
                let h = fingerprint(flipped[0], flipped[1], flipped[2]);
                assert_ne!(h, reference, "component {component}, bit {bit}");
            }
        }
    }

    #[test]
    fn test_signed_zero_is_distinct() {
        assert_ne!(fingerprint(0.0, 0.0, 0.0), fingerprint(-0.0, 0.0, 0.0));
    }

    #[test]
    fn test_component_order_matters() {
        assert_ne!(fingerprint(1.0, 2.0, 3.0), fingerprint(3.0, 2.0, 1.0));
    }
}
