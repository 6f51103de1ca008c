//! Sphere primitive for ray casting.

use blink_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Record of a ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Outward unit normal at the intersection
    pub normal: Vec3,
}

impl Sphere {
    /// Create a new sphere. `radius` is expected to be positive.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Distance along `ray` to the first surface crossing in front of its
    /// origin.
    ///
    /// Solves `a t^2 + b t + c = 0` with the full `a = dot(d, d)`, so the
    /// direction does not have to be unit length. The near root wins when
    /// it is non-negative; otherwise the far root is used, which is the
    /// exit point seen from inside the sphere. Hits behind the origin are
    /// rejected.
    ///
    /// A zero direction makes `a` zero and the roots non-finite; that is a
    /// caller error and surfaces as a miss.
    pub fn intersect_t(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        let near = (-b - sqrtd) / (2.0 * a);
        if near >= 0.0 {
            return Some(near);
        }

        let far = (-b + sqrtd) / (2.0 * a);
        (far >= 0.0).then_some(far)
    }

    /// Intersect and derive the hit position and outward normal.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let t = self.intersect_t(ray)?;
        let position = ray.at(t);
        let normal = (position - self.center) / self.radius;
        Some(Hit {
            t,
            position,
            normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_sphere_hit_head_on() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0).normalize());

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.t - 1.0).abs() < EPS);
        assert!((hit.position - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < EPS);
    }

    #[test]
    fn test_hit_distance_is_center_minus_radius() {
        let center = Vec3::new(3.0, -4.0, 12.0);
        let sphere = Sphere::new(center, 2.5);
        let origin = Vec3::new(0.0, 0.0, 0.0);
        let ray = Ray::new(origin, (center - origin).normalize());

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.t - (13.0 - 2.5)).abs() < 1e-4);
        assert!(((hit.position - center).length() - 2.5).abs() < 1e-4);

        // Normal is unit length and parallel to position - center
        assert!((hit.normal.length() - 1.0).abs() < 1e-4);
        assert!(hit.normal.cross(hit.position - center).length() < 1e-3);
        assert!(hit.normal.dot(hit.position - center) > 0.0);
    }

    #[test]
    fn test_non_unit_direction() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0));

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.t - 0.25).abs() < EPS);
        assert!((hit.position - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0);

        // Ray pointing sideways
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sphere.intersect(&ray), None);

        // Just outside the silhouette
        let ray = Ray::new(Vec3::new(0.0, 1.001, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(sphere.intersect_t(&ray), None);
    }

    #[test]
    fn test_sphere_behind_origin_is_a_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn test_origin_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.t - 1.0).abs() < EPS);
        assert!((hit.position - Vec3::new(0.0, 0.0, -3.0)).length() < EPS);
        // Still the outward normal
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_zero_direction_is_a_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO);
        assert_eq!(sphere.intersect_t(&ray), None);
    }
}
