//! Per-pixel ray casting loop.
//!
//! Every frame is a full recomputation: one ray per pixel from the origin,
//! intersected against the scene sphere and shaded with Blinn-Phong. No
//! anti-aliasing, no gamma correction.

use std::time::Instant;

use blink_math::{Ray, Vec3};

use crate::{blinn_phong, Color, DisplaySurface, PointLight, Sphere};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Blinn-Phong specular exponent
    pub specular_hardness: f32,
    /// Color written when a ray misses everything
    pub background: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            specular_hardness: 20.0,
            background: [0, 0, 0],
        }
    }
}

/// Everything a frame is rendered from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub sphere: Sphere,
    pub light: PointLight,
}

impl Default for Scene {
    /// Unit sphere two units in front of the camera, lit by a white light
    /// up and to the left.
    fn default() -> Self {
        Self {
            sphere: Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0),
            light: PointLight::new(Vec3::new(-1.0, -1.0, 0.0), Color::ONE, 1.0),
        }
    }
}

/// Loop state: rendering continues until the surface asks to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Running,
    Stopped,
}

/// Camera ray through pixel `(x, y)`.
///
/// Pixel coordinates map to `[-1, 1]` on both axes, the horizontal axis is
/// stretched by `width / height`, and the ray leaves the origin toward
/// `(x, y, -1)`. Screen `y` grows downward and is not flipped.
pub fn camera_ray(x: u32, y: u32, width: u32, height: u32) -> Ray {
    let aspect = width as f32 / height as f32;

    // Transform to NDC and correct aspect ratio
    let ndc_x = (2.0 * (x as f32 / width as f32) - 1.0) * aspect;
    let ndc_y = 2.0 * (y as f32 / height as f32) - 1.0;

    Ray::new(Vec3::ZERO, Vec3::new(ndc_x, ndc_y, -1.0).normalize())
}

/// Convert a linear color to 8-bit RGB.
///
/// Each channel is scaled by 255, clamped to `[0, 255]` and truncated.
/// Non-finite channels become 0.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    color
        .to_array()
        .map(|channel| (channel * 255.0).clamp(0.0, 255.0) as u8)
}

/// Compute the color seen by a single ray.
pub fn shade_pixel(ray: &Ray, scene: &Scene, config: &RenderConfig) -> [u8; 3] {
    match scene.sphere.intersect(ray) {
        Some(hit) => {
            // View direction points back toward the camera
            let lighting = blinn_phong(
                &scene.light,
                hit.position,
                hit.normal,
                -ray.direction,
                config.specular_hardness,
            );
            color_to_rgb(lighting.total())
        }
        None => config.background,
    }
}

/// Cast one ray per pixel of `surface` and write the results.
pub fn render_frame(surface: &mut dyn DisplaySurface, scene: &Scene, config: &RenderConfig) {
    let (width, height) = surface.size();

    for x in 0..width {
        for y in 0..height {
            let ray = camera_ray(x, y, width, height);
            surface.draw_pixel(x, y, shade_pixel(&ray, scene, config));
        }
    }
}

/// Render frames until the surface stops.
///
/// Events are processed once before each frame. Returns the number of
/// frames rendered.
pub fn run(surface: &mut dyn DisplaySurface, scene: &Scene, config: &RenderConfig) -> u64 {
    let (width, height) = surface.size();
    log::info!("Rendering {}x{}", width, height);

    let mut state = RenderState::Running;
    let mut frames = 0u64;

    while state == RenderState::Running {
        if !surface.process_events() {
            state = RenderState::Stopped;
            continue;
        }

        let start = Instant::now();
        render_frame(surface, scene, config);
        surface.present();
        frames += 1;

        log::debug!("Frame {} in {:?}", frames, start.elapsed());
    }

    log::info!("Stopped after {} frames", frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameBuffer;

    #[test]
    fn test_center_ray_looks_down_negative_z() {
        let ray = camera_ray(320, 240, 640, 480);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_corner_ray_is_aspect_corrected() {
        let ray = camera_ray(0, 0, 640, 480);
        let expected = Vec3::new(-640.0 / 480.0, -1.0, -1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-6);
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_ray_hits_default_sphere() {
        let scene = Scene::default();
        let ray = camera_ray(320, 240, 640, 480);

        let hit = scene.sphere.intersect(&ray).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!((hit.position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_color_to_rgb_clamps() {
        assert_eq!(color_to_rgb(Color::new(1.5, -0.2, 0.5)), [255, 0, 127]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(f32::NAN, 0.0, 0.0)), [0, 0, 0]);
    }

    #[test]
    fn test_miss_uses_background() {
        let config = RenderConfig {
            background: [1, 2, 3],
            ..Default::default()
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(shade_pixel(&ray, &Scene::default(), &config), [1, 2, 3]);
    }

    #[test]
    fn test_disabled_light_renders_black_sphere() {
        let scene = Scene {
            light: PointLight::disabled(),
            ..Default::default()
        };
        let config = RenderConfig {
            background: [9, 9, 9],
            ..Default::default()
        };
        let ray = camera_ray(320, 240, 640, 480);
        assert_eq!(shade_pixel(&ray, &scene, &config), [0, 0, 0]);
    }

    #[test]
    fn test_render_frame() {
        let scene = Scene::default();
        let config = RenderConfig::default();
        let mut fb = FrameBuffer::new(64, 48);

        render_frame(&mut fb, &scene, &config);

        // Center pixel faces the camera: lit, grey (white light)
        let [r, g, b] = fb.get(32, 24);
        assert!((50..=60).contains(&r), "center pixel was {r}");
        assert_eq!(r, g);
        assert_eq!(g, b);

        // Corners miss the sphere
        assert_eq!(fb.get(0, 0), [0, 0, 0]);
        assert_eq!(fb.get(63, 47), [0, 0, 0]);

        // The side facing the light (negative x and y) is brighter
        assert!(fb.get(26, 18)[0] > fb.get(38, 30)[0]);
    }

    #[test]
    fn test_run_stops_when_surface_stops() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut fb = FrameBuffer::with_frame_budget(8, 6, 3);
        let frames = run(&mut fb, &Scene::default(), &RenderConfig::default());

        assert_eq!(frames, 3);
        assert_eq!(fb.frames_presented(), 3);
    }

    #[test]
    fn test_run_with_no_frames() {
        let mut fb = FrameBuffer::with_frame_budget(8, 6, 0);
        assert_eq!(run(&mut fb, &Scene::default(), &RenderConfig::default()), 0);
        assert_eq!(fb.frames_presented(), 0);
    }
}
