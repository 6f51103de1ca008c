//! Blink Renderer - CPU ray casting.
//!
//! One camera ray per pixel against an analytic sphere, shaded with a
//! single Blinn-Phong point light. Output goes through a
//! [`DisplaySurface`], which can be a window or an in-memory
//! [`FrameBuffer`].

mod light;
mod renderer;
mod sphere;
mod surface;

pub use light::{blinn_phong, Color, Lighting, PointLight};
pub use renderer::{
    camera_ray, color_to_rgb, render_frame, run, shade_pixel, RenderConfig, RenderState, Scene,
};
pub use sphere::{Hit, Sphere};
pub use surface::{DisplaySurface, FrameBuffer};

/// Re-export Vec3 and Ray from blink_math
pub use blink_math::{Ray, Vec3};
