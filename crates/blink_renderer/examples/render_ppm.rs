//! Headless render example.
//!
//! Renders the default scene into an in-memory framebuffer and saves it
//! as PPM.

use std::fs::File;
use std::io::BufWriter;

use blink_renderer::{render_frame, FrameBuffer, RenderConfig, Scene};

fn main() {
    println!("Blink - Headless Render");
    println!("=======================");

    let scene = Scene::default();
    let config = RenderConfig::default();
    let mut framebuffer = FrameBuffer::new(config.width, config.height);

    println!("Rendering {}x{}...", config.width, config.height);

    let start = std::time::Instant::now();
    render_frame(&mut framebuffer, &scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    let file = File::create(filename).expect("Failed to create output file");
    framebuffer
        .write_ppm(BufWriter::new(file))
        .expect("Failed to save image");
    println!("Saved to {}", filename);
}
