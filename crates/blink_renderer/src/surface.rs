//! Pixel output targets.

use std::io::{self, Write};

/// Something the render loop can draw pixels into.
///
/// A surface has a fixed size chosen at creation. Events are processed
/// once between frames, never during pixel work.
pub trait DisplaySurface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Handle pending events. Returns `false` once the application should
    /// stop.
    fn process_events(&mut self) -> bool;

    /// Write one 8-bit RGB pixel. `(0, 0)` is the top-left corner.
    fn draw_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]);

    /// Show the finished frame.
    fn present(&mut self) {}
}

/// In-memory RGB8 surface that stops after a fixed number of frames.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
    frames_remaining: u64,
    frames_presented: u64,
}

impl FrameBuffer {
    /// Create a black framebuffer that allows a single frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_frame_budget(width, height, 1)
    }

    /// Create a black framebuffer whose `process_events` keeps returning
    /// `true` for `frames` calls.
    pub fn with_frame_budget(width: u32, height: u32, frames: u64) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; (width as usize) * (height as usize)],
            frames_remaining: frames,
            frames_presented: 0,
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.offset(x, y)]
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Write the contents as a plain-text PPM (P3) image.
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for [r, g, b] in &self.pixels {
            writeln!(writer, "{} {} {}", r, g, b)?;
        }

        Ok(())
    }
}

impl DisplaySurface for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn process_events(&mut self) -> bool {
        if self.frames_remaining == 0 {
            return false;
        }
        self.frames_remaining -= 1;
        true
    }

    fn draw_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let offset = self.offset(x, y);
        self.pixels[offset] = rgb;
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.size(), (4, 3));
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|p| *p == [0, 0, 0]));
    }

    #[test]
    fn test_draw_pixel_row_major() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.draw_pixel(3, 1, [10, 20, 30]);

        assert_eq!(fb.get(3, 1), [10, 20, 30]);
        assert_eq!(fb.pixels()[7], [10, 20, 30]);
        assert_eq!(fb.get(1, 1), [0, 0, 0]);
    }

    #[test]
    fn test_frame_budget() {
        let mut fb = FrameBuffer::with_frame_budget(1, 1, 2);
        assert!(fb.process_events());
        assert!(fb.process_events());
        assert!(!fb.process_events());
        assert!(!fb.process_events());
    }

    #[test]
    fn test_write_ppm() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.draw_pixel(1, 0, [255, 128, 0]);

        let mut out = Vec::new();
        fb.write_ppm(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P3\n2 1\n255\n0 0 0\n255 128 0\n");
    }
}
