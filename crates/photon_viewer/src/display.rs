//! Presenting frame buffers to a draw target.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use photon_math::Color;
use photon_renderer::FrameBuffer;

/// Something that can fill rectangles with a color.
pub trait DrawSink {
    fn draw_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color);
}

/// Draw sink backed by an in-memory RGB image.
pub struct ImageSink {
    image: RgbImage,
}

impl ImageSink {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        Color::from(self.image.get_pixel(x, y).0)
    }

    /// Write the image to disk; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image
            .save(path)
            .with_context(|| format!("Failed to save image to {}", path.display()))
    }
}

impl DrawSink for ImageSink {
    fn draw_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let x_end = x.saturating_add(width).min(self.image.width());
        let y_end = y.saturating_add(height).min(self.image.height());
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, Rgb(color.to_array()));
            }
        }
    }
}

/// Draw a supersampled buffer at display size, shrinking it by `factor`
/// per axis with box averaging.
pub fn present(buffer: &FrameBuffer, factor: u32, sink: &mut dyn DrawSink) {
    let frame = buffer.downsample(factor);
    for y in 0..frame.height() {
        for (x, &color) in frame.row(y).iter().enumerate() {
            sink.draw_rect(x as u32, y, 1, 1, color);
        }
    }
}

/// Progress line shown while a pass is in flight.
pub fn progress_text(progress: f32) -> String {
    format!("Rendering: {}%", (progress.clamp(0.0, 1.0) * 100.0) as u32)
}
