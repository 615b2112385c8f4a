//! Row-major color buffer written by render passes.

use photon_math::Color;

use crate::band::RowBand;

/// Dense row-major array of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Pixels of row `y`.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Split the pixel storage into one exclusive slice per band.
    ///
    /// `bands` must be contiguous, in order, and cover every row; this is
    /// what [`crate::band::partition_rows`] produces.
    pub fn split_bands(&mut self, bands: &[RowBand]) -> Vec<&mut [Color]> {
        let width = self.width as usize;
        let mut rest: &mut [Color] = &mut self.pixels;
        let mut slices = Vec::with_capacity(bands.len());

        for band in bands {
            let len = (band.rows as usize * width).min(rest.len());
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
            slices.push(head);
            rest = tail;
        }

        slices
    }

    /// Box-filter the buffer down by `factor` per axis.
    ///
    /// Trailing rows/columns that do not fill a whole block are dropped.
    pub fn downsample(&self, factor: u32) -> FrameBuffer {
        let factor = factor.max(1);
        if factor == 1 {
            return self.clone();
        }

        let width = self.width / factor;
        let height = self.height / factor;
        let area = (factor * factor) as f64;
        let mut out = FrameBuffer::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let mut sum = [0u32; 3];
                for dy in 0..factor {
                    for dx in 0..factor {
                        let c = self.get(x * factor + dx, y * factor + dy);
                        sum[0] += c.r as u32;
                        sum[1] += c.g as u32;
                        sum[2] += c.b as u32;
                    }
                }
                out.set(
                    x,
                    y,
                    Color::from_f64(
                        sum[0] as f64 / area,
                        sum[1] as f64 / area,
                        sum[2] as f64 / area,
                    ),
                );
            }
        }

        out
    }
}
