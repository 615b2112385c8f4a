//! Row-band partitioning for parallel frame passes.
//!
//! Divides the image into contiguous horizontal bands that are rendered
//! independently, one worker per band.

use std::sync::atomic::{AtomicUsize, Ordering};

use photon_math::Color;

use crate::renderer::Tracer;

/// A contiguous range of image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band
    pub start_row: u32,
    /// Number of rows in the band
    pub rows: u32,
    /// Index of this band in dispatch order
    pub index: usize,
}

impl RowBand {
    pub fn new(start_row: u32, rows: u32, index: usize) -> Self {
        Self {
            start_row,
            rows,
            index,
        }
    }

    /// One past the last row.
    pub fn end_row(&self) -> u32 {
        self.start_row + self.rows
    }
}

/// Split `height` rows into `count` contiguous bands.
///
/// Every band gets `height / count` rows and the last one also takes the
/// remainder. The count is reduced when there are fewer rows than bands so
/// no band is empty.
pub fn partition_rows(height: u32, count: usize) -> Vec<RowBand> {
    if height == 0 {
        return Vec::new();
    }

    let count = (count.max(1) as u32).min(height);
    let rows_per_band = height / count;

    (0..count)
        .map(|i| {
            let start_row = i * rows_per_band;
            let rows = if i == count - 1 {
                height - start_row
            } else {
                rows_per_band
            };
            RowBand::new(start_row, rows, i as usize)
        })
        .collect()
}

/// Render one band into `pixels`, the band's rows in row-major order.
///
/// `completed_rows` is bumped once per finished row.
pub fn render_band(
    tracer: &Tracer<'_>,
    band: &RowBand,
    pixels: &mut [Color],
    width: u32,
    height: u32,
    completed_rows: &AtomicUsize,
) {
    if width == 0 {
        return;
    }

    for (local_y, row) in pixels.chunks_exact_mut(width as usize).enumerate() {
        let y = band.start_row + local_y as u32;
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = tracer.render_pixel(x as u32, y, width, height);
        }
        completed_rows.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderConfig;
    use photon_core::Scene;

    #[test]
    fn test_partition_exact_fit() {
        let bands = partition_rows(12, 4);
        assert_eq!(bands.len(), 4);
        assert!(bands.iter().all(|b| b.rows == 3));
        assert_eq!(bands[3].end_row(), 12);
    }

    #[test]
    fn test_partition_last_band_takes_remainder() {
        let bands = partition_rows(10, 4);
        let rows: Vec<u32> = bands.iter().map(|b| b.rows).collect();
        assert_eq!(rows, vec![2, 2, 2, 4]);

        // Contiguous and in order
        for pair in bands.windows(2) {
            assert_eq!(pair[0].end_row(), pair[1].start_row);
        }
    }

    #[test]
    fn test_partition_more_bands_than_rows() {
        let bands = partition_rows(3, 16);
        assert_eq!(bands.len(), 3);
        assert!(bands.iter().all(|b| b.rows == 1));

        assert!(partition_rows(0, 4).is_empty());
        assert_eq!(partition_rows(5, 0).len(), 1);
    }

    #[test]
    fn test_render_band_counts_rows() {
        let scene = Scene::new();
        let config = RenderConfig::default();
        let tracer = Tracer::new(&scene, &config);

        let band = RowBand::new(2, 3, 0);
        let mut pixels = vec![Color::BLACK; 4 * 3];
        let completed = AtomicUsize::new(0);

        render_band(&tracer, &band, &mut pixels, 4, 8, &completed);

        assert_eq!(completed.load(Ordering::Acquire), 3);
        assert!(pixels.iter().all(|&c| c == Color::VOID));
    }
}
