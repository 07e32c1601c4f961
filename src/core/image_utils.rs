use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel dimensions of a rendered image, stored as `[width, height]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpecification {
    pub resolution: [u32; 2],
}

impl ImageSpecification {
    pub fn new(width: u32, height: u32) -> ImageSpecification {
        ImageSpecification {
            resolution: [width, height],
        }
    }

    pub fn width(&self) -> u32 {
        self.resolution[0]
    }

    pub fn height(&self) -> u32 {
        self.resolution[1]
    }
}

/// Allocates a buffer indexed as `buffer[x][y]`.
pub fn create_buffer<T: Clone>(value: T, resolution: &[u32; 2]) -> Vec<Vec<T>> {
    vec![vec![value; resolution[1] as usize]; resolution[0] as usize]
}

#[derive(Clone, Debug)]
/**
 * Maps a pixel index onto one axis of the complex plane. The axis is centered on
 * the middle of the image and covers `span` units across `pixel_count` pixels, so
 * the visible region depends on the aspect ratio of the image.
 */
pub struct LinearPixelMap {
    pixel_count: f64,
    span: f64,
}

impl LinearPixelMap {
    pub fn new(pixel_count: u32, span: f64) -> LinearPixelMap {
        assert!(pixel_count > 0);
        LinearPixelMap {
            pixel_count: pixel_count as f64,
            span,
        }
    }

    // Map from pixel (integer) to point (float)
    pub fn map(&self, index: u32) -> f64 {
        self.span * (index as f64 - 0.5 * self.pixel_count) / self.pixel_count
    }
}

#[derive(Clone, Debug)]
pub struct PixelMapper {
    width: LinearPixelMap,
    height: LinearPixelMap,
}

impl PixelMapper {
    /// @param view_span: extent of the complex plane covered by the image, `[real, imaginary]`.
    pub fn new(image_specification: &ImageSpecification, view_span: [f64; 2]) -> PixelMapper {
        PixelMapper {
            width: LinearPixelMap::new(image_specification.width(), view_span[0]),
            height: LinearPixelMap::new(image_specification.height(), view_span[1]),
        }
    }

    pub fn map(&self, x: u32, y: u32) -> [f64; 2] {
        [self.width.map(x), self.height.map(y)]
    }
}

/**
 * Evaluates `pixel_renderer` once for every pixel of the image and collects the
 * result into an RGBA image buffer. Columns are computed in parallel; each worker
 * owns a disjoint column of the intermediate buffer, so the result does not depend
 * on scheduling.
 */
pub fn generate_pixel_grid<F>(spec: &ImageSpecification, pixel_renderer: F) -> RgbaImage
where
    F: Fn(u32, u32) -> Rgba<u8> + std::marker::Sync,
{
    let mut raw_data = create_buffer(Rgba([0, 0, 0, 0]), &spec.resolution);

    raw_data
        .par_iter_mut()
        .enumerate()
        .for_each(|(x, column)| {
            column.iter_mut().enumerate().for_each(|(y, elem)| {
                *elem = pixel_renderer(x as u32, y as u32);
            });
        });

    let mut imgbuf = RgbaImage::new(spec.width(), spec.height());
    for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
        *pixel = raw_data[x as usize][y as usize];
    }
    imgbuf
}

/// Encodes the image as a PNG file. The file is created (or truncated) at `path`.
pub fn write_png(path: &Path, image: &RgbaImage) -> Result<(), ImageError> {
    image.save_with_format(path, ImageFormat::Png)
}
