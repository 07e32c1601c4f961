//! Stack blur for RGBA images.
//!
//! Each pass convolves a line of pixels with a triangular kernel whose weights are
//! `radius + 1 - |k|` for offsets `k` in `[-radius, radius]`. Pixels beyond the edge
//! of the image repeat the edge pixel. The running sums are updated incrementally,
//! so the cost per pixel does not depend on the radius.

use image::{Rgba, RgbaImage};

/// Larger radii are clamped to this value, which keeps the weighted sums and the
/// per-line window setup bounded.
pub const MAX_BLUR_RADIUS: u32 = 254;

type ChannelSums = [u64; 4];

fn add_pixel(sums: &mut ChannelSums, pixel: &Rgba<u8>) {
    for (sum, &value) in sums.iter_mut().zip(pixel.0.iter()) {
        *sum += value as u64;
    }
}

fn sub_pixel(sums: &mut ChannelSums, pixel: &Rgba<u8>) {
    for (sum, &value) in sums.iter_mut().zip(pixel.0.iter()) {
        *sum -= value as u64;
    }
}

/// Blurs a single line of pixels into `output`, which must have the same length.
fn blur_line(line: &[Rgba<u8>], output: &mut [Rgba<u8>], radius: usize) {
    assert_eq!(line.len(), output.len());
    if line.is_empty() {
        return;
    }
    let last = line.len() as isize - 1;
    let at = |index: isize| &line[index.clamp(0, last) as usize];
    let divisor = ((radius + 1) * (radius + 1)) as u64;
    let r = radius as isize;

    // Weighted sum of the window, plus the unweighted sums of its trailing
    // half (including the center) and its leading half.
    let mut sum: ChannelSums = [0; 4];
    let mut sum_out: ChannelSums = [0; 4];
    let mut sum_in: ChannelSums = [0; 4];
    for k in -r..=r {
        let pixel = at(k);
        let weight = (r + 1 - k.abs()) as u64;
        for (channel, &value) in sum.iter_mut().zip(pixel.0.iter()) {
            *channel += value as u64 * weight;
        }
        if k <= 0 {
            add_pixel(&mut sum_out, pixel);
        } else {
            add_pixel(&mut sum_in, pixel);
        }
    }

    for (x, out) in output.iter_mut().enumerate() {
        let x = x as isize;
        let mut channels = [0u8; 4];
        for (channel, &total) in channels.iter_mut().zip(sum.iter()) {
            *channel = (total / divisor) as u8;
        }
        *out = Rgba(channels);

        for (total, &value) in sum.iter_mut().zip(sum_out.iter()) {
            *total -= value;
        }
        sub_pixel(&mut sum_out, at(x - r));
        add_pixel(&mut sum_in, at(x + r + 1));
        for (total, &value) in sum.iter_mut().zip(sum_in.iter()) {
            *total += value;
        }
        let entering = at(x + 1);
        add_pixel(&mut sum_out, entering);
        sub_pixel(&mut sum_in, entering);
    }
}

/**
 * Returns a blurred copy of `image`: a horizontal pass followed by a vertical pass.
 * The output always has the same dimensions as the input, and a radius of zero
 * returns an identical copy. The radius is clamped to `MAX_BLUR_RADIUS`.
 */
pub fn stack_blur(image: &RgbaImage, radius: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut blurred = image.clone();
    if radius == 0 || width == 0 || height == 0 {
        return blurred;
    }
    let radius = radius.min(MAX_BLUR_RADIUS) as usize;

    let mut line = Vec::with_capacity(width as usize);
    let mut output = vec![Rgba([0, 0, 0, 0]); width as usize];
    for y in 0..height {
        line.clear();
        line.extend((0..width).map(|x| *blurred.get_pixel(x, y)));
        blur_line(&line, &mut output, radius);
        for (x, pixel) in output.iter().enumerate() {
            blurred.put_pixel(x as u32, y, *pixel);
        }
    }

    let mut line = Vec::with_capacity(height as usize);
    let mut output = vec![Rgba([0, 0, 0, 0]); height as usize];
    for x in 0..width {
        line.clear();
        line.extend((0..height).map(|y| *blurred.get_pixel(x, y)));
        blur_line(&line, &mut output, radius);
        for (y, pixel) in output.iter().enumerate() {
            blurred.put_pixel(x, y as u32, *pixel);
        }
    }

    blurred
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_radius_is_identity() {
        let image = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 9, 255]));
        assert_eq!(stack_blur(&image, 0), image);
    }

    #[test]
    fn test_preserves_dimensions() {
        let image = RgbaImage::from_pixel(13, 4, Rgba([1, 2, 3, 255]));
        for radius in [1, 2, 7, 40] {
            assert_eq!(stack_blur(&image, radius).dimensions(), (13, 4));
        }
    }

    #[test]
    fn test_uniform_image_is_unchanged() {
        let image = RgbaImage::from_pixel(9, 6, Rgba([200, 17, 255, 255]));
        assert_eq!(stack_blur(&image, 3), image);
    }

    #[test]
    fn test_single_pixel_spreads_with_triangular_weights() {
        let mut image = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 255]));
        image.put_pixel(2, 2, Rgba([160, 0, 0, 255]));

        let blurred = stack_blur(&image, 1);

        // Kernel [1, 2, 1] / 4 in each direction.
        assert_eq!(blurred.get_pixel(2, 2).0, [40, 0, 0, 255]);
        assert_eq!(blurred.get_pixel(1, 2).0, [20, 0, 0, 255]);
        assert_eq!(blurred.get_pixel(2, 3).0, [20, 0, 0, 255]);
        assert_eq!(blurred.get_pixel(1, 1).0, [10, 0, 0, 255]);
        assert_eq!(blurred.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_edge_pixels_are_repeated() {
        // A single bright column on the left edge: the clamped neighbour counts twice.
        let image = RgbaImage::from_fn(4, 1, |x, _| {
            if x == 0 {
                Rgba([100, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let blurred = stack_blur(&image, 1);
        // (1 * 100 + 2 * 100 + 1 * 0) / 4
        assert_eq!(blurred.get_pixel(0, 0).0, [75, 0, 0, 255]);
        assert_eq!(blurred.get_pixel(1, 0).0, [25, 0, 0, 255]);
        assert_eq!(blurred.get_pixel(2, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_large_radius_is_clamped() {
        let image = RgbaImage::from_fn(6, 3, |x, y| Rgba([(x * 40) as u8, (y * 90) as u8, 5, 255]));
        let clamped = stack_blur(&image, MAX_BLUR_RADIUS);

        assert_eq!(stack_blur(&image, MAX_BLUR_RADIUS + 1), clamped);
        assert_eq!(stack_blur(&image, u32::MAX), clamped);
        assert_ne!(clamped, image);
    }

    #[test]
    fn test_is_deterministic() {
        let image = RgbaImage::from_fn(31, 17, |x, y| {
            Rgba([(x * 7) as u8, (y * 13) as u8, (x * y) as u8, 255])
        });
        assert_eq!(stack_blur(&image, 4), stack_blur(&image, 4));
    }
}
