use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::core::{
    file_io::parse_params,
    image_utils::{generate_pixel_grid, ImageSpecification, PixelMapper},
};

/// A point is assumed to be in the set if it has not escaped after this many iterations.
pub const MAX_ITER_COUNT: u32 = 1024;

/// Escape radius of 2, compared against the squared magnitude.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Extent of the complex plane covered by every image: `[-1.5, 1.5] x [-1, 1]`.
pub const VIEW_SPAN: [f64; 2] = [3.0, 2.0];

const GALLERY_PARAMS_JSON: &str = include_str!("../../params/julia_gallery.json");

/// Constant term of the Julia set plus the bit shift applied to each color channel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct JuliaParameters {
    pub cx: f64,
    pub cy: f64,
    pub r_shift: u32,
    pub g_shift: u32,
    pub b_shift: u32,
}

impl JuliaParameters {
    pub fn constant_term(&self) -> [f64; 2] {
        [self.cx, self.cy]
    }

    pub fn file_name(&self) -> String {
        format!(
            "julia-cx_{:.2}-cy_{:.2}-r_{}-g_{}-b_{}.png",
            self.cx, self.cy, self.r_shift, self.g_shift, self.b_shift
        )
    }
}

/// The fixed set of images rendered by the binary.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GalleryParams {
    pub image_specification: ImageSpecification,
    pub blur_radius: u32,
    pub parameter_sets: Vec<JuliaParameters>,
}

impl GalleryParams {
    /// Parameters compiled into the binary from `params/julia_gallery.json`.
    pub fn builtin() -> Result<GalleryParams, serde_json::Error> {
        parse_params(GALLERY_PARAMS_JSON)
    }
}

/**
 * Internal state of the sequence Z := Z*Z + C, where Z starts at the queried point
 * and C is the constant term of the Julia set.
 */
struct JuliaSequence {
    x0: f64,
    y0: f64,
    x: f64,
    y: f64,
    iter_count: u32,
}

impl JuliaSequence {
    fn new(point: &[f64; 2], constant_term: &[f64; 2]) -> JuliaSequence {
        JuliaSequence {
            x0: constant_term[0],
            y0: constant_term[1],
            x: point[0],
            y: point[1],
            iter_count: 0,
        }
    }

    fn radius_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    // Z = Z*Z + C
    fn step(&mut self) {
        let x = self.x * self.x - self.y * self.y + self.x0;
        self.y = 2.0 * self.x * self.y + self.y0;
        self.x = x;
        self.iter_count += 1;
    }

    // @return: true if the point escapes, false otherwise.
    fn step_until_escape(&mut self, max_iter_count: u32) -> bool {
        while self.iter_count < max_iter_count {
            if self.radius_squared() >= ESCAPE_RADIUS_SQUARED {
                return true;
            }
            self.step();
        }
        false
    }
}

/// Number of iterations completed before `point` escapes: zero if it starts outside
/// the escape radius, `MAX_ITER_COUNT` if it never escapes.
pub fn escape_iteration_count(point: &[f64; 2], constant_term: &[f64; 2]) -> u32 {
    let mut sequence = JuliaSequence::new(point, constant_term);
    sequence.step_until_escape(MAX_ITER_COUNT);
    sequence.iter_count
}

/// Low 8 bits of `iter_count << shift`. The wraparound is what produces the
/// color banding, so it must not be replaced by saturation.
pub fn weight_channel(iter_count: u32, shift: u32) -> u8 {
    (u64::from(iter_count).checked_shl(shift).unwrap_or(0) & 0xFF) as u8
}

fn julia_color(point: &[f64; 2], params: &JuliaParameters) -> Rgba<u8> {
    let iter_count = escape_iteration_count(point, &params.constant_term());
    Rgba([
        weight_channel(iter_count, params.r_shift),
        weight_channel(iter_count, params.g_shift),
        weight_channel(iter_count, params.b_shift),
        u8::MAX,
    ])
}

/// Color of a single pixel. Total over all pixel coordinates, including ones
/// outside the image, as long as the image dimensions are positive.
pub fn compute_pixel_color(
    pixel_x: u32,
    pixel_y: u32,
    image_width: u32,
    image_height: u32,
    params: &JuliaParameters,
) -> Rgba<u8> {
    let pixel_mapper = PixelMapper::new(
        &ImageSpecification::new(image_width, image_height),
        VIEW_SPAN,
    );
    julia_color(&pixel_mapper.map(pixel_x, pixel_y), params)
}

pub fn render_image(spec: &ImageSpecification, params: &JuliaParameters) -> RgbaImage {
    let pixel_mapper = PixelMapper::new(spec, VIEW_SPAN);
    generate_pixel_grid(spec, |x, y| julia_color(&pixel_mapper.map(x, y), params))
}
