use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::core::{
    file_io::output_path,
    image_utils::{write_png, ImageSpecification},
    stack_blur::stack_blur,
    stopwatch::Stopwatch,
};
use crate::fractals::julia::{render_image, GalleryParams, JuliaParameters};

/// Rasterizes one Julia set, blurs it, and writes it to `directory` under the
/// name derived from `params`. Returns the path of the written file.
pub fn render_julia_image(
    spec: &ImageSpecification,
    params: &JuliaParameters,
    blur_radius: u32,
    directory: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut stopwatch = Stopwatch::new(params.file_name());

    info!("Generating image with {:?}", params);
    let raw_image = render_image(spec, params);
    stopwatch.record_split("compute Julia sequence".to_owned());

    let blurred_image = stack_blur(&raw_image, blur_radius);
    stopwatch.record_split("stack blur".to_owned());

    let path = output_path(directory, &params.file_name());
    info!("Writing result as {}", path.display());
    write_png(&path, &blurred_image)
        .map_err(|err| format!("Unable to write image file {}: {}", path.display(), err))?;
    stopwatch.record_split("write PNG".to_owned());

    debug!("{}", stopwatch);
    Ok(path)
}

/// Renders every image of the gallery in order, stopping at the first failure.
pub fn render_gallery(
    gallery: &GalleryParams,
    directory: &Path,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    gallery
        .parameter_sets
        .iter()
        .map(|params| {
            render_julia_image(
                &gallery.image_specification,
                params,
                gallery.blur_radius,
                directory,
            )
        })
        .collect()
}
