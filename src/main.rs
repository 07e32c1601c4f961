use std::path::Path;

use clap::Parser;
use log::error;

use julia_gallery::cli::{args::JuliaGalleryArgs, render::render_gallery};
use julia_gallery::fractals::julia::GalleryParams;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let gallery = GalleryParams::builtin()?;
    render_gallery(&gallery, Path::new("."))?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _args = JuliaGalleryArgs::parse();

    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}
