use clap::Parser;

/// Renders a fixed gallery of Julia sets to PNG files in the current directory.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct JuliaGalleryArgs {}
