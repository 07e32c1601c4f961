pub mod file_io;
pub mod image_utils;
pub mod stack_blur;
pub mod stopwatch;
