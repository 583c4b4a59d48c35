use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    sync::Arc,
};

pub use cli::CLIParser;
pub use color::Rgba;
pub use error::Error;
pub use image::Image;
use image::{
    reader::PPMImageReader, writer::PPMImageWriter, ImageReader, ImageWriter,
};
pub use sampler::{
    dominant_color, sorted_image, Aggregation, ColorFound, ColorSample, ColorSampler,
    CompletionHandle, SampleSize, SamplerOptions, SortKey, SortOrder, SubscriptionId,
    COLOR_FOUND_NOTIFICATION,
};

mod cli;
pub mod color;
mod error;
pub mod image;
mod logger;
pub mod sampler;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: Option<PathBuf>,
    sample_width: u32,
    sample_height: u32,
    aggregation: Aggregation,
    quantization_bits: u8,
    sort_key: SortKey,
    sort_order: SortOrder,
    number_of_threads: usize,
}

/// What a run of [`sample_ppm_file`] produced.
pub struct SamplingReport {
    pub dominant_color: Rgba,
    pub sorted_image_written: bool,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.to_string_lossy().into_owned(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.to_string_lossy().into_owned(), e)
        })
}

fn read_ppm_image(file_path: &Path) -> Result<Image> {
    let input_file = open_input_file(file_path)?;
    PPMImageReader::new(BufReader::new(input_file)).read_image()
}

fn write_ppm_image(file_path: &Path, image: &Image) -> Result<()> {
    let output_file = open_output_file(file_path)?;
    PPMImageWriter::new(BufWriter::new(output_file)).write_image(image)
}

/// Samples the dominant color of a PPM file and, when an output file was
/// given, writes the color sorted image next to it.
pub fn sample_ppm_file(arguments: &Arguments) -> Result<SamplingReport> {
    let image = Arc::new(read_ppm_image(&arguments.input_file)?);
    let sampler = ColorSampler::new(SamplerOptions::from(arguments));
    let color_handle = sampler.primary_color(Arc::clone(&image));
    let sorted_handle = arguments
        .output_file
        .as_ref()
        .map(|_| sampler.sorted_image(Arc::clone(&image)));
    let dominant_color = color_handle.wait()?;
    let mut sorted_image_written = false;
    if let (Some(output_file), Some(handle)) = (&arguments.output_file, sorted_handle) {
        let sorted = handle.wait()?;
        write_ppm_image(output_file, &sorted)?;
        log::info!("Sorted image written to {}", output_file.display());
        sorted_image_written = true;
    }
    Ok(SamplingReport {
        dominant_color,
        sorted_image_written,
    })
}
