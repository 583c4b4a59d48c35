use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidImage(&'static str),
    InvalidSampleSize {
        sample_width: u32,
        sample_height: u32,
        image_width: u32,
        image_height: u32,
    },
    InvalidQuantizationBits(u8),
    WorkerTerminated,
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    ColorComponentExceedsMaxValue(u16, u16),
    UnableToOpenInputFileForReading(String, std::io::Error),
    FailedToReadImageData(std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteImageData(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidImage(reason) => write!(f, "Invalid image: {}", reason),
            Self::InvalidSampleSize {
                sample_width,
                sample_height,
                image_width,
                image_height,
            } => {
                write!(
                    f,
                    "Invalid sample size {}x{} for image of {}x{}. Both dimensions must be between 1 and the image dimension.",
                    sample_width, sample_height, image_width, image_height
                )
            }
            Self::InvalidQuantizationBits(bits) => {
                write!(
                    f,
                    "Quantization bits must be between 1 and 8, but was {}",
                    bits
                )
            }
            Self::WorkerTerminated => {
                write!(f, "Sampling worker terminated before delivering a result")
            }
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
            Self::ColorComponentExceedsMaxValue(value, max) => {
                write!(
                    f,
                    "Color component {} exceeds the max value of {}",
                    value, max
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::FailedToReadImageData(error) => {
                write!(f, "Failed to read image data: {}", error)
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteImageData(error) => {
                write!(f, "Failed to write image data: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {}
