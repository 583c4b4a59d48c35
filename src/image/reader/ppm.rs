use std::io::Read;

use super::super::Image;
use super::super::ImageReader;
use crate::color::{RangeColorFormat, Rgba};
use crate::Error;

/// Reads plain (P3) PPM images. Components are rescaled from the header's
/// max value to 8 bit, alpha is always opaque.
pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PPMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let mut buffer = Vec::new();
        self.reader
            .read_to_end(&mut buffer)
            .map_err(Error::FailedToReadImageData)?;
        let mut bytes = buffer.as_slice();
        let mut tokenizer = PPMTokenizer::new(&mut bytes);
        let mut parser = PPMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];
        let mut in_comment = false;

        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if in_comment {
                if byte[0] == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte[0] == b'#' {
                in_comment = true;
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const P3_HEADER_TOKEN_NAME: &str = "P3 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

#[derive(Clone, Copy)]
struct Dot {
    buffer: [u16; 3],
    index: usize,
}

impl Dot {
    fn new() -> Self {
        Self {
            buffer: [u16::default(); 3],
            index: 0,
        }
    }

    fn push_color_component(&mut self, component: u16) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == 3
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }

    fn into_rgba(self, max_value: u16) -> crate::Result<Rgba> {
        let [red, green, blue] = self.buffer;
        RangeColorFormat::new(max_value, red, green, blue).map(Rgba::from)
    }
}

struct PPMParser<'a, T> {
    tokenizer: &'a mut T,
}

impl<'a, T> PPMParser<'a, T>
where
    T: Iterator<Item = String>,
{
    fn new(tokenizer: &'a mut T) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<Image> {
        let header = self.parse_header()?;
        Self::check_header_version(&header)?;
        let width = self.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_max_value()?;
        let dots = self.parse_all_dots()?;
        Self::check_parsed_dots_length_match_header_information(&dots, width, height)?;
        let dots = dots
            .into_iter()
            .map(|dot| dot.into_rgba(max_value))
            .collect::<crate::Result<Vec<Rgba>>>()?;
        log::debug!("Parsed PPM image of {}x{}", width, height);
        Image::new(width, height, dots)
    }

    fn check_parsed_dots_length_match_header_information(
        dots: &[Dot],
        width: u32,
        height: u32,
    ) -> crate::Result<()> {
        let expected_number_of_dots = width as usize * height as usize;
        if dots.len() != expected_number_of_dots {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(())
    }

    fn check_header_version(header: &str) -> crate::Result<()> {
        if header != "P3" {
            return Err(Error::PPMFileDoesNotContainRequiredToken(
                P3_HEADER_TOKEN_NAME,
            ));
        }
        Ok(())
    }

    fn parse_header(&mut self) -> crate::Result<String> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                P3_HEADER_TOKEN_NAME,
            ))
    }

    fn parse_dimension(&mut self, token_name: &'static str) -> crate::Result<u32> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(token_name))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }

    fn parse_max_value(&mut self) -> crate::Result<u16> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAX_VALUE_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))
    }

    fn parse_all_dots(&mut self) -> crate::Result<Vec<Dot>> {
        let mut current_dot = Dot::new();
        let mut dots = Vec::new();
        for token in self.tokenizer.by_ref() {
            let component = Self::parse_color_value(&token)?;
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        Self::check_pixel_was_complete(&current_dot)?;
        Ok(dots)
    }

    fn check_pixel_was_complete(dot: &Dot) -> crate::Result<()> {
        if !dot.is_empty() {
            return Err(Error::IncompletePixelParsed(dot.index));
        }
        Ok(())
    }

    fn parse_color_value(token: &str) -> crate::Result<u16> {
        token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        color::Rgba,
        error::Error,
        image::{Image, ImageReader},
        Result,
    };

    use super::PPMImageReader;

    fn read_ppm_string(token_string: &str) -> Result<Image> {
        PPMImageReader::new(token_string.as_bytes()).read_image()
    }

    #[test]
    fn read_string() {
        let string = "P3\n# Example PPM image string\n3 2\n255\n255 0 0   0 255 0   0 0 255\n255 255 0  255 0 255  0 255 255";
        let image = read_ppm_string(string).unwrap();
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.dot(1, 0), Rgba::GREEN);
        assert_eq!(image.dot(2, 1), Rgba::opaque(0, 255, 255));
    }

    #[test]
    fn read_continuous_string() {
        let string = "P3 3 2 255 255 0 0   0 255 0   0 0 255 255 255 0  255 0 255  0 255 255";
        let image = read_ppm_string(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn read_newline_string() {
        let string = "P3\n# Example PPM image newlines\n3\n2\n255\n255\n0\n0\n0\n255\n0\n0\n0\n255\n255\n255\n0\n255\n0\n255\n0\n255\n255";
        let image = read_ppm_string(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn rescale_to_8_bit() {
        let string = "P3 2 1 15 15 0 5  0 15 0";
        let image = read_ppm_string(string).unwrap();
        assert_eq!(image.dot(0, 0), Rgba::opaque(255, 0, 85));
    }

    #[test]
    fn wrong_header() {
        let string = "P6 1 1 255 0 0 0";
        assert!(matches!(
            read_ppm_string(string),
            Err(Error::PPMFileDoesNotContainRequiredToken(_))
        ));
    }

    #[test]
    fn incomplete_pixel() {
        let string = "P3\n3 2 255 0 0 255 0 0";
        if let Err(Error::IncompletePixelParsed(n)) = read_ppm_string(string) {
            if n != 2 {
                panic!("Number of parsed components should be 2, but was {}", n);
            }
            return;
        };
        panic!("Incomplete pixel not detected");
    }

    #[test]
    fn wrong_size() {
        let string = "P3\n3 2 255 0 0 255";
        if let Err(Error::MismatchOfSizeBetweenHeaderAndValues) = read_ppm_string(string) {
            return;
        };
        panic!("Mismatch of size in header and actual pixels was not detected!");
    }

    #[test]
    fn component_above_max_value() {
        let string = "P3 1 1 100 0 101 0";
        assert!(matches!(
            read_ppm_string(string),
            Err(Error::ColorComponentExceedsMaxValue(101, 100))
        ));
    }
}
