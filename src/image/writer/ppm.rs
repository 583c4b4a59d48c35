use std::io::Write;

use super::super::{Image, ImageWriter};
use crate::Error;

const MAX_VALUE: u8 = u8::MAX;

/// Writes plain (P3) PPM images with a max value of 255. Alpha is dropped.
pub struct PPMImageWriter<T: Write> {
    writer: T,
}

impl<T: Write> PPMImageWriter<T> {
    pub fn new(writer: T) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, image: &Image) -> std::io::Result<()> {
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", image.width(), image.height())?;
        writeln!(self.writer, "{}", MAX_VALUE)
    }

    fn write_rows(&mut self, image: &Image) -> std::io::Result<()> {
        for row in image.rows() {
            let line = row
                .iter()
                .map(|dot| format!("{} {} {}", dot.red, dot.green, dot.blue))
                .collect::<Vec<String>>()
                .join("  ");
            writeln!(self.writer, "{}", line)?;
        }
        Ok(())
    }
}

impl<T: Write> ImageWriter for PPMImageWriter<T> {
    fn write_image(&mut self, image: &Image) -> crate::Result<()> {
        self.write_header(image)
            .and_then(|_| self.write_rows(image))
            .and_then(|_| self.writer.flush())
            .map_err(Error::FailedToWriteImageData)
    }
}
