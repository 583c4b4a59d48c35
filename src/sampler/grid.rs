use super::SampleSize;
use crate::{color::Rgba, error::Error, image::Image};

/// A single color read from the image at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSample {
    pub x: u32,
    pub y: u32,
    pub color: Rgba,
}

pub fn validate(image: &Image, sample_size: SampleSize) -> crate::Result<()> {
    if image.has_zero_dimension() {
        return Err(Error::InvalidImage("image has a zero dimension"));
    }
    let fits_horizontally = (1..=image.width()).contains(&sample_size.width);
    let fits_vertically = (1..=image.height()).contains(&sample_size.height);
    if !fits_horizontally || !fits_vertically {
        return Err(Error::InvalidSampleSize {
            sample_width: sample_size.width,
            sample_height: sample_size.height,
            image_width: image.width(),
            image_height: image.height(),
        });
    }
    Ok(())
}

/// First coordinate of cell `index` when `extent` is split into `cells` cells.
pub fn cell_start(index: u32, cells: u32, extent: u32) -> u32 {
    (index as u64 * extent as u64 / cells as u64) as u32
}

/// Midpoint of cell `index`. Always inside the cell as long as `cells <= extent`.
pub fn cell_center(index: u32, cells: u32, extent: u32) -> u32 {
    let start = cell_start(index, cells, extent);
    let end = cell_start(index + 1, cells, extent);
    start + (end - start) / 2
}

/// Maps every coordinate in `0..extent` to the index of the cell containing it.
pub fn cell_lookup(cells: u32, extent: u32) -> Vec<u32> {
    let mut lookup = Vec::with_capacity(extent as usize);
    for index in 0..cells {
        let start = cell_start(index, cells, extent);
        let end = cell_start(index + 1, cells, extent);
        lookup.extend((start..end).map(|_| index));
    }
    lookup
}

/// Evenly spaced sample points over an image, one per grid cell, read in
/// row-major order.
pub struct SampleGrid<'a> {
    image: &'a Image,
    sample_size: SampleSize,
}

impl<'a> SampleGrid<'a> {
    pub fn new(image: &'a Image, sample_size: SampleSize) -> crate::Result<Self> {
        validate(image, sample_size)?;
        Ok(Self { image, sample_size })
    }

    pub fn sample_size(&self) -> SampleSize {
        self.sample_size
    }

    fn center_x(&self, column_index: u32) -> u32 {
        cell_center(column_index, self.sample_size.width, self.image.width())
    }

    fn center_y(&self, row_index: u32) -> u32 {
        cell_center(row_index, self.sample_size.height, self.image.height())
    }

    /// Sample of the cell in grid column `column_index` and grid row `row_index`.
    pub fn sample(&self, column_index: u32, row_index: u32) -> ColorSample {
        let x = self.center_x(column_index);
        let y = self.center_y(row_index);
        ColorSample {
            x,
            y,
            color: self.image.dot(x, y),
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = ColorSample> + '_ {
        (0..self.sample_size.height).flat_map(move |row_index| {
            (0..self.sample_size.width)
                .map(move |column_index| self.sample(column_index, row_index))
        })
    }
}
