use crate::{color::Rgba, error::Error};

pub mod reader;
pub mod writer;

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self, image: &Image) -> crate::Result<()>;
}

/// Decoded raster image. Rows are `stride` pixels apart in `dots`, of which
/// the first `width` belong to the image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    stride: u32,
    dots: Vec<Rgba>,
}

impl Image {
    pub fn new(width: u32, height: u32, dots: Vec<Rgba>) -> crate::Result<Self> {
        Self::with_stride(width, height, width, dots)
    }

    pub fn with_stride(
        width: u32,
        height: u32,
        stride: u32,
        dots: Vec<Rgba>,
    ) -> crate::Result<Self> {
        if stride < width {
            return Err(Error::InvalidImage("row stride is narrower than the image"));
        }
        if dots.len() < Self::required_length(width, height, stride) {
            return Err(Error::InvalidImage(
                "pixel buffer is shorter than the image dimensions require",
            ));
        }
        Ok(Self {
            width,
            height,
            stride,
            dots,
        })
    }

    /// Builds an image from packed `0xRRGGBBAA` values.
    pub fn from_packed(width: u32, height: u32, packed: &[u32]) -> crate::Result<Self> {
        let dots = packed.iter().copied().map(Rgba::from).collect();
        Self::new(width, height, dots)
    }

    fn required_length(width: u32, height: u32, stride: u32) -> usize {
        if width == 0 || height == 0 {
            return 0;
        }
        stride as usize * (height as usize - 1) + width as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn has_zero_dimension(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at column `x` and row `y`. Both must be inside the image.
    pub fn dot(&self, x: u32, y: u32) -> Rgba {
        let index = x as usize + y as usize * self.stride as usize;
        self.dots[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> + '_ {
        let height = if self.has_zero_dimension() {
            0
        } else {
            self.height as usize
        };
        (0..height).map(move |row_index| {
            let start = row_index * self.stride as usize;
            &self.dots[start..start + self.width as usize]
        })
    }

    /// All pixels in scan order, skipping any stride padding.
    pub fn dots(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.rows().flat_map(|row| row.iter().copied())
    }
}

#[cfg(test)]
mod test {
    use super::Image;
    use crate::{color::Rgba, error::Error};

    #[rustfmt::skip]
    const TEST_PACKED: &[u32] = &[
        0x000000FF, 0x010101FF, 0x020202FF, 0xEEEEEEFF,
        0x030303FF, 0x040404FF, 0x050505FF, 0xEEEEEEFF,
    ];

    #[test]
    fn read_dot_with_stride() {
        let image = Image::with_stride(
            3,
            2,
            4,
            TEST_PACKED.iter().copied().map(Rgba::from).collect(),
        )
        .unwrap();
        assert_eq!(image.dot(2, 1), Rgba::opaque(5, 5, 5));
    }

    #[test]
    fn dots_skip_stride_padding() {
        let image = Image::with_stride(
            3,
            2,
            4,
            TEST_PACKED.iter().copied().map(Rgba::from).collect(),
        )
        .unwrap();
        let greys: Vec<u8> = image.dots().map(|dot| dot.red).collect();
        assert_eq!(greys, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(image.pixel_count(), 6);
    }

    #[test]
    fn last_row_may_omit_padding() {
        let image = Image::with_stride(3, 2, 4, vec![Rgba::BLACK; 7]);
        assert!(image.is_ok(), "Last row needs no trailing padding");
    }

    #[test]
    fn buffer_too_short() {
        let result = Image::from_packed(4, 2, &TEST_PACKED[..7]);
        assert!(matches!(result, Err(Error::InvalidImage(_))));
    }

    #[test]
    fn stride_narrower_than_width() {
        let result = Image::with_stride(4, 2, 3, vec![Rgba::BLACK; 8]);
        assert!(matches!(result, Err(Error::InvalidImage(_))));
    }

    #[test]
    fn zero_dimension_image_is_constructible() {
        let image = Image::new(0, 5, Vec::new()).unwrap();
        assert!(image.has_zero_dimension());
        assert_eq!(image.dots().count(), 0);
    }
}
