use std::fmt::Display;

use palette::{FromColor, Hsv, Srgb};

use crate::error::Error;

const LUMA_RED_WEIGHT: f32 = 0.299;
const LUMA_GREEN_WEIGHT: f32 = 0.587;
const LUMA_BLUE_WEIGHT: f32 = 0.114;

/// 8 bit per channel color with straight alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, u8::MAX)
    }

    pub fn channels(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Hue in degrees within `[0, 360)`. Greys have a hue of 0.
    pub fn hue(&self) -> f32 {
        let rgb: Srgb<f32> = Srgb::new(self.red, self.green, self.blue).into_format();
        let hsv: Hsv = Hsv::from_color(rgb);
        if hsv.saturation == 0_f32 {
            return 0_f32;
        }
        hsv.hue.into_positive_degrees().rem_euclid(360_f32)
    }

    /// BT.601 luma normalized to `[0, 1]`.
    pub fn luminance(&self) -> f32 {
        let weighted_red = self.red as f32 * LUMA_RED_WEIGHT;
        let weighted_green = self.green as f32 * LUMA_GREEN_WEIGHT;
        let weighted_blue = self.blue as f32 * LUMA_BLUE_WEIGHT;
        (weighted_red + weighted_green + weighted_blue) / 255_f32
    }
}

impl From<u32> for Rgba {
    /// Unpacks `0xRRGGBBAA`.
    fn from(value: u32) -> Self {
        let [red, green, blue, alpha] = value.to_be_bytes();
        Self::new(red, green, blue, alpha)
    }
}

impl From<Rgba> for u32 {
    fn from(value: Rgba) -> Self {
        u32::from_be_bytes(value.channels())
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

/// RGB components relative to an arbitrary max value, as found in PPM files.
pub struct RangeColorFormat<T> {
    max: T,
    red: T,
    green: T,
    blue: T,
}

impl RangeColorFormat<u16> {
    pub fn new(max: u16, red: u16, green: u16, blue: u16) -> crate::Result<Self> {
        for component in [red, green, blue] {
            if component > max {
                return Err(Error::ColorComponentExceedsMaxValue(component, max));
            }
        }
        Ok(RangeColorFormat {
            max,
            red,
            green,
            blue,
        })
    }

    fn scale(&self, component: u16) -> u8 {
        if self.max == 0 {
            return 0;
        }
        (component as f32 * 255_f32 / self.max as f32).round() as u8
    }
}

impl From<&RangeColorFormat<u16>> for Rgba {
    fn from(value: &RangeColorFormat<u16>) -> Self {
        Rgba::opaque(
            value.scale(value.red),
            value.scale(value.green),
            value.scale(value.blue),
        )
    }
}

impl From<RangeColorFormat<u16>> for Rgba {
    fn from(value: RangeColorFormat<u16>) -> Self {
        Rgba::from(&value)
    }
}

#[cfg(test)]
impl Rgba {
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    pub const GREEN: Rgba = Rgba::opaque(0, 255, 0);
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
}

#[cfg(test)]
mod test {
    use super::{RangeColorFormat, Rgba};
    use crate::error::Error;

    #[test]
    fn unpack_packed_color() {
        let color = Rgba::from(0x11_22_33_44_u32);
        assert_eq!(color, Rgba::new(0x11, 0x22, 0x33, 0x44));
        assert_eq!(u32::from(color), 0x11_22_33_44);
    }

    #[test]
    fn format_as_hex() {
        assert_eq!(Rgba::new(255, 8, 171, 0).to_string(), "#FF08AB00");
    }

    fn assert_hue(color: Rgba, expected: f32) {
        let hue = color.hue();
        assert!(
            (hue - expected).abs() < 0.01,
            "hue of {} is wrong, was {}",
            color,
            hue
        );
    }

    #[test]
    fn hue_of_primaries() {
        assert_hue(Rgba::RED, 0_f32);
        assert_hue(Rgba::GREEN, 120_f32);
        assert_hue(Rgba::BLUE, 240_f32);
    }

    #[test]
    fn hue_of_magenta_wraps_below_360() {
        let hue = Rgba::opaque(255, 0, 128).hue();
        assert!(hue > 329_f32 && hue < 331_f32, "hue is wrong, was {}", hue);
    }

    #[test]
    fn hue_of_grey_is_zero() {
        assert_eq!(Rgba::opaque(90, 90, 90).hue(), 0_f32);
    }

    #[test]
    fn luminance_of_white_and_black() {
        let white = Rgba::WHITE.luminance();
        assert!(
            white >= 0.99999_f32 && white <= 1.00001_f32,
            "luminance is wrong, was {}",
            white
        );
        assert_eq!(Rgba::BLACK.luminance(), 0_f32);
    }

    #[test]
    fn luminance_orders_green_above_red_above_blue() {
        assert!(Rgba::GREEN.luminance() > Rgba::RED.luminance());
        assert!(Rgba::RED.luminance() > Rgba::BLUE.luminance());
    }

    #[test]
    fn convert_range_color_4bit_to_rgba() {
        let range_color = RangeColorFormat::new(0b1111, 0b0000, 0b0101, 0b1111).unwrap();
        let result = Rgba::from(&range_color);
        assert_eq!(result, Rgba::opaque(0, 85, 255));
    }

    #[test]
    fn convert_range_color_16bit_to_rgba() {
        let range_color = RangeColorFormat::new(u16::MAX, u16::MAX, 0, u16::MAX / 2).unwrap();
        let result = Rgba::from(range_color);
        assert_eq!(result, Rgba::opaque(255, 0, 127));
    }

    #[test]
    fn create_range_color_out_of_range() {
        let result = RangeColorFormat::new(144, 12, 144, 145);
        assert!(matches!(
            result,
            Err(Error::ColorComponentExceedsMaxValue(145, 144))
        ));
    }
}
