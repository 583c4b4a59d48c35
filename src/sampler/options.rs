use std::{io, thread};

use clap::{builder::PossibleValue, ValueEnum};

use crate::Arguments;

pub const DEFAULT_SAMPLE_SIZE: SampleSize = SampleSize::new(10, 10);
pub const DEFAULT_QUANTIZATION_BITS: u8 = 4;

/// Number of sample points laid out along each axis of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleSize {
    pub width: u32,
    pub height: u32,
}

impl SampleSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn point_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for SampleSize {
    fn default() -> Self {
        DEFAULT_SAMPLE_SIZE
    }
}

/// How the sampled colors are reduced to a single dominant color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Aggregation {
    /// Most populated quantized color bucket, first in scan order on ties.
    #[default]
    Mode,
    /// Per channel mean over all samples.
    Mean,
}

impl ValueEnum for Aggregation {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Mode, Self::Mean]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Mode => Some(PossibleValue::new("Mode")),
            Self::Mean => Some(PossibleValue::new("Mean")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Hue,
    Luminance,
}

impl ValueEnum for SortKey {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Hue, Self::Luminance]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Hue => Some(PossibleValue::new("Hue")),
            Self::Luminance => Some(PossibleValue::new("Luminance")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl ValueEnum for SortOrder {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Ascending, Self::Descending]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Ascending => Some(PossibleValue::new("Ascending")),
            Self::Descending => Some(PossibleValue::new("Descending")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplerOptions {
    pub sample_size: SampleSize,
    pub aggregation: Aggregation,
    /// Bits kept per channel when bucketing samples for [`Aggregation::Mode`].
    pub quantization_bits: u8,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub number_of_threads: usize,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            sample_size: SampleSize::default(),
            aggregation: Aggregation::default(),
            quantization_bits: DEFAULT_QUANTIZATION_BITS,
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            number_of_threads: get_number_of_threads().unwrap_or(1),
        }
    }
}

impl From<&Arguments> for SamplerOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            sample_size: SampleSize::new(value.sample_width, value.sample_height),
            aggregation: value.aggregation,
            quantization_bits: value.quantization_bits,
            sort_key: value.sort_key,
            sort_order: value.sort_order,
            number_of_threads: value.number_of_threads,
        }
    }
}

pub fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
