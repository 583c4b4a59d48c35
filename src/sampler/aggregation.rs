use std::collections::HashMap;

use super::{grid::ColorSample, Aggregation};
use crate::{color::Rgba, error::Error};

/// Running per channel sums of the samples that fell into one bucket.
#[derive(Default)]
struct ChannelSums {
    sums: [u64; 4],
    count: u64,
}

impl ChannelSums {
    fn add(&mut self, color: Rgba) {
        for (sum, channel) in self.sums.iter_mut().zip(color.channels()) {
            *sum += channel as u64;
        }
        self.count += 1;
    }

    fn mean(&self) -> Rgba {
        let count = self.count.max(1);
        let [red, green, blue, alpha] = self.sums.map(|sum| ((sum + count / 2) / count) as u8);
        Rgba::new(red, green, blue, alpha)
    }
}

pub fn aggregate(
    samples: &[ColorSample],
    aggregation: Aggregation,
    quantization_bits: u8,
) -> crate::Result<Rgba> {
    match aggregation {
        Aggregation::Mode => mode(samples, quantization_bits),
        Aggregation::Mean => Ok(mean(samples)),
    }
}

fn mean(samples: &[ColorSample]) -> Rgba {
    let mut sums = ChannelSums::default();
    for sample in samples {
        sums.add(sample.color);
    }
    sums.mean()
}

fn quantize(color: Rgba, quantization_bits: u8) -> [u8; 4] {
    let shift = 8 - quantization_bits;
    color.channels().map(|channel| channel >> shift)
}

fn mode(samples: &[ColorSample], quantization_bits: u8) -> crate::Result<Rgba> {
    if !(1..=8).contains(&quantization_bits) {
        return Err(Error::InvalidQuantizationBits(quantization_bits));
    }
    // buckets stay in order of first appearance, which settles ties
    let mut bucket_indices: HashMap<[u8; 4], usize> = HashMap::new();
    let mut buckets: Vec<ChannelSums> = Vec::new();
    for sample in samples {
        let key = quantize(sample.color, quantization_bits);
        let index = *bucket_indices.entry(key).or_insert_with(|| {
            buckets.push(ChannelSums::default());
            buckets.len() - 1
        });
        buckets[index].add(sample.color);
    }
    let mut winner: Option<&ChannelSums> = None;
    for bucket in &buckets {
        if winner.map_or(true, |current| bucket.count > current.count) {
            winner = Some(bucket);
        }
    }
    log::debug!(
        "{} buckets from {} samples, winner holds {}",
        buckets.len(),
        samples.len(),
        winner.map_or(0, |bucket| bucket.count)
    );
    Ok(winner.map(ChannelSums::mean).unwrap_or_default())
}

#[cfg(test)]
mod test {
    use super::aggregate;
    use crate::{
        color::Rgba,
        error::Error,
        sampler::{grid::ColorSample, Aggregation},
    };

    fn samples_of(colors: &[Rgba]) -> Vec<ColorSample> {
        colors
            .iter()
            .enumerate()
            .map(|(index, &color)| ColorSample {
                x: index as u32,
                y: 0,
                color,
            })
            .collect()
    }

    #[test]
    fn mode_picks_most_frequent_bucket() {
        let samples = samples_of(&[Rgba::RED, Rgba::BLUE, Rgba::BLUE, Rgba::BLUE]);
        let color = aggregate(&samples, Aggregation::Mode, 4).unwrap();
        assert_eq!(color, Rgba::BLUE);
    }

    #[test]
    fn mode_tie_goes_to_first_in_scan_order() {
        let samples = samples_of(&[Rgba::GREEN, Rgba::RED, Rgba::RED, Rgba::GREEN]);
        let color = aggregate(&samples, Aggregation::Mode, 4).unwrap();
        assert_eq!(color, Rgba::GREEN);
    }

    #[test]
    fn mode_averages_within_winning_bucket() {
        let samples = samples_of(&[
            Rgba::opaque(200, 0, 0),
            Rgba::opaque(203, 2, 0),
            Rgba::BLUE,
        ]);
        let color = aggregate(&samples, Aggregation::Mode, 4).unwrap();
        assert_eq!(color, Rgba::opaque(202, 1, 0));
    }

    #[test]
    fn finer_quantization_separates_close_colors() {
        let samples = samples_of(&[
            Rgba::opaque(200, 0, 0),
            Rgba::opaque(203, 0, 0),
            Rgba::opaque(203, 0, 0),
        ]);
        let color = aggregate(&samples, Aggregation::Mode, 8).unwrap();
        assert_eq!(color, Rgba::opaque(203, 0, 0));
    }

    #[test]
    fn mean_over_all_samples() {
        let samples = samples_of(&[Rgba::RED, Rgba::BLUE]);
        let color = aggregate(&samples, Aggregation::Mean, 4).unwrap();
        assert_eq!(color, Rgba::opaque(128, 0, 128));
    }

    #[test]
    fn uniform_samples_are_exact() {
        let color = Rgba::new(17, 99, 201, 180);
        let samples = samples_of(&[color; 9]);
        for aggregation in [Aggregation::Mode, Aggregation::Mean] {
            assert_eq!(aggregate(&samples, aggregation, 4).unwrap(), color);
        }
    }

    #[test]
    fn quantization_bits_out_of_range() {
        let samples = samples_of(&[Rgba::RED]);
        for bits in [0, 9] {
            assert!(matches!(
                aggregate(&samples, Aggregation::Mode, bits),
                Err(Error::InvalidQuantizationBits(b)) if b == bits
            ));
        }
    }
}
