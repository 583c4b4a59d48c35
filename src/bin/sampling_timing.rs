use std::time::{Duration, Instant};

use color_sampler::{dominant_color, sorted_image, Image, Rgba, SampleSize, SamplerOptions};

const IMAGE_WIDTH: u32 = 3840;
const IMAGE_HEIGHT: u32 = 2160;
const IMAGE_SIZE: usize = IMAGE_WIDTH as usize * IMAGE_HEIGHT as usize;
const SAMPLE_SIZE: SampleSize = SampleSize::new(64, 36);

fn create_test_image() -> Image {
    let dots = (0..IMAGE_SIZE)
        .map(|index| {
            let x = index as u32 % IMAGE_WIDTH;
            let y = index as u32 / IMAGE_WIDTH;
            Rgba::opaque((x % 256) as u8, (y % 256) as u8, ((x + y * 8) % 256) as u8)
        })
        .collect();
    Image::new(IMAGE_WIDTH, IMAGE_HEIGHT, dots).expect("Test image dimensions must match")
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

fn print_statistics(durations: &[Duration]) {
    let min_duration = durations.iter().min().unwrap();
    let max_duration = durations.iter().max().unwrap();
    let avg_duration = durations.iter().sum::<Duration>() / durations.len() as u32;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, durations);

    println!(
        "Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
}

fn measure<F: FnMut()>(name: &str, mut operation: F) {
    println!("Starting {}", name);
    let mut durations: Vec<Duration> = Vec::new();

    for round in 1..=NUMBER_OF_ROUNDS {
        let start = Instant::now();
        operation();
        let duration = start.elapsed();

        println!(
            "Finished round {} after {} microseconds",
            round,
            duration.as_micros(),
        );
        durations.push(duration);
    }

    println!("{} done", name);
    print_statistics(&durations);
}

const NUMBER_OF_ROUNDS: u32 = 10;

fn main() {
    println!("Creating test image");
    let test_image = create_test_image();
    let options = SamplerOptions {
        sample_size: SAMPLE_SIZE,
        ..SamplerOptions::default()
    };

    measure("dominant color sampling", || {
        dominant_color(&test_image, &options).unwrap();
    });
    measure("sorting by color", || {
        sorted_image(&test_image, &options).unwrap();
    });
}
