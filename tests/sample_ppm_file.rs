use color_sampler::{sample_ppm_file, CLIParser, Error, Image, Rgba};
use color_sampler::image::{reader::PPMImageReader, ImageReader};
use std::fs::File;
use std::path::PathBuf;
use std::{env, fs};

const INPUT_IMAGE_PATH: &str = "tests/image.ppm";
const RESULT_IMAGE_PATH: &str = "tests/result_sorted.ppm";
const BLUE: Rgba = Rgba::opaque(0, 0, 255);
const RED: Rgba = Rgba::opaque(255, 0, 0);

fn get_project_root_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn get_input_image_path() -> PathBuf {
    let mut root_path = get_project_root_path();
    root_path.push(INPUT_IMAGE_PATH);
    root_path
}

fn get_result_image_path() -> PathBuf {
    let mut root_path = get_project_root_path();
    root_path.push(RESULT_IMAGE_PATH);
    root_path
}

fn cleanup() {
    let result_image_path = get_result_image_path();
    if result_image_path.exists() && result_image_path.is_file() {
        fs::remove_file(result_image_path).expect("Deletion of output file failed");
    }
}

fn read_image(path: &PathBuf) -> Image {
    let file = File::open(path).expect("Image file must be readable");
    PPMImageReader::new(file)
        .read_image()
        .expect("Image file must be valid PPM")
}

#[test]
fn test_sample_ppm_file() {
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        get_input_image_path().to_str().unwrap(),
        "-W",
        "2",
        "-H",
        "2",
    ]);
    let report = sample_ppm_file(&arguments).expect("Sampling failed");
    assert_eq!(report.dominant_color, BLUE);
    assert!(!report.sorted_image_written);
}

#[test]
fn test_sample_ppm_file_with_sorted_output() {
    cleanup();
    let result_image_path = get_result_image_path();
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        get_input_image_path().to_str().unwrap(),
        result_image_path.to_str().unwrap(),
        "-W",
        "4",
        "-H",
        "4",
        "--aggregation",
        "Mean",
    ]);
    let report = sample_ppm_file(&arguments).expect("Sampling failed");
    assert_eq!(report.dominant_color, Rgba::opaque(64, 0, 191));
    assert!(report.sorted_image_written);
    assert!(result_image_path.exists(), "Output file was not created");

    let input = read_image(&get_input_image_path());
    let sorted = read_image(&result_image_path);
    assert_eq!(sorted.width(), input.width());
    assert_eq!(sorted.height(), input.height());
    // red has the lowest hue, so it leads in ascending order
    let dots: Vec<Rgba> = sorted.dots().collect();
    assert!(dots[..4].iter().all(|&dot| dot == RED));
    assert!(dots[4..].iter().all(|&dot| dot == BLUE));
    cleanup();
}

#[test]
fn test_default_sample_size_exceeds_small_image() {
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec!["test", get_input_image_path().to_str().unwrap()]);
    let result = sample_ppm_file(&arguments);
    assert!(matches!(result, Err(Error::InvalidSampleSize { .. })));
}

#[test]
fn test_missing_input_file() {
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec!["test", "tests/does_not_exist.ppm"]);
    let result = sample_ppm_file(&arguments);
    assert!(matches!(
        result,
        Err(Error::UnableToOpenInputFileForReading(_, _))
    ));
}
