use std::env::args_os;

use color_sampler::{sample_ppm_file, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match sample_ppm_file(&arguments) {
        Ok(report) => {
            println!("Dominant color: {}", report.dominant_color);
            if report.sorted_image_written {
                println!("Sorted image written");
            }
        }
        Err(e) => {
            eprintln!("Sampling failed because of: {}", e);
            std::process::exit(1);
        }
    }
}
