pub mod ppm;

pub use ppm::PPMImageWriter;
