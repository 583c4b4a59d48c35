const LOG_CONFIG_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(error) = log4rs::init_file(LOG_CONFIG_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOG_CONFIG_FILE, error
        );
    }
}

pub fn log_samples(samples: &[crate::sampler::ColorSample]) {
    log::debug!(
        "{} samples: {:?}",
        samples.len(),
        samples
            .iter()
            .map(|sample| format!("({}, {}) {}", sample.x, sample.y, sample.color))
            .collect::<Vec<String>>()
    );
}
