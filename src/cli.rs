use crate::sampler::{
    get_number_of_threads, Aggregation, SortKey, SortOrder, DEFAULT_QUANTIZATION_BITS,
    DEFAULT_SAMPLE_SIZE,
};
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_sample_width_argument(command);
        let command = Self::register_sample_height_argument(command);
        let command = Self::register_aggregation_argument(command);
        let command = Self::register_quantization_bits_argument(command);
        let command = Self::register_sort_key_argument(command);
        let command = Self::register_sort_order_argument(command);
        Self::register_threads_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_sample_width_argument(command: Command) -> Command {
        command.arg(Self::create_sample_width_argument())
    }

    fn register_sample_height_argument(command: Command) -> Command {
        command.arg(Self::create_sample_height_argument())
    }

    fn register_aggregation_argument(command: Command) -> Command {
        command.arg(Self::create_aggregation_argument())
    }

    fn register_quantization_bits_argument(command: Command) -> Command {
        command.arg(Self::create_quantization_bits_argument())
    }

    fn register_sort_key_argument(command: Command) -> Command {
        command.arg(Self::create_sort_key_argument())
    }

    fn register_sort_order_argument(command: Command) -> Command {
        command.arg(Self::create_sort_order_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PPM (P3) input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to write the color sorted image to, as PPM (P3)")
            .value_parser(value_parser!(PathBuf))
            .required(false)
    }

    fn create_sample_width_argument() -> Arg {
        arg!(sample_width: -W --sample_width <COLUMNS> "Number of sample grid columns")
            .default_value(DEFAULT_SAMPLE_SIZE.width.to_string())
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_sample_height_argument() -> Arg {
        arg!(sample_height: -H --sample_height <ROWS> "Number of sample grid rows")
            .default_value(DEFAULT_SAMPLE_SIZE.height.to_string())
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_aggregation_argument() -> Arg {
        arg!(aggregation: -a --aggregation <POLICY> "How samples are reduced to one color")
            .default_value("Mode")
            .value_parser(value_parser!(Aggregation))
    }

    fn create_quantization_bits_argument() -> Arg {
        arg!(quantization_bits: -q --quantization_bits <BITS> "Bits per channel kept when bucketing samples")
            .default_value(DEFAULT_QUANTIZATION_BITS.to_string())
            .value_parser(value_parser!(u8).range(1..=8))
    }

    fn create_sort_key_argument() -> Arg {
        arg!(sort_key: -k --sort_key <KEY> "Color key the sorted image is ordered by")
            .default_value("Hue")
            .value_parser(value_parser!(SortKey))
    }

    fn create_sort_order_argument() -> Arg {
        arg!(sort_order: -o --sort_order <ORDER> "Order of the sorted image")
            .default_value("Ascending")
            .value_parser(value_parser!(SortOrder))
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            sample_width: Self::extract_sample_width_argument(matches),
            sample_height: Self::extract_sample_height_argument(matches),
            aggregation: Self::extract_aggregation_argument(matches),
            quantization_bits: Self::extract_quantization_bits_argument(matches),
            sort_key: Self::extract_sort_key_argument(matches),
            sort_order: Self::extract_sort_order_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("output_file").cloned()
    }

    fn extract_sample_width_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("sample_width")
            .expect("Sample width must be provided, but was unset.")
            .to_owned()
    }

    fn extract_sample_height_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("sample_height")
            .expect("Sample height must be provided, but was unset.")
            .to_owned()
    }

    fn extract_aggregation_argument(matches: &ArgMatches) -> Aggregation {
        matches
            .get_one::<Aggregation>("aggregation")
            .expect("Aggregation must be provided, but was unset.")
            .to_owned()
    }

    fn extract_quantization_bits_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<u8>("quantization_bits")
            .expect("Quantization bits must be provided, but was unset.")
            .to_owned()
    }

    fn extract_sort_key_argument(matches: &ArgMatches) -> SortKey {
        matches
            .get_one::<SortKey>("sort_key")
            .expect("Sort key must be provided, but was unset.")
            .to_owned()
    }

    fn extract_sort_order_argument(matches: &ArgMatches) -> SortOrder {
        matches
            .get_one::<SortOrder>("sort_order")
            .expect("Sort order must be provided, but was unset.")
            .to_owned()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
