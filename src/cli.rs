use crate::batch::DEFAULT_CROPPED_DIRECTORY_NAME;
use crate::image::region::check_percentage;
use crate::sampler::DEFAULT_CROP_PERCENTAGE;
use crate::summary::DEFAULT_TABLE_FILE_NAME;
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
        let command = Self::register_folder_argument(command);
        let command = Self::register_percentage_argument(command);
        let command = Self::register_output_file_argument(command);
        Self::register_cropped_directory_argument(command)
    }

    fn register_folder_argument(command: Command) -> Command {
        command.arg(Self::create_folder_argument())
    }

    fn register_percentage_argument(command: Command) -> Command {
        command.arg(Self::create_percentage_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_cropped_directory_argument(command: Command) -> Command {
        command.arg(Self::create_cropped_directory_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_folder_argument() -> Arg {
        Arg::new("folder")
            .help("Folder containing the JPEG images to sample")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_percentage_argument() -> Arg {
        arg!(percentage: -p --percentage <FRACTION> "Fraction of width and height covered by the sampled center region")
            .default_value(DEFAULT_CROP_PERCENTAGE.to_string())
            .value_parser(parse_percentage)
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output_file <NAME> "Name of the summary workbook inside the folder")
            .default_value(DEFAULT_TABLE_FILE_NAME)
            .value_parser(value_parser!(String))
    }

    fn create_cropped_directory_argument() -> Arg {
        arg!(cropped_directory: -c --cropped_directory <NAME> "Name of the subfolder receiving the cropped images")
            .default_value(DEFAULT_CROPPED_DIRECTORY_NAME)
            .value_parser(value_parser!(String))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            folder: Self::extract_folder_argument(matches),
            percentage: Self::extract_percentage_argument(matches),
            table_file_name: Self::extract_output_file_argument(matches),
            cropped_directory_name: Self::extract_cropped_directory_argument(matches),
        }
    }

    fn extract_folder_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("folder")
            .expect("Required argument folder not provided")
            .clone()
    }

    fn extract_percentage_argument(matches: &ArgMatches) -> f64 {
        matches
            .get_one::<f64>("percentage")
            .expect("Percentage must be provided, but was unset.")
            .to_owned()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("output_file")
            .expect("Output file must be provided, but was unset.")
            .clone()
    }

    fn extract_cropped_directory_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("cropped_directory")
            .expect("Cropped directory must be provided, but was unset.")
            .clone()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_percentage(value: &str) -> Result<f64, String> {
    let percentage: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    check_percentage(percentage).map_err(|e| e.to_string())?;
    Ok(percentage)
}
