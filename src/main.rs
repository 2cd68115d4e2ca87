use std::env::args_os;
use std::process::ExitCode;

use folder_color_sampler::{extract_folder_colors, CLIParser, ConsoleNoticeSink};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    let mut sink = ConsoleNoticeSink::stdout();
    match extract_folder_colors(&arguments, &mut sink) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Processing failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
