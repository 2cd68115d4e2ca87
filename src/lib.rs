use std::path::PathBuf;

pub use crate::image::{region::Rectangle, Image};
pub use batch::{
    process_folder, BatchOptions, BatchReport, ConsoleNoticeSink, Notice, NoticeSink, SkippedImage,
};
pub use cli::CLIParser;
pub use error::Error;
pub use sampler::{RegionSampler, SampleResult, DEFAULT_CROP_PERCENTAGE};
pub use statistics::{ChannelStatistics, ColorStatistics, StatisticKind};
pub use summary::SummaryRow;

pub mod batch;
mod cli;
pub mod color;
mod error;
pub mod image;
mod logger;
pub mod sampler;
pub mod statistics;
pub mod summary;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    folder: PathBuf,
    percentage: f64,
    table_file_name: String,
    cropped_directory_name: String,
}

pub fn extract_folder_colors(
    arguments: &Arguments,
    sink: &mut dyn NoticeSink,
) -> Result<BatchReport> {
    let options = BatchOptions::from(arguments);
    process_folder(&options, sink)
}
