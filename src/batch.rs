use std::fmt::Display;
use std::fs;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    image::{
        reader::jpeg::JpegImageReader, writer::jpeg::JpegImageWriter, ImageReader, ImageWriter,
    },
    logger::log_sample,
    sampler::{RegionSampler, SampleResult, DEFAULT_CROP_PERCENTAGE},
    summary::{SummaryRow, SummaryWriter, XlsxSummaryWriter, DEFAULT_TABLE_FILE_NAME},
    Arguments, Result,
};

pub const DEFAULT_CROPPED_DIRECTORY_NAME: &str = "cropped_images";
const CROPPED_FILE_SUFFIX: &str = "_cropped";
const JPEG_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

#[derive(Clone, Debug, PartialEq)]
pub struct BatchOptions {
    pub folder: PathBuf,
    pub percentage: f64,
    pub table_file_name: String,
    pub cropped_directory_name: String,
}

impl BatchOptions {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            percentage: DEFAULT_CROP_PERCENTAGE,
            table_file_name: DEFAULT_TABLE_FILE_NAME.to_owned(),
            cropped_directory_name: DEFAULT_CROPPED_DIRECTORY_NAME.to_owned(),
        }
    }

    pub fn table_path(&self) -> PathBuf {
        self.folder.join(&self.table_file_name)
    }

    pub fn cropped_directory(&self) -> PathBuf {
        self.folder.join(&self.cropped_directory_name)
    }
}

impl From<&Arguments> for BatchOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            folder: value.folder.clone(),
            percentage: value.percentage,
            table_file_name: value.table_file_name.clone(),
            cropped_directory_name: value.cropped_directory_name.clone(),
        }
    }
}

/// Advisory messages for whoever drives a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    FolderSelected(PathBuf),
    Processing(String),
    Skipped {
        filename: String,
        reason: String,
    },
    SaveFailed {
        filename: String,
        reason: String,
    },
    NothingProcessed,
    Completed {
        processed: usize,
        skipped: usize,
        table: PathBuf,
        cropped_directory: PathBuf,
    },
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FolderSelected(folder) => write!(f, "Folder selected: {}", folder.display()),
            Self::Processing(filename) => write!(f, "Processing {}", filename),
            Self::Skipped { filename, reason } => {
                write!(f, "Skipped: {} ({})", filename, reason)
            }
            Self::SaveFailed { filename, reason } => {
                write!(f, "Error saving cropped {}: {}", filename, reason)
            }
            Self::NothingProcessed => write!(
                f,
                "No JPG files found in the selected folder, or none could be processed."
            ),
            Self::Completed {
                processed,
                skipped,
                table,
                cropped_directory,
            } => write!(
                f,
                "Processing complete! {} images processed, {} skipped. Results saved to {} and cropped images to {}",
                processed,
                skipped,
                table.display(),
                cropped_directory.display()
            ),
        }
    }
}

pub trait NoticeSink {
    fn notice(&mut self, notice: &Notice);
}

impl NoticeSink for Vec<Notice> {
    fn notice(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

/// Prints every notice as one line, on standard output unless another
/// writer is given.
pub struct ConsoleNoticeSink<T: Write> {
    writer: T,
}

impl ConsoleNoticeSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<T: Write> ConsoleNoticeSink<T> {
    pub fn new(writer: T) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> T {
        self.writer
    }
}

impl<T: Write> NoticeSink for ConsoleNoticeSink<T> {
    fn notice(&mut self, notice: &Notice) {
        if let Err(e) = writeln!(self.writer, "{}", notice) {
            log::warn!("Unable to print notice '{}': {}", notice, e);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkippedImage {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub rows: Vec<SummaryRow>,
    pub skipped: Vec<SkippedImage>,
    pub failed_saves: Vec<SkippedImage>,
    pub saved_crops: Vec<PathBuf>,
    /// `None` when no image could be processed.
    pub table_path: Option<PathBuf>,
    pub cropped_directory: PathBuf,
}

pub fn is_jpeg_file_name(file_name: &str) -> bool {
    let lowercase = file_name.to_ascii_lowercase();
    JPEG_EXTENSIONS
        .iter()
        .any(|extension| lowercase.ends_with(extension))
}

/// `photo.JPG` becomes `photo_cropped.JPG`.
pub fn cropped_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    match path.extension() {
        Some(extension) => format!(
            "{}{}.{}",
            stem,
            CROPPED_FILE_SUFFIX,
            extension.to_string_lossy()
        ),
        None => format!("{}{}", stem, CROPPED_FILE_SUFFIX),
    }
}

// The sink shows notices to the user, the log only traces them.
fn emit(sink: &mut dyn NoticeSink, notice: Notice) {
    log::debug!("{}", notice);
    sink.notice(&notice);
}

fn list_jpeg_file_names(folder: &Path) -> Result<Vec<String>> {
    let folder_name = folder.display().to_string();
    let entries =
        fs::read_dir(folder).map_err(|e| Error::UnableToReadFolder(folder_name.clone(), e))?;
    let mut file_names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::UnableToReadFolder(folder_name.clone(), e))?;
        let Ok(file_name) = entry.file_name().into_string() else {
            log::warn!("Ignoring entry with non UTF-8 name in '{}'", folder_name);
            continue;
        };
        if is_jpeg_file_name(&file_name) && entry.path().is_file() {
            file_names.push(file_name);
        }
    }
    file_names.sort();
    Ok(file_names)
}

fn sample_file(path: &Path, sampler: &RegionSampler) -> Result<SampleResult> {
    let image = JpegImageReader::open(path)?.read_image()?;
    sampler.sample(&image)
}

fn save_crop(path: &Path, sample: &SampleResult) -> Result<()> {
    JpegImageWriter::create(path, &sample.cropped)?.write_image()
}

/// Samples every JPEG directly inside `options.folder`, one after another.
///
/// Unreadable images and crops that can not be saved are reported through
/// `sink` and recorded in the report, they never end the batch. Only an
/// invalid folder, a failure to prepare the crop directory and a failure
/// to persist the summary table are returned as errors.
pub fn process_folder(options: &BatchOptions, sink: &mut dyn NoticeSink) -> Result<BatchReport> {
    let folder = options.folder.as_path();
    if !folder.is_dir() {
        return Err(Error::InvalidFolder(folder.display().to_string()));
    }
    let sampler = RegionSampler::new(options.percentage)?;
    emit(sink, Notice::FolderSelected(folder.to_path_buf()));

    let cropped_directory = options.cropped_directory();
    fs::create_dir_all(&cropped_directory).map_err(|e| {
        Error::UnableToCreateDirectory(cropped_directory.display().to_string(), e)
    })?;

    let mut report = BatchReport {
        cropped_directory: cropped_directory.clone(),
        ..BatchReport::default()
    };

    for file_name in list_jpeg_file_names(folder)? {
        emit(sink, Notice::Processing(file_name.clone()));
        let sample = match sample_file(&folder.join(&file_name), &sampler) {
            Ok(sample) => sample,
            Err(e) => {
                let reason = e.to_string();
                emit(
                    sink,
                    Notice::Skipped {
                        filename: file_name.clone(),
                        reason: reason.clone(),
                    },
                );
                report.skipped.push(SkippedImage {
                    filename: file_name,
                    reason,
                });
                continue;
            }
        };
        log_sample(&file_name, &sample.statistics);

        let crop_name = cropped_file_name(&file_name);
        let crop_path = cropped_directory.join(&crop_name);
        match save_crop(&crop_path, &sample) {
            Ok(()) => report.saved_crops.push(crop_path),
            Err(e) => {
                let reason = e.to_string();
                emit(
                    sink,
                    Notice::SaveFailed {
                        filename: crop_name.clone(),
                        reason: reason.clone(),
                    },
                );
                report.failed_saves.push(SkippedImage {
                    filename: crop_name,
                    reason,
                });
            }
        }
        report.rows.push(SummaryRow::new(file_name, sample.statistics));
    }

    if report.rows.is_empty() {
        emit(sink, Notice::NothingProcessed);
        return Ok(report);
    }

    let table_path = options.table_path();
    XlsxSummaryWriter::new(&table_path).write_summary(&report.rows)?;
    emit(
        sink,
        Notice::Completed {
            processed: report.rows.len(),
            skipped: report.skipped.len(),
            table: table_path.clone(),
            cropped_directory,
        },
    );
    report.table_path = Some(table_path);
    Ok(report)
}
