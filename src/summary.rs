use std::fs;
use std::path::PathBuf;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::{
    color::Channel,
    error::Error,
    statistics::{ColorStatistics, StatisticKind},
    Result,
};

pub const DEFAULT_TABLE_FILE_NAME: &str = "image_colors.xlsx";
pub const SUMMARY_SHEET_NAME: &str = "Image Colors Summary";
const FILENAME_COLUMN_TITLE: &str = "Filename";

/// One table line: the source filename followed by 21 statistic columns,
/// grouped by statistic and ordered R, G, B within each group.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub filename: String,
    pub statistics: ColorStatistics,
}

impl SummaryRow {
    pub fn new(filename: impl Into<String>, statistics: ColorStatistics) -> Self {
        Self {
            filename: filename.into(),
            statistics,
        }
    }

    pub fn values(&self) -> Vec<u8> {
        StatisticKind::ALL
            .iter()
            .flat_map(|&kind| {
                Channel::ALL
                    .iter()
                    .map(move |&channel| self.statistics.channel(channel).get(kind))
            })
            .collect()
    }
}

pub fn header() -> Vec<String> {
    let mut titles = vec![FILENAME_COLUMN_TITLE.to_owned()];
    for kind in StatisticKind::ALL {
        for channel in Channel::ALL {
            titles.push(format!("{} {}", kind.label(), channel.label()));
        }
    }
    titles
}

pub trait SummaryWriter {
    fn write_summary(&mut self, rows: &[SummaryRow]) -> Result<()>;
}

/// Persists the summary as a single-sheet workbook. The file at `path`
/// is either replaced completely or left untouched.
pub struct XlsxSummaryWriter {
    path: PathBuf,
}

impl XlsxSummaryWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path_name(&self) -> String {
        self.path.display().to_string()
    }

    fn temporary_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".partial");
        self.path.with_file_name(file_name)
    }

    fn serialize(&self, rows: &[SummaryRow]) -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        fill_worksheet(worksheet, rows)?;
        workbook.save_to_buffer()
    }
}

impl SummaryWriter for XlsxSummaryWriter {
    fn write_summary(&mut self, rows: &[SummaryRow]) -> Result<()> {
        let bytes = self
            .serialize(rows)
            .map_err(|e| Error::TableSerializationFailure(self.path_name(), e))?;
        let temporary_path = self.temporary_path();
        let result = fs::write(&temporary_path, &bytes)
            .and_then(|_| fs::rename(&temporary_path, &self.path));
        if let Err(e) = result {
            let _ = fs::remove_file(&temporary_path);
            return Err(Error::OutputWriteFailure(self.path_name(), e));
        }
        log::info!("Wrote {} rows to '{}'", rows.len(), self.path.display());
        Ok(())
    }
}

fn fill_worksheet(
    worksheet: &mut Worksheet,
    rows: &[SummaryRow],
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(SUMMARY_SHEET_NAME)?;
    for (column, title) in header().iter().enumerate() {
        worksheet.write_string(0, column as u16, title)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let row_number = index as u32 + 1;
        worksheet.write_string(row_number, 0, &row.filename)?;
        for (column, value) in row.values().into_iter().enumerate() {
            worksheet.write_number(row_number, column as u16 + 1, f64::from(value))?;
        }
    }
    Ok(())
}
