use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use ::image::ImageFormat;

use super::super::Image;
use super::super::ImageReader;
use crate::error::Error;

/// Decodes JPEG data into a normalized RGB [`Image`].
pub struct JpegImageReader<T: BufRead + Seek> {
    reader: T,
    source_name: String,
}

impl<T: BufRead + Seek> JpegImageReader<T> {
    pub fn new(reader: T, source_name: impl Into<String>) -> Self {
        Self {
            reader,
            source_name: source_name.into(),
        }
    }
}

impl JpegImageReader<BufReader<File>> {
    pub fn open(file_path: &Path) -> crate::Result<Self> {
        let source_name = file_path.display().to_string();
        let file = File::open(file_path)
            .map_err(|e| Error::UnableToOpenInputFileForReading(source_name.clone(), e))?;
        Ok(Self::new(BufReader::new(file), source_name))
    }
}

impl<T: BufRead + Seek> ImageReader for JpegImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let decoded = ::image::ImageReader::with_format(&mut self.reader, ImageFormat::Jpeg)
            .decode()
            .map_err(|e| Error::DecodeFailure(self.source_name.clone(), e))?;
        log::debug!(
            "Decoded '{}' ({}x{}, {:?})",
            self.source_name,
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Image::from_dynamic(&decoded)
    }
}
