use std::fmt::Display;

use image::ImageError;
use rust_xlsxwriter::XlsxError;

use crate::image::region::Rectangle;

#[derive(Debug)]
pub enum Error {
    InvalidFolder(String),
    UnableToReadFolder(String, std::io::Error),
    UnableToCreateDirectory(String, std::io::Error),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    DecodeFailure(String, ImageError),
    SaveFailure(String, ImageError),
    MismatchOfSizeBetweenDimensionsAndDots(u32, u32, usize),
    EmptyImage,
    InvalidRectangle(u32, u32, u32, u32),
    RectangleOutsideOfImage(Rectangle, u32, u32),
    InvalidCropPercentage(f64),
    TableSerializationFailure(String, XlsxError),
    OutputWriteFailure(String, std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFolder(path) => {
                write!(f, "'{}' is not a folder. Please select a valid folder.", path)
            }
            Self::UnableToReadFolder(path, error) => {
                write!(f, "Unable to list the contents of folder '{}': {}", path, error)
            }
            Self::UnableToCreateDirectory(path, error) => {
                write!(f, "Unable to create directory '{}': {}", path, error)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::DecodeFailure(name, error) => {
                write!(f, "Unable to decode image '{}': {}", name, error)
            }
            Self::SaveFailure(name, error) => {
                write!(f, "Unable to save image '{}': {}", name, error)
            }
            Self::MismatchOfSizeBetweenDimensionsAndDots(width, height, dots) => {
                write!(
                    f,
                    "Image of {}x{} pixels can not be built from {} dots",
                    width, height, dots
                )
            }
            Self::EmptyImage => write!(f, "Image must be at least one pixel wide and high"),
            Self::InvalidRectangle(left, top, right, bottom) => {
                write!(
                    f,
                    "Rectangle from ({}, {}) to ({}, {}) covers no pixel",
                    left, top, right, bottom
                )
            }
            Self::RectangleOutsideOfImage(rect, width, height) => {
                write!(
                    f,
                    "Rectangle from ({}, {}) to ({}, {}) exceeds image of {}x{} pixels",
                    rect.left(),
                    rect.top(),
                    rect.right(),
                    rect.bottom(),
                    width,
                    height
                )
            }
            Self::InvalidCropPercentage(percentage) => {
                write!(
                    f,
                    "Crop percentage must be greater than 0 and at most 1, but was {}",
                    percentage
                )
            }
            Self::TableSerializationFailure(path, error) => {
                write!(f, "Failed to build summary table '{}': {}", path, error)
            }
            Self::OutputWriteFailure(path, error) => {
                write!(f, "Failed to save summary table '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToReadFolder(_, error)
            | Self::UnableToCreateDirectory(_, error)
            | Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::OutputWriteFailure(_, error) => Some(error),
            Self::DecodeFailure(_, error) | Self::SaveFailure(_, error) => Some(error),
            Self::TableSerializationFailure(_, error) => Some(error),
            Self::InvalidFolder(_)
            | Self::MismatchOfSizeBetweenDimensionsAndDots(..)
            | Self::EmptyImage
            | Self::InvalidRectangle(..)
            | Self::RectangleOutsideOfImage(..)
            | Self::InvalidCropPercentage(_) => None,
        }
    }
}
