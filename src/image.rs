use ::image::DynamicImage;

use crate::color::{Channel, RGBColorFormat};
use crate::error::Error;
use crate::Result;

pub mod reader;
pub mod region;
pub mod writer;

use region::Rectangle;

pub trait ImageReader {
    fn read_image(&mut self) -> Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> Result<()>;
}

/// Row-major grid of 8-bit RGB dots, at least one pixel wide and high.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    dots: Vec<RGBColorFormat<u8>>,
}

impl Image {
    pub fn new(width: u32, height: u32, dots: Vec<RGBColorFormat<u8>>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        if dots.len() != width as usize * height as usize {
            return Err(Error::MismatchOfSizeBetweenDimensionsAndDots(
                width,
                height,
                dots.len(),
            ));
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    /// Normalizes any decoded layout to three 8-bit channels. Gray values
    /// are replicated into red, green and blue, alpha is discarded.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        let dots = match image {
            DynamicImage::ImageLuma8(buffer) => buffer.pixels().map(RGBColorFormat::from).collect(),
            DynamicImage::ImageLumaA8(buffer) => {
                buffer.pixels().map(RGBColorFormat::from).collect()
            }
            DynamicImage::ImageRgb8(buffer) => buffer.pixels().map(RGBColorFormat::from).collect(),
            DynamicImage::ImageRgba8(buffer) => {
                buffer.pixels().map(RGBColorFormat::from).collect()
            }
            other => other.to_rgb8().pixels().map(RGBColorFormat::from).collect(),
        };
        Self::new(width, height, dots)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dots(&self) -> &[RGBColorFormat<u8>] {
        &self.dots
    }

    pub fn dot(&self, column_index: u32, row_index: u32) -> RGBColorFormat<u8> {
        let index = column_index as usize + row_index as usize * self.width as usize;
        self.dots[index]
    }

    /// Copies the dots inside `rect`.
    pub fn crop(&self, rect: &Rectangle) -> Result<Image> {
        if rect.right() > self.width || rect.bottom() > self.height {
            return Err(Error::RectangleOutsideOfImage(*rect, self.width, self.height));
        }
        let mut dots = Vec::with_capacity(rect.width() as usize * rect.height() as usize);
        for row_index in rect.top()..rect.bottom() {
            let row_start = row_index as usize * self.width as usize;
            let start = row_start + rect.left() as usize;
            let end = row_start + rect.right() as usize;
            dots.extend_from_slice(&self.dots[start..end]);
        }
        Ok(Image {
            width: rect.width(),
            height: rect.height(),
            dots,
        })
    }

    pub fn channel_values(&self, channel: Channel) -> Vec<u8> {
        self.dots.iter().map(|dot| dot.component(channel)).collect()
    }

    /// Interleaved `R G B` bytes, row by row.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.dots
            .iter()
            .flat_map(|dot| [dot.red(), dot.green(), dot.blue()])
            .collect()
    }
}
