use std::cmp;

use crate::{error::Error, Result};

/// Pixel rectangle, `left`/`top` inclusive and `right`/`bottom` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rectangle {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl Rectangle {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Result<Self> {
        if left >= right || top >= bottom {
            return Err(Error::InvalidRectangle(left, top, right, bottom));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Centered rectangle covering `percentage` of each image dimension.
    ///
    /// Each side is `floor(dimension * percentage)`, raised to at least one
    /// pixel before the corner coordinates are derived, so the result is
    /// never empty and always lies inside the image.
    pub fn centered(image_width: u32, image_height: u32, percentage: f64) -> Result<Self> {
        if image_width == 0 || image_height == 0 {
            return Err(Error::EmptyImage);
        }
        check_percentage(percentage)?;
        let rect_width = scaled_side(image_width, percentage);
        let rect_height = scaled_side(image_height, percentage);
        let left = (image_width - rect_width) / 2;
        let top = (image_height - rect_height) / 2;
        let right = cmp::min(image_width, left + rect_width);
        let bottom = cmp::min(image_height, top + rect_height);
        Self::new(left, top, right, bottom)
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn right(&self) -> u32 {
        self.right
    }

    pub fn bottom(&self) -> u32 {
        self.bottom
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

pub fn check_percentage(percentage: f64) -> Result<()> {
    if percentage.is_finite() && percentage > 0.0 && percentage <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidCropPercentage(percentage))
    }
}

fn scaled_side(dimension: u32, percentage: f64) -> u32 {
    let side = (dimension as f64 * percentage).floor() as u32;
    side.clamp(1, dimension)
}
