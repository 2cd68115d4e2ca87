use crate::{
    image::{
        region::{check_percentage, Rectangle},
        Image,
    },
    statistics::ColorStatistics,
    Result,
};

pub const DEFAULT_CROP_PERCENTAGE: f64 = 0.15;

pub struct SampleResult {
    pub statistics: ColorStatistics,
    pub cropped: Image,
}

/// Crops the center of an image and summarizes each of its color channels.
#[derive(Clone, Copy, Debug)]
pub struct RegionSampler {
    percentage: f64,
}

impl Default for RegionSampler {
    fn default() -> Self {
        Self {
            percentage: DEFAULT_CROP_PERCENTAGE,
        }
    }
}

impl RegionSampler {
    pub fn new(percentage: f64) -> Result<Self> {
        check_percentage(percentage)?;
        Ok(Self { percentage })
    }

    pub fn region(&self, image: &Image) -> Result<Rectangle> {
        Rectangle::centered(image.width(), image.height(), self.percentage)
    }

    pub fn sample(&self, image: &Image) -> Result<SampleResult> {
        let region = self.region(image)?;
        let cropped = image.crop(&region)?;
        let statistics = ColorStatistics::from_image(&cropped)?;
        Ok(SampleResult {
            statistics,
            cropped,
        })
    }
}

#[cfg(test)]
mod test {
    use ::image::{DynamicImage, Rgba, RgbaImage};

    use super::RegionSampler;
    use crate::color::RGBColorFormat;
    use crate::error::Error;
    use crate::image::Image;
    use crate::statistics::StatisticKind;

    fn solid_image(width: u32, height: u32, color: RGBColorFormat<u8>) -> Image {
        Image::new(width, height, vec![color; width as usize * height as usize]).unwrap()
    }

    fn gradient_image(width: u32, height: u32) -> Image {
        let dots = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    RGBColorFormat::new(
                        (x * 3 % 256) as u8,
                        (y * 5 % 256) as u8,
                        ((x + y) % 256) as u8,
                    )
                })
            })
            .collect();
        Image::new(width, height, dots).unwrap()
    }

    #[test]
    fn solid_red_image() {
        let image = solid_image(100, 100, RGBColorFormat::new(255, 0, 0));
        let result = RegionSampler::default().sample(&image).unwrap();
        assert_eq!(result.cropped.width(), 15);
        assert_eq!(result.cropped.height(), 15);
        for kind in StatisticKind::ALL {
            assert_eq!(result.statistics.red.get(kind), 255, "{} of red", kind.label());
            assert_eq!(result.statistics.green.get(kind), 0, "{} of green", kind.label());
            assert_eq!(result.statistics.blue.get(kind), 0, "{} of blue", kind.label());
        }
    }

    #[test]
    fn three_by_three_samples_center_pixel() {
        let dots = (0..9_u8)
            .map(|v| RGBColorFormat::new(v, v * 10, 200 - v))
            .collect();
        let image = Image::new(3, 3, dots).unwrap();
        let result = RegionSampler::default().sample(&image).unwrap();
        assert_eq!(result.cropped.width(), 1);
        assert_eq!(result.cropped.height(), 1);
        for kind in StatisticKind::ALL {
            assert_eq!(result.statistics.red.get(kind), 4);
            assert_eq!(result.statistics.green.get(kind), 40);
            assert_eq!(result.statistics.blue.get(kind), 196);
        }
    }

    #[test]
    fn crop_comes_from_image_center() {
        let image = gradient_image(20, 10);
        let sampler = RegionSampler::new(0.5).unwrap();
        let region = sampler.region(&image).unwrap();
        let result = sampler.sample(&image).unwrap();
        assert_eq!((region.left(), region.top()), (5, 2));
        assert_eq!(result.cropped.dot(0, 0), image.dot(5, 2));
        assert_eq!(result.cropped.width(), 10);
        assert_eq!(result.cropped.height(), 5);
    }

    #[test]
    fn rgba_statistics_ignore_alpha() {
        let rgba = RgbaImage::from_fn(30, 30, |x, y| {
            Rgba([x as u8 * 8, y as u8 * 8, 77, (x * y % 256) as u8])
        });
        let rgb = DynamicImage::ImageRgba8(rgba.clone()).to_rgb8();
        let sampler = RegionSampler::new(0.4).unwrap();
        let from_rgba = sampler
            .sample(&Image::from_dynamic(&DynamicImage::ImageRgba8(rgba)).unwrap())
            .unwrap();
        let from_rgb = sampler
            .sample(&Image::from_dynamic(&DynamicImage::ImageRgb8(rgb)).unwrap())
            .unwrap();
        assert_eq!(from_rgba.statistics, from_rgb.statistics);
    }

    #[test]
    fn reject_invalid_percentage() {
        assert!(matches!(
            RegionSampler::new(0.0),
            Err(Error::InvalidCropPercentage(_))
        ));
        assert!(RegionSampler::new(1.0).is_ok());
    }
}
