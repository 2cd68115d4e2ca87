use crate::{color::Channel, error::Error, image::Image, Result};

/// Seven descriptive statistics of one color channel. Every value is
/// truncated toward zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelStatistics {
    pub mean: u8,
    pub median: u8,
    pub min: u8,
    pub max: u8,
    pub q1: u8,
    pub q3: u8,
    /// Mean of all samples within `[q1, q3]`, or `mean` if there are none.
    pub iqr_mean: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatisticKind {
    Mean,
    Median,
    Min,
    Max,
    Q1,
    Q3,
    IqrMean,
}

impl StatisticKind {
    pub const ALL: [StatisticKind; 7] = [
        StatisticKind::Mean,
        StatisticKind::Median,
        StatisticKind::Min,
        StatisticKind::Max,
        StatisticKind::Q1,
        StatisticKind::Q3,
        StatisticKind::IqrMean,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatisticKind::Mean => "Mean",
            StatisticKind::Median => "Median",
            StatisticKind::Min => "Min",
            StatisticKind::Max => "Max",
            StatisticKind::Q1 => "Q1",
            StatisticKind::Q3 => "Q3",
            StatisticKind::IqrMean => "IQR Mean",
        }
    }
}

impl ChannelStatistics {
    pub fn from_samples(samples: &[u8]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptyImage);
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let mean = truncated_mean(&sorted);
        let q1 = percentile(&sorted, 25.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr_mean = interquartile_mean(&sorted, q1, q3).unwrap_or(mean);

        Ok(Self {
            mean,
            median: median(&sorted),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            q1,
            q3,
            iqr_mean,
        })
    }

    pub fn get(&self, kind: StatisticKind) -> u8 {
        match kind {
            StatisticKind::Mean => self.mean,
            StatisticKind::Median => self.median,
            StatisticKind::Min => self.min,
            StatisticKind::Max => self.max,
            StatisticKind::Q1 => self.q1,
            StatisticKind::Q3 => self.q3,
            StatisticKind::IqrMean => self.iqr_mean,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorStatistics {
    pub red: ChannelStatistics,
    pub green: ChannelStatistics,
    pub blue: ChannelStatistics,
}

impl ColorStatistics {
    pub fn from_image(image: &Image) -> Result<Self> {
        Ok(Self {
            red: ChannelStatistics::from_samples(&image.channel_values(Channel::Red))?,
            green: ChannelStatistics::from_samples(&image.channel_values(Channel::Green))?,
            blue: ChannelStatistics::from_samples(&image.channel_values(Channel::Blue))?,
        })
    }

    pub fn channel(&self, channel: Channel) -> &ChannelStatistics {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

fn truncated_mean(samples: &[u8]) -> u8 {
    let sum: u64 = samples.iter().map(|&v| v as u64).sum();
    (sum / samples.len() as u64) as u8
}

fn median(sorted: &[u8]) -> u8 {
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[middle]
    } else {
        ((sorted[middle - 1] as u16 + sorted[middle] as u16) / 2) as u8
    }
}

/// Linear interpolation between the two closest ranks, where rank
/// `percent / 100 * (n - 1)` addresses the sorted samples.
fn percentile(sorted: &[u8], percent: f64) -> u8 {
    let rank = percent / 100.0 * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;
    let fraction = rank - lower_index as f64;
    let lower = sorted[lower_index] as f64;
    let upper = sorted[upper_index] as f64;
    let difference = upper - lower;
    // interpolate from the nearer end so exact ranks stay exact
    let value = if fraction >= 0.5 {
        upper - difference * (1.0 - fraction)
    } else {
        lower + difference * fraction
    };
    value.trunc() as u8
}

fn interquartile_mean(sorted: &[u8], q1: u8, q3: u8) -> Option<u8> {
    let (sum, count) = sorted
        .iter()
        .filter(|&&v| v >= q1 && v <= q3)
        .fold((0_u64, 0_u64), |(sum, count), &v| (sum + v as u64, count + 1));
    if count == 0 {
        return None;
    }
    Some((sum / count) as u8)
}

#[cfg(test)]
mod test {
    use super::{median, percentile, ChannelStatistics, ColorStatistics, StatisticKind};
    use crate::color::{Channel, RGBColorFormat};
    use crate::error::Error;
    use crate::image::Image;

    fn assert_ordered(stats: &ChannelStatistics) {
        assert!(stats.min <= stats.q1, "min > q1 in {:?}", stats);
        assert!(stats.q1 <= stats.median, "q1 > median in {:?}", stats);
        assert!(stats.median <= stats.q3, "median > q3 in {:?}", stats);
        assert!(stats.q3 <= stats.max, "q3 > max in {:?}", stats);
    }

    #[test]
    fn constant_samples() {
        let stats = ChannelStatistics::from_samples(&[77; 225]).unwrap();
        for kind in StatisticKind::ALL {
            assert_eq!(stats.get(kind), 77, "{} does not match", kind.label());
        }
    }

    #[test]
    fn single_sample() {
        let stats = ChannelStatistics::from_samples(&[3]).unwrap();
        for kind in StatisticKind::ALL {
            assert_eq!(stats.get(kind), 3, "{} does not match", kind.label());
        }
    }

    #[test]
    fn empty_samples_are_rejected() {
        assert!(matches!(
            ChannelStatistics::from_samples(&[]),
            Err(Error::EmptyImage)
        ));
    }

    #[test]
    fn known_distribution() {
        let stats = ChannelStatistics::from_samples(&[9, 1, 7, 3, 5, 2, 8, 4, 6, 10]).unwrap();
        // q1 rank 2.25 -> 3.25, q3 rank 6.75 -> 7.75
        assert_eq!(
            stats,
            ChannelStatistics {
                mean: 5,
                median: 5,
                min: 1,
                max: 10,
                q1: 3,
                q3: 7,
                iqr_mean: 5,
            }
        );
    }

    #[test]
    fn median_of_even_count_is_truncated() {
        assert_eq!(median(&[1, 2]), 1);
        assert_eq!(median(&[10, 13, 200, 255]), 106);
        assert_eq!(median(&[254, 255]), 254);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let sorted = [0, 100];
        assert_eq!(percentile(&sorted, 25.0), 25);
        assert_eq!(percentile(&sorted, 75.0), 75);
        assert_eq!(percentile(&[0, 10, 20, 30, 40], 25.0), 10);
        assert_eq!(percentile(&[0, 10, 20, 30], 75.0), 22);
    }

    #[test]
    fn mean_is_truncated() {
        let stats = ChannelStatistics::from_samples(&[0, 0, 1]).unwrap();
        assert_eq!(stats.mean, 0);
        let stats = ChannelStatistics::from_samples(&[255, 254]).unwrap();
        assert_eq!(stats.mean, 254);
    }

    #[test]
    fn empty_interquartile_range_falls_back_to_mean() {
        // q1 = 2, q3 = 7, no sample lies in between
        let stats = ChannelStatistics::from_samples(&[0, 10]).unwrap();
        assert_eq!(stats.q1, 2);
        assert_eq!(stats.q3, 7);
        assert_eq!(stats.iqr_mean, stats.mean);
        assert_eq!(stats.iqr_mean, 5);
    }

    #[test]
    fn interquartile_mean_excludes_outliers() {
        let mut samples = vec![100_u8; 20];
        samples.extend_from_slice(&[0, 0, 255, 255]);
        let stats = ChannelStatistics::from_samples(&samples).unwrap();
        assert_eq!(stats.iqr_mean, 100);
        assert_eq!(stats.mean, 104);
    }

    #[test]
    fn statistics_are_ordered_for_many_distributions() {
        let mut seed = 0x2545_f491_u32;
        for length in 1..200 {
            let samples: Vec<u8> = (0..length)
                .map(|_| {
                    seed ^= seed << 13;
                    seed ^= seed >> 17;
                    seed ^= seed << 5;
                    (seed >> 24) as u8
                })
                .collect();
            let stats = ChannelStatistics::from_samples(&samples).unwrap();
            assert_ordered(&stats);
            let fallback_taken = !samples
                .iter()
                .any(|&v| v >= stats.q1 && v <= stats.q3);
            if fallback_taken {
                assert_eq!(stats.iqr_mean, stats.mean);
            } else {
                assert!(stats.iqr_mean >= stats.q1 && stats.iqr_mean <= stats.q3);
            }
        }
    }

    #[test]
    fn grayscale_image_has_identical_channels() {
        let dots = (0..36_u8)
            .map(|v| RGBColorFormat::new(v * 7, v * 7, v * 7))
            .collect();
        let image = Image::new(6, 6, dots).unwrap();
        let stats = ColorStatistics::from_image(&image).unwrap();
        assert_eq!(stats.red, stats.green);
        assert_eq!(stats.green, stats.blue);
        assert_eq!(*stats.channel(Channel::Blue), stats.blue);
    }
}
