use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use crate::statistics::ColorStatistics;

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}

pub fn log_sample(file_name: &str, statistics: &ColorStatistics) {
    log::info!(
        "{}: mean {:?} median {:?} iqr mean {:?}",
        file_name,
        [statistics.red.mean, statistics.green.mean, statistics.blue.mean],
        [
            statistics.red.median,
            statistics.green.median,
            statistics.blue.median
        ],
        [
            statistics.red.iqr_mean,
            statistics.green.iqr_mean,
            statistics.blue.iqr_mean
        ]
    );
    log::debug!("{}: {:?}", file_name, statistics);
}
