//! Command line interface

use std::path::PathBuf;

use clap::Parser;

use crate::metric::MetricName;

/// Command line arguments for `imgmatch` binary
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct ImgMatchArgs {
    /// Reference (golden) image file path
    pub golden_filepath: PathBuf,
    /// Candidate image file paths to score against the reference
    #[clap(required = true)]
    pub candidate_filepaths: Vec<PathBuf>,
    /// Distance metric
    #[clap(short, long, default_value_t = MetricName::Dhash)]
    pub metric: MetricName,
    /// Level of logging output
    #[clap(short, long, default_value_t = log::Level::Info)]
    pub verbosity: log::Level,
}
