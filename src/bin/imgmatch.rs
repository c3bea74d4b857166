//! imgmatch main binary

use anyhow::Context as _;
use clap::Parser as _;
use imgmatch::{MatchStatus, cl, find_best_match};

fn main() -> anyhow::Result<MatchStatus> {
    // Parse CL args
    let cl_args = cl::ImgMatchArgs::parse();

    // Init logger
    simple_logger::init_with_level(cl_args.verbosity).context("Failed to setup logger")?;

    // Run
    find_best_match(
        cl_args.metric,
        &cl_args.golden_filepath,
        &cl_args.candidate_filepaths,
    )
}
