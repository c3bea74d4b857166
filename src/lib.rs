//! Internal API exposed for `imgmatch` binary

use std::{
    path::{Path, PathBuf},
    process::{ExitCode, Termination},
};

use anyhow::Context as _;
use itertools::Itertools as _;

use crate::metric::{MetricName, Score};

mod buffer;
pub mod cl;
pub mod metric;

/// Status of successful match operation
pub enum MatchStatus {
    /// At least one candidate was scored against the golden image
    Found,
    /// No candidate could be scored
    NotFound,
}

impl Termination for MatchStatus {
    fn report(self) -> ExitCode {
        match self {
            MatchStatus::Found => ExitCode::SUCCESS,
            MatchStatus::NotFound => ExitCode::FAILURE,
        }
    }
}

/// Score every candidate against the golden image, print per candidate
/// scores, and print the candidate ranked best by the metric
pub fn find_best_match(
    metric: MetricName,
    golden_filepath: &Path,
    candidate_filepaths: &[PathBuf],
) -> anyhow::Result<MatchStatus> {
    let golden_img = image::open(golden_filepath)
        .with_context(|| format!("Failed to load golden image {golden_filepath:?}"))?;

    let mut scores: Vec<(&Path, Score)> = Vec::with_capacity(candidate_filepaths.len());
    for candidate_filepath in candidate_filepaths {
        let candidate_img = match image::open(candidate_filepath) {
            Ok(img) => img,
            Err(err) => {
                log::error!("Failed to load candidate image {candidate_filepath:?}: {err:#}");
                continue;
            }
        };
        match metric::compare(metric, &golden_img, &candidate_img) {
            Ok(score) => {
                println!("{}: {score}", candidate_filepath.display());
                scores.push((candidate_filepath.as_path(), score));
            }
            Err(err) => {
                log::error!("Failed to compare {candidate_filepath:?}: {err}");
            }
        }
    }

    // Rank, accounting for SSIM being a similarity instead of a distance
    scores.sort_unstable_by(|(_, a), (_, b)| {
        let ord = a.value().total_cmp(&b.value());
        if metric.higher_is_better() {
            ord.reverse()
        } else {
            ord
        }
    });
    log::debug!(
        "Ranked candidates:\n{}",
        scores
            .iter()
            .map(|(path, score)| format!("{} {score}", path.display()))
            .join("\n")
    );

    if let Some((best_filepath, best_score)) = scores.first() {
        println!(
            "Best match: {} ({metric}: {best_score})",
            best_filepath.display()
        );
        Ok(MatchStatus::Found)
    } else {
        log::warn!("No candidate could be scored against {golden_filepath:?}");
        Ok(MatchStatus::NotFound)
    }
}
